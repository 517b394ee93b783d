//! Error handling - every failure is answered with an HTML page or a redirect.

use actix_web::http::header::{self, ContentType};
use actix_web::{HttpResponse, ResponseError, http::StatusCode};

use microblog_core::DomainError;

use crate::views;

/// Application-level error type.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    /// No valid session; send the browser to the login form.
    #[error("Login required for {next}")]
    LoginRequired { next: String },

    #[error("Internal error: {0}")]
    Internal(String),
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::LoginRequired { .. } => StatusCode::SEE_OTHER,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let (title, detail) = match self {
            AppError::LoginRequired { next } => {
                let location = format!("/login?next={}", urlencoding::encode(next));
                return HttpResponse::SeeOther()
                    .insert_header((header::LOCATION, location))
                    .finish();
            }
            AppError::NotFound(detail) => ("File Not Found", detail.as_str()),
            AppError::BadRequest(detail) => ("Bad Request", detail.as_str()),
            AppError::Conflict(detail) => ("Conflict", detail.as_str()),
            AppError::Internal(detail) => {
                tracing::error!("Internal error: {}", detail);
                (
                    "An unexpected error has occurred",
                    "The administrator has been notified. Sorry for the inconvenience!",
                )
            }
        };

        HttpResponse::build(self.status_code())
            .content_type(ContentType::html())
            .body(views::error_page(title, detail))
    }
}

impl From<DomainError> for AppError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::Validation(msg) => AppError::BadRequest(msg),
            DomainError::Taken { message, .. } => AppError::Conflict(message),
            DomainError::Duplicate(msg) => AppError::Conflict(msg),
            DomainError::Internal(msg) => AppError::Internal(msg),
        }
    }
}

/// Result type alias for handlers.
pub type AppResult<T> = Result<T, AppError>;
