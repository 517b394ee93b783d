//! Health check endpoint.

use actix_web::{HttpResponse, web};
use serde::Serialize;

use crate::state::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub timestamp: String,
}

/// Server status, including whether the database answers.
///
/// GET /health
pub async fn health_check(state: web::Data<AppState>) -> HttpResponse {
    let (status, mut response) = match state.db.ping().await {
        Ok(()) => ("ok", HttpResponse::Ok()),
        Err(e) => {
            tracing::error!(error = %e, "Database ping failed");
            ("degraded", HttpResponse::ServiceUnavailable())
        }
    };

    response.json(HealthResponse {
        status,
        version: env!("CARGO_PKG_VERSION"),
        timestamp: chrono::Utc::now().to_rfc3339(),
    })
}
