//! Session cookie and the extractors that resolve it to a user.

use actix_web::cookie::{Cookie, SameSite, time::Duration};
use actix_web::{FromRequest, HttpRequest, dev::Payload, web};
use futures::future::LocalBoxFuture;

use microblog_core::domain::User;

use crate::middleware::error::AppError;
use crate::state::AppState;

pub const SESSION_COOKIE: &str = "session";

/// Cookie carrying a session token. With `max_age` the cookie outlives the
/// browser session ("remember me"); without it the browser drops it on exit.
pub fn session_cookie(token: String, max_age: Option<Duration>) -> Cookie<'static> {
    let mut builder = Cookie::build(SESSION_COOKIE, token)
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax);
    if let Some(age) = max_age {
        builder = builder.max_age(age);
    }
    builder.finish()
}

pub fn clear_session_cookie() -> Cookie<'static> {
    let mut cookie = session_cookie(String::new(), None);
    cookie.make_removal();
    cookie
}

/// Resolve the session cookie to a stored user and stamp their last-seen time.
///
/// A missing, expired or forged token, or one naming a user that no longer
/// exists, yields `Ok(None)`.
async fn resolve_session(
    state: Option<web::Data<AppState>>,
    token: Option<String>,
) -> Result<Option<User>, AppError> {
    let Some(state) = state else {
        tracing::error!("AppState not found in app data");
        return Err(AppError::Internal("Server configuration error".to_string()));
    };
    let Some(token) = token else {
        return Ok(None);
    };

    let claims = match state.tokens.validate_token(&token) {
        Ok(claims) => claims,
        Err(e) => {
            tracing::debug!(error = %e, "Rejected session token");
            return Ok(None);
        }
    };

    let Some(mut user) = state.accounts.find_by_id(claims.user_id).await? else {
        tracing::warn!(user_id = %claims.user_id, "Session for unknown user");
        return Ok(None);
    };
    state.accounts.touch(&mut user).await?;
    Ok(Some(user))
}

fn session_token(req: &HttpRequest) -> Option<String> {
    req.cookie(SESSION_COOKIE)
        .map(|c| c.value().to_string())
        .filter(|v| !v.is_empty())
}

/// The signed-in user. Anonymous requests are redirected to the login form
/// with the current path as `next`.
///
/// ```ignore
/// async fn protected_route(CurrentUser(user): CurrentUser) -> impl Responder {
///     format!("Hello, {}!", user.username)
/// }
/// ```
#[derive(Debug, Clone)]
pub struct CurrentUser(pub User);

impl FromRequest for CurrentUser {
    type Error = AppError;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let state = req.app_data::<web::Data<AppState>>().cloned();
        let token = session_token(req);
        let next = req
            .uri()
            .path_and_query()
            .map(|pq| pq.as_str().to_string())
            .unwrap_or_else(|| "/".to_string());

        Box::pin(async move {
            match resolve_session(state, token).await? {
                Some(user) => Ok(CurrentUser(user)),
                None => Err(AppError::LoginRequired { next }),
            }
        })
    }
}

/// Optional user extractor - doesn't fail if not signed in.
#[derive(Debug, Clone)]
pub struct MaybeUser(pub Option<User>);

impl FromRequest for MaybeUser {
    type Error = AppError;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let state = req.app_data::<web::Data<AppState>>().cloned();
        let token = session_token(req);

        Box::pin(async move { Ok(MaybeUser(resolve_session(state, token).await?)) })
    }
}
