//! Sign in, sign out and registration.

use actix_web::cookie::time::Duration;
use actix_web::{HttpResponse, web};

use microblog_core::DomainError;
use microblog_shared::{FormErrors, LoginForm, LoginQuery, RegistrationForm};

use crate::middleware::auth::{MaybeUser, clear_session_cookie, session_cookie};
use crate::middleware::error::{AppError, AppResult};
use crate::middleware::flash::{Flashes, redirect, redirect_with_flash};
use crate::state::AppState;
use crate::views::{self, PageContext};

/// GET /login
pub async fn login_form(
    MaybeUser(user): MaybeUser,
    flashes: Flashes,
    query: web::Query<LoginQuery>,
) -> HttpResponse {
    if user.is_some() {
        return redirect("/index");
    }
    let body = views::login_page(&LoginForm::default(), &FormErrors::new(), query.safe_next());
    views::render(&PageContext::new("Sign In", None, &flashes), &body)
}

/// POST /login
pub async fn login(
    state: web::Data<AppState>,
    MaybeUser(user): MaybeUser,
    flashes: Flashes,
    query: web::Query<LoginQuery>,
    form: web::Form<LoginForm>,
) -> AppResult<HttpResponse> {
    if user.is_some() {
        return Ok(redirect("/index"));
    }
    let form = form.into_inner();
    if let Err(errors) = form.validate() {
        let body = views::login_page(&form, &errors, query.safe_next());
        return Ok(views::render(
            &PageContext::new("Sign In", None, &flashes),
            &body,
        ));
    }

    let Some(user) = state
        .accounts
        .authenticate(form.username.trim(), &form.password)
        .await?
    else {
        return Ok(redirect_with_flash("/login", "Invalid username or password"));
    };

    let token = state
        .tokens
        .generate_token(user.id, &user.username)
        .map_err(|e| AppError::Internal(e.to_string()))?;
    let max_age = form
        .remember()
        .then(|| Duration::seconds(state.tokens.expiration_seconds()));

    tracing::info!(user_id = %user.id, username = %user.username, remember = form.remember(), "User signed in");

    let target = query.safe_next().unwrap_or("/index");
    let mut response = redirect(target);
    response
        .add_cookie(&session_cookie(token, max_age))
        .map_err(|e| AppError::Internal(e.to_string()))?;
    Ok(response)
}

/// GET /logout
pub async fn logout() -> AppResult<HttpResponse> {
    let mut response = redirect("/index");
    response
        .add_cookie(&clear_session_cookie())
        .map_err(|e| AppError::Internal(e.to_string()))?;
    Ok(response)
}

/// GET /register
pub async fn register_form(MaybeUser(user): MaybeUser, flashes: Flashes) -> HttpResponse {
    if user.is_some() {
        return redirect("/index");
    }
    let body = views::register_page(&RegistrationForm::default(), &FormErrors::new());
    views::render(&PageContext::new("Register", None, &flashes), &body)
}

/// POST /register
pub async fn register(
    state: web::Data<AppState>,
    MaybeUser(user): MaybeUser,
    flashes: Flashes,
    form: web::Form<RegistrationForm>,
) -> AppResult<HttpResponse> {
    if user.is_some() {
        return Ok(redirect("/index"));
    }
    let form = form.into_inner();
    let rerender = |errors: &FormErrors| {
        let body = views::register_page(&form, errors);
        views::render(&PageContext::new("Register", None, &flashes), &body)
    };

    if let Err(errors) = form.validate() {
        return Ok(rerender(&errors));
    }

    match state
        .accounts
        .register(form.username.trim(), form.email.trim(), &form.password)
        .await
    {
        Ok(_) => Ok(redirect_with_flash(
            "/login",
            "Congratulations, you are now a registered user!",
        )),
        Err(DomainError::Taken { field, message }) => {
            let mut errors = FormErrors::new();
            errors.add(field, message);
            Ok(rerender(&errors))
        }
        Err(e) => Err(e.into()),
    }
}
