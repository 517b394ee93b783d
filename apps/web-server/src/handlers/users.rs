//! Profiles and profile editing.

use actix_web::{HttpResponse, web};

use microblog_core::DomainError;
use microblog_shared::{EditProfileForm, FormErrors, PageQuery};

use crate::middleware::auth::CurrentUser;
use crate::middleware::error::{AppError, AppResult};
use crate::middleware::flash::{Flashes, redirect_with_flash};
use crate::state::AppState;
use crate::views::{self, PageContext};

/// GET /user/{username}
pub async fn profile(
    state: web::Data<AppState>,
    CurrentUser(viewer): CurrentUser,
    flashes: Flashes,
    path: web::Path<String>,
    query: web::Query<PageQuery>,
) -> AppResult<HttpResponse> {
    let username = path.into_inner();
    let subject = state
        .accounts
        .find_by_username(&username)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("User {username} not found.")))?;

    let stats = state.social.stats(&viewer, &subject).await?;
    let posts = state.timeline.user_posts(&subject, query.page()).await?;

    let body = views::profile_page(&viewer, &subject, &stats, &posts);
    let title = subject.username.clone();
    Ok(views::render(
        &PageContext::new(&title, Some(&viewer), &flashes),
        &body,
    ))
}

/// GET /edit_profile
pub async fn edit_profile_form(
    CurrentUser(user): CurrentUser,
    flashes: Flashes,
) -> HttpResponse {
    let form = EditProfileForm {
        username: user.username.clone(),
        about_me: user.about_me.clone().unwrap_or_default(),
    };
    let body = views::edit_profile_page(&form, &FormErrors::new());
    views::render(
        &PageContext::new("Edit Profile", Some(&user), &flashes),
        &body,
    )
}

/// POST /edit_profile
pub async fn edit_profile(
    state: web::Data<AppState>,
    CurrentUser(user): CurrentUser,
    flashes: Flashes,
    form: web::Form<EditProfileForm>,
) -> AppResult<HttpResponse> {
    let form = form.into_inner();
    let errors = match form.validate() {
        Ok(()) => {
            match state
                .accounts
                .update_profile(user.clone(), form.username.trim(), &form.about_me)
                .await
            {
                Ok(updated) => {
                    tracing::info!(user_id = %updated.id, username = %updated.username, "Profile updated");
                    return Ok(redirect_with_flash(
                        "/edit_profile",
                        "Your changes have been saved.",
                    ));
                }
                Err(DomainError::Taken { field, message }) => {
                    let mut errors = FormErrors::new();
                    errors.add(field, message);
                    errors
                }
                Err(e) => return Err(e.into()),
            }
        }
        Err(errors) => errors,
    };

    let body = views::edit_profile_page(&form, &errors);
    Ok(views::render(
        &PageContext::new("Edit Profile", Some(&user), &flashes),
        &body,
    ))
}
