//! Home feed, posting and explore.

use actix_web::{HttpResponse, web};

use microblog_core::DomainError;
use microblog_shared::{FormErrors, PageQuery, PostForm};

use crate::middleware::auth::CurrentUser;
use crate::middleware::error::AppResult;
use crate::middleware::flash::{Flashes, redirect_with_flash};
use crate::state::AppState;
use crate::views::{self, PageContext};

/// GET / and /index
pub async fn index(
    state: web::Data<AppState>,
    CurrentUser(user): CurrentUser,
    flashes: Flashes,
    query: web::Query<PageQuery>,
) -> AppResult<HttpResponse> {
    let feed = state.timeline.home_feed(&user, query.page()).await?;
    let body = views::index_page(&user, "", &FormErrors::new(), &feed);
    Ok(views::render(
        &PageContext::new("Home", Some(&user), &flashes),
        &body,
    ))
}

/// POST / and /index
pub async fn submit_post(
    state: web::Data<AppState>,
    CurrentUser(user): CurrentUser,
    flashes: Flashes,
    form: web::Form<PostForm>,
) -> AppResult<HttpResponse> {
    let form = form.into_inner();
    let errors = match form.validate() {
        Ok(()) => match state.timeline.submit_post(&user, &form.post).await {
            Ok(_) => return Ok(redirect_with_flash("/index", "Your post is now live!")),
            Err(DomainError::Validation(message)) => {
                let mut errors = FormErrors::new();
                errors.add("post", message);
                errors
            }
            Err(e) => return Err(e.into()),
        },
        Err(errors) => errors,
    };

    // Invalid submissions re-render the first page with the draft kept.
    let feed = state.timeline.home_feed(&user, None).await?;
    let body = views::index_page(&user, &form.post, &errors, &feed);
    Ok(views::render(
        &PageContext::new("Home", Some(&user), &flashes),
        &body,
    ))
}

/// GET /explore
pub async fn explore(
    state: web::Data<AppState>,
    CurrentUser(user): CurrentUser,
    flashes: Flashes,
    query: web::Query<PageQuery>,
) -> AppResult<HttpResponse> {
    let posts = state.timeline.explore(query.page()).await?;
    let body = views::explore_page(&posts);
    Ok(views::render(
        &PageContext::new("Explore", Some(&user), &flashes),
        &body,
    ))
}
