//! Follow and unfollow actions, posted from profile pages.

use actix_web::{HttpResponse, web};

use microblog_core::services::{FollowOutcome, UnfollowOutcome};

use crate::middleware::auth::CurrentUser;
use crate::middleware::error::AppResult;
use crate::middleware::flash::redirect_with_flash;
use crate::state::AppState;
use crate::views::user_path;

/// POST /follow/{username}
pub async fn follow(
    state: web::Data<AppState>,
    CurrentUser(me): CurrentUser,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let target = path.into_inner();
    let response = match state.social.follow(&me, &target).await? {
        FollowOutcome::Followed(user) => redirect_with_flash(
            &user_path(&user.username),
            format!("You are following {}!", user.username),
        ),
        FollowOutcome::UnknownUser(name) => {
            redirect_with_flash("/index", format!("User {name} not found."))
        }
        FollowOutcome::SelfTarget(user) => {
            redirect_with_flash(&user_path(&user.username), "You cannot follow yourself!")
        }
    };
    Ok(response)
}

/// POST /unfollow/{username}
pub async fn unfollow(
    state: web::Data<AppState>,
    CurrentUser(me): CurrentUser,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let target = path.into_inner();
    let response = match state.social.unfollow(&me, &target).await? {
        UnfollowOutcome::Unfollowed(user) => redirect_with_flash(
            &user_path(&user.username),
            format!("You are not following {}.", user.username),
        ),
        UnfollowOutcome::UnknownUser(name) => {
            redirect_with_flash("/index", format!("User {name} not found."))
        }
        UnfollowOutcome::SelfTarget(user) => {
            redirect_with_flash(&user_path(&user.username), "You cannot unfollow yourself!")
        }
    };
    Ok(response)
}
