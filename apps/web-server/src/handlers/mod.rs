//! HTTP handlers and route configuration.

mod auth;
mod feed;
mod health;
mod social;
mod users;

use actix_web::web;

/// Configure all application routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg
        // Public routes
        .route("/health", web::get().to(health::health_check))
        .route("/explore", web::get().to(feed::explore))
        // Sessions and accounts
        .service(
            web::resource("/login")
                .route(web::get().to(auth::login_form))
                .route(web::post().to(auth::login)),
        )
        .route("/logout", web::get().to(auth::logout))
        .service(
            web::resource("/register")
                .route(web::get().to(auth::register_form))
                .route(web::post().to(auth::register)),
        )
        // Signed-in routes
        .service(
            web::resource(["/", "/index"])
                .route(web::get().to(feed::index))
                .route(web::post().to(feed::submit_post)),
        )
        .route("/user/{username}", web::get().to(users::profile))
        .service(
            web::resource("/edit_profile")
                .route(web::get().to(users::edit_profile_form))
                .route(web::post().to(users::edit_profile)),
        )
        .route("/follow/{username}", web::post().to(social::follow))
        .route("/unfollow/{username}", web::post().to(social::unfollow));
}
