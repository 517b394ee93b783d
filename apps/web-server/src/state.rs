//! Application state - shared across all handlers.

use std::sync::Arc;

use microblog_core::ports::{
    FollowRepository, PasswordService, PostRepository, TokenService, UserRepository,
};
use microblog_core::services::{AccountService, SocialGraph, Timeline};
use microblog_infra::database::DbConn;
use microblog_infra::{
    Argon2PasswordService, JwtTokenService, SeaOrmFollowRepository, SeaOrmPostRepository,
    SeaOrmUserRepository,
};

use crate::config::AppConfig;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub db: DbConn,
    pub accounts: Arc<AccountService>,
    pub timeline: Arc<Timeline>,
    pub social: Arc<SocialGraph>,
    pub tokens: Arc<dyn TokenService>,
}

impl AppState {
    /// Build the services on top of one database connection pool.
    pub fn new(db: DbConn, config: &AppConfig) -> Self {
        let users: Arc<dyn UserRepository> = Arc::new(SeaOrmUserRepository::new(db.clone()));
        let posts: Arc<dyn PostRepository> = Arc::new(SeaOrmPostRepository::new(db.clone()));
        let follows: Arc<dyn FollowRepository> =
            Arc::new(SeaOrmFollowRepository::new(db.clone()));
        let passwords: Arc<dyn PasswordService> = Arc::new(Argon2PasswordService::new());
        let tokens: Arc<dyn TokenService> =
            Arc::new(JwtTokenService::new(config.session.clone()));

        tracing::info!("Application state initialized");

        Self {
            db,
            accounts: Arc::new(AccountService::new(users.clone(), passwords)),
            timeline: Arc::new(Timeline::new(posts, config.posts_per_page)),
            social: Arc::new(SocialGraph::new(users, follows)),
            tokens,
        }
    }
}
