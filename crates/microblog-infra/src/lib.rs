//! # Microblog Infrastructure
//!
//! Concrete implementations of the ports defined in `microblog-core`:
//! SeaORM-backed repositories (SQLite or PostgreSQL, chosen by URL) and the
//! Argon2 + JWT authentication services.

pub mod auth;
pub mod database;

pub use auth::{Argon2PasswordService, JwtConfig, JwtTokenService};
pub use database::{
    DatabaseConfig, SeaOrmFollowRepository, SeaOrmPostRepository, SeaOrmUserRepository,
};
