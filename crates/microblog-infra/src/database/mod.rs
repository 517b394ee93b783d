//! Database connection management and SeaORM repositories.

mod base;
mod connections;
pub mod entity;
mod repositories;

pub use base::SeaOrmRepository;
pub use connections::{DatabaseConfig, connect};
pub use repositories::{SeaOrmFollowRepository, SeaOrmPostRepository, SeaOrmUserRepository};
pub use sea_orm::DbConn;
