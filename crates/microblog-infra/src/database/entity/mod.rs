//! SeaORM entities, one per table.

pub mod follow;
pub mod post;
pub mod user;
