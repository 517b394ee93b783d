//! # Microblog Core
//!
//! The domain layer of the microblog: users, posts, the follow graph and the
//! feed queries built on top of them. No infrastructure lives here; storage and
//! password hashing are reached through the traits in [`ports`].

pub mod domain;
pub mod error;
pub mod ports;
pub mod services;

pub use error::DomainError;
