//! Request extractors and response plumbing shared by the handlers.

pub mod auth;
pub mod error;
pub mod flash;
