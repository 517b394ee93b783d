//! # Microblog Web Server
//!
//! actix-web application serving the microblog as server-rendered HTML.
//! `main.rs` wires configuration, telemetry and the database; everything
//! reachable from a request lives here so it can be driven by tests.

pub mod config;
pub mod handlers;
pub mod middleware;
pub mod state;
pub mod telemetry;
pub mod views;

pub use config::AppConfig;
pub use state::AppState;
