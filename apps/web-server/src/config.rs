//! Application configuration loaded from environment variables.

use std::env;

use microblog_infra::{DatabaseConfig, JwtConfig};

const DEFAULT_DATABASE_URL: &str = "sqlite://microblog.db?mode=rwc";

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub database: DatabaseConfig,
    /// Page size of every post listing.
    pub posts_per_page: u64,
    /// Apply pending migrations at startup.
    pub auto_migrate: bool,
    pub session: JwtConfig,
}

fn parsed<T: std::str::FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(default)
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let database = DatabaseConfig {
            url: env::var("DATABASE_URL").unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string()),
            max_connections: parsed("DB_MAX_CONNECTIONS", 10),
            min_connections: parsed("DB_MIN_CONNECTIONS", 1),
            log_statements: parsed("DB_LOG_STATEMENTS", false),
        };

        Self {
            host: env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: parsed("PORT", 8080),
            database,
            posts_per_page: parsed("POSTS_PER_PAGE", 3u64).max(1),
            auto_migrate: env::var("AUTO_MIGRATE")
                .map(|v| v != "false" && v != "0")
                .unwrap_or(true),
            session: JwtConfig::from_env(),
        }
    }
}
