use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Longest accepted "about me" text.
pub const MAX_ABOUT_ME_LENGTH: usize = 140;

/// User entity - a registered account and its public profile.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub about_me: Option<String>,
    pub last_seen: DateTime<Utc>,
}

impl User {
    /// Create a new user with a generated ID, seen just now.
    pub fn new(username: String, email: String, password_hash: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            username,
            email,
            password_hash,
            about_me: None,
            last_seen: Utc::now(),
        }
    }
}
