use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Longest accepted post body.
pub const MAX_POST_LENGTH: usize = 140;

/// Post entity - a short text update owned by one user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
    pub id: Uuid,
    pub body: String,
    pub timestamp: DateTime<Utc>,
    pub user_id: Uuid,
}

impl Post {
    /// Create a new post stamped with the current time.
    pub fn new(user_id: Uuid, body: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            body,
            timestamp: Utc::now(),
            user_id,
        }
    }
}

/// A post together with its author's username, as listed in feeds.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthoredPost {
    pub post: Post,
    pub author: String,
}
