use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A directed follow edge: `follower_id` sees the posts of `followed_id`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Follow {
    pub follower_id: Uuid,
    pub followed_id: Uuid,
}

impl Follow {
    pub fn new(follower_id: Uuid, followed_id: Uuid) -> Self {
        Self {
            follower_id,
            followed_id,
        }
    }
}
