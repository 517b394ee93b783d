use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::{AuthoredPost, Page, PageRequest, Post, User};
use crate::error::RepoError;

/// Generic repository trait for entities keyed by a single ID.
///
/// There is no delete: users and posts live for the lifetime of the database.
#[async_trait]
pub trait BaseRepository<T, ID>: Send + Sync {
    /// Find an entity by its unique ID.
    async fn find_by_id(&self, id: ID) -> Result<Option<T>, RepoError>;

    /// Insert a new entity.
    async fn create(&self, entity: T) -> Result<T, RepoError>;

    /// Overwrite an existing entity.
    async fn update(&self, entity: T) -> Result<T, RepoError>;
}

/// User repository with lookups by the unique profile fields.
#[async_trait]
pub trait UserRepository: BaseRepository<User, Uuid> {
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, RepoError>;

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError>;

    /// Record that the user was active at `at`.
    async fn touch_last_seen(&self, id: Uuid, at: DateTime<Utc>) -> Result<(), RepoError>;
}

/// Post repository. Every listing is newest first.
#[async_trait]
pub trait PostRepository: BaseRepository<Post, Uuid> {
    /// Posts written by one user.
    async fn find_by_author(
        &self,
        user_id: Uuid,
        page: PageRequest,
    ) -> Result<Page<AuthoredPost>, RepoError>;

    /// Posts by everyone `user_id` follows plus the user's own posts.
    async fn followed_posts(
        &self,
        user_id: Uuid,
        page: PageRequest,
    ) -> Result<Page<AuthoredPost>, RepoError>;

    /// Every post in the system.
    async fn all_posts(&self, page: PageRequest) -> Result<Page<AuthoredPost>, RepoError>;
}

/// The follow graph.
#[async_trait]
pub trait FollowRepository: Send + Sync {
    /// Add the edge if absent. Returns `true` when a new edge was stored.
    async fn follow(&self, follower_id: Uuid, followed_id: Uuid) -> Result<bool, RepoError>;

    /// Remove the edge if present. Returns `true` when an edge was removed.
    async fn unfollow(&self, follower_id: Uuid, followed_id: Uuid) -> Result<bool, RepoError>;

    async fn is_following(&self, follower_id: Uuid, followed_id: Uuid) -> Result<bool, RepoError>;

    /// IDs of everyone `follower_id` follows.
    async fn followed_ids(&self, follower_id: Uuid) -> Result<Vec<Uuid>, RepoError>;

    async fn followers_count(&self, user_id: Uuid) -> Result<u64, RepoError>;

    async fn following_count(&self, user_id: Uuid) -> Result<u64, RepoError>;
}
