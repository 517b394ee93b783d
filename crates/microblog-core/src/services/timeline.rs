//! Posting and the three post listings: home feed, explore and profile.

use std::sync::Arc;

use crate::domain::{AuthoredPost, MAX_POST_LENGTH, Page, PageRequest, Post, User};
use crate::error::DomainError;
use crate::ports::{BaseRepository, PostRepository};

pub struct Timeline {
    posts: Arc<dyn PostRepository>,
    per_page: u64,
}

impl Timeline {
    /// `per_page` is the configured page size; callers only choose the page.
    pub fn new(posts: Arc<dyn PostRepository>, per_page: u64) -> Self {
        Self {
            posts,
            per_page: per_page.max(1),
        }
    }

    pub fn per_page(&self) -> u64 {
        self.per_page
    }

    fn request(&self, page: Option<u64>) -> PageRequest {
        PageRequest::new(page.unwrap_or(1), self.per_page)
    }

    pub async fn submit_post(&self, author: &User, body: &str) -> Result<Post, DomainError> {
        let body = body.trim();
        if body.is_empty() {
            return Err(DomainError::Validation("Post body is required".to_string()));
        }
        if body.chars().count() > MAX_POST_LENGTH {
            return Err(DomainError::Validation(format!(
                "Post must be at most {MAX_POST_LENGTH} characters"
            )));
        }

        let post = self
            .posts
            .create(Post::new(author.id, body.to_string()))
            .await?;
        tracing::info!(post_id = %post.id, author = %author.username, "Post published");
        Ok(post)
    }

    /// Posts by followed users plus the user's own, newest first.
    pub async fn home_feed(
        &self,
        user: &User,
        page: Option<u64>,
    ) -> Result<Page<AuthoredPost>, DomainError> {
        Ok(self.posts.followed_posts(user.id, self.request(page)).await?)
    }

    /// Every post, newest first, regardless of follows.
    pub async fn explore(&self, page: Option<u64>) -> Result<Page<AuthoredPost>, DomainError> {
        Ok(self.posts.all_posts(self.request(page)).await?)
    }

    /// Posts written by `author`, newest first.
    pub async fn user_posts(
        &self,
        author: &User,
        page: Option<u64>,
    ) -> Result<Page<AuthoredPost>, DomainError> {
        Ok(self.posts.find_by_author(author.id, self.request(page)).await?)
    }
}
