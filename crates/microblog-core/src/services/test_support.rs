//! In-memory fakes of the ports, for exercising the services.

use std::collections::HashSet;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::{AuthoredPost, Follow, Page, PageRequest, Post, User};
use crate::error::RepoError;
use crate::ports::{
    AuthError, BaseRepository, FollowRepository, PasswordService, PostRepository, UserRepository,
};

#[derive(Default)]
pub struct MemoryStore {
    users: Mutex<Vec<User>>,
    posts: Mutex<Vec<Post>>,
    follows: Mutex<HashSet<Follow>>,
}

impl MemoryStore {
    fn page_of(&self, keep: impl Fn(&Post) -> bool, page: PageRequest) -> Page<AuthoredPost> {
        let users = self.users.lock().unwrap();
        let mut posts: Vec<Post> = self
            .posts
            .lock()
            .unwrap()
            .iter()
            .filter(|p| keep(p))
            .cloned()
            .collect();
        posts.sort_by(|a, b| b.timestamp.cmp(&a.timestamp).then(b.id.cmp(&a.id)));

        let total = posts.len() as u64;
        let items = posts
            .into_iter()
            .skip(page.offset() as usize)
            .take(page.per_page() as usize)
            .map(|post| {
                let author = users
                    .iter()
                    .find(|u| u.id == post.user_id)
                    .map(|u| u.username.clone())
                    .unwrap_or_default();
                AuthoredPost { post, author }
            })
            .collect();
        Page::new(items, page, total)
    }
}

#[async_trait]
impl BaseRepository<User, Uuid> for MemoryStore {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, RepoError> {
        Ok(self.users.lock().unwrap().iter().find(|u| u.id == id).cloned())
    }

    async fn create(&self, user: User) -> Result<User, RepoError> {
        self.users.lock().unwrap().push(user.clone());
        Ok(user)
    }

    async fn update(&self, user: User) -> Result<User, RepoError> {
        let mut users = self.users.lock().unwrap();
        let slot = users
            .iter_mut()
            .find(|u| u.id == user.id)
            .ok_or(RepoError::NotFound)?;
        *slot = user.clone();
        Ok(user)
    }
}

#[async_trait]
impl UserRepository for MemoryStore {
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, RepoError> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.username == username)
            .cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.email == email)
            .cloned())
    }

    async fn touch_last_seen(&self, id: Uuid, at: DateTime<Utc>) -> Result<(), RepoError> {
        if let Some(user) = self.users.lock().unwrap().iter_mut().find(|u| u.id == id) {
            user.last_seen = at;
        }
        Ok(())
    }
}

#[async_trait]
impl BaseRepository<Post, Uuid> for MemoryStore {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Post>, RepoError> {
        Ok(self.posts.lock().unwrap().iter().find(|p| p.id == id).cloned())
    }

    async fn create(&self, post: Post) -> Result<Post, RepoError> {
        self.posts.lock().unwrap().push(post.clone());
        Ok(post)
    }

    async fn update(&self, post: Post) -> Result<Post, RepoError> {
        let mut posts = self.posts.lock().unwrap();
        let slot = posts
            .iter_mut()
            .find(|p| p.id == post.id)
            .ok_or(RepoError::NotFound)?;
        *slot = post.clone();
        Ok(post)
    }
}

#[async_trait]
impl PostRepository for MemoryStore {
    async fn find_by_author(
        &self,
        user_id: Uuid,
        page: PageRequest,
    ) -> Result<Page<AuthoredPost>, RepoError> {
        Ok(self.page_of(|p| p.user_id == user_id, page))
    }

    async fn followed_posts(
        &self,
        user_id: Uuid,
        page: PageRequest,
    ) -> Result<Page<AuthoredPost>, RepoError> {
        let followed = self.followed_ids(user_id).await?;
        Ok(self.page_of(
            |p| p.user_id == user_id || followed.contains(&p.user_id),
            page,
        ))
    }

    async fn all_posts(&self, page: PageRequest) -> Result<Page<AuthoredPost>, RepoError> {
        Ok(self.page_of(|_| true, page))
    }
}

#[async_trait]
impl FollowRepository for MemoryStore {
    async fn follow(&self, follower_id: Uuid, followed_id: Uuid) -> Result<bool, RepoError> {
        Ok(self
            .follows
            .lock()
            .unwrap()
            .insert(Follow::new(follower_id, followed_id)))
    }

    async fn unfollow(&self, follower_id: Uuid, followed_id: Uuid) -> Result<bool, RepoError> {
        Ok(self
            .follows
            .lock()
            .unwrap()
            .remove(&Follow::new(follower_id, followed_id)))
    }

    async fn is_following(&self, follower_id: Uuid, followed_id: Uuid) -> Result<bool, RepoError> {
        Ok(self
            .follows
            .lock()
            .unwrap()
            .contains(&Follow::new(follower_id, followed_id)))
    }

    async fn followed_ids(&self, follower_id: Uuid) -> Result<Vec<Uuid>, RepoError> {
        Ok(self
            .follows
            .lock()
            .unwrap()
            .iter()
            .filter(|f| f.follower_id == follower_id)
            .map(|f| f.followed_id)
            .collect())
    }

    async fn followers_count(&self, user_id: Uuid) -> Result<u64, RepoError> {
        Ok(self
            .follows
            .lock()
            .unwrap()
            .iter()
            .filter(|f| f.followed_id == user_id)
            .count() as u64)
    }

    async fn following_count(&self, user_id: Uuid) -> Result<u64, RepoError> {
        Ok(self
            .follows
            .lock()
            .unwrap()
            .iter()
            .filter(|f| f.follower_id == user_id)
            .count() as u64)
    }
}

/// Reversible stand-in for a real hash.
pub struct PlainPasswords;

impl PasswordService for PlainPasswords {
    fn hash(&self, password: &str) -> Result<String, AuthError> {
        Ok(format!("plain${password}"))
    }

    fn verify(&self, password: &str, hash: &str) -> Result<bool, AuthError> {
        Ok(hash.strip_prefix("plain$") == Some(password))
    }
}
