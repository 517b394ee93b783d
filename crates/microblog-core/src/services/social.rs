//! Follow and unfollow between users, addressed by username.

use std::sync::Arc;

use crate::domain::User;
use crate::error::DomainError;
use crate::ports::{BaseRepository, FollowRepository, UserRepository};

/// Result of a follow request. Only `Followed` changes anything.
#[derive(Debug)]
pub enum FollowOutcome {
    Followed(User),
    UnknownUser(String),
    SelfTarget(User),
}

/// Result of an unfollow request. Only `Unfollowed` changes anything.
#[derive(Debug)]
pub enum UnfollowOutcome {
    Unfollowed(User),
    UnknownUser(String),
    SelfTarget(User),
}

/// Follow counters shown on a profile, from the viewer's point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FollowStats {
    pub followers: u64,
    pub following: u64,
    pub viewer_follows: bool,
}

pub struct SocialGraph {
    users: Arc<dyn UserRepository>,
    follows: Arc<dyn FollowRepository>,
}

impl SocialGraph {
    pub fn new(users: Arc<dyn UserRepository>, follows: Arc<dyn FollowRepository>) -> Self {
        Self { users, follows }
    }

    /// Make `me` follow `target`. Following someone twice is a no-op.
    pub async fn follow(&self, me: &User, target: &str) -> Result<FollowOutcome, DomainError> {
        let Some(user) = self.users.find_by_username(target).await? else {
            tracing::warn!(follower = %me.username, %target, "Follow of unknown user");
            return Ok(FollowOutcome::UnknownUser(target.to_string()));
        };
        if user.id == me.id {
            tracing::warn!(user = %me.username, "Attempt to follow self");
            return Ok(FollowOutcome::SelfTarget(user));
        }

        if self.follows.follow(me.id, user.id).await? {
            tracing::info!(follower = %me.username, followed = %user.username, "Follow added");
        }
        Ok(FollowOutcome::Followed(user))
    }

    /// Remove `me -> target`. Unfollowing someone not followed is a no-op.
    pub async fn unfollow(&self, me: &User, target: &str) -> Result<UnfollowOutcome, DomainError> {
        let Some(user) = self.users.find_by_username(target).await? else {
            tracing::warn!(follower = %me.username, %target, "Unfollow of unknown user");
            return Ok(UnfollowOutcome::UnknownUser(target.to_string()));
        };
        if user.id == me.id {
            tracing::warn!(user = %me.username, "Attempt to unfollow self");
            return Ok(UnfollowOutcome::SelfTarget(user));
        }

        if self.follows.unfollow(me.id, user.id).await? {
            tracing::info!(follower = %me.username, followed = %user.username, "Follow removed");
        }
        Ok(UnfollowOutcome::Unfollowed(user))
    }

    pub async fn is_following(&self, me: &User, other: &User) -> Result<bool, DomainError> {
        Ok(self.follows.is_following(me.id, other.id).await?)
    }

    /// Users `me` follows, as stored in the graph.
    pub async fn followed(&self, me: &User) -> Result<Vec<User>, DomainError> {
        let mut users = Vec::new();
        for id in self.follows.followed_ids(me.id).await? {
            if let Some(user) = self.users.find_by_id(id).await? {
                users.push(user);
            }
        }
        users.sort_by(|a, b| a.username.cmp(&b.username));
        Ok(users)
    }

    pub async fn stats(&self, viewer: &User, subject: &User) -> Result<FollowStats, DomainError> {
        Ok(FollowStats {
            followers: self.follows.followers_count(subject.id).await?,
            following: self.follows.following_count(subject.id).await?,
            viewer_follows: viewer.id != subject.id
                && self.follows.is_following(viewer.id, subject.id).await?,
        })
    }
}
