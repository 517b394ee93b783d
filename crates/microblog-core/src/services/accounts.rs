//! Registration, credential checks and profile edits.

use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use crate::domain::User;
use crate::error::DomainError;
use crate::ports::{BaseRepository, PasswordService, UserRepository};

pub struct AccountService {
    users: Arc<dyn UserRepository>,
    passwords: Arc<dyn PasswordService>,
}

impl AccountService {
    pub fn new(users: Arc<dyn UserRepository>, passwords: Arc<dyn PasswordService>) -> Self {
        Self { users, passwords }
    }

    /// Create an account. Username and email must both be unused.
    pub async fn register(
        &self,
        username: &str,
        email: &str,
        password: &str,
    ) -> Result<User, DomainError> {
        if username.is_empty() || email.is_empty() || password.is_empty() {
            return Err(DomainError::Validation(
                "Username, email and password are required".to_string(),
            ));
        }
        if self.users.find_by_username(username).await?.is_some() {
            return Err(DomainError::Taken {
                field: "username",
                message: "Please use a different username.".to_string(),
            });
        }
        if self.users.find_by_email(email).await?.is_some() {
            return Err(DomainError::Taken {
                field: "email",
                message: "Please use a different email address.".to_string(),
            });
        }

        let password_hash = self
            .passwords
            .hash(password)
            .map_err(|e| DomainError::Internal(e.to_string()))?;

        let user = self
            .users
            .create(User::new(
                username.to_string(),
                email.to_string(),
                password_hash,
            ))
            .await?;
        tracing::info!(user_id = %user.id, username = %user.username, "User registered");
        Ok(user)
    }

    /// Look up a user and check their password. Unknown users and wrong
    /// passwords are indistinguishable to the caller.
    pub async fn authenticate(
        &self,
        username: &str,
        password: &str,
    ) -> Result<Option<User>, DomainError> {
        let Some(user) = self.users.find_by_username(username).await? else {
            tracing::debug!(%username, "Login for unknown user");
            return Ok(None);
        };

        let valid = self
            .passwords
            .verify(password, &user.password_hash)
            .map_err(|e| DomainError::Internal(e.to_string()))?;

        if !valid {
            tracing::debug!(%username, "Login with wrong password");
            return Ok(None);
        }
        Ok(Some(user))
    }

    /// Change username and bio. Keeping the current username is always allowed.
    pub async fn update_profile(
        &self,
        mut user: User,
        username: &str,
        about_me: &str,
    ) -> Result<User, DomainError> {
        if username.is_empty() {
            return Err(DomainError::Validation("Username is required".to_string()));
        }
        if username != user.username && self.users.find_by_username(username).await?.is_some() {
            return Err(DomainError::Taken {
                field: "username",
                message: "Please use a different username.".to_string(),
            });
        }

        user.username = username.to_string();
        user.about_me = match about_me.trim() {
            "" => None,
            text => Some(text.to_string()),
        };
        Ok(self.users.update(user).await?)
    }

    /// Stamp the user's last-seen time with the current time.
    pub async fn touch(&self, user: &mut User) -> Result<(), DomainError> {
        let now = Utc::now();
        self.users.touch_last_seen(user.id, now).await?;
        user.last_seen = now;
        Ok(())
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, DomainError> {
        Ok(self.users.find_by_id(id).await?)
    }

    pub async fn find_by_username(&self, username: &str) -> Result<Option<User>, DomainError> {
        Ok(self.users.find_by_username(username).await?)
    }
}
