use super::error::UserServiceError;
use super::store::UserStore;
use super::User;
use crate::domain::auth::password::hash_password;
use crate::domain::feed::FeedServiceApi;
use std::sync::Arc;
use uuid::Uuid;

pub struct UserService {
    user_store: Arc<dyn UserStore>,
    feed_service: Arc<dyn FeedServiceApi>,
}

impl UserService {
    pub fn new(user_store: Arc<dyn UserStore>, feed_service: Arc<dyn FeedServiceApi>) -> Self {
        Self {
            user_store,
            feed_service,
        }
    }

    /// Register a new account. Every account gets exactly one feed,
    /// created here so the feed exists before the first refresh call.
    pub async fn register(
        &self,
        username: &str,
        password: &str,
    ) -> Result<User, UserServiceError> {
        validate_username(username)?;
        validate_password(password)?;

        let password_hash = hash_password(password)
            .map_err(|e| UserServiceError::Dependency(e.to_string()))?;

        let user = self.user_store.create(username, &password_hash).await?;

        self.feed_service
            .create_for_owner(user.id)
            .await
            .map_err(|e| UserServiceError::Dependency(e.to_string()))?;

        tracing::info!(user_id = %user.id, username = %user.username, "User registered");

        Ok(user)
    }

    pub async fn get_profile(&self, user_id: Uuid) -> Result<User, UserServiceError> {
        self.user_store
            .find_by_id(user_id)
            .await?
            .ok_or(UserServiceError::NotFound)
    }

    /// Follow another user, identified by username.
    pub async fn follow(
        &self,
        user_id: Uuid,
        target_username: &str,
    ) -> Result<(), UserServiceError> {
        let target = self
            .user_store
            .find_by_username(target_username)
            .await?
            .ok_or(UserServiceError::NotFound)?;

        if target.id == user_id {
            return Err(UserServiceError::Invalid(
                "You cannot follow yourself".to_string(),
            ));
        }

        self.user_store.follow(user_id, target.id).await?;
        Ok(())
    }

    /// Unfollow a user. Removing an absent relation is not an error.
    pub async fn unfollow(
        &self,
        user_id: Uuid,
        target_username: &str,
    ) -> Result<(), UserServiceError> {
        let target = self
            .user_store
            .find_by_username(target_username)
            .await?
            .ok_or(UserServiceError::NotFound)?;

        self.user_store.unfollow(user_id, target.id).await?;
        Ok(())
    }

    pub async fn following(&self, user_id: Uuid) -> Result<Vec<User>, UserServiceError> {
        Ok(self.user_store.following(user_id).await?)
    }

    /// Delete the account and its feed. The feed goes first so a failed
    /// user delete never leaves an orphaned feed behind.
    pub async fn delete_account(&self, user_id: Uuid) -> Result<(), UserServiceError> {
        self.feed_service
            .delete_for_owner(user_id)
            .await
            .map_err(|e| UserServiceError::Dependency(e.to_string()))?;

        let deleted = self.user_store.delete(user_id).await?;
        if !deleted {
            return Err(UserServiceError::NotFound);
        }

        tracing::info!(user_id = %user_id, "Account deleted");
        Ok(())
    }
}

fn validate_username(username: &str) -> Result<(), UserServiceError> {
    if username.is_empty() || username.len() > 32 {
        return Err(UserServiceError::Invalid(
            "Username must be between 1 and 32 characters".to_string(),
        ));
    }
    if !username.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
        return Err(UserServiceError::Invalid(
            "Username may only contain letters, digits and underscores".to_string(),
        ));
    }
    Ok(())
}

fn validate_password(password: &str) -> Result<(), UserServiceError> {
    if password.len() < 8 {
        return Err(UserServiceError::Invalid(
            "Password must be at least 8 characters".to_string(),
        ));
    }
    Ok(())
}
