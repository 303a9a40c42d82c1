use crate::domain::channel::Channel;
use crate::domain::user::User;
use crate::error::AppResult;
use async_trait::async_trait;
use uuid::Uuid;

/// Channel persistence port: topic rooms with a membership relation.
#[async_trait]
pub trait ChannelStore: Send + Sync {
    /// Create a channel. Fails with a conflict on a duplicate name.
    async fn create(&self, owner_id: Uuid, name: &str) -> AppResult<Channel>;

    async fn find_by_id(&self, channel_id: Uuid) -> AppResult<Option<Channel>>;

    async fn list(&self) -> AppResult<Vec<Channel>>;

    /// Add a member. Idempotent.
    async fn add_member(&self, channel_id: Uuid, user_id: Uuid) -> AppResult<()>;

    /// Remove a member. Returns true iff the membership existed.
    async fn remove_member(&self, channel_id: Uuid, user_id: Uuid) -> AppResult<bool>;

    async fn members(&self, channel_id: Uuid) -> AppResult<Vec<User>>;

    async fn delete(&self, channel_id: Uuid) -> AppResult<bool>;
}
