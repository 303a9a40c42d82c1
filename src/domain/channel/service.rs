use super::error::ChannelServiceError;
use super::store::ChannelStore;
use super::Channel;
use crate::domain::user::User;
use std::sync::Arc;
use uuid::Uuid;

pub struct ChannelService {
    channel_store: Arc<dyn ChannelStore>,
}

impl ChannelService {
    pub fn new(channel_store: Arc<dyn ChannelStore>) -> Self {
        Self { channel_store }
    }

    /// Create a channel; the creator becomes its first member.
    pub async fn create(
        &self,
        owner_id: Uuid,
        name: &str,
    ) -> Result<Channel, ChannelServiceError> {
        let name = name.trim();
        if name.is_empty() || name.len() > 64 {
            return Err(ChannelServiceError::Invalid(
                "Channel name must be between 1 and 64 characters".to_string(),
            ));
        }

        let channel = self.channel_store.create(owner_id, name).await?;
        self.channel_store.add_member(channel.id, owner_id).await?;

        tracing::debug!(channel_id = %channel.id, owner_id = %owner_id, "Channel created");

        Ok(channel)
    }

    pub async fn list(&self) -> Result<Vec<Channel>, ChannelServiceError> {
        Ok(self.channel_store.list().await?)
    }

    pub async fn join(&self, user_id: Uuid, channel_id: Uuid) -> Result<(), ChannelServiceError> {
        self.require_channel(channel_id).await?;
        self.channel_store.add_member(channel_id, user_id).await?;
        Ok(())
    }

    pub async fn leave(&self, user_id: Uuid, channel_id: Uuid) -> Result<(), ChannelServiceError> {
        self.require_channel(channel_id).await?;
        self.channel_store.remove_member(channel_id, user_id).await?;
        Ok(())
    }

    pub async fn members(&self, channel_id: Uuid) -> Result<Vec<User>, ChannelServiceError> {
        self.require_channel(channel_id).await?;
        Ok(self.channel_store.members(channel_id).await?)
    }

    /// Only the channel owner may delete it. A channel owned by someone
    /// else is reported as not found, same as an absent one.
    pub async fn delete(
        &self,
        user_id: Uuid,
        channel_id: Uuid,
    ) -> Result<(), ChannelServiceError> {
        let channel = self.require_channel(channel_id).await?;

        if channel.owner_id != user_id {
            return Err(ChannelServiceError::NotFound);
        }

        self.channel_store.delete(channel_id).await?;
        Ok(())
    }

    async fn require_channel(&self, channel_id: Uuid) -> Result<Channel, ChannelServiceError> {
        self.channel_store
            .find_by_id(channel_id)
            .await?
            .ok_or(ChannelServiceError::NotFound)
    }
}
