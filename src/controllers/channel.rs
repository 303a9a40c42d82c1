use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::channel::{Channel, ChannelService, CreateChannelRequest};
use crate::domain::user::UserResponse;
use crate::{error::AppResult, infrastructure::auth::AuthUser};

pub struct ChannelController {
    channel_service: Arc<ChannelService>,
}

impl ChannelController {
    pub fn new(channel_service: Arc<ChannelService>) -> Self {
        Self { channel_service }
    }

    /// POST /api/channels - Create a channel
    pub async fn create_channel(
        State(controller): State<Arc<ChannelController>>,
        Extension(auth_user): Extension<AuthUser>,
        Json(request): Json<CreateChannelRequest>,
    ) -> AppResult<(StatusCode, Json<Channel>)> {
        let channel = controller
            .channel_service
            .create(auth_user.user_id, &request.name)
            .await?;
        Ok((StatusCode::CREATED, Json(channel)))
    }

    /// GET /api/channels - List all channels
    pub async fn list_channels(
        State(controller): State<Arc<ChannelController>>,
    ) -> AppResult<Json<Vec<Channel>>> {
        let channels = controller.channel_service.list().await?;
        Ok(Json(channels))
    }

    /// POST /api/channels/{channelId}/members/me - Join a channel
    pub async fn join_channel(
        State(controller): State<Arc<ChannelController>>,
        Extension(auth_user): Extension<AuthUser>,
        Path(channel_id): Path<Uuid>,
    ) -> AppResult<StatusCode> {
        controller
            .channel_service
            .join(auth_user.user_id, channel_id)
            .await?;
        Ok(StatusCode::NO_CONTENT)
    }

    /// DELETE /api/channels/{channelId}/members/me - Leave a channel
    pub async fn leave_channel(
        State(controller): State<Arc<ChannelController>>,
        Extension(auth_user): Extension<AuthUser>,
        Path(channel_id): Path<Uuid>,
    ) -> AppResult<StatusCode> {
        controller
            .channel_service
            .leave(auth_user.user_id, channel_id)
            .await?;
        Ok(StatusCode::NO_CONTENT)
    }

    /// GET /api/channels/{channelId}/members - List channel members
    pub async fn list_members(
        State(controller): State<Arc<ChannelController>>,
        Path(channel_id): Path<Uuid>,
    ) -> AppResult<Json<Vec<UserResponse>>> {
        let members = controller.channel_service.members(channel_id).await?;
        Ok(Json(members.into_iter().map(UserResponse::from).collect()))
    }

    /// DELETE /api/channels/{channelId} - Delete own channel
    pub async fn delete_channel(
        State(controller): State<Arc<ChannelController>>,
        Extension(auth_user): Extension<AuthUser>,
        Path(channel_id): Path<Uuid>,
    ) -> AppResult<StatusCode> {
        controller
            .channel_service
            .delete(auth_user.user_id, channel_id)
            .await?;
        Ok(StatusCode::NO_CONTENT)
    }
}
