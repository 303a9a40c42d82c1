use axum::{
    extract::{Path, State},
    Extension, Json,
};
use std::sync::Arc;

use crate::domain::feed::{FeedEnvelope, FeedService, FeedServiceApi};
use crate::{error::AppResult, infrastructure::auth::AuthUser};

pub struct FeedController {
    feed_service: Arc<FeedService>,
}

impl FeedController {
    pub fn new(feed_service: Arc<FeedService>) -> Self {
        Self { feed_service }
    }

    /// GET /api/feeds - Refresh and return the caller's feed
    pub async fn get_feed(
        State(controller): State<Arc<FeedController>>,
        Extension(auth_user): Extension<AuthUser>,
    ) -> AppResult<Json<FeedEnvelope>> {
        let feed = controller.feed_service.refresh(auth_user.user_id).await?;
        let feed = controller.feed_service.feed_response(feed).await?;
        Ok(Json(FeedEnvelope {
            message: "Feed refreshed".to_string(),
            feed,
        }))
    }

    /// PUT /api/feeds/{activeFilter} - Change the active filter and refresh
    pub async fn set_active_filter(
        State(controller): State<Arc<FeedController>>,
        Extension(auth_user): Extension<AuthUser>,
        Path(active_filter): Path<String>,
    ) -> AppResult<Json<FeedEnvelope>> {
        let feed = controller
            .feed_service
            .set_active_filter(auth_user.user_id, &active_filter)
            .await?;
        let feed = controller.feed_service.feed_response(feed).await?;
        Ok(Json(FeedEnvelope {
            message: "Active filter updated".to_string(),
            feed,
        }))
    }

    /// PUT /api/feeds - Reset the filter to the default `latest`
    pub async fn reset_active_filter(
        state: State<Arc<FeedController>>,
        auth_user: Extension<AuthUser>,
    ) -> AppResult<Json<FeedEnvelope>> {
        Self::set_active_filter(state, auth_user, Path("latest".to_string())).await
    }
}
