use super::error::FeedServiceError;
use super::materializer::FeedMaterializer;
use super::store::FeedStore;
use super::{Feed, FeedFilter, FeedResponse};
use crate::domain::freet::FreetStore;
use crate::domain::user::UserStore;
use async_trait::async_trait;
use chrono::Utc;
use std::sync::Arc;
use uuid::Uuid;

pub struct FeedService {
    feed_store: Arc<dyn FeedStore>,
    user_store: Arc<dyn UserStore>,
    materializer: FeedMaterializer,
}

impl FeedService {
    pub fn new(
        feed_store: Arc<dyn FeedStore>,
        freet_store: Arc<dyn FreetStore>,
        user_store: Arc<dyn UserStore>,
    ) -> Self {
        Self {
            feed_store,
            user_store: user_store.clone(),
            materializer: FeedMaterializer::new(freet_store, user_store),
        }
    }
}

#[async_trait]
pub trait FeedServiceApi: Send + Sync {
    /// Create the feed for a new owner, with the default `latest` filter.
    async fn create_for_owner(&self, owner_id: Uuid) -> Result<Feed, FeedServiceError>;

    /// Rematerialize the owner's feed under its current filter and persist
    /// the replacement post list.
    async fn refresh(&self, owner_id: Uuid) -> Result<Feed, FeedServiceError>;

    /// Assign a new active filter and refresh in the same call, so filter
    /// changes are immediately reflected in the post list.
    async fn set_active_filter(
        &self,
        owner_id: Uuid,
        raw_filter: &str,
    ) -> Result<Feed, FeedServiceError>;

    /// Project a feed for the HTTP layer, replacing the owner id with the
    /// owner's username.
    async fn feed_response(&self, feed: Feed) -> Result<FeedResponse, FeedServiceError>;

    async fn delete_for_owner(&self, owner_id: Uuid) -> Result<bool, FeedServiceError>;

    async fn delete_by_id(&self, feed_id: Uuid) -> Result<bool, FeedServiceError>;
}

#[async_trait]
impl FeedServiceApi for FeedService {
    async fn create_for_owner(&self, owner_id: Uuid) -> Result<Feed, FeedServiceError> {
        let feed = self.feed_store.create(owner_id).await?;
        tracing::debug!(feed_id = %feed.id, owner_id = %owner_id, "Feed created");
        Ok(feed)
    }

    async fn refresh(&self, owner_id: Uuid) -> Result<Feed, FeedServiceError> {
        let feed = self
            .feed_store
            .find_by_owner(owner_id)
            .await?
            .ok_or(FeedServiceError::NotFound)?;

        self.rematerialize(feed).await
    }

    async fn set_active_filter(
        &self,
        owner_id: Uuid,
        raw_filter: &str,
    ) -> Result<Feed, FeedServiceError> {
        let filter = FeedFilter::parse(raw_filter)
            .map_err(|e| FeedServiceError::Invalid(e.to_string()))?;

        let mut feed = self
            .feed_store
            .find_by_owner(owner_id)
            .await?
            .ok_or(FeedServiceError::NotFound)?;

        feed.active_filter = filter;
        self.rematerialize(feed).await
    }

    async fn feed_response(&self, feed: Feed) -> Result<FeedResponse, FeedServiceError> {
        let owner = self
            .user_store
            .find_by_id(feed.owner_id)
            .await?
            .ok_or(FeedServiceError::NotFound)?;

        Ok(FeedResponse {
            id: feed.id,
            owner: owner.username,
            active_filter: feed.active_filter,
            freets: feed.posts,
            last_refresh: feed.last_refresh,
        })
    }

    async fn delete_for_owner(&self, owner_id: Uuid) -> Result<bool, FeedServiceError> {
        Ok(self.feed_store.delete_by_owner(owner_id).await?)
    }

    async fn delete_by_id(&self, feed_id: Uuid) -> Result<bool, FeedServiceError> {
        Ok(self.feed_store.delete(feed_id).await?)
    }
}

impl FeedService {
    /// Materialize in memory, then persist with a single save. A failing
    /// store call aborts before anything is written, so the record is never
    /// partially updated.
    async fn rematerialize(&self, mut feed: Feed) -> Result<Feed, FeedServiceError> {
        let posts = self
            .materializer
            .materialize(feed.owner_id, &feed.active_filter)
            .await
            .map_err(|e| FeedServiceError::Dependency(e.to_string()))?;

        feed.posts = posts;
        feed.last_refresh = Utc::now();

        self.feed_store.save(&feed).await?;

        tracing::debug!(
            feed_id = %feed.id,
            owner_id = %feed.owner_id,
            active_filter = %feed.active_filter,
            posts = feed.posts.len(),
            "Feed refreshed"
        );

        Ok(feed)
    }
}
