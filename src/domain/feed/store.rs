use crate::domain::feed::Feed;
use crate::error::AppResult;
use async_trait::async_trait;
use uuid::Uuid;

/// Feed record persistence port. One record per owner; implementations
/// enforce that with a uniqueness constraint, not by caller convention.
#[async_trait]
pub trait FeedStore: Send + Sync {
    /// Create an empty feed for `owner_id` with the default filter.
    /// Fails with a conflict if the owner already has a feed.
    async fn create(&self, owner_id: Uuid) -> AppResult<Feed>;

    async fn find_by_owner(&self, owner_id: Uuid) -> AppResult<Option<Feed>>;

    async fn find_by_id(&self, feed_id: Uuid) -> AppResult<Option<Feed>>;

    /// Persist filter, posts and refresh timestamp in a single statement.
    async fn save(&self, feed: &Feed) -> AppResult<()>;

    async fn delete(&self, feed_id: Uuid) -> AppResult<bool>;

    async fn delete_by_owner(&self, owner_id: Uuid) -> AppResult<bool>;
}
