use crate::domain::freet::Freet;
use crate::error::AppResult;
use async_trait::async_trait;
use uuid::Uuid;

/// Post store port. Listing queries return freets in insertion (creation)
/// order; the feed materializer relies on that order.
#[async_trait]
pub trait FreetStore: Send + Sync {
    async fn create(&self, author_id: Uuid, content: &str, tags: &[String]) -> AppResult<Freet>;

    async fn find_by_id(&self, freet_id: Uuid) -> AppResult<Option<Freet>>;

    /// All freets, oldest first.
    async fn find_all(&self) -> AppResult<Vec<Freet>>;

    /// All freets carrying `tag`, oldest first.
    async fn find_by_tag(&self, tag: &str) -> AppResult<Vec<Freet>>;

    /// All freets by one author, oldest first.
    async fn find_by_author(&self, author_id: Uuid) -> AppResult<Vec<Freet>>;

    async fn delete(&self, freet_id: Uuid) -> AppResult<bool>;
}
