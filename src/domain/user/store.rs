use crate::domain::user::User;
use crate::error::AppResult;
use async_trait::async_trait;
use uuid::Uuid;

/// User directory port. Resolves identity by id or username and owns the
/// "following" relation. Backed by Postgres in production, by an in-memory
/// map in tests.
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn create(&self, username: &str, password_hash: &str) -> AppResult<User>;

    async fn find_by_id(&self, user_id: Uuid) -> AppResult<Option<User>>;

    async fn find_by_username(&self, username: &str) -> AppResult<Option<User>>;

    /// Record that `follower_id` follows `followee_id`. Idempotent.
    async fn follow(&self, follower_id: Uuid, followee_id: Uuid) -> AppResult<()>;

    /// Remove a follow relation. Returns true iff it existed.
    async fn unfollow(&self, follower_id: Uuid, followee_id: Uuid) -> AppResult<bool>;

    /// Users followed by `follower_id`, oldest follow first.
    async fn following(&self, follower_id: Uuid) -> AppResult<Vec<User>>;

    /// Ids of the users followed by `follower_id`.
    async fn following_ids(&self, follower_id: Uuid) -> AppResult<Vec<Uuid>>;

    async fn delete(&self, user_id: Uuid) -> AppResult<bool>;
}
