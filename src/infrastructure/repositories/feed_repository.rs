use crate::infrastructure::db::DbPool;
use crate::{
    domain::feed::{Feed, FeedStore},
    error::{AppError, AppResult},
};
use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

pub struct FeedRepository {
    pool: Arc<DbPool>,
}

impl FeedRepository {
    pub fn new(pool: Arc<DbPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl FeedStore for FeedRepository {
    /// Create the feed for a new owner. The UNIQUE constraint on owner_id
    /// enforces one feed per owner.
    async fn create(&self, owner_id: Uuid) -> AppResult<Feed> {
        let pool = self.pool.as_ref();
        let id = Uuid::new_v4();
        let now = chrono::Utc::now();

        let feed = sqlx::query_as::<_, Feed>(
            r#"
            INSERT INTO feeds (id, owner_id, active_filter, posts, last_refresh)
            VALUES ($1, $2, 'latest', '{}', $3)
            RETURNING id, owner_id, active_filter, posts, last_refresh
            "#,
        )
        .bind(id)
        .bind(owner_id)
        .bind(now)
        .fetch_one(pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(ref db_err) = e {
                if db_err.is_unique_violation() {
                    return AppError::Conflict("Feed already exists for this user".to_string());
                }
            }
            AppError::Database(e)
        })?;

        Ok(feed)
    }

    async fn find_by_owner(&self, owner_id: Uuid) -> AppResult<Option<Feed>> {
        let pool = self.pool.as_ref();
        let feed = sqlx::query_as::<_, Feed>(
            r#"
            SELECT id, owner_id, active_filter, posts, last_refresh
            FROM feeds
            WHERE owner_id = $1
            "#,
        )
        .bind(owner_id)
        .fetch_optional(pool)
        .await?;

        Ok(feed)
    }

    async fn find_by_id(&self, feed_id: Uuid) -> AppResult<Option<Feed>> {
        let pool = self.pool.as_ref();
        let feed = sqlx::query_as::<_, Feed>(
            r#"
            SELECT id, owner_id, active_filter, posts, last_refresh
            FROM feeds
            WHERE id = $1
            "#,
        )
        .bind(feed_id)
        .fetch_optional(pool)
        .await?;

        Ok(feed)
    }

    /// Single-statement replace of the mutable fields
    async fn save(&self, feed: &Feed) -> AppResult<()> {
        let pool = self.pool.as_ref();
        sqlx::query(
            r#"
            UPDATE feeds
            SET active_filter = $1, posts = $2, last_refresh = $3
            WHERE id = $4
            "#,
        )
        .bind(feed.active_filter.as_str())
        .bind(&feed.posts)
        .bind(feed.last_refresh)
        .bind(feed.id)
        .execute(pool)
        .await?;

        Ok(())
    }

    async fn delete(&self, feed_id: Uuid) -> AppResult<bool> {
        let pool = self.pool.as_ref();
        let result = sqlx::query(
            r#"
            DELETE FROM feeds
            WHERE id = $1
            "#,
        )
        .bind(feed_id)
        .execute(pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete_by_owner(&self, owner_id: Uuid) -> AppResult<bool> {
        let pool = self.pool.as_ref();
        let result = sqlx::query(
            r#"
            DELETE FROM feeds
            WHERE owner_id = $1
            "#,
        )
        .bind(owner_id)
        .execute(pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}
