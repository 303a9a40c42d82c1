use crate::infrastructure::db::DbPool;
use crate::{
    domain::channel::{Channel, ChannelStore},
    domain::user::User,
    error::{AppError, AppResult},
};
use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

pub struct ChannelRepository {
    pool: Arc<DbPool>,
}

impl ChannelRepository {
    pub fn new(pool: Arc<DbPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ChannelStore for ChannelRepository {
    async fn create(&self, owner_id: Uuid, name: &str) -> AppResult<Channel> {
        let pool = self.pool.as_ref();
        let id = Uuid::new_v4();
        let now = chrono::Utc::now();

        let channel = sqlx::query_as::<_, Channel>(
            r#"
            INSERT INTO channels (id, name, owner_id, created_at)
            VALUES ($1, $2, $3, $4)
            RETURNING id, name, owner_id, created_at
            "#,
        )
        .bind(id)
        .bind(name)
        .bind(owner_id)
        .bind(now)
        .fetch_one(pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(ref db_err) = e {
                if db_err.is_unique_violation() {
                    return AppError::Conflict("Channel name already taken".to_string());
                }
            }
            AppError::Database(e)
        })?;

        Ok(channel)
    }

    async fn find_by_id(&self, channel_id: Uuid) -> AppResult<Option<Channel>> {
        let pool = self.pool.as_ref();
        let channel = sqlx::query_as::<_, Channel>(
            r#"
            SELECT id, name, owner_id, created_at
            FROM channels
            WHERE id = $1
            "#,
        )
        .bind(channel_id)
        .fetch_optional(pool)
        .await?;

        Ok(channel)
    }

    async fn list(&self) -> AppResult<Vec<Channel>> {
        let pool = self.pool.as_ref();
        let channels = sqlx::query_as::<_, Channel>(
            r#"
            SELECT id, name, owner_id, created_at
            FROM channels
            ORDER BY created_at ASC
            "#,
        )
        .fetch_all(pool)
        .await?;

        Ok(channels)
    }

    async fn add_member(&self, channel_id: Uuid, user_id: Uuid) -> AppResult<()> {
        let pool = self.pool.as_ref();
        sqlx::query(
            r#"
            INSERT INTO channel_members (channel_id, user_id, joined_at)
            VALUES ($1, $2, $3)
            ON CONFLICT (channel_id, user_id) DO NOTHING
            "#,
        )
        .bind(channel_id)
        .bind(user_id)
        .bind(chrono::Utc::now())
        .execute(pool)
        .await?;

        Ok(())
    }

    async fn remove_member(&self, channel_id: Uuid, user_id: Uuid) -> AppResult<bool> {
        let pool = self.pool.as_ref();
        let result = sqlx::query(
            r#"
            DELETE FROM channel_members
            WHERE channel_id = $1 AND user_id = $2
            "#,
        )
        .bind(channel_id)
        .bind(user_id)
        .execute(pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn members(&self, channel_id: Uuid) -> AppResult<Vec<User>> {
        let pool = self.pool.as_ref();
        let users = sqlx::query_as::<_, User>(
            r#"
            SELECT u.*
            FROM users u
            JOIN channel_members m ON m.user_id = u.id
            WHERE m.channel_id = $1
            ORDER BY m.joined_at ASC
            "#,
        )
        .bind(channel_id)
        .fetch_all(pool)
        .await?;

        Ok(users)
    }

    async fn delete(&self, channel_id: Uuid) -> AppResult<bool> {
        let pool = self.pool.as_ref();
        let result = sqlx::query(
            r#"
            DELETE FROM channels
            WHERE id = $1
            "#,
        )
        .bind(channel_id)
        .execute(pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}
