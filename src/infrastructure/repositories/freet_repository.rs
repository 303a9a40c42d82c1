use crate::infrastructure::db::DbPool;
use crate::{
    domain::freet::{Freet, FreetStore},
    error::AppResult,
};
use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

pub struct FreetRepository {
    pool: Arc<DbPool>,
}

impl FreetRepository {
    pub fn new(pool: Arc<DbPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl FreetStore for FreetRepository {
    async fn create(&self, author_id: Uuid, content: &str, tags: &[String]) -> AppResult<Freet> {
        let pool = self.pool.as_ref();
        let id = Uuid::new_v4();
        let now = chrono::Utc::now();

        let freet = sqlx::query_as::<_, Freet>(
            r#"
            INSERT INTO freets (id, author_id, content, tags, created_at)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, author_id, content, tags, created_at
            "#,
        )
        .bind(id)
        .bind(author_id)
        .bind(content)
        .bind(tags)
        .bind(now)
        .fetch_one(pool)
        .await?;

        Ok(freet)
    }

    async fn find_by_id(&self, freet_id: Uuid) -> AppResult<Option<Freet>> {
        let pool = self.pool.as_ref();
        let freet = sqlx::query_as::<_, Freet>(
            r#"
            SELECT id, author_id, content, tags, created_at
            FROM freets
            WHERE id = $1
            "#,
        )
        .bind(freet_id)
        .fetch_optional(pool)
        .await?;

        Ok(freet)
    }

    /// All freets in insertion order; the materializer depends on it.
    /// `id` breaks ties so equal timestamps still order deterministically.
    async fn find_all(&self) -> AppResult<Vec<Freet>> {
        let pool = self.pool.as_ref();
        let freets = sqlx::query_as::<_, Freet>(
            r#"
            SELECT id, author_id, content, tags, created_at
            FROM freets
            ORDER BY created_at ASC, id ASC
            "#,
        )
        .fetch_all(pool)
        .await?;

        Ok(freets)
    }

    async fn find_by_tag(&self, tag: &str) -> AppResult<Vec<Freet>> {
        let pool = self.pool.as_ref();
        let freets = sqlx::query_as::<_, Freet>(
            r#"
            SELECT id, author_id, content, tags, created_at
            FROM freets
            WHERE $1 = ANY(tags)
            ORDER BY created_at ASC, id ASC
            "#,
        )
        .bind(tag)
        .fetch_all(pool)
        .await?;

        Ok(freets)
    }

    async fn find_by_author(&self, author_id: Uuid) -> AppResult<Vec<Freet>> {
        let pool = self.pool.as_ref();
        let freets = sqlx::query_as::<_, Freet>(
            r#"
            SELECT id, author_id, content, tags, created_at
            FROM freets
            WHERE author_id = $1
            ORDER BY created_at ASC, id ASC
            "#,
        )
        .bind(author_id)
        .fetch_all(pool)
        .await?;

        Ok(freets)
    }

    async fn delete(&self, freet_id: Uuid) -> AppResult<bool> {
        let pool = self.pool.as_ref();
        let result = sqlx::query(
            r#"
            DELETE FROM freets
            WHERE id = $1
            "#,
        )
        .bind(freet_id)
        .execute(pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}
