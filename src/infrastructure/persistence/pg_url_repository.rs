//! PostgreSQL implementation of the short URL repository.

use async_trait::async_trait;
use sqlx::PgPool;
use std::sync::Arc;
use tracing::warn;

use crate::domain::entities::UrlRecord;
use crate::domain::repositories::{StoreError, UrlRepository};
use crate::utils::db_error::is_unique_violation_on_short_url;

/// PostgreSQL repository for short URL records.
///
/// Uses bound parameters for every query. The access counter is bumped with a
/// single `UPDATE`, so concurrent increments never lose updates.
pub struct PgUrlRepository {
    pool: Arc<PgPool>,
}

impl PgUrlRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UrlRepository for PgUrlRepository {
    async fn save(&self, short_url: &str, long_url: &str) -> Result<String, StoreError> {
        let saved = sqlx::query_scalar::<_, String>(
            r#"
            INSERT INTO urls (short_url, long_url)
            VALUES ($1, $2)
            RETURNING short_url
            "#,
        )
        .bind(short_url)
        .bind(long_url)
        .fetch_one(self.pool.as_ref())
        .await
        .map_err(|e| {
            if is_unique_violation_on_short_url(&e) {
                warn!(short_url, "Generated short URL collided with an existing record");
            }
            StoreError::from(e)
        })?;

        Ok(saved)
    }

    async fn get_long_url(&self, short_url: &str) -> Result<String, StoreError> {
        sqlx::query_scalar::<_, String>("SELECT long_url FROM urls WHERE short_url = $1")
            .bind(short_url)
            .fetch_optional(self.pool.as_ref())
            .await?
            .ok_or_else(|| StoreError::NotFound(short_url.to_string()))
    }

    async fn delete(&self, short_url: &str) -> Result<String, StoreError> {
        sqlx::query_scalar::<_, String>(
            "DELETE FROM urls WHERE short_url = $1 RETURNING long_url",
        )
        .bind(short_url)
        .fetch_optional(self.pool.as_ref())
        .await?
        .ok_or_else(|| StoreError::NotFound(short_url.to_string()))
    }

    async fn get_stats(&self, short_url: &str) -> Result<UrlRecord, StoreError> {
        sqlx::query_as::<_, UrlRecord>(
            r#"
            SELECT id, short_url, long_url, access_count, created_at
            FROM urls
            WHERE short_url = $1
            "#,
        )
        .bind(short_url)
        .fetch_optional(self.pool.as_ref())
        .await?
        .ok_or_else(|| StoreError::NotFound(short_url.to_string()))
    }

    async fn increment_access_count(&self, short_url: &str) -> Result<(), StoreError> {
        let result =
            sqlx::query("UPDATE urls SET access_count = access_count + 1 WHERE short_url = $1")
                .bind(short_url)
                .execute(self.pool.as_ref())
                .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound(short_url.to_string()));
        }
        Ok(())
    }

    async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1")
            .execute(self.pool.as_ref())
            .await?;
        Ok(())
    }
}
