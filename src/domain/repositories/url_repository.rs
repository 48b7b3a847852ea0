//! Repository trait for the durable short URL store.

use async_trait::async_trait;
use std::time::Duration;
use thiserror::Error;

use crate::domain::entities::UrlRecord;
use crate::utils::db_error::is_unique_violation;

/// Errors reported by a durable store.
///
/// [`StoreError::NotFound`] must be signalled distinctly from every other
/// failure; callers map it to a 404-class outcome and everything else to a
/// 500-class one.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("short URL not found: {0}")]
    NotFound(String),

    #[error("short URL already exists: {0}")]
    Conflict(String),

    #[error("store call timed out after {0:?}")]
    Timeout(Duration),

    #[error("store unavailable: {0}")]
    Unavailable(String),

    #[error("database error: {0}")]
    Database(#[source] sqlx::Error),
}

impl From<sqlx::Error> for StoreError {
    fn from(e: sqlx::Error) -> Self {
        if is_unique_violation(&e) {
            let constraint = e
                .as_database_error()
                .and_then(|db| db.constraint())
                .unwrap_or("unknown")
                .to_string();
            return StoreError::Conflict(constraint);
        }

        StoreError::Database(e)
    }
}

/// Authoritative store of short URL records.
///
/// Implementations must be safe to call concurrently from many tasks. Every
/// identifier passed in is a fully-qualified short URL.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgUrlRepository`] - PostgreSQL implementation
/// - [`crate::infrastructure::persistence::InMemoryUrlRepository`] - In-memory store for tests
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UrlRepository: Send + Sync {
    /// Stores a new mapping and returns the saved short URL.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Conflict`] if the short URL already exists.
    async fn save(&self, short_url: &str, long_url: &str) -> Result<String, StoreError>;

    /// Returns the long URL for a short URL.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] if no record exists.
    async fn get_long_url(&self, short_url: &str) -> Result<String, StoreError>;

    /// Removes a record and returns the long URL it pointed to.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] if no record exists.
    async fn delete(&self, short_url: &str) -> Result<String, StoreError>;

    /// Returns the full record, including the access counter.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] if no record exists.
    async fn get_stats(&self, short_url: &str) -> Result<UrlRecord, StoreError>;

    /// Atomically adds one to the access counter.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] if no record exists.
    async fn increment_access_count(&self, short_url: &str) -> Result<(), StoreError>;

    /// Checks that the store is reachable.
    async fn ping(&self) -> Result<(), StoreError>;
}
