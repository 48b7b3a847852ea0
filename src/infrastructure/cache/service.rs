//! Cache service trait and error types.

use async_trait::async_trait;
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur during cache operations.
///
/// These never reach API callers: the shortener service absorbs them and
/// falls back to the durable store.
#[derive(Debug, Error)]
pub enum CacheError {
    #[error("cache connection error: {0}")]
    Connection(String),

    #[error("cache operation error: {0}")]
    Operation(String),

    #[error("cache call timed out after {0:?}")]
    Timeout(Duration),
}

/// Result type for cache operations.
pub type CacheResult<T> = Result<T, CacheError>;

/// Trait for caching short URL mappings.
///
/// The cache is a volatile projection of the durable store keyed by the
/// fully-qualified short URL. Implementations must be thread-safe and report
/// failures as [`CacheError`]; deciding whether a failure matters is left to
/// the caller.
///
/// # Implementations
///
/// - [`crate::infrastructure::cache::RedisCache`] - Redis-backed cache with TTL support
/// - [`crate::infrastructure::cache::MemoryCache`] - In-process cache for tests and local runs
/// - [`crate::infrastructure::cache::NullCache`] - No-op implementation for disabled caching
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CacheService: Send + Sync {
    /// Retrieves the long URL for a short URL.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(url))` on cache hit
    /// - `Ok(None)` on cache miss; absence is never an error
    ///
    /// # Errors
    ///
    /// Returns [`CacheError`] when the backend could not be queried.
    async fn get_url(&self, short_url: &str) -> CacheResult<Option<String>>;

    /// Stores a mapping with an optional TTL.
    ///
    /// # Arguments
    ///
    /// - `short_url` - The cache key
    /// - `long_url` - The target URL
    /// - `ttl_seconds` - Optional TTL in seconds (implementation-specific default if None)
    async fn set_url(
        &self,
        short_url: &str,
        long_url: &str,
        ttl_seconds: Option<u64>,
    ) -> CacheResult<()>;

    /// Removes a cached mapping. Removing a missing key is not an error.
    async fn invalidate(&self, short_url: &str) -> CacheResult<()>;

    /// Checks if the cache backend is healthy.
    ///
    /// Used by the health endpoint to report cache status.
    async fn health_check(&self) -> bool;
}
