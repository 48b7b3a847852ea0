//! Cache-aside coordination between the fast cache and the durable store.
//!
//! [`ShortenerService`] is the only component that talks to both stores. It
//! holds no mutable state of its own; every operation is a short sequence of
//! store calls governed by these rules:
//!
//! - **Create** writes the durable store first. The cache is populated only
//!   after the durable write succeeded.
//! - **Lookup** is read-through: a cache hit skips the durable read, a miss
//!   or a cache error falls through to the durable store and repopulates the
//!   cache. Both paths bump the access counter.
//! - **Delete** removes the durable record first and invalidates the cache
//!   afterwards. A failed durable delete never touches the cache.
//! - **Stats** reads the durable store only.
//!
//! Cache calls, cache repopulation and access counting are best-effort: a
//! failure is logged and counted, never returned. Durable failures are always
//! returned as [`ShortenerError`].
//!
//! # Staleness
//!
//! There is no lock spanning both stores. A lookup racing a delete of the
//! same short URL may still return the deleted target until the cache
//! invalidation that follows the durable delete has completed, and a lookup
//! that read the durable store just before the delete may re-populate the
//! cache with the deleted target until its TTL expires. Both are accepted.
//!
//! # Deadlines
//!
//! Every store call is bounded by a timeout (`cache_timeout` for the cache,
//! `store_timeout` for the durable store). Dropping an operation's future
//! cancels it at the current store call.

use std::fmt::Display;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use metrics::counter;
use tokio::time::timeout;
use tracing::{debug, info, warn};

use crate::application::error::ShortenerError;
use crate::domain::entities::UrlRecord;
use crate::domain::repositories::{StoreError, UrlRepository};
use crate::infrastructure::cache::{CacheError, CacheResult, CacheService};
use crate::utils::key_generator::KeyGenerator;

/// Base URL used when none is configured.
pub const DEFAULT_BASE_URL: &str = "http://localhost/";

/// Upper bound for a single cache call.
pub const DEFAULT_CACHE_TIMEOUT: Duration = Duration::from_millis(250);

/// Upper bound for a single durable store call.
pub const DEFAULT_STORE_TIMEOUT: Duration = Duration::from_secs(3);

/// Service for creating, resolving, deleting and inspecting short URLs.
///
/// Stores are injected as trait objects so that PostgreSQL/Redis, in-memory
/// doubles and mocks are interchangeable.
pub struct ShortenerService {
    url_repository: Arc<dyn UrlRepository>,
    cache: Arc<dyn CacheService>,
    key_generator: Arc<dyn KeyGenerator>,
    base_url: String,
    cache_ttl_seconds: Option<u64>,
    cache_timeout: Duration,
    store_timeout: Duration,
}

impl ShortenerService {
    /// Creates a new shortener service.
    ///
    /// `base_url` is prepended to every key to form the identifier used with
    /// both stores (e.g. `http://localhost/` + `abc123`).
    pub fn new(
        url_repository: Arc<dyn UrlRepository>,
        cache: Arc<dyn CacheService>,
        key_generator: Arc<dyn KeyGenerator>,
        base_url: impl Into<String>,
    ) -> Self {
        Self {
            url_repository,
            cache,
            key_generator,
            base_url: base_url.into(),
            cache_ttl_seconds: None,
            cache_timeout: DEFAULT_CACHE_TIMEOUT,
            store_timeout: DEFAULT_STORE_TIMEOUT,
        }
    }

    /// Sets the TTL passed to the cache on every write.
    ///
    /// Without it the cache applies its own default.
    pub fn with_cache_ttl(mut self, ttl_seconds: u64) -> Self {
        self.cache_ttl_seconds = Some(ttl_seconds);
        self
    }

    /// Sets the per-call timeouts for the cache and the durable store.
    pub fn with_timeouts(mut self, cache_timeout: Duration, store_timeout: Duration) -> Self {
        self.cache_timeout = cache_timeout;
        self.store_timeout = store_timeout;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Returns the durable store.
    pub fn url_repository(&self) -> &Arc<dyn UrlRepository> {
        &self.url_repository
    }

    /// Returns the cache.
    pub fn cache(&self) -> &Arc<dyn CacheService> {
        &self.cache
    }

    /// Builds the fully-qualified short URL for a key.
    pub fn short_url(&self, key: &str) -> String {
        format!("{}{}", self.base_url, key)
    }

    /// Strips the base URL from `input` if present, so both `abc123` and
    /// `http://localhost/abc123` resolve to the key `abc123`.
    pub fn key_of<'a>(&self, input: &'a str) -> &'a str {
        input.strip_prefix(self.base_url.as_str()).unwrap_or(input)
    }

    /// Shortens `long_url` and returns the new short URL.
    ///
    /// The key is not checked for uniqueness beforehand. If it collides with
    /// an existing record the durable store rejects the write and the
    /// collision surfaces as [`ShortenerError::Persist`].
    ///
    /// # Errors
    ///
    /// Returns [`ShortenerError::Persist`] if the durable write fails. The
    /// cache is not written in that case.
    pub async fn create_short_url(&self, long_url: &str) -> Result<String, ShortenerError> {
        let short_url = self.short_url(&self.key_generator.generate());

        let saved = self
            .durable(self.url_repository.save(&short_url, long_url))
            .await
            .map_err(|e| ShortenerError::persist("save", e))?;

        self.populate_cache(&saved, long_url).await;

        info!(short_url = %saved, "Short URL created");
        Ok(saved)
    }

    /// Resolves a key to its long URL and counts the access.
    ///
    /// # Errors
    ///
    /// Returns [`ShortenerError::NotFound`] if the durable store has no
    /// record (checked only on a cache miss), and
    /// [`ShortenerError::Persist`] if the durable read fails.
    pub async fn get_long_url(&self, key: &str) -> Result<String, ShortenerError> {
        let short_url = self.short_url(key);

        match self.cached(self.cache.get_url(&short_url)).await {
            Ok(Some(long_url)) if !long_url.is_empty() => {
                debug!(%short_url, "Cache HIT");
                counter!("shortlink_cache_hits_total").increment(1);
                self.record_access(&short_url).await;
                return Ok(long_url);
            }
            Ok(_) => {
                debug!(%short_url, "Cache MISS");
                counter!("shortlink_cache_misses_total").increment(1);
            }
            Err(e) => {
                warn!(%short_url, error = %e, "Cache read failed, falling back to durable store");
                counter!("shortlink_cache_errors_total", "operation" => "get").increment(1);
            }
        }

        let long_url = self
            .durable(self.url_repository.get_long_url(&short_url))
            .await
            .map_err(|e| ShortenerError::from_store("get", &short_url, e))?;

        self.populate_cache(&short_url, &long_url).await;
        self.record_access(&short_url).await;

        Ok(long_url)
    }

    /// Deletes a short URL and returns the long URL it pointed to.
    ///
    /// The returned target comes from the cache when it still holds one and
    /// from the durable delete otherwise.
    ///
    /// # Errors
    ///
    /// Returns [`ShortenerError::NotFound`] if there was nothing to delete and
    /// [`ShortenerError::Persist`] if the durable delete fails. In both cases
    /// the cache is left untouched.
    pub async fn delete_url(&self, key: &str) -> Result<String, ShortenerError> {
        let short_url = self.short_url(key);

        let deleted = self
            .durable(self.url_repository.delete(&short_url))
            .await
            .map_err(|e| ShortenerError::from_store("delete", &short_url, e))?;

        let cached = match self.cached(self.cache.get_url(&short_url)).await {
            Ok(cached) => cached.filter(|url| !url.is_empty()),
            Err(e) => {
                warn!(%short_url, error = %e, "Cache read failed during delete");
                counter!("shortlink_cache_errors_total", "operation" => "get").increment(1);
                None
            }
        };

        let invalidated = self.cached(self.cache.invalidate(&short_url)).await;
        absorb("cache_invalidate", &short_url, invalidated);

        info!(%short_url, "Short URL deleted");
        Ok(cached.unwrap_or(deleted))
    }

    /// Returns the durable record for a key, including its access count.
    ///
    /// The cache is never consulted.
    ///
    /// # Errors
    ///
    /// Returns [`ShortenerError::NotFound`] if no record exists and
    /// [`ShortenerError::Persist`] if the durable read fails.
    pub async fn get_url_stats(&self, key: &str) -> Result<UrlRecord, ShortenerError> {
        let short_url = self.short_url(key);

        self.durable(self.url_repository.get_stats(&short_url))
            .await
            .map_err(|e| ShortenerError::from_store("get stats for", &short_url, e))
    }

    async fn durable<T>(
        &self,
        call: impl Future<Output = Result<T, StoreError>>,
    ) -> Result<T, StoreError> {
        timeout(self.store_timeout, call)
            .await
            .unwrap_or(Err(StoreError::Timeout(self.store_timeout)))
    }

    async fn cached<T>(&self, call: impl Future<Output = CacheResult<T>>) -> CacheResult<T> {
        timeout(self.cache_timeout, call)
            .await
            .unwrap_or(Err(CacheError::Timeout(self.cache_timeout)))
    }

    async fn populate_cache(&self, short_url: &str, long_url: &str) {
        let result = self
            .cached(self.cache.set_url(short_url, long_url, self.cache_ttl_seconds))
            .await;
        absorb("cache_set", short_url, result);
    }

    async fn record_access(&self, short_url: &str) {
        let result = self
            .durable(self.url_repository.increment_access_count(short_url))
            .await;
        absorb("increment_access_count", short_url, result);
    }
}

/// Records the failure of a best-effort call and drops it.
fn absorb<E: Display>(operation: &'static str, short_url: &str, result: Result<(), E>) {
    if let Err(e) = result {
        warn!(operation, short_url, error = %e, "Best-effort call failed");
        counter!("shortlink_best_effort_failures_total", "operation" => operation).increment(1);
    }
}
