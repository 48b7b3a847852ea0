//! In-process cache backed by a concurrent hash map.

use super::service::{CacheResult, CacheService};
use async_trait::async_trait;
use dashmap::DashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

#[derive(Debug, Clone)]
struct Entry {
    long_url: String,
    expires_at: Option<Instant>,
}

impl Entry {
    fn is_expired(&self) -> bool {
        self.expires_at.is_some_and(|at| Instant::now() >= at)
    }
}

/// Thread-safe in-memory cache mapping short URL -> long URL.
///
/// Clones share the same map, so a test can keep a handle to inspect what
/// the shortener service wrote. Expired entries are dropped lazily on read.
#[derive(Debug, Clone, Default)]
pub struct MemoryCache {
    inner: Arc<DashMap<String, Entry>>,
    default_ttl: Option<Duration>,
}

impl MemoryCache {
    /// Creates a cache whose entries never expire unless a TTL is given per call.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a cache applying `ttl` to entries stored without an explicit TTL.
    pub fn with_default_ttl(ttl: Duration) -> Self {
        Self {
            inner: Arc::new(DashMap::new()),
            default_ttl: Some(ttl),
        }
    }

    /// Returns the cached long URL without touching expiry state.
    pub fn peek(&self, short_url: &str) -> Option<String> {
        self.inner
            .get(short_url)
            .filter(|e| !e.is_expired())
            .map(|e| e.long_url.clone())
    }

    /// Inserts a mapping directly, bypassing the service.
    pub fn insert(&self, short_url: impl Into<String>, long_url: impl Into<String>) {
        self.inner.insert(
            short_url.into(),
            Entry {
                long_url: long_url.into(),
                expires_at: None,
            },
        );
    }

    /// Number of entries currently held, including expired ones not yet evicted.
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

#[async_trait]
impl CacheService for MemoryCache {
    async fn get_url(&self, short_url: &str) -> CacheResult<Option<String>> {
        let expired = match self.inner.get(short_url) {
            Some(entry) if !entry.is_expired() => return Ok(Some(entry.long_url.clone())),
            Some(_) => true,
            None => false,
        };

        if expired {
            self.inner.remove_if(short_url, |_, e| e.is_expired());
        }
        Ok(None)
    }

    async fn set_url(
        &self,
        short_url: &str,
        long_url: &str,
        ttl_seconds: Option<u64>,
    ) -> CacheResult<()> {
        let ttl = ttl_seconds.map(Duration::from_secs).or(self.default_ttl);
        self.inner.insert(
            short_url.to_string(),
            Entry {
                long_url: long_url.to_string(),
                expires_at: ttl.map(|ttl| Instant::now() + ttl),
            },
        );
        Ok(())
    }

    async fn invalidate(&self, short_url: &str) -> CacheResult<()> {
        self.inner.remove(short_url);
        Ok(())
    }

    async fn health_check(&self) -> bool {
        true
    }
}
