//! In-memory implementation of the short URL repository.

use async_trait::async_trait;
use chrono::Utc;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use std::sync::Arc;
use std::sync::atomic::{AtomicI64, Ordering};

use crate::domain::entities::UrlRecord;
use crate::domain::repositories::{StoreError, UrlRepository};

/// In-memory durable store double backed by DashMap.
///
/// Mirrors the PostgreSQL semantics that matter to the shortener service:
/// `save` rejects an existing short URL with [`StoreError::Conflict`], and
/// every read or mutation of a missing record reports [`StoreError::NotFound`].
/// Clones share the same storage.
#[derive(Debug, Clone)]
pub struct InMemoryUrlRepository {
    storage: Arc<DashMap<String, UrlRecord>>,
    next_id: Arc<AtomicI64>,
}

impl InMemoryUrlRepository {
    /// Creates an empty repository.
    pub fn new() -> Self {
        Self {
            storage: Arc::new(DashMap::new()),
            next_id: Arc::new(AtomicI64::new(1)),
        }
    }

    /// Number of stored records.
    pub fn len(&self) -> usize {
        self.storage.len()
    }

    pub fn is_empty(&self) -> bool {
        self.storage.is_empty()
    }
}

impl Default for InMemoryUrlRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UrlRepository for InMemoryUrlRepository {
    async fn save(&self, short_url: &str, long_url: &str) -> Result<String, StoreError> {
        match self.storage.entry(short_url.to_string()) {
            Entry::Occupied(_) => Err(StoreError::Conflict(short_url.to_string())),
            Entry::Vacant(slot) => {
                let id = self.next_id.fetch_add(1, Ordering::Relaxed);
                slot.insert(UrlRecord::new(
                    id,
                    short_url.to_string(),
                    long_url.to_string(),
                    0,
                    Utc::now(),
                ));
                Ok(short_url.to_string())
            }
        }
    }

    async fn get_long_url(&self, short_url: &str) -> Result<String, StoreError> {
        self.storage
            .get(short_url)
            .map(|r| r.long_url.clone())
            .ok_or_else(|| StoreError::NotFound(short_url.to_string()))
    }

    async fn delete(&self, short_url: &str) -> Result<String, StoreError> {
        self.storage
            .remove(short_url)
            .map(|(_, r)| r.long_url)
            .ok_or_else(|| StoreError::NotFound(short_url.to_string()))
    }

    async fn get_stats(&self, short_url: &str) -> Result<UrlRecord, StoreError> {
        self.storage
            .get(short_url)
            .map(|r| r.clone())
            .ok_or_else(|| StoreError::NotFound(short_url.to_string()))
    }

    async fn increment_access_count(&self, short_url: &str) -> Result<(), StoreError> {
        let mut record = self
            .storage
            .get_mut(short_url)
            .ok_or_else(|| StoreError::NotFound(short_url.to_string()))?;
        record.access_count += 1;
        Ok(())
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SHORT: &str = "http://localhost/abc123";

    #[tokio::test]
    async fn test_save_and_get() {
        let repo = InMemoryUrlRepository::new();

        let saved = repo.save(SHORT, "https://example.com").await.unwrap();
        assert_eq!(saved, SHORT);

        let long_url = repo.get_long_url(SHORT).await.unwrap();
        assert_eq!(long_url, "https://example.com");
    }

    #[tokio::test]
    async fn test_save_duplicate_conflicts() {
        let repo = InMemoryUrlRepository::new();
        repo.save(SHORT, "https://example.com").await.unwrap();

        let result = repo.save(SHORT, "https://other.com").await;
        assert!(matches!(result, Err(StoreError::Conflict(_))));
        assert_eq!(repo.get_long_url(SHORT).await.unwrap(), "https://example.com");
    }

    #[tokio::test]
    async fn test_missing_record_is_not_found() {
        let repo = InMemoryUrlRepository::new();

        assert!(matches!(
            repo.get_long_url(SHORT).await,
            Err(StoreError::NotFound(_))
        ));
        assert!(matches!(repo.delete(SHORT).await, Err(StoreError::NotFound(_))));
        assert!(matches!(
            repo.get_stats(SHORT).await,
            Err(StoreError::NotFound(_))
        ));
        assert!(matches!(
            repo.increment_access_count(SHORT).await,
            Err(StoreError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_increment_and_stats() {
        let repo = InMemoryUrlRepository::new();
        repo.save(SHORT, "https://example.com").await.unwrap();

        for _ in 0..3 {
            repo.increment_access_count(SHORT).await.unwrap();
        }

        let stats = repo.get_stats(SHORT).await.unwrap();
        assert_eq!(stats.access_count, 3);
        assert_eq!(stats.long_url, "https://example.com");
        assert_eq!(stats.id, 1);
    }

    #[tokio::test]
    async fn test_delete_returns_long_url() {
        let repo = InMemoryUrlRepository::new();
        repo.save(SHORT, "https://example.com").await.unwrap();

        assert_eq!(repo.delete(SHORT).await.unwrap(), "https://example.com");
        assert!(repo.is_empty());
    }
}
