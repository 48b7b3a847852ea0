//! URL record entity, the durable unit of the shortener.

use chrono::{DateTime, Utc};

/// A persisted short URL mapping together with its access counter.
///
/// `short_url` is the fully-qualified identifier (base URL + key) and is unique
/// within the durable store. `access_count` only ever grows while the record
/// exists.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct UrlRecord {
    pub id: i64,
    pub short_url: String,
    pub long_url: String,
    pub access_count: i64,
    pub created_at: DateTime<Utc>,
}

impl UrlRecord {
    /// Creates a new UrlRecord instance.
    pub fn new(
        id: i64,
        short_url: String,
        long_url: String,
        access_count: i64,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            short_url,
            long_url,
            access_count,
            created_at,
        }
    }

    /// Returns the key part of `short_url` when it was issued under `base_url`.
    pub fn key<'a>(&'a self, base_url: &str) -> Option<&'a str> {
        self.short_url.strip_prefix(base_url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_creation() {
        let now = Utc::now();
        let record = UrlRecord::new(
            1,
            "http://localhost/abc123".to_string(),
            "https://example.com".to_string(),
            0,
            now,
        );

        assert_eq!(record.id, 1);
        assert_eq!(record.short_url, "http://localhost/abc123");
        assert_eq!(record.long_url, "https://example.com");
        assert_eq!(record.access_count, 0);
        assert_eq!(record.created_at, now);
    }

    #[test]
    fn test_record_key() {
        let record = UrlRecord::new(
            7,
            "http://localhost/Xy9k2Q".to_string(),
            "https://rust-lang.org".to_string(),
            3,
            Utc::now(),
        );

        assert_eq!(record.key("http://localhost/"), Some("Xy9k2Q"));
        assert_eq!(record.key("https://s.example.com/"), None);
    }
}
