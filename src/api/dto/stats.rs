//! DTOs for short URL statistics.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::entities::UrlRecord;

/// Statistics for a single short URL, read from the durable store.
#[derive(Debug, Serialize, Deserialize)]
pub struct StatsResponse {
    pub short_url: String,
    pub long_url: String,
    pub access_count: i64,
    pub created_at: DateTime<Utc>,
}

impl From<UrlRecord> for StatsResponse {
    fn from(record: UrlRecord) -> Self {
        Self {
            short_url: record.short_url,
            long_url: record.long_url,
            access_count: record.access_count,
            created_at: record.created_at,
        }
    }
}
