//! Errors surfaced by the shortener service.

use thiserror::Error;

use crate::domain::repositories::StoreError;

/// Caller-visible failure of a shortener operation.
///
/// Only durable store outcomes appear here. Cache failures are absorbed by
/// the service and never reach this type.
#[derive(Debug, Error)]
pub enum ShortenerError {
    /// The durable store has no record for the short URL.
    #[error("short URL not found: {short_url}")]
    NotFound { short_url: String },

    /// The durable store failed or timed out.
    #[error("failed to {operation} short URL")]
    Persist {
        operation: &'static str,
        #[source]
        source: StoreError,
    },
}

impl ShortenerError {
    /// Wraps a store error, keeping `NotFound` distinct from every other failure.
    pub fn from_store(operation: &'static str, short_url: &str, err: StoreError) -> Self {
        match err {
            StoreError::NotFound(_) => Self::NotFound {
                short_url: short_url.to_string(),
            },
            source => Self::Persist { operation, source },
        }
    }

    /// Wraps a store error as a persistence failure regardless of its kind.
    pub fn persist(operation: &'static str, source: StoreError) -> Self {
        Self::Persist { operation, source }
    }

    /// Returns true for the not-found outcome.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}
