//! Domain layer containing business entities and store contracts.
//!
//! # Architecture
//!
//! - [`entities`] - Core business data structures
//! - [`repositories`] - Durable store trait definitions
//!
//! The domain layer has no knowledge of HTTP or of the cache. The cache
//! contract lives with its implementations in
//! [`crate::infrastructure::cache`], and the policy that composes both stores
//! lives in [`crate::application::services::ShortenerService`].

pub mod entities;
pub mod repositories;
