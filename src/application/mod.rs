//! Application layer services implementing business logic.
//!
//! This layer composes the durable store and the cache behind a single
//! service consumed by HTTP handlers and the admin CLI.
//!
//! # Available Services
//!
//! - [`services::ShortenerService`] - Create, resolve, delete and inspect short URLs
//!
//! Errors returned to callers are described by [`error::ShortenerError`].

pub mod error;
pub mod services;

pub use error::ShortenerError;
