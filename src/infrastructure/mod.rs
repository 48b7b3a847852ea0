//! Infrastructure layer for external integrations.
//!
//! This layer implements the store contracts used by the shortener service.
//!
//! # Modules
//!
//! - [`cache`] - Fast cache implementations (Redis, in-memory, no-op)
//! - [`persistence`] - Durable store implementations (PostgreSQL, in-memory)

pub mod cache;
pub mod persistence;
