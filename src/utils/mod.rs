//! Helpers shared across layers.
//!
//! - [`key_generator`] - Random short key generation
//! - [`db_error`] - PostgreSQL error classification

pub mod db_error;
pub mod key_generator;
