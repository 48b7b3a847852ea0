//! Core domain entities.
//!
//! - [`UrlRecord`] - A short URL mapping with its access counter
//!
//! Cache entries have no entity of their own: a cached value is a bare
//! `short_url -> long_url` projection of a [`UrlRecord`] and may be stale or
//! missing at any time.

pub mod url_record;

pub use url_record::UrlRecord;
