//! Shared application state injected into every handler.

use std::sync::Arc;

use crate::application::services::ShortenerService;

/// State shared by all routes.
///
/// Cheap to clone; the service and both stores behind it are reference-counted.
#[derive(Clone)]
pub struct AppState {
    pub shortener: Arc<ShortenerService>,
}

impl AppState {
    pub fn new(shortener: Arc<ShortenerService>) -> Self {
        Self { shortener }
    }
}
