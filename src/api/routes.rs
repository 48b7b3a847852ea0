//! API route configuration.

use crate::api::handlers::{delete_url_handler, shorten_handler, stats_handler};
use crate::state::AppState;
use axum::{
    Router,
    routing::{delete, get, post},
};

/// Short URL management routes.
///
/// # Endpoints
///
/// - `POST   /shorten`          - Create a short URL
/// - `DELETE /url/{key}`        - Delete a short URL
/// - `GET    /url/{key}/stats`  - Access statistics for a short URL
pub fn url_routes() -> Router<AppState> {
    Router::new()
        .route("/shorten", post(shorten_handler))
        .route("/url/{key}", delete(delete_url_handler))
        .route("/url/{key}/stats", get(stats_handler))
}
