//! Handler for short URL statistics.

use axum::{
    Json,
    extract::{Path, State},
};

use crate::api::dto::stats::StatsResponse;
use crate::error::AppError;
use crate::state::AppState;

/// Returns the access statistics of a short URL.
///
/// # Endpoint
///
/// `GET /url/{key}/stats`
///
/// Always served from the durable store so the access count is current.
///
/// # Errors
///
/// Returns 404 Not Found if the key doesn't exist.
/// Returns 500 Internal Server Error if the durable read fails.
pub async fn stats_handler(
    Path(key): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<StatsResponse>, AppError> {
    let record = state.shortener.get_url_stats(&key).await?;

    Ok(Json(record.into()))
}
