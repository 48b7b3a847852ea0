//! Handler for short URL deletion.

use axum::{
    Json,
    extract::{Path, State},
};

use crate::api::dto::delete::DeleteResponse;
use crate::error::AppError;
use crate::state::AppState;

/// Deletes a short URL.
///
/// # Endpoint
///
/// `DELETE /url/{key}`
///
/// The durable record is removed first; the cache entry is invalidated
/// afterwards on a best-effort basis.
///
/// # Response
///
/// ```json
/// { "message": "URL deleted successfully", "deleted_url": "https://example.com" }
/// ```
///
/// # Errors
///
/// Returns 404 Not Found if the key doesn't exist.
/// Returns 500 Internal Server Error if the durable delete fails.
pub async fn delete_url_handler(
    Path(key): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<DeleteResponse>, AppError> {
    let deleted_url = state.shortener.delete_url(&key).await?;

    Ok(Json(DeleteResponse::new(deleted_url)))
}
