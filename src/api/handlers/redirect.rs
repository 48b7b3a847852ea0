//! Handler for short URL redirect.

use axum::{
    extract::{Path, State},
    response::{IntoResponse, Redirect},
};

use crate::error::AppError;
use crate::state::AppState;

/// Redirects a short key to its original URL.
///
/// # Endpoint
///
/// `GET /{key}`
///
/// Resolution is read-through (cache first, durable store on miss) and
/// counts the access. The redirect is a 307 so that clients come back through
/// the service on every visit and each one is counted.
///
/// # Errors
///
/// Returns 404 Not Found if the key doesn't exist.
/// Returns 500 Internal Server Error if the durable store fails on a cache miss.
pub async fn redirect_handler(
    Path(key): Path<String>,
    State(state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let long_url = state.shortener.get_long_url(&key).await?;

    Ok(Redirect::temporary(&long_url))
}
