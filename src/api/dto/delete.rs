//! DTOs for the delete endpoint.

use serde::{Deserialize, Serialize};

/// Confirmation returned after a short URL was deleted.
#[derive(Debug, Serialize, Deserialize)]
pub struct DeleteResponse {
    pub message: String,
    pub deleted_url: String,
}

impl DeleteResponse {
    pub fn new(deleted_url: String) -> Self {
        Self {
            message: "URL deleted successfully".to_string(),
            deleted_url,
        }
    }
}
