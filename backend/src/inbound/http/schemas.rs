//! Small response payloads shared by several endpoints.

use serde::Serialize;
use utoipa::ToSchema;

/// Confirmation payload returned by delete endpoints.
#[derive(Debug, Serialize, ToSchema)]
pub struct DeleteResponse {
    /// Human-readable confirmation message.
    pub message: String,
}

impl DeleteResponse {
    /// Build the standard "<entity> deleted successfully" payload.
    pub fn deleted(entity: &str) -> Self {
        Self {
            message: format!("{entity} deleted successfully"),
        }
    }
}
