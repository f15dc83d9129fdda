//! Response DTOs for the paste API
//!
//! Defines the structure of outgoing HTTP response bodies.

use serde::Serialize;

use crate::health::HealthStatus;
use crate::paste::{CreatedPaste, PasteView};

/// Response body for paste creation (POST /api/pastes)
#[derive(Debug, Clone, Serialize)]
pub struct CreatePasteResponse {
    /// The new paste ID
    pub id: String,
    /// Shareable link to the paste page
    pub url: String,
}

impl From<CreatedPaste> for CreatePasteResponse {
    fn from(created: CreatedPaste) -> Self {
        Self {
            id: created.id,
            url: created.url,
        }
    }
}

/// Response body for a paste read (GET /api/pastes/:id)
///
/// Absent limits serialize as `null`.
#[derive(Debug, Clone, Serialize)]
pub struct PasteResponse {
    pub content: String,
    pub remaining_views: Option<u64>,
    pub expires_at: Option<String>,
}

impl From<PasteView> for PasteResponse {
    fn from(view: PasteView) -> Self {
        Self {
            content: view.content,
            remaining_views: view.remaining_views,
            expires_at: view.expires_at,
        }
    }
}

/// Response body for the health endpoint (GET /api/healthz)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Whether the store answered
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl From<HealthStatus> for HealthResponse {
    fn from(status: HealthStatus) -> Self {
        Self {
            ok: status.reachable,
            error: status.error,
        }
    }
}

/// Error response body for all error conditions
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    /// Error message describing what went wrong
    pub error: String,
}

impl ErrorResponse {
    /// Creates a new ErrorResponse
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}
