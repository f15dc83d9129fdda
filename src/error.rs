//! Error types for the paste service
//!
//! Provides unified error handling using thiserror.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::kv::StoreError;
use crate::models::ErrorResponse;

/// Message returned for every unavailable paste. Never says which of
/// missing, expired or view-exhausted applied.
pub const NOT_FOUND_MESSAGE: &str = "Paste not found";

/// Message returned for every internal failure.
pub const INTERNAL_MESSAGE: &str = "Internal Server Error";

// == Paste Error Enum ==
/// Unified error type for the paste service.
#[derive(Error, Debug)]
pub enum PasteError {
    /// Caller input failed validation
    #[error("Invalid request: {0}")]
    Validation(String),

    /// Paste is absent, expired or view-exhausted
    #[error("Paste not found")]
    NotFound,

    /// Store or transport failure
    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<StoreError> for PasteError {
    fn from(err: StoreError) -> Self {
        PasteError::Internal(err.to_string())
    }
}

// == IntoResponse Implementation ==
impl IntoResponse for PasteError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            PasteError::Validation(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            PasteError::NotFound => (StatusCode::NOT_FOUND, NOT_FOUND_MESSAGE.to_string()),
            PasteError::Internal(detail) => {
                tracing::error!("Request failed: {}", detail);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    INTERNAL_MESSAGE.to_string(),
                )
            }
        };

        (status, Json(ErrorResponse::new(message))).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for the paste service.
pub type Result<T> = std::result::Result<T, PasteError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        let validation = PasteError::Validation("bad".to_string()).into_response();
        assert_eq!(validation.status(), StatusCode::BAD_REQUEST);

        let not_found = PasteError::NotFound.into_response();
        assert_eq!(not_found.status(), StatusCode::NOT_FOUND);

        let internal = PasteError::Internal("boom".to_string()).into_response();
        assert_eq!(internal.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_store_error_is_internal() {
        let err: PasteError = StoreError::Unavailable("connection refused".to_string()).into();
        assert!(matches!(err, PasteError::Internal(_)));
    }
}
