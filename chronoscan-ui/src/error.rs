//! Error types for chronoscan-ui
//!
//! Two layers: `TriageError` is the domain taxonomy (what went wrong in the
//! decision/workflow core), `ApiError` is its HTTP projection. Nothing in
//! the core is fatal to the process; the worst outcome is a submission that
//! silently downgrades to a simulated result.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Domain errors of the triage core
#[derive(Debug, Error)]
pub enum TriageError {
    /// Cancer type id is not in the catalog. Fatal for the request;
    /// callers must not proceed with classification.
    #[error("Unknown cancer profile: {0}")]
    UnknownProfile(String),

    /// Upstream analysis submission failed. Recovered locally via the
    /// fallback path, never surfaced as a blocking error.
    #[error("Analysis submission failed: {0}")]
    SubmissionFailed(String),

    /// Remote report generation failed. Recovered locally by keeping the
    /// default templated sections.
    #[error("Report generation failed: {0}")]
    ReportGenerationFailed(String),

    /// Advisory dashboard read failed. Silently ignored, defaults used.
    #[error("Advisory read failed: {0}")]
    AdvisoryReadFailed(String),
}

/// API error type
#[derive(Debug, Error)]
pub enum ApiError {
    /// Resource not found (404)
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// Invalid request (400)
    #[error("Invalid request: {0}")]
    BadRequest(String),

    /// Conflict (409) - e.g., submission already in flight
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Internal server error (500)
    #[error("Internal server error: {0}")]
    Internal(String),

    /// Generic error
    #[error(transparent)]
    Other(#[from] anyhow::Error),

    /// chronoscan-common error
    #[error("Common error: {0}")]
    Common(#[from] chronoscan_common::Error),
}

impl From<TriageError> for ApiError {
    fn from(err: TriageError) -> Self {
        match err {
            // Unknown profile is a caller mistake, not a server fault
            TriageError::UnknownProfile(id) => {
                ApiError::BadRequest(format!("Unknown cancer type: {id}"))
            }
            // The remaining variants are recovered before reaching the API
            // layer; if one leaks through, report it as internal.
            other => ApiError::Internal(other.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_code, message) = match self {
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, "CONFLICT", msg),
            ApiError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR", msg),
            ApiError::Other(ref err) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR",
                err.to_string(),
            ),
            ApiError::Common(ref err) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "COMMON_ERROR",
                err.to_string(),
            ),
        };

        let body = Json(json!({
            "error": {
                "code": error_code,
                "message": message,
            }
        }));

        (status, body).into_response()
    }
}

/// Result type for API handlers
pub type ApiResult<T> = Result<T, ApiError>;
