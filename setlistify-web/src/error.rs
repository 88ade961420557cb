//! Error types for setlistify-web
//!
//! Three client-visible categories:
//! - validation: rejected before storage is touched, submitted input echoed back
//! - not found: the addressed song/setlist/membership does not exist
//! - storage: anything the database reported; logged, surfaced generically

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{json, Value};
use thiserror::Error;
use tracing::error;

/// API error type
#[derive(Debug, Error)]
pub enum ApiError {
    /// Form validation failed (400), with the submitted fields for re-entry
    #[error("Validation failed: {message}")]
    Validation { message: String, input: Value },

    /// Malformed identifier or payload (400)
    #[error("Invalid request: {0}")]
    BadRequest(String),

    /// Resource not found (404)
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// Storage failure (500); `context` is the only text the client sees
    #[error("{context}: {source}")]
    Storage {
        context: &'static str,
        #[source]
        source: setlistify_common::Error,
    },
}

impl ApiError {
    /// Adapter for `map_err` on store calls
    ///
    /// `Error::NotFound` from the store becomes a 404; everything else is a
    /// storage failure reported with `context`.
    pub fn storage(context: &'static str) -> impl FnOnce(setlistify_common::Error) -> ApiError {
        move |source| match source {
            setlistify_common::Error::NotFound(what) => ApiError::NotFound(what),
            source => ApiError::Storage { context, source },
        }
    }

    /// Validation error echoing the submitted input
    pub fn validation(message: impl Into<String>, input: Value) -> Self {
        ApiError::Validation {
            message: message.into(),
            input,
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation { .. } | ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Storage { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();

        let body = match self {
            ApiError::Validation { message, input } => json!({
                "success": false,
                "error": { "code": "VALIDATION_ERROR", "message": message },
                "input": input,
            }),
            ApiError::BadRequest(message) => json!({
                "success": false,
                "error": { "code": "BAD_REQUEST", "message": message },
            }),
            ApiError::NotFound(message) => json!({
                "success": false,
                "error": { "code": "NOT_FOUND", "message": message },
            }),
            ApiError::Storage { context, source } => {
                error!(
                    constraint_violation = source.is_constraint_violation(),
                    "{}: {}", context, source
                );
                json!({
                    "success": false,
                    "error": { "code": "STORAGE_ERROR", "message": context },
                })
            }
        };

        (status, Json(body)).into_response()
    }
}

/// Result type for API handlers
pub type ApiResult<T> = Result<T, ApiError>;
