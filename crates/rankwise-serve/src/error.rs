//! API error types and response formatting.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use rankwise_core::ValidationErrors;
use serde::Serialize;

/// API error type that converts to appropriate HTTP responses.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Resource not found.
    #[error("not found: {0}")]
    NotFound(String),

    /// Invalid request parameters.
    #[error("bad request: {0}")]
    BadRequest(String),

    /// Submitted entries failed validation.
    #[error("validation error: {}", .0.joined())]
    Validation(ValidationErrors),

    /// No submitted entry was complete enough to look up.
    #[error("empty batch")]
    EmptyBatch,

    /// Internal server error.
    #[error("internal error: {0}")]
    Internal(#[from] anyhow::Error),

    /// ClickHouse query error.
    #[error("database error: {0}")]
    Database(#[from] clickhouse::error::Error),
}

impl From<rankwise_core::Error> for ApiError {
    fn from(err: rankwise_core::Error) -> Self {
        use rankwise_core::Error;

        let message = err.to_string();
        match err {
            Error::Validation(errors) => Self::Validation(errors),
            Error::EmptyBatch => Self::EmptyBatch,
            Error::EmptyCatalog(_) => Self::NotFound(message),
            Error::DegenerateBracket { .. }
            | Error::MismatchedBracket { .. }
            | Error::EntryLimit { .. }
            | Error::CannotRemove { .. } => Self::BadRequest(message),
        }
    }
}

/// JSON error response body.
#[derive(Debug, Clone, Serialize)]
struct ErrorResponse {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    details: Vec<String>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let mut details = Vec::new();

        let (status, error, message) = match &self {
            Self::NotFound(msg) => (StatusCode::NOT_FOUND, "not_found", Some(msg.clone())),
            Self::BadRequest(msg) => (StatusCode::BAD_REQUEST, "bad_request", Some(msg.clone())),
            Self::Validation(errors) => {
                details = errors.messages().into_iter().map(String::from).collect();
                (
                    StatusCode::UNPROCESSABLE_ENTITY,
                    "validation_error",
                    Some(errors.joined()),
                )
            }
            Self::EmptyBatch => (
                StatusCode::BAD_REQUEST,
                "empty_batch",
                Some(rankwise_core::Error::EmptyBatch.to_string()),
            ),
            Self::Internal(err) => {
                tracing::error!(error = %err, "internal server error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal_error",
                    Some("An internal error occurred".to_string()),
                )
            }
            Self::Database(err) => {
                tracing::error!(error = %err, "database error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "database_error",
                    Some("A database error occurred".to_string()),
                )
            }
        };

        let body = ErrorResponse {
            error: error.to_string(),
            message,
            details,
        };

        (status, Json(body)).into_response()
    }
}
