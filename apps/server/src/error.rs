//! Error types for the HTTP API.
//!
//! ## Flow
//! ```text
//! DbError / CoreError / ValidationError
//!        │
//!        ▼ From impls
//!    ApiError ──► IntoResponse ──► { "code": "...", "message": "..." }
//!                                   with the matching status code
//! ```
//!
//! Status mapping: 400 validation, 404 missing, 409 conflict, 422 business
//! rule, 500 everything internal. Internal causes are logged server-side
//! and never echoed to the client.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use tracing::error;

use drplanet_core::{CoreError, ValidationError};
use drplanet_db::DbError;

/// API errors.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Conflict(String),

    #[error("{0}")]
    BusinessRule(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Convenience alias for handler return types.
pub type ApiResult<T> = Result<T, ApiError>;

/// The wire envelope for every error response.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub code: &'static str,
    pub message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code, message) = match self {
            ApiError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, "CONFLICT", msg),
            ApiError::BusinessRule(msg) => {
                (StatusCode::UNPROCESSABLE_ENTITY, "BUSINESS_RULE", msg)
            }
            ApiError::Database(msg) => {
                error!(error = %msg, "Database failure");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "DATABASE_ERROR",
                    "An internal error occurred".to_string(),
                )
            }
            ApiError::Internal(msg) => {
                error!(error = %msg, "Internal failure");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal error occurred".to_string(),
                )
            }
        };

        (status, Json(ErrorBody { code, message })).into_response()
    }
}

impl From<DbError> for ApiError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::NotFound { .. } => ApiError::NotFound(err.to_string()),
            DbError::UniqueViolation { .. } | DbError::ForeignKeyViolation { .. } => {
                ApiError::Conflict(err.to_string())
            }
            DbError::InvalidTransition(core) => ApiError::from(core),
            other => ApiError::Database(other.to_string()),
        }
    }
}

impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::InvalidStatusTransition { .. } => ApiError::BusinessRule(err.to_string()),
            CoreError::Validation(v) => ApiError::from(v),
            other => ApiError::Validation(other.to_string()),
        }
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::Validation(err.to_string())
    }
}
