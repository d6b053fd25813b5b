//! # API Error Type
//!
//! Unified error type for HTTP handlers.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in Cotiza                                 │
//! │                                                                         │
//! │  Browser                     Rust Backend                               │
//! │  ───────                     ────────────                               │
//! │                                                                         │
//! │  POST /api/cotizaciones                                                 │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │  Handler                                                         │  │
//! │  │  Result<T, ApiError>                                             │  │
//! │  │         │                                                        │  │
//! │  │         ▼                                                        │  │
//! │  │  Malformed JSON? ──── JsonRejection ───────────────┐            │  │
//! │  │         │                                          │            │  │
//! │  │         ▼                                          ▼            │  │
//! │  │  Engine Error? ─────── CoreError::NotFound ─────► ApiError ────►│  │
//! │  │         │                                          ▲            │  │
//! │  │         ▼                                          │            │  │
//! │  │  Database Error? ──── DbError::QueryFailed ────────┘            │  │
//! │  │         │                                                        │  │
//! │  │         ▼                                                        │  │
//! │  │  Success ──────────────────────────────────────────────────────►│  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! │                                                                         │
//! │  ◄──── 404 {"error": "Service not found: ...", "code": "NOT_FOUND"}     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Internal failures are logged here and replaced by a generic message, so
//! SQL text and file paths never reach the browser.

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use cotiza_core::{CoreError, ErrorKind, ValidationError};
use cotiza_db::DbError;

/// API error returned from handlers.
///
/// ## Serialization
/// This is what the browser receives when a request fails:
/// ```json
/// {
///   "error": "cantidad must be at least 1, got 0",
///   "code": "INVALID_VALUE"
/// }
/// ```
#[derive(Debug, Clone, Serialize)]
pub struct ApiError {
    /// Human-readable error message for display
    #[serde(rename = "error")]
    pub message: String,

    /// Machine-readable error code for programmatic handling
    #[serde(rename = "code")]
    pub kind: ErrorKind,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        ApiError {
            kind,
            message: message.into(),
        }
    }

    /// Creates a not found error.
    pub fn not_found(resource: &str, id: &str) -> Self {
        ApiError::new(ErrorKind::NotFound, format!("{} not found: {}", resource, id))
    }

    /// Creates a validation error.
    pub fn invalid(message: impl Into<String>) -> Self {
        ApiError::new(ErrorKind::InvalidValue, message)
    }

    /// Creates an internal error. The detail is logged, never returned.
    pub fn internal(detail: impl std::fmt::Display) -> Self {
        tracing::error!("Internal error: {}", detail);
        ApiError::new(ErrorKind::Internal, "Internal server error")
    }

    /// HTTP status for this error.
    pub fn status_code(&self) -> StatusCode {
        match self.kind {
            ErrorKind::InvalidReference => StatusCode::BAD_REQUEST,
            ErrorKind::NotFound => StatusCode::NOT_FOUND,
            ErrorKind::InvalidValue => StatusCode::BAD_REQUEST,
            ErrorKind::UniquenessConflict => StatusCode::CONFLICT,
            ErrorKind::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status_code(), Json(self)).into_response()
    }
}

/// Converts engine errors to API errors.
impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Internal(detail) => ApiError::internal(detail),
            other => ApiError::new(other.kind(), other.to_string()),
        }
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::invalid(err.to_string())
    }
}

/// Converts database errors to API errors.
impl From<DbError> for ApiError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::NotFound { entity, id } => ApiError::not_found(&entity.to_string(), &id),
            DbError::UniqueViolation { field } => ApiError::new(
                ErrorKind::UniquenessConflict,
                format!("Duplicate value for {}", field),
            ),
            DbError::ConnectionFailed(e) => {
                tracing::error!("Database connection failed: {}", e);
                ApiError::new(ErrorKind::Internal, "Database connection failed")
            }
            DbError::PoolExhausted => {
                tracing::error!("Database pool exhausted");
                ApiError::new(ErrorKind::Internal, "Database busy")
            }
            other => {
                // Log the actual error but return a generic message
                tracing::error!("Database operation failed: {}", other);
                ApiError::new(ErrorKind::Internal, "Database operation failed")
            }
        }
    }
}

/// Malformed or non-JSON bodies.
impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::invalid(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::invalid(rejection.body_text())
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}] {}", self.kind, self.message)
    }
}

impl std::error::Error for ApiError {}

/// Result type for handlers.
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;
    use cotiza_core::EntityKind;

    #[test]
    fn test_status_mapping() {
        let cases = [
            (ErrorKind::InvalidReference, StatusCode::BAD_REQUEST),
            (ErrorKind::NotFound, StatusCode::NOT_FOUND),
            (ErrorKind::InvalidValue, StatusCode::BAD_REQUEST),
            (ErrorKind::UniquenessConflict, StatusCode::CONFLICT),
            (ErrorKind::Internal, StatusCode::INTERNAL_SERVER_ERROR),
        ];
        for (kind, status) in cases {
            assert_eq!(ApiError::new(kind, "x").status_code(), status);
        }
    }

    #[test]
    fn test_internal_detail_is_hidden() {
        let err: ApiError = CoreError::Internal("disk I/O error at /var/db".to_string()).into();
        assert_eq!(err.kind, ErrorKind::Internal);
        assert!(!err.message.contains("/var/db"));

        let err: ApiError = DbError::QueryFailed("near \"SELEC\": syntax error".to_string()).into();
        assert_eq!(err.message, "Database operation failed");
    }

    #[test]
    fn test_core_error_keeps_message() {
        let err: ApiError = CoreError::not_found(EntityKind::Service, "svc-1").into();
        assert_eq!(err.kind, ErrorKind::NotFound);
        assert!(err.message.contains("svc-1"));
    }

    #[test]
    fn test_body_shape() {
        let body = serde_json::to_value(ApiError::invalid("cantidad is required")).unwrap();
        assert_eq!(
            body,
            serde_json::json!({"error": "cantidad is required", "code": "INVALID_VALUE"})
        );
    }
}
