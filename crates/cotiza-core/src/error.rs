//! # Error Types
//!
//! Domain-specific error types for cotiza-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  cotiza-core errors (this file)                                        │
//! │  ├── CoreError        - Pricing engine failures (carries ErrorKind)    │
//! │  ├── ValidationError  - Field-level rule violations                    │
//! │  └── StoreError       - What a QuotationStore may report               │
//! │                                                                         │
//! │  cotiza-db errors (separate crate)                                     │
//! │  └── DbError          - Database operation failures → StoreError       │
//! │                                                                         │
//! │  HTTP errors (in app)                                                  │
//! │  └── ApiError         - What the front-end sees (JSON)                 │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError ← StoreError ← DbError              │
//! │        CoreError → ApiError → Front-end                                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (field, ID, etc.)
//! 3. Every `CoreError` maps to exactly one [`ErrorKind`]

use serde::Serialize;
use thiserror::Error;

use crate::types::EntityKind;

// =============================================================================
// Error Kind
// =============================================================================

/// The error taxonomy exposed to callers.
///
/// ```text
/// INVALID_REFERENCE   malformed identifier                  → 400
/// NOT_FOUND           client / service / quotation absent   → 404
/// INVALID_VALUE       quantity, price or field rule broken  → 400
/// UNIQUENESS_CONFLICT duplicate quotation token             → 409
/// INTERNAL            store or infrastructure failure       → 500
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorKind {
    InvalidReference,
    NotFound,
    InvalidValue,
    UniquenessConflict,
    Internal,
}

impl ErrorKind {
    /// Whether the caller caused this error (and can fix the request).
    pub const fn is_client_error(&self) -> bool {
        !matches!(self, ErrorKind::Internal)
    }
}

// =============================================================================
// Core Error
// =============================================================================

/// Pricing engine errors.
///
/// Validation runs fail-fast, so a rejected request carries exactly one of
/// these, and no quotation has been written.
#[derive(Debug, Error)]
pub enum CoreError {
    /// An identifier is not syntactically valid.
    #[error("{field} is not a valid identifier: '{value}'")]
    InvalidReference { field: String, value: String },

    /// A referenced entity does not exist.
    ///
    /// ## When This Occurs
    /// - The quotation's client was never created or has been deleted
    /// - One of the line items points at a missing service (named in `id`)
    /// - Updating or fetching a quotation that does not exist
    #[error("{entity} not found: {id}")]
    NotFound { entity: EntityKind, id: String },

    /// A value broke a business rule (quantity < 1, negative price, ...).
    #[error("Invalid value: {0}")]
    InvalidValue(#[from] ValidationError),

    /// The store refused a duplicate quotation token.
    #[error("Duplicate {field}")]
    UniquenessConflict { field: String },

    /// Unexpected store failure. The message is for logs only.
    #[error("Store failure: {0}")]
    Internal(String),
}

impl CoreError {
    /// Creates an InvalidReference error.
    pub fn invalid_reference(field: impl Into<String>, value: impl Into<String>) -> Self {
        CoreError::InvalidReference {
            field: field.into(),
            value: value.into(),
        }
    }

    /// Creates a NotFound error.
    pub fn not_found(entity: EntityKind, id: impl Into<String>) -> Self {
        CoreError::NotFound {
            entity,
            id: id.into(),
        }
    }

    /// Returns the taxonomy kind of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            CoreError::InvalidReference { .. } => ErrorKind::InvalidReference,
            CoreError::NotFound { .. } => ErrorKind::NotFound,
            CoreError::InvalidValue(_) => ErrorKind::InvalidValue,
            CoreError::UniquenessConflict { .. } => ErrorKind::UniquenessConflict,
            CoreError::Internal(_) => ErrorKind::Internal,
        }
    }
}

/// Store failures surface through the engine with their own kind.
impl From<StoreError> for CoreError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound { entity, id } => CoreError::NotFound { entity, id },
            StoreError::UniqueViolation { field } => CoreError::UniquenessConflict { field },
            StoreError::Backend(message) => CoreError::Internal(message),
        }
    }
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// Used for early validation before anything reaches the store.
#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is below its minimum.
    #[error("{field} must be at least {min}, got {value}")]
    BelowMinimum { field: String, min: f64, value: f64 },

    /// Value is not a finite number (NaN, infinity, unparseable text).
    #[error("{field} must be a number")]
    NotANumber { field: String },

    /// Numeric value is above its maximum.
    #[error("{field} must be at most {max}, got {value}")]
    AboveMaximum { field: String, max: f64, value: f64 },

    /// Value must be a whole number.
    #[error("{field} must be a whole number, got {value}")]
    NotWhole { field: String, value: f64 },

    /// Invalid format (e.g., malformed email).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// A collection that must contain something is empty.
    #[error("{field} must not be empty")]
    Empty { field: String },
}

// =============================================================================
// Store Error
// =============================================================================

/// Errors a [`QuotationStore`](crate::store::QuotationStore) implementation
/// reports back to the engine.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The record to replace does not exist.
    #[error("{entity} not found: {id}")]
    NotFound { entity: EntityKind, id: String },

    /// A unique constraint rejected the write.
    #[error("Duplicate value for {field}")]
    UniqueViolation { field: String },

    /// Anything else: connection loss, query failure, pool exhaustion.
    #[error("{0}")]
    Backend(String),
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
