//! # API Error Type
//!
//! Unified error envelope for session commands.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in Mercato                            │
//! │                                                                     │
//! │  Command Function                                                   │
//! │  Result<T, ApiError>                                                │
//! │         │                                                           │
//! │         ├── Storage error?  ── DbError ──────────┐                  │
//! │         │                                        ▼                  │
//! │         ├── Rule rejection? ── CoreError ───── ApiError ──► shell   │
//! │         │                                        ▲                  │
//! │         └── Bad form input? ── ValidationError ──┘                  │
//! │                                                                     │
//! │  The shell switches on `code`:                                      │
//! │    QUANTITY_LIMIT / NOTHING_SELECTED → transient notice             │
//! │    MISSING_STATE                     → notice + safe-screen route   │
//! │    VALIDATION_ERROR                  → inline form message          │
//! │                                                                     │
//! │  Nothing here is fatal: every error resolves to an unchanged        │
//! │  state plus a notice.                                               │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```

use serde::Serialize;

use mercato_core::{CoreError, ValidationError};
use mercato_db::DbError;

/// API error returned from session commands.
///
/// ## Serialization
/// What the shell receives when a command fails:
/// ```json
/// {
///   "code": "QUANTITY_LIMIT",
///   "message": "Quantity 100 is outside the allowed range 1..=99"
/// }
/// ```
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    /// Machine-readable error code for programmatic handling
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub message: String,
}

/// Error codes for command responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Resource not found
    NotFound,

    /// Input validation failed (inline form message)
    ValidationError,

    /// Storage operation failed
    StorageError,

    /// Quantity change outside the allowed range
    QuantityLimit,

    /// Checkout attempted with nothing selected
    NothingSelected,

    /// Unavailable voucher toggled
    VoucherUnavailable,

    /// Required persisted state is absent (notice + redirect)
    MissingState,

    /// Internal error
    Internal,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
        }
    }

    /// Creates a not found error.
    pub fn not_found(resource: &str, id: &str) -> Self {
        ApiError::new(
            ErrorCode::NotFound,
            format!("{} not found: {}", resource, id),
        )
    }

    /// Creates a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::ValidationError, message)
    }

    /// Creates a missing-required-state error.
    pub fn missing_state(what: &str) -> Self {
        ApiError::new(
            ErrorCode::MissingState,
            format!("Required state is missing: {}", what),
        )
    }

    /// Creates an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::Internal, message)
    }
}

/// Converts storage errors to API errors.
impl From<DbError> for ApiError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::ConnectionFailed(_) => {
                ApiError::new(ErrorCode::StorageError, "Storage connection failed")
            }
            DbError::MigrationFailed(_) => {
                ApiError::new(ErrorCode::StorageError, "Storage migration failed")
            }
            DbError::QueryFailed(e) | DbError::TransactionFailed(e) | DbError::Internal(e) => {
                tracing::error!("Storage operation failed: {}", e);
                ApiError::new(ErrorCode::StorageError, "Storage operation failed")
            }
            DbError::PoolExhausted => {
                ApiError::new(ErrorCode::StorageError, "Storage pool exhausted")
            }
            DbError::Encode(e) => {
                tracing::error!("Storage encoding failed: {}", e);
                ApiError::new(ErrorCode::StorageError, "Storage operation failed")
            }
        }
    }
}

/// Converts core errors to API errors.
impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::ItemNotFound(id) => ApiError::not_found("Item", &id),
            CoreError::AddressNotFound(id) => ApiError::not_found("Address", &id),
            CoreError::VoucherNotFound(id) => ApiError::not_found("Voucher", &id),
            CoreError::QuantityOutOfRange { .. } => {
                ApiError::new(ErrorCode::QuantityLimit, err.to_string())
            }
            CoreError::NothingSelected => {
                ApiError::new(ErrorCode::NothingSelected, err.to_string())
            }
            CoreError::VoucherUnavailable { .. } => {
                ApiError::new(ErrorCode::VoucherUnavailable, err.to_string())
            }
            CoreError::Validation(e) => ApiError::validation(e.to_string()),
        }
    }
}

/// Converts validation errors to API errors directly (form-level checks).
impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::validation(err.to_string())
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}

// =============================================================================
// Unit Tests
// =============================================================================
