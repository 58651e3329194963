//! # Error Types
//!
//! Domain-specific error types for mercato-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                 │
//! │                                                                     │
//! │  mercato-core errors (this file)                                    │
//! │  ├── CoreError        - Business rule violations                    │
//! │  └── ValidationError  - Input validation failures                   │
//! │                                                                     │
//! │  mercato-db errors (separate crate)                                 │
//! │  └── DbError          - Storage operation failures                  │
//! │                                                                     │
//! │  mercato-checkout errors (session layer)                            │
//! │  └── ApiError         - What the UI shell sees (serialized)         │
//! │                                                                     │
//! │  Flow: ValidationError → CoreError → ApiError → UI notice           │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
///
/// These errors represent business rule violations. Every one of them
/// aborts the current operation with state left unchanged; none is fatal.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Cart line item cannot be found.
    #[error("Item not found in cart: {0}")]
    ItemNotFound(String),

    /// Shipping address cannot be found.
    #[error("Address not found: {0}")]
    AddressNotFound(String),

    /// Voucher cannot be found in the working list.
    #[error("Voucher not found: {0}")]
    VoucherNotFound(String),

    /// Requested quantity is outside the allowed range.
    ///
    /// The stored quantity is left unchanged; the request is rejected,
    /// never clamped.
    #[error("Quantity {requested} is outside the allowed range {min}..={max}")]
    QuantityOutOfRange {
        requested: i64,
        min: i64,
        max: i64,
    },

    /// Checkout requested with no line item selected.
    #[error("No items selected for checkout")]
    NothingSelected,

    /// Voucher flagged unavailable cannot be toggled into the selection.
    #[error("Voucher {id} is not available")]
    VoucherUnavailable { id: String },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// Reported inline by the UI, non-fatal. Used for early validation before
/// business logic runs.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Invalid format (e.g., malformed phone number).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CoreError::QuantityOutOfRange {
            requested: 100,
            min: 1,
            max: 99,
        };
        assert_eq!(
            err.to_string(),
            "Quantity 100 is outside the allowed range 1..=99"
        );
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "phone".to_string(),
        };
        assert_eq!(err.to_string(), "phone is required");
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::Required {
            field: "name".to_string(),
        };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}
