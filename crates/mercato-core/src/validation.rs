//! # Validation Module
//!
//! Input validation for form-level checks, run before business logic.
//! Every failure is inline and non-fatal; the operation is simply not
//! attempted.

use crate::error::ValidationError;
use crate::types::ShippingAddress;
use crate::{MAX_ITEM_QUANTITY, MIN_ITEM_QUANTITY};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a quantity value against the allowed range.
pub fn validate_quantity(quantity: i64) -> ValidationResult<()> {
    if quantity <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    if quantity > MAX_ITEM_QUANTITY {
        return Err(ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: MIN_ITEM_QUANTITY,
            max: MAX_ITEM_QUANTITY,
        });
    }

    Ok(())
}

// =============================================================================
// String Validators
// =============================================================================

/// Validates a recipient name.
///
/// ## Rules
/// - Must not be empty after trimming
/// - Must be at most 100 characters
pub fn validate_recipient_name(name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "name".to_string(),
        });
    }

    if name.chars().count() > 100 {
        return Err(ValidationError::TooLong {
            field: "name".to_string(),
            max: 100,
        });
    }

    Ok(())
}

/// Validates and normalizes a phone number.
///
/// ## Rules
/// - Separators (space, dot, dash, parentheses) are stripped first
/// - Accepted forms: `0` + nine digits, or `+84` + nine digits
///
/// ## Returns
/// The normalized (separator-free) phone string.
pub fn validate_phone(phone: &str) -> ValidationResult<String> {
    let normalized: String = phone
        .chars()
        .filter(|c| !matches!(c, ' ' | '.' | '-' | '(' | ')'))
        .collect();

    if normalized.is_empty() {
        return Err(ValidationError::Required {
            field: "phone".to_string(),
        });
    }

    let digits_valid = |digits: &str, expected: usize| {
        digits.len() == expected && digits.bytes().all(|b| b.is_ascii_digit())
    };

    let well_formed = if let Some(rest) = normalized.strip_prefix("+84") {
        digits_valid(rest, 9)
    } else if let Some(rest) = normalized.strip_prefix('0') {
        digits_valid(rest, 9)
    } else {
        false
    };

    if !well_formed {
        return Err(ValidationError::InvalidFormat {
            field: "phone".to_string(),
            reason: "expected 0XXXXXXXXX or +84XXXXXXXXX".to_string(),
        });
    }

    Ok(normalized)
}

fn validate_required(field: &str, value: &str) -> ValidationResult<()> {
    if value.trim().is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }
    Ok(())
}

/// Validates a full shipping address form.
///
/// Checks the recipient name, phone format, and the four location fields.
pub fn validate_address(address: &ShippingAddress) -> ValidationResult<()> {
    validate_recipient_name(&address.name)?;
    validate_phone(&address.phone)?;
    validate_required("province", &address.province)?;
    validate_required("district", &address.district)?;
    validate_required("ward", &address.ward)?;
    validate_required("street address", &address.street_address)?;
    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::AddressType;

    #[test]
    fn test_validate_quantity() {
        assert!(validate_quantity(1).is_ok());
        assert!(validate_quantity(99).is_ok());

        assert!(validate_quantity(0).is_err());
        assert!(validate_quantity(-1).is_err());
        assert!(validate_quantity(100).is_err());
    }

    #[test]
    fn test_validate_recipient_name() {
        assert!(validate_recipient_name("Nguyễn Văn A").is_ok());
        assert!(validate_recipient_name("").is_err());
        assert!(validate_recipient_name("   ").is_err());
        assert!(validate_recipient_name(&"A".repeat(101)).is_err());
    }

    #[test]
    fn test_validate_phone_accepts_local_forms() {
        assert_eq!(validate_phone("0912345678").unwrap(), "0912345678");
        assert_eq!(validate_phone("091 234 5678").unwrap(), "0912345678");
        assert_eq!(validate_phone("091-234-5678").unwrap(), "0912345678");
        assert_eq!(validate_phone("+84912345678").unwrap(), "+84912345678");
    }

    #[test]
    fn test_validate_phone_rejects_malformed() {
        assert!(validate_phone("").is_err());
        assert!(validate_phone("12345").is_err());
        assert!(validate_phone("091234567").is_err()); // nine total, ten required
        assert!(validate_phone("09123456789").is_err()); // eleven total
        assert!(validate_phone("+8491234567").is_err());
        assert!(validate_phone("0912x45678").is_err());
    }

    #[test]
    fn test_validate_address() {
        let mut address = ShippingAddress {
            id: "a1".to_string(),
            name: "Nguyen Van A".to_string(),
            phone: "0912345678".to_string(),
            province: "Hà Nội".to_string(),
            district: "Cầu Giấy".to_string(),
            ward: "Dịch Vọng".to_string(),
            street_address: "1 Trần Thái Tông".to_string(),
            is_default: false,
            address_type: AddressType::Office,
        };
        assert!(validate_address(&address).is_ok());

        address.ward = String::new();
        assert!(validate_address(&address).is_err());
    }
}
