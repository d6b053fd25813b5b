//! # Validation Module
//!
//! Business rule validation for Cotiza.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: HTTP handler (axum)                                          │
//! │  ├── JSON shape (malformed body → INVALID_VALUE)                       │
//! │  └── Lenient number coercion ("2" → 2, "abc" → NaN)                    │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE                                                  │
//! │  ├── Identifier syntax (UUID)                                          │
//! │  ├── Quantity: finite, ≥ 1, whole                                      │
//! │  ├── Unit price: finite, ≥ 0                                           │
//! │  ├── Line total and subtotal: ≤ MAX_QUOTATION_AMOUNT                   │
//! │  └── Client / service field rules                                      │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Database (SQLite)                                            │
//! │  ├── NOT NULL / CHECK constraints                                      │
//! │  └── UNIQUE quotation code                                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Field names in the errors are the JSON names the caller sent, so the
//! message can be shown to the user as-is.

use crate::error::{CoreError, ValidationError};
use crate::MAX_QUOTATION_AMOUNT;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

const MAX_NAME_LEN: usize = 200;
const MAX_PHONE_LEN: usize = 50;

// =============================================================================
// Identifier Validators
// =============================================================================

/// Whether `id` is a syntactically valid entity identifier (a UUID).
///
/// ## Example
/// ```rust
/// use cotiza_core::validation::is_valid_id;
///
/// assert!(is_valid_id("550e8400-e29b-41d4-a716-446655440000"));
/// assert!(!is_valid_id("123"));
/// assert!(!is_valid_id(""));
/// ```
pub fn is_valid_id(id: &str) -> bool {
    uuid::Uuid::parse_str(id).is_ok()
}

/// Checks a reference field, producing INVALID_REFERENCE when malformed.
pub fn validate_reference(field: &str, id: &str) -> Result<(), CoreError> {
    if is_valid_id(id) {
        Ok(())
    } else {
        Err(CoreError::invalid_reference(field, id))
    }
}

// =============================================================================
// Line Item Validators
// =============================================================================

/// Validates a line item quantity and returns it as a whole count.
///
/// ## Rules
/// - Must be a finite number
/// - Must be at least 1
/// - Must be a whole number (`2.5` is rejected, `2.0` is accepted)
///
/// ```text
/// cantidad ──► NaN/∞?  → "cantidad must be a number"
///          ──► < 1?    → "cantidad must be at least 1, got 0"
///          ──► 2.5?    → "cantidad must be a whole number, got 2.5"
///          ──► OK(2)
/// ```
pub fn validate_quantity(quantity: f64) -> ValidationResult<i64> {
    if !quantity.is_finite() {
        return Err(ValidationError::NotANumber {
            field: "cantidad".to_string(),
        });
    }

    if quantity < 1.0 {
        return Err(ValidationError::BelowMinimum {
            field: "cantidad".to_string(),
            min: 1.0,
            value: quantity,
        });
    }

    if quantity.fract() != 0.0 || quantity > i64::MAX as f64 {
        return Err(ValidationError::NotWhole {
            field: "cantidad".to_string(),
            value: quantity,
        });
    }

    Ok(quantity as i64)
}

/// Validates a line item unit price.
///
/// ## Rules
/// - Must be a finite number
/// - Must be non-negative (zero is a free item)
///
/// ## Example
/// ```rust
/// use cotiza_core::validation::validate_unit_price;
///
/// assert!(validate_unit_price(50.0).is_ok());
/// assert!(validate_unit_price(0.0).is_ok());
/// assert!(validate_unit_price(-0.01).is_err());
/// assert!(validate_unit_price(f64::NAN).is_err());
/// ```
pub fn validate_unit_price(price: f64) -> ValidationResult<f64> {
    validate_non_negative("precioUnitario", price)
}

/// Checks that a computed amount stays within [`MAX_QUOTATION_AMOUNT`].
///
/// Runs on `precioUnitario × cantidad` before it is priced, and on the sum
/// of the line totals before the subtotal is priced.
///
/// ## Example
/// ```rust
/// use cotiza_core::validation::validate_amount;
///
/// assert!(validate_amount("totalItem", 129.6).is_ok());
/// assert!(validate_amount("totalItem", 1.0e17).is_err());
/// assert!(validate_amount("totalItem", f64::INFINITY).is_err());
/// ```
pub fn validate_amount(field: &str, amount: f64) -> ValidationResult<f64> {
    if amount.is_nan() {
        return Err(ValidationError::NotANumber {
            field: field.to_string(),
        });
    }

    if amount > MAX_QUOTATION_AMOUNT {
        return Err(ValidationError::AboveMaximum {
            field: field.to_string(),
            max: MAX_QUOTATION_AMOUNT,
            value: amount,
        });
    }

    Ok(amount)
}

// =============================================================================
// Client Validators
// =============================================================================

/// Validates a client display name (required, at most 200 characters).
pub fn validate_client_name(name: &str) -> ValidationResult<()> {
    validate_required_text("nombreCliente", name, MAX_NAME_LEN)
}

/// Validates a client email address.
///
/// ## Rules
/// - Must not be empty
/// - Must look like `something@something.something`
///
/// ## Example
/// ```rust
/// use cotiza_core::validation::validate_email;
///
/// assert!(validate_email("contacto@acme.com").is_ok());
/// assert!(validate_email("contacto@acme").is_err());
/// assert!(validate_email("@acme.com").is_err());
/// ```
pub fn validate_email(email: &str) -> ValidationResult<()> {
    let email = email.trim();

    if email.is_empty() {
        return Err(ValidationError::Required {
            field: "email".to_string(),
        });
    }

    let well_formed = email.match_indices('@').any(|(at, _)| {
        let domain = &email[at + 1..];
        at > 0
            && domain
                .match_indices('.')
                .any(|(dot, _)| dot > 0 && dot + 1 < domain.len())
    });

    if !well_formed {
        return Err(ValidationError::InvalidFormat {
            field: "email".to_string(),
            reason: "must be a valid email address".to_string(),
        });
    }

    Ok(())
}

/// Validates a client phone number (required, at most 50 characters).
pub fn validate_phone(phone: &str) -> ValidationResult<()> {
    validate_required_text("telefono", phone, MAX_PHONE_LEN)
}

// =============================================================================
// Service Validators
// =============================================================================

/// Validates a service display name (required, at most 200 characters).
pub fn validate_service_name(name: &str) -> ValidationResult<()> {
    validate_required_text("nombreServicio", name, MAX_NAME_LEN)
}

/// Validates a service base price (finite, non-negative).
pub fn validate_base_price(price: f64) -> ValidationResult<f64> {
    validate_non_negative("precioBase", price)
}

// =============================================================================
// Shared Helpers
// =============================================================================

fn validate_required_text(field: &str, value: &str, max: usize) -> ValidationResult<()> {
    let value = value.trim();

    if value.is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    if value.chars().count() > max {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max,
        });
    }

    Ok(())
}

fn validate_non_negative(field: &str, value: f64) -> ValidationResult<f64> {
    if !value.is_finite() {
        return Err(ValidationError::NotANumber {
            field: field.to_string(),
        });
    }

    if value < 0.0 {
        return Err(ValidationError::BelowMinimum {
            field: field.to_string(),
            min: 0.0,
            value,
        });
    }

    Ok(value)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn test_validate_amount() {
        assert_eq!(validate_amount("totalItem", 0.0), Ok(0.0));
        assert_eq!(
            validate_amount("totalItem", MAX_QUOTATION_AMOUNT),
            Ok(MAX_QUOTATION_AMOUNT)
        );
        assert!(matches!(
            validate_amount("totalItem", 1.0e17),
            Err(ValidationError::AboveMaximum { .. })
        ));
        assert!(matches!(
            validate_amount("subTotal", f64::INFINITY),
            Err(ValidationError::AboveMaximum { .. })
        ));
        assert!(matches!(
            validate_amount("subTotal", f64::NAN),
            Err(ValidationError::NotANumber { .. })
        ));
    }

    #[test]
    fn test_validate_reference() {
        assert!(validate_reference("clienteId", "550e8400-e29b-41d4-a716-446655440000").is_ok());

        let err = validate_reference("clienteId", "not-an-id").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidReference);
    }

    #[test]
    fn test_validate_quantity() {
        assert_eq!(validate_quantity(1.0), Ok(1));
        assert_eq!(validate_quantity(3.0), Ok(3));

        assert!(matches!(
            validate_quantity(0.0),
            Err(ValidationError::BelowMinimum { .. })
        ));
        assert!(matches!(
            validate_quantity(-2.0),
            Err(ValidationError::BelowMinimum { .. })
        ));
        assert!(matches!(
            validate_quantity(2.5),
            Err(ValidationError::NotWhole { .. })
        ));
        assert!(matches!(
            validate_quantity(f64::NAN),
            Err(ValidationError::NotANumber { .. })
        ));
        assert!(matches!(
            validate_quantity(f64::INFINITY),
            Err(ValidationError::NotANumber { .. })
        ));
    }

    #[test]
    fn test_validate_unit_price() {
        assert_eq!(validate_unit_price(0.0), Ok(0.0));
        assert_eq!(validate_unit_price(12.5), Ok(12.5));
        assert!(validate_unit_price(-1.0).is_err());
        assert!(validate_unit_price(f64::NEG_INFINITY).is_err());
    }

    #[test]
    fn test_validate_email() {
        assert!(validate_email("contacto@acme.com").is_ok());
        assert!(validate_email("a@b.c").is_ok());
        assert!(validate_email("first.last@sub.domain.org").is_ok());

        assert!(validate_email("").is_err());
        assert!(validate_email("acme.com").is_err());
        assert!(validate_email("a@.c").is_err());
        assert!(validate_email("a@b.").is_err());
    }

    #[test]
    fn test_validate_client_fields() {
        assert!(validate_client_name("ACME S.A.").is_ok());
        assert!(validate_client_name("   ").is_err());
        assert!(validate_client_name(&"A".repeat(201)).is_err());

        assert!(validate_phone("6000-0000").is_ok());
        assert!(validate_phone("").is_err());
        assert!(validate_phone(&"9".repeat(51)).is_err());
    }

    #[test]
    fn test_validate_service_fields() {
        assert!(validate_service_name("Soporte Remoto").is_ok());
        assert!(validate_service_name("").is_err());

        assert!(validate_base_price(20.0).is_ok());
        assert!(validate_base_price(-5.0).is_err());
    }
}
