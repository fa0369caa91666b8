//! # Validation Module
//!
//! Configuration validation for products, offers and delivery rules.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Config file (TOML)                                           │
//! │  ├── Type validation (deserialization)                                 │
//! │  └── Unknown discount_type rejected by DiscountType::from_str          │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Construction (Rust)                                          │
//! │  └── THIS MODULE: business rule validation                             │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Evaluation                                                   │
//! │  └── Never fails; a built Offer is always well-formed                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use acme_core::validation::{validate_product_code, validate_min_quantity};
//!
//! validate_product_code("product_code", "R01").unwrap();
//! validate_min_quantity(2).unwrap();
//! assert!(validate_min_quantity(0).is_err());
//! ```

use std::collections::HashSet;

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::error::ValidationError;
use crate::money::Money;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Longest accepted product code.
pub const MAX_CODE_LEN: usize = 50;

/// Fewest distinct products a bundle can group.
pub const MIN_BUNDLE_CODES: usize = 2;

/// Longest accepted product or offer name.
pub const MAX_NAME_LEN: usize = 200;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a product code.
///
/// ## Rules
/// - Must not be empty
/// - At most 50 characters
/// - Only alphanumeric characters, hyphens, underscores (so no padding:
///   codes are matched exactly)
///
/// `field` names the config field being checked so errors point at it
/// (`code`, `product_code`, `bundle_codes`).
pub fn validate_product_code(field: &str, code: &str) -> ValidationResult<()> {
    if code.trim().is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    if code.len() > MAX_CODE_LEN {
        return Err(ValidationError::OutOfRange {
            field: field.to_string(),
            min: 1,
            max: MAX_CODE_LEN as i64,
        });
    }

    if !code
        .chars()
        .all(|c| c.is_alphanumeric() || c == '-' || c == '_')
    {
        return Err(ValidationError::InvalidFormat {
            field: field.to_string(),
            reason: "must contain only letters, numbers, hyphens, and underscores".to_string(),
        });
    }

    Ok(())
}

/// Validates a product name.
pub fn validate_product_name(name: &str) -> ValidationResult<()> {
    validate_name("name", name)
}

/// Validates an offer name. Names are descriptive only, never used as keys.
pub fn validate_offer_name(name: &str) -> ValidationResult<()> {
    validate_name("offer name", name)
}

fn validate_name(field: &str, name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    if name.len() > MAX_NAME_LEN {
        return Err(ValidationError::OutOfRange {
            field: field.to_string(),
            min: 1,
            max: MAX_NAME_LEN as i64,
        });
    }

    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates that an amount is zero or more.
pub fn validate_non_negative(field: &str, amount: Money) -> ValidationResult<()> {
    if amount.is_negative() {
        return Err(ValidationError::InvalidFormat {
            field: field.to_string(),
            reason: format!("must not be negative, got {}", amount.amount()),
        });
    }

    Ok(())
}

/// Validates an offer group size.
///
/// Zero would make "every Nth item" meaningless, so it is rejected rather
/// than silently treated as one.
pub fn validate_min_quantity(qty: u32) -> ValidationResult<()> {
    if qty == 0 {
        return Err(ValidationError::MustBePositive {
            field: "min_quantity".to_string(),
        });
    }

    Ok(())
}

/// Validates a percentage in points (50 = 50%).
pub fn validate_percentage(value: Decimal) -> ValidationResult<()> {
    if value < Decimal::ZERO || value > Decimal::ONE_HUNDRED {
        return Err(ValidationError::OutOfRange {
            field: "discount_value".to_string(),
            min: 0,
            max: 100,
        });
    }

    Ok(())
}

// =============================================================================
// Collection Validators
// =============================================================================

/// Validates the product codes of a bundle.
///
/// ## Rules
/// - At least two codes
/// - Each code is a valid product code
/// - No code appears twice (a bundle counts each code independently)
pub fn validate_bundle_codes(codes: &[String]) -> ValidationResult<()> {
    if codes.is_empty() {
        return Err(ValidationError::Required {
            field: "bundle_codes".to_string(),
        });
    }

    if codes.len() < MIN_BUNDLE_CODES {
        return Err(ValidationError::InvalidFormat {
            field: "bundle_codes".to_string(),
            reason: format!("a bundle needs at least {} distinct codes", MIN_BUNDLE_CODES),
        });
    }

    let mut seen = HashSet::with_capacity(codes.len());
    for code in codes {
        validate_product_code("bundle_codes", code)?;
        if !seen.insert(code.as_str()) {
            return Err(ValidationError::Duplicate {
                field: "bundle_codes".to_string(),
                value: code.clone(),
            });
        }
    }

    Ok(())
}

// =============================================================================
// Date Validators
// =============================================================================

/// Validates an inclusive validity window.
///
/// An open side (`None`) is always fine; a closed window must not end
/// before it starts.
pub fn validate_date_window(start: Option<NaiveDate>, end: Option<NaiveDate>) -> ValidationResult<()> {
    if let (Some(start), Some(end)) = (start, end) {
        if start > end {
            return Err(ValidationError::InvalidFormat {
                field: "end_date".to_string(),
                reason: format!("{} is before start_date {}", end, start),
            });
        }
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_validate_product_code() {
        assert!(validate_product_code("code", "R01").is_ok());
        assert!(validate_product_code("code", "WIDGET-RED_2").is_ok());

        assert!(validate_product_code("code", "").is_err());
        assert!(validate_product_code("code", "   ").is_err());
        assert!(validate_product_code("code", "has space").is_err());
        assert!(validate_product_code("code", &"A".repeat(100)).is_err());
    }

    #[test]
    fn test_validate_product_code_rejects_padding() {
        for padded in [" B01", "B01 ", "\tR01"] {
            assert!(matches!(
                validate_product_code("product_code", padded),
                Err(ValidationError::InvalidFormat { .. })
            ));
        }
    }

    #[test]
    fn test_validate_product_code_reports_field() {
        let err = validate_product_code("product_code", "").unwrap_err();
        assert_eq!(
            err,
            ValidationError::Required {
                field: "product_code".to_string()
            }
        );
    }

    #[test]
    fn test_validate_names() {
        assert!(validate_product_name("Red Widget").is_ok());
        assert!(validate_product_name("").is_err());
        assert!(validate_offer_name("Red + Green Bundle for $50").is_ok());
        assert!(validate_offer_name(&"A".repeat(300)).is_err());
    }

    #[test]
    fn test_validate_non_negative() {
        assert!(validate_non_negative("price", Money::zero()).is_ok());
        assert!(validate_non_negative("price", Money::from_cents(795)).is_ok());
        assert!(validate_non_negative("price", Money::from_cents(-1)).is_err());
    }

    #[test]
    fn test_validate_min_quantity() {
        assert!(validate_min_quantity(1).is_ok());
        assert!(validate_min_quantity(3).is_ok());
        assert!(validate_min_quantity(0).is_err());
    }

    #[test]
    fn test_validate_percentage() {
        assert!(validate_percentage(dec!(0)).is_ok());
        assert!(validate_percentage(dec!(50)).is_ok());
        assert!(validate_percentage(dec!(100)).is_ok());
        assert!(validate_percentage(dec!(100.01)).is_err());
        assert!(validate_percentage(dec!(-5)).is_err());
    }

    #[test]
    fn test_validate_bundle_codes() {
        let codes = vec!["R01".to_string(), "G01".to_string()];
        assert!(validate_bundle_codes(&codes).is_ok());

        assert!(validate_bundle_codes(&[]).is_err());

        let solo = vec!["R01".to_string()];
        assert!(matches!(
            validate_bundle_codes(&solo),
            Err(ValidationError::InvalidFormat { .. })
        ));

        let dup = vec!["R01".to_string(), "R01".to_string()];
        assert!(matches!(
            validate_bundle_codes(&dup),
            Err(ValidationError::Duplicate { .. })
        ));
    }

    #[test]
    fn test_validate_date_window() {
        let oct1 = NaiveDate::from_ymd_opt(2026, 10, 1).unwrap();
        let oct31 = NaiveDate::from_ymd_opt(2026, 10, 31).unwrap();

        assert!(validate_date_window(None, None).is_ok());
        assert!(validate_date_window(Some(oct1), None).is_ok());
        assert!(validate_date_window(Some(oct1), Some(oct31)).is_ok());
        assert!(validate_date_window(Some(oct1), Some(oct1)).is_ok());
        assert!(validate_date_window(Some(oct31), Some(oct1)).is_err());
    }
}
