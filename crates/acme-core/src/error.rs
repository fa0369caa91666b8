//! # Error Types
//!
//! Domain-specific error types for acme-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  acme-core errors (this file)                                          │
//! │  ├── CoreError        - Basket operation failures                      │
//! │  └── ValidationError  - Offer / catalogue / delivery config problems   │
//! │                                                                         │
//! │  acme-checkout errors (app crate)                                      │
//! │  └── CheckoutError    - Config file loading, CLI input                 │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → CheckoutError → exit status       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (product code, offer field, etc.)
//! 3. Errors are enum variants, never String
//! 4. Price math never fails; only lookups and configuration do

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Product code is not in the catalogue.
    ///
    /// ## When This Occurs
    /// - `Basket::add` with a code the catalogue does not know
    ///
    /// The basket is left untouched when this is returned.
    #[error("Product with code '{0}' not found")]
    ProductNotFound(String),

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Configuration validation errors.
///
/// Offers, catalogue entries and delivery rules are checked once when they
/// are built, so a malformed rule never silently computes a zero discount.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Invalid format or inconsistent combination of fields.
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Value is not in allowed set.
    #[error("{field} must be one of: {allowed:?}")]
    NotAllowed { field: String, allowed: Vec<String> },

    /// Duplicate value (e.g., the same code twice in a bundle).
    #[error("{field} '{value}' already exists")]
    Duplicate { field: String, value: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
