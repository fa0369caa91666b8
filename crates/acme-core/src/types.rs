//! # Domain Types
//!
//! Leaf data shared by the catalogue, the basket and the offer rules.
//!
//! ```text
//! ┌─────────────────┐
//! │    Product      │
//! │  ─────────────  │
//! │  code  (key)    │   "R01"
//! │  name           │   "Red Widget"
//! │  price (Money)  │   $32.95
//! └─────────────────┘
//! ```
//!
//! Products are created once when the catalogue is loaded and never mutated.
//! The basket keeps its own copies, so a line item always carries the price
//! it was added at.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::money::Money;
use crate::validation::{validate_non_negative, validate_product_code, validate_product_name};

// =============================================================================
// Product
// =============================================================================

/// A catalogued product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    /// Unique product code, e.g. `R01`.
    pub code: String,

    /// Display name.
    pub name: String,

    /// Unit price.
    pub price: Money,
}

impl Product {
    /// Creates a product without validation.
    pub fn new(code: impl Into<String>, name: impl Into<String>, price: Money) -> Self {
        Product {
            code: code.into(),
            name: name.into(),
            price,
        }
    }

    /// Checks the code, name and price of a product loaded from config.
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_product_code("code", &self.code)?;
        validate_product_name(&self.name)?;
        validate_non_negative("price", self.price)?;
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
