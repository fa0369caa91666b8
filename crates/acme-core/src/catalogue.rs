//! # Product Catalogue
//!
//! Maps product codes to [`Product`] records. Lookup only; the basket
//! consumes it through the [`Catalogue`] trait.

use std::collections::BTreeMap;

use crate::error::ValidationError;
use crate::money::Money;
use crate::types::Product;

/// Resolves product codes for the basket.
pub trait Catalogue: Send + Sync {
    /// Returns the product with the given code, if any.
    fn find(&self, code: &str) -> Option<Product>;
}

/// In-memory catalogue keyed by product code.
#[derive(Debug, Clone, Default)]
pub struct ProductCatalogue {
    products: BTreeMap<String, Product>,
}

impl ProductCatalogue {
    /// Builds a catalogue. A later product replaces an earlier one with the
    /// same code.
    pub fn new(products: impl IntoIterator<Item = Product>) -> Self {
        let mut catalogue = Self::default();
        for product in products {
            catalogue.add(product);
        }
        catalogue
    }

    /// Builds a catalogue from config, rejecting invalid or duplicated codes.
    pub fn try_new(products: impl IntoIterator<Item = Product>) -> Result<Self, ValidationError> {
        let mut catalogue = Self::default();
        for product in products {
            product.validate()?;
            if catalogue.products.contains_key(&product.code) {
                return Err(ValidationError::Duplicate {
                    field: "product code".to_string(),
                    value: product.code,
                });
            }
            catalogue.add(product);
        }
        Ok(catalogue)
    }

    /// The Acme Widget Co range.
    pub fn acme() -> Self {
        Self::new([
            Product::new("R01", "Red Widget", Money::from_cents(3295)),
            Product::new("G01", "Green Widget", Money::from_cents(2495)),
            Product::new("B01", "Blue Widget", Money::from_cents(795)),
        ])
    }

    /// Inserts or replaces a product.
    pub fn add(&mut self, product: Product) {
        self.products.insert(product.code.clone(), product);
    }

    /// All products in code order.
    pub fn all(&self) -> Vec<Product> {
        self.products.values().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

impl Catalogue for ProductCatalogue {
    fn find(&self, code: &str) -> Option<Product> {
        self.products.get(code).cloned()
    }
}
