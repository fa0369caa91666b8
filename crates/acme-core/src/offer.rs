//! # Offers
//!
//! A single promotional rule: a validity window, the type-specific
//! parameters, and the discount math.
//!
//! ## Rule Types
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  applicable = basket items whose code == product_code                   │
//! │  groups     = floor(|applicable| / min_quantity)                        │
//! │                                                                         │
//! │  PERCENTAGE    groups × unit_price × value%     (every Nth item % off)  │
//! │  FIXED_AMOUNT  groups × value                   (flat amount per group) │
//! │  BOGO          groups × unit_price              (one free per group)    │
//! │  BUNDLE        bundles × (Σ unit prices − value)                        │
//! │                bundles = min(count of each bundle code)                 │
//! │                                                                         │
//! │  then: floor at $0.00, clamp to max_discount when set                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Fewer applicable items than `min_quantity` always gives zero.
//!
//! ## Example
//! ```rust
//! use acme_core::money::Money;
//! use acme_core::offer::OfferConfig;
//! use acme_core::types::Product;
//! use chrono::NaiveDate;
//!
//! let offer = OfferConfig::bogo("Blue BOGO", "B01")
//!     .min_quantity(2)
//!     .build()
//!     .unwrap();
//!
//! let blue = Product::new("B01", "Blue Widget", Money::from_cents(795));
//! let today = NaiveDate::from_ymd_opt(2026, 10, 18).unwrap();
//!
//! let discount = offer.calculate_discount(&[blue.clone(), blue], today);
//! assert_eq!(discount, Money::from_cents(795));
//! ```

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{trace, warn};

use crate::error::ValidationError;
use crate::money::Money;
use crate::types::Product;
use crate::validation::{
    validate_bundle_codes, validate_date_window, validate_min_quantity, validate_non_negative,
    validate_offer_name, validate_percentage, validate_product_code,
};

// =============================================================================
// Discount Type
// =============================================================================

/// The recognised offer kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiscountType {
    /// Percentage off every Nth item.
    Percentage,
    /// Flat amount off per qualifying group.
    FixedAmount,
    /// One free item per qualifying group.
    Bogo,
    /// Fixed price for a set of distinct products.
    Bundle,
}

impl DiscountType {
    /// Config spellings, in declaration order.
    pub const ALL: [&'static str; 4] = ["percentage", "fixed_amount", "bogo", "bundle"];

    pub fn as_str(&self) -> &'static str {
        match self {
            DiscountType::Percentage => "percentage",
            DiscountType::FixedAmount => "fixed_amount",
            DiscountType::Bogo => "bogo",
            DiscountType::Bundle => "bundle",
        }
    }
}

impl fmt::Display for DiscountType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DiscountType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "percentage" => Ok(DiscountType::Percentage),
            "fixed_amount" => Ok(DiscountType::FixedAmount),
            "bogo" => Ok(DiscountType::Bogo),
            "bundle" => Ok(DiscountType::Bundle),
            _ => Err(ValidationError::NotAllowed {
                field: "discount_type".to_string(),
                allowed: DiscountType::ALL.iter().map(|s| s.to_string()).collect(),
            }),
        }
    }
}

// =============================================================================
// Validity Window
// =============================================================================

/// Inclusive date range an offer is active in. `None` leaves a side open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ValidityWindow {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

impl ValidityWindow {
    /// A window open on both sides.
    pub const fn always() -> Self {
        ValidityWindow {
            start: None,
            end: None,
        }
    }

    pub const fn between(start: NaiveDate, end: NaiveDate) -> Self {
        ValidityWindow {
            start: Some(start),
            end: Some(end),
        }
    }

    /// True when `date` lies within the window, bounds included.
    pub fn contains(&self, date: NaiveDate) -> bool {
        let after_start = self.start.map_or(true, |start| date >= start);
        let before_end = self.end.map_or(true, |end| date <= end);
        after_start && before_end
    }
}

// =============================================================================
// Offer Rule
// =============================================================================

/// Type-specific parameters of an offer, one variant per [`DiscountType`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OfferRule {
    Percentage {
        product_code: String,
        /// Percentage points, 0..=100.
        percent: Decimal,
        min_quantity: u32,
    },
    FixedAmount {
        product_code: String,
        amount: Money,
        min_quantity: u32,
    },
    Bogo {
        product_code: String,
        min_quantity: u32,
    },
    Bundle {
        codes: Vec<String>,
        /// Target price for one complete set.
        price: Money,
    },
}

impl OfferRule {
    pub fn discount_type(&self) -> DiscountType {
        match self {
            OfferRule::Percentage { .. } => DiscountType::Percentage,
            OfferRule::FixedAmount { .. } => DiscountType::FixedAmount,
            OfferRule::Bogo { .. } => DiscountType::Bogo,
            OfferRule::Bundle { .. } => DiscountType::Bundle,
        }
    }

    /// Raw discount before flooring and capping.
    ///
    /// Only a bundle priced above its parts can come out negative.
    pub fn compute(&self, items: &[Product]) -> Money {
        match self {
            OfferRule::Percentage {
                product_code,
                percent,
                min_quantity,
            } => qualifying_groups(items, product_code, *min_quantity)
                .map(|(groups, unit_price)| unit_price.percent(*percent) * groups)
                .unwrap_or_else(Money::zero),

            OfferRule::FixedAmount {
                product_code,
                amount,
                min_quantity,
            } => qualifying_groups(items, product_code, *min_quantity)
                .map(|(groups, _)| *amount * groups)
                .unwrap_or_else(Money::zero),

            OfferRule::Bogo {
                product_code,
                min_quantity,
            } => qualifying_groups(items, product_code, *min_quantity)
                .map(|(free_items, unit_price)| unit_price * free_items)
                .unwrap_or_else(Money::zero),

            OfferRule::Bundle { codes, price } => bundle_saving(items, codes, *price),
        }
    }
}

/// Number of complete groups of `code` and the unit price, or `None` when
/// fewer than `min_quantity` items match.
fn qualifying_groups(items: &[Product], code: &str, min_quantity: u32) -> Option<(usize, Money)> {
    let mut applicable = items.iter().filter(|item| item.code == code);
    let first = applicable.next()?;
    let count = 1 + applicable.count();
    let group_size = min_quantity.max(1) as usize;

    if count < group_size {
        return None;
    }

    Some((count / group_size, first.price))
}

fn bundle_saving(items: &[Product], codes: &[String], bundle_price: Money) -> Money {
    if codes.is_empty() {
        return Money::zero();
    }

    let mut full_price = Money::zero();
    let mut bundles = usize::MAX;

    for code in codes {
        let mut matching = items.iter().filter(|item| &item.code == code);
        let Some(first) = matching.next() else {
            return Money::zero();
        };
        full_price += first.price;
        bundles = bundles.min(1 + matching.count());
    }

    (full_price - bundle_price) * bundles
}

// =============================================================================
// Offer
// =============================================================================

/// A validated, immutable promotional offer.
///
/// Build one through [`OfferConfig::build`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Offer {
    name: String,
    rule: OfferRule,
    max_discount: Option<Money>,
    window: ValidityWindow,
}

impl Offer {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn discount_type(&self) -> DiscountType {
        self.rule.discount_type()
    }

    pub fn rule(&self) -> &OfferRule {
        &self.rule
    }

    /// Ceiling on this offer's own contribution.
    pub fn max_discount(&self) -> Option<Money> {
        self.max_discount
    }

    pub fn window(&self) -> ValidityWindow {
        self.window
    }

    /// Pure validity predicate.
    pub fn is_valid_on(&self, date: NaiveDate) -> bool {
        self.window.contains(date)
    }

    /// Discount this offer grants on `items` as of `date`.
    ///
    /// Returns zero outside the validity window. The result is never
    /// negative and never above `max_discount`.
    pub fn calculate_discount(&self, items: &[Product], date: NaiveDate) -> Money {
        if !self.is_valid_on(date) {
            return Money::zero();
        }

        let raw = self.rule.compute(items);
        let discount = if raw.is_negative() {
            warn!(
                offer = %self.name,
                saving = %raw.amount(),
                "Bundle price exceeds the sum of its parts, granting no discount"
            );
            Money::zero()
        } else {
            raw
        };

        let discount = match self.max_discount {
            Some(cap) => discount.min(cap),
            None => discount,
        };

        trace!(offer = %self.name, discount = %discount.amount(), "Offer evaluated");
        discount
    }
}

// =============================================================================
// Offer Configuration
// =============================================================================

fn default_min_quantity() -> u32 {
    1
}

/// Flat, serializable offer description, as found in config files.
///
/// ## Example Config
/// ```toml
/// [[offers]]
/// name = "Buy One Get One 50% Off Red Widget"
/// discount_type = "percentage"
/// product_code = "R01"
/// discount_value = "50"
/// min_quantity = 2
/// max_discount = "20.00"
/// start_date = "2026-10-01"
/// end_date = "2026-10-31"
/// ```
///
/// `discount_value` means percentage points for `percentage`, the amount
/// per group for `fixed_amount`, the set price for `bundle`, and is ignored
/// for `bogo`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OfferConfig {
    pub name: String,
    pub discount_type: String,
    #[serde(default)]
    pub discount_value: Decimal,
    #[serde(default)]
    pub product_code: Option<String>,
    #[serde(default)]
    pub bundle_codes: Option<Vec<String>>,
    #[serde(default = "default_min_quantity")]
    pub min_quantity: u32,
    #[serde(default)]
    pub max_discount: Option<Money>,
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
}

impl OfferConfig {
    pub fn new(name: impl Into<String>, discount_type: DiscountType, discount_value: Decimal) -> Self {
        OfferConfig {
            name: name.into(),
            discount_type: discount_type.to_string(),
            discount_value,
            product_code: None,
            bundle_codes: None,
            min_quantity: default_min_quantity(),
            max_discount: None,
            start_date: None,
            end_date: None,
        }
    }

    /// `percent` percent off every `min_quantity`-th item of a product.
    pub fn percentage(name: impl Into<String>, product_code: impl Into<String>, percent: Decimal) -> Self {
        let mut config = Self::new(name, DiscountType::Percentage, percent);
        config.product_code = Some(product_code.into());
        config
    }

    /// `amount` off per group of `min_quantity` items of a product.
    pub fn fixed_amount(name: impl Into<String>, product_code: impl Into<String>, amount: Money) -> Self {
        let mut config = Self::new(name, DiscountType::FixedAmount, amount.amount());
        config.product_code = Some(product_code.into());
        config
    }

    /// One free item per group of `min_quantity` items of a product.
    pub fn bogo(name: impl Into<String>, product_code: impl Into<String>) -> Self {
        let mut config = Self::new(name, DiscountType::Bogo, Decimal::ZERO);
        config.product_code = Some(product_code.into());
        config
    }

    /// One of each of `codes` for `price`.
    pub fn bundle<I, S>(name: impl Into<String>, codes: I, price: Money) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut config = Self::new(name, DiscountType::Bundle, price.amount());
        config.bundle_codes = Some(codes.into_iter().map(Into::into).collect());
        config
    }

    pub fn min_quantity(mut self, min_quantity: u32) -> Self {
        self.min_quantity = min_quantity;
        self
    }

    pub fn max_discount(mut self, cap: Money) -> Self {
        self.max_discount = Some(cap);
        self
    }

    pub fn starting(mut self, date: NaiveDate) -> Self {
        self.start_date = Some(date);
        self
    }

    pub fn ending(mut self, date: NaiveDate) -> Self {
        self.end_date = Some(date);
        self
    }

    /// Validates the configuration and produces an [`Offer`].
    ///
    /// ## Rejected
    /// - empty name, unknown `discount_type`
    /// - `min_quantity` of 0
    /// - missing `product_code` for percentage / fixed_amount / bogo
    /// - padded product codes (codes are matched exactly)
    /// - fewer than two, or duplicated, `bundle_codes` for bundle
    /// - percentage outside 0..=100, negative amounts or cap
    /// - `start_date` after `end_date`
    pub fn build(self) -> Result<Offer, ValidationError> {
        validate_offer_name(&self.name)?;
        let discount_type: DiscountType = self.discount_type.parse()?;
        validate_min_quantity(self.min_quantity)?;
        if let Some(cap) = self.max_discount {
            validate_non_negative("max_discount", cap)?;
        }
        validate_date_window(self.start_date, self.end_date)?;

        let value = Money::new(self.discount_value);
        let rule = match discount_type {
            DiscountType::Percentage => {
                validate_percentage(self.discount_value)?;
                OfferRule::Percentage {
                    product_code: required_code(self.product_code)?,
                    percent: self.discount_value,
                    min_quantity: self.min_quantity,
                }
            }
            DiscountType::FixedAmount => {
                validate_non_negative("discount_value", value)?;
                OfferRule::FixedAmount {
                    product_code: required_code(self.product_code)?,
                    amount: value,
                    min_quantity: self.min_quantity,
                }
            }
            DiscountType::Bogo => OfferRule::Bogo {
                product_code: required_code(self.product_code)?,
                min_quantity: self.min_quantity,
            },
            DiscountType::Bundle => {
                validate_non_negative("discount_value", value)?;
                let codes = self.bundle_codes.unwrap_or_default();
                validate_bundle_codes(&codes)?;
                OfferRule::Bundle { codes, price: value }
            }
        };

        Ok(Offer {
            name: self.name,
            rule,
            max_discount: self.max_discount,
            window: ValidityWindow {
                start: self.start_date,
                end: self.end_date,
            },
        })
    }
}

fn required_code(code: Option<String>) -> Result<String, ValidationError> {
    let code = code.ok_or_else(|| ValidationError::Required {
        field: "product_code".to_string(),
    })?;
    validate_product_code("product_code", &code)?;
    Ok(code)
}

// =============================================================================
// Unit Tests
// =============================================================================
