//! # acme-core: Basket Pricing for Acme Widget Co
//!
//! This crate prices a basket of catalogued products: it applies the
//! currently valid promotional offers, then adds a delivery charge worked
//! out from the discounted subtotal. Everything here is a pure function of
//! its inputs, with zero I/O.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Acme Checkout                                    │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 acme-checkout (binary)                          │   │
//! │  │    CLI args ──► config.toml ──► build collaborators ──► print   │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ acme-core (THIS CRATE) ★                        │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │ catalogue │  │   offer   │  │  basket   │  │ delivery  │  │   │
//! │  │   │  Product  │  │ OfferRule │  │  Basket   │  │   rules   │  │   │
//! │  │   │  lookup   │  │ Calculator│  │  Summary  │  │  lookup   │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO GLOBAL CLOCK IN RULES • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Product record
//! - [`money`] - Money type with exact decimal arithmetic
//! - [`catalogue`] - Product lookup by code
//! - [`delivery`] - Delivery charge thresholds
//! - [`offer`] - Promotional rules and their discount math
//! - [`offer_calculator`] - Sums the discounts of all valid offers
//! - [`basket`] - Line items and the final total
//! - [`clock`] - Injectable "today"
//! - [`error`] - Domain error types
//! - [`validation`] - Configuration checks
//!
//! ## Example Usage
//!
//! ```rust
//! use std::sync::Arc;
//!
//! use acme_core::{
//!     Basket, DeliveryRules, FixedClock, Money, OfferCalculator, OfferConfig, ProductCatalogue,
//! };
//! use chrono::NaiveDate;
//!
//! let bogo = OfferConfig::bogo("Buy One Get One Free Blue Widget", "B01")
//!     .min_quantity(2)
//!     .build()
//!     .unwrap();
//!
//! let mut basket = Basket::new(
//!     Arc::new(ProductCatalogue::acme()),
//!     Arc::new(DeliveryRules::acme()),
//!     Arc::new(OfferCalculator::new(vec![bogo])),
//! )
//! .with_clock(Arc::new(FixedClock(NaiveDate::from_ymd_opt(2026, 10, 18).unwrap())));
//!
//! basket.add("B01").unwrap();
//! basket.add("B01").unwrap();
//!
//! // $15.90 − $7.95 free widget + $4.95 delivery
//! assert_eq!(basket.total(), Money::from_cents(1290));
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod basket;
pub mod catalogue;
pub mod clock;
pub mod delivery;
pub mod error;
pub mod money;
pub mod offer;
pub mod offer_calculator;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use basket::{Basket, BasketSummary};
pub use catalogue::{Catalogue, ProductCatalogue};
pub use clock::{Clock, FixedClock, SystemClock};
pub use delivery::{DeliveryCalculator, DeliveryRule, DeliveryRules};
pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use offer::{DiscountType, Offer, OfferConfig, OfferRule, ValidityWindow};
pub use offer_calculator::{AppliedOffer, OfferCalculator};
pub use types::Product;
