//! # Basket
//!
//! Accumulates line items and prices them.
//!
//! ## Pricing Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  add("R01") ──► Catalogue::find ──► items.push(product)                │
//! │                      │                                                  │
//! │                      └── unknown code ──► ProductNotFound (no change)  │
//! │                                                                         │
//! │  total()                                                                │
//! │    subtotal = Σ item prices                                            │
//! │    discount = OfferCalculator::calculate_discount(items, today)        │
//! │    delivery = DeliveryCalculator::calculate_delivery_cost(             │
//! │                   subtotal − discount)                                  │
//! │    total    = round₂(subtotal − discount + delivery)                   │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Thread Safety
//! A basket belongs to one session. The catalogue, delivery table and offers
//! are shared read-only through `Arc`; callers that need to mutate one
//! basket from several threads wrap it in a `Mutex` themselves.

use std::sync::Arc;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::catalogue::Catalogue;
use crate::clock::{Clock, SystemClock};
use crate::delivery::DeliveryCalculator;
use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::offer_calculator::{AppliedOffer, OfferCalculator};
use crate::types::Product;

/// Price breakdown of a basket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BasketSummary {
    pub date: NaiveDate,
    pub item_count: usize,
    pub subtotal: Money,
    pub discount: Money,
    pub delivery: Money,
    /// Rounded to cents.
    pub total: Money,
    pub applied_offers: Vec<AppliedOffer>,
}

/// A shopping basket.
pub struct Basket {
    catalogue: Arc<dyn Catalogue>,
    delivery: Arc<dyn DeliveryCalculator>,
    offers: Arc<OfferCalculator>,
    clock: Arc<dyn Clock>,
    items: Vec<Product>,
}

impl Basket {
    /// Creates an empty basket that reads "today" from the system clock.
    pub fn new(
        catalogue: Arc<dyn Catalogue>,
        delivery: Arc<dyn DeliveryCalculator>,
        offers: Arc<OfferCalculator>,
    ) -> Self {
        Basket {
            catalogue,
            delivery,
            offers,
            clock: Arc::new(SystemClock),
            items: Vec::new(),
        }
    }

    /// Replaces the clock used by [`total`](Self::total) and
    /// [`summary`](Self::summary).
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Adds one unit of the product with `code`.
    ///
    /// ## Errors
    /// `CoreError::ProductNotFound` if the catalogue has no such code; the
    /// basket is unchanged.
    pub fn add(&mut self, code: &str) -> CoreResult<()> {
        let product = self.catalogue.find(code).ok_or_else(|| {
            warn!(code, "Rejected unknown product code");
            CoreError::ProductNotFound(code.to_string())
        })?;

        debug!(code, price = %product.price.amount(), "Added item to basket");
        self.items.push(product);
        Ok(())
    }

    /// Snapshot of the line items in add order.
    pub fn items(&self) -> Vec<Product> {
        self.items.clone()
    }

    /// Empties the basket.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Sum of line item prices before offers and delivery.
    pub fn subtotal(&self) -> Money {
        self.items.iter().map(|item| item.price).sum()
    }

    /// Final price as of today.
    pub fn total(&self) -> Money {
        self.total_on(self.clock.today())
    }

    /// Final price with offers evaluated on `date`.
    pub fn total_on(&self, date: NaiveDate) -> Money {
        let subtotal = self.subtotal();
        let discount = self.offers.calculate_discount(&self.items, date);
        let delivery = self.delivery.calculate_delivery_cost(subtotal - discount);

        (subtotal - discount + delivery).round_to_cents()
    }

    /// Full breakdown as of today.
    pub fn summary(&self) -> BasketSummary {
        self.summary_on(self.clock.today())
    }

    /// Full breakdown with offers evaluated on `date`.
    pub fn summary_on(&self, date: NaiveDate) -> BasketSummary {
        let subtotal = self.subtotal();
        let discount = self.offers.calculate_discount(&self.items, date);
        let delivery = self.delivery.calculate_delivery_cost(subtotal - discount);

        BasketSummary {
            date,
            item_count: self.items.len(),
            subtotal,
            discount,
            delivery,
            total: (subtotal - discount + delivery).round_to_cents(),
            applied_offers: self.offers.applied_offers(&self.items, date),
        }
    }
}

impl std::fmt::Debug for Basket {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Basket")
            .field("items", &self.items)
            .field("offers", &self.offers.len())
            .finish_non_exhaustive()
    }
}
