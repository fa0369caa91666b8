//! # Offer Calculator
//!
//! Holds the active promotion set and totals their discounts.
//!
//! ## Aggregation Policy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │   basket items ──┬──► Offer A (valid on date?) ──► discount A ──┐       │
//! │   (unchanged)    ├──► Offer B (valid on date?) ──► discount B ──┼──► Σ  │
//! │                  └──► Offer C (expired)        ──► skipped      │       │
//! │                                                                         │
//! │   • every offer sees the full, undiscounted item list                  │
//! │   • discounts are added, never chained                                 │
//! │   • overlapping offers on the same product both apply in full          │
//! │   • order of addition does not change the result                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::money::Money;
use crate::offer::Offer;
use crate::types::Product;

/// One offer's contribution to a basket discount.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppliedOffer {
    pub name: String,
    pub discount: Money,
}

/// Collection of offers evaluated together.
#[derive(Debug, Clone, Default)]
pub struct OfferCalculator {
    offers: Vec<Offer>,
}

impl OfferCalculator {
    pub fn new(offers: Vec<Offer>) -> Self {
        OfferCalculator { offers }
    }

    pub fn add_offer(&mut self, offer: Offer) {
        self.offers.push(offer);
    }

    /// Removes every offer equal to `offer`. Returns false if none matched.
    pub fn remove_offer(&mut self, offer: &Offer) -> bool {
        let before = self.offers.len();
        self.offers.retain(|held| held != offer);
        self.offers.len() != before
    }

    pub fn offers(&self) -> &[Offer] {
        &self.offers
    }

    pub fn len(&self) -> usize {
        self.offers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.offers.is_empty()
    }

    /// Offers whose validity window contains `date`.
    pub fn active_offers(&self, date: NaiveDate) -> impl Iterator<Item = &Offer> {
        self.offers.iter().filter(move |offer| offer.is_valid_on(date))
    }

    /// Total discount of all offers valid on `date`.
    pub fn calculate_discount(&self, items: &[Product], date: NaiveDate) -> Money {
        let total: Money = self
            .active_offers(date)
            .map(|offer| offer.calculate_discount(items, date))
            .sum();

        debug!(
            %date,
            items = items.len(),
            offers = self.offers.len(),
            discount = %total.amount(),
            "Calculated basket discount"
        );
        total
    }

    /// Per-offer breakdown of [`calculate_discount`](Self::calculate_discount).
    ///
    /// Offers contributing nothing are left out; the discounts sum to the
    /// same total.
    pub fn applied_offers(&self, items: &[Product], date: NaiveDate) -> Vec<AppliedOffer> {
        self.active_offers(date)
            .filter_map(|offer| {
                let discount = offer.calculate_discount(items, date);
                (!discount.is_zero()).then(|| AppliedOffer {
                    name: offer.name().to_string(),
                    discount,
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::offer::OfferConfig;
    use rust_decimal_macros::dec;

    fn red() -> Product {
        Product::new("R01", "Red Widget", Money::from_cents(3295))
    }

    fn blue() -> Product {
        Product::new("B01", "Blue Widget", Money::from_cents(795))
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn red_half_price() -> Offer {
        OfferConfig::percentage("Red half price", "R01", dec!(50))
            .min_quantity(2)
            .max_discount(Money::from_cents(2000))
            .build()
            .unwrap()
    }

    fn blue_bogo() -> Offer {
        OfferConfig::bogo("Blue BOGO", "B01")
            .min_quantity(2)
            .build()
            .unwrap()
    }

    #[test]
    fn test_disjoint_offers_both_apply() {
        let calculator = OfferCalculator::new(vec![red_half_price(), blue_bogo()]);
        let items = vec![blue(), blue(), red(), red(), red()];

        let discount = calculator.calculate_discount(&items, date(2026, 10, 18));
        assert_eq!(discount.amount(), dec!(24.425)); // 7.95 + 16.475
    }

    #[test]
    fn test_overlapping_offers_both_apply_in_full() {
        let half_off_blue = OfferConfig::percentage("Blue half price", "B01", dec!(50))
            .min_quantity(2)
            .build()
            .unwrap();
        let calculator = OfferCalculator::new(vec![blue_bogo(), half_off_blue]);

        let discount = calculator.calculate_discount(&[blue(), blue()], date(2026, 10, 18));
        assert_eq!(discount.amount(), dec!(11.925)); // 7.95 + 3.975
    }

    #[test]
    fn test_order_does_not_matter() {
        let items = vec![blue(), red(), blue(), red()];
        let today = date(2026, 10, 18);

        let forward = OfferCalculator::new(vec![red_half_price(), blue_bogo()]);
        let backward = OfferCalculator::new(vec![blue_bogo(), red_half_price()]);

        assert_eq!(
            forward.calculate_discount(&items, today),
            backward.calculate_discount(&items, today)
        );
    }

    #[test]
    fn test_expired_offers_are_skipped() {
        let expired = OfferConfig::bogo("September BOGO", "B01")
            .min_quantity(2)
            .starting(date(2026, 9, 1))
            .ending(date(2026, 9, 30))
            .build()
            .unwrap();
        let calculator = OfferCalculator::new(vec![expired]);

        assert!(calculator
            .calculate_discount(&[blue(), blue()], date(2026, 10, 18))
            .is_zero());
        assert_eq!(
            calculator.calculate_discount(&[blue(), blue()], date(2026, 9, 30)),
            Money::from_cents(795)
        );
        assert_eq!(calculator.active_offers(date(2026, 10, 18)).count(), 0);
    }

    #[test]
    fn test_no_offers_gives_zero() {
        let calculator = OfferCalculator::default();
        assert!(calculator.is_empty());
        assert!(calculator
            .calculate_discount(&[red(), red()], date(2026, 10, 18))
            .is_zero());
    }

    #[test]
    fn test_add_and_remove_offer() {
        let mut calculator = OfferCalculator::default();
        calculator.add_offer(red_half_price());
        calculator.add_offer(blue_bogo());
        assert_eq!(calculator.len(), 2);

        assert!(calculator.remove_offer(&blue_bogo()));
        assert_eq!(calculator.len(), 1);
        assert_eq!(calculator.offers()[0].name(), "Red half price");

        // Removing an offer that is not held is a no-op.
        assert!(!calculator.remove_offer(&blue_bogo()));
        assert_eq!(calculator.len(), 1);
    }

    #[test]
    fn test_remove_offer_drops_every_copy() {
        let mut calculator = OfferCalculator::new(vec![blue_bogo(), red_half_price(), blue_bogo()]);

        assert!(calculator.remove_offer(&blue_bogo()));
        assert_eq!(calculator.len(), 1);
        assert_eq!(calculator.offers()[0], red_half_price());
        assert!(calculator
            .calculate_discount(&[blue(), blue()], date(2026, 10, 18))
            .is_zero());
    }

    #[test]
    fn test_applied_offers_breakdown_matches_total() {
        let calculator = OfferCalculator::new(vec![red_half_price(), blue_bogo()]);
        let items = vec![red(), red(), red()];
        let today = date(2026, 10, 18);

        let applied = calculator.applied_offers(&items, today);
        assert_eq!(applied.len(), 1);
        assert_eq!(applied[0].name, "Red half price");

        let sum: Money = applied.iter().map(|a| a.discount).sum();
        assert_eq!(sum, calculator.calculate_discount(&items, today));
    }
}
