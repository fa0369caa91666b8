//! # Delivery Charges
//!
//! Threshold table mapping a post-discount basket amount to a delivery cost.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Acme delivery table                                  │
//! │                                                                         │
//! │   threshold        cost                                                 │
//! │   ─────────        ─────                                                │
//! │   $0.00      ──►   $4.95     amount <  $50.00                           │
//! │   $50.00     ──►   $2.95     $50.00 ≤ amount < $90.00                   │
//! │   $90.00     ──►   $0.00     amount ≥ $90.00                            │
//! │                                                                         │
//! │   Lookup: the rule with the greatest threshold ≤ amount wins.           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::money::Money;
use crate::validation::validate_non_negative;

/// Prices delivery for the basket.
pub trait DeliveryCalculator: Send + Sync {
    /// Delivery cost for a basket worth `amount` after discounts.
    fn calculate_delivery_cost(&self, amount: Money) -> Money;
}

/// One row of the delivery table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeliveryRule {
    /// Smallest basket amount this rule applies to.
    pub threshold: Money,
    /// Charge for baskets at or above `threshold`.
    pub cost: Money,
}

impl DeliveryRule {
    pub fn new(threshold: Money, cost: Money) -> Self {
        DeliveryRule { threshold, cost }
    }
}

/// Ordered delivery table.
///
/// ## Invariants
/// - Rules are sorted by threshold, ascending
/// - Thresholds are unique
/// - Thresholds and costs are non-negative
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeliveryRules {
    rules: Vec<DeliveryRule>,
}

impl DeliveryRules {
    /// Builds a table from rules in any order.
    pub fn new(rules: impl IntoIterator<Item = DeliveryRule>) -> Result<Self, ValidationError> {
        let mut rules: Vec<DeliveryRule> = rules.into_iter().collect();

        for rule in &rules {
            validate_non_negative("delivery threshold", rule.threshold)?;
            validate_non_negative("delivery cost", rule.cost)?;
        }

        rules.sort_by_key(|rule| rule.threshold);

        if let Some(pair) = rules.windows(2).find(|pair| pair[0].threshold == pair[1].threshold) {
            return Err(ValidationError::Duplicate {
                field: "delivery threshold".to_string(),
                value: pair[0].threshold.amount().to_string(),
            });
        }

        Ok(DeliveryRules { rules })
    }

    /// Acme Widget Co delivery charges.
    pub fn acme() -> Self {
        DeliveryRules {
            rules: vec![
                DeliveryRule::new(Money::zero(), Money::from_cents(495)),
                DeliveryRule::new(Money::from_cents(5000), Money::from_cents(295)),
                DeliveryRule::new(Money::from_cents(9000), Money::zero()),
            ],
        }
    }

    /// Rules in ascending threshold order.
    pub fn rules(&self) -> &[DeliveryRule] {
        &self.rules
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl DeliveryCalculator for DeliveryRules {
    fn calculate_delivery_cost(&self, amount: Money) -> Money {
        // Amounts below the first threshold fall back to the lowest rule.
        self.rules
            .iter()
            .rev()
            .find(|rule| amount >= rule.threshold)
            .or_else(|| self.rules.first())
            .map(|rule| rule.cost)
            .unwrap_or_else(Money::zero)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_acme_bands() {
        let table = DeliveryRules::acme();

        assert_eq!(table.calculate_delivery_cost(Money::zero()), Money::from_cents(495));
        assert_eq!(table.calculate_delivery_cost(Money::from_cents(4999)), Money::from_cents(495));
        assert_eq!(table.calculate_delivery_cost(Money::from_cents(5000)), Money::from_cents(295));
        assert_eq!(table.calculate_delivery_cost(Money::new(dec!(82.375))), Money::from_cents(295));
        assert_eq!(table.calculate_delivery_cost(Money::from_cents(8999)), Money::from_cents(295));
        assert_eq!(table.calculate_delivery_cost(Money::from_cents(9000)), Money::zero());
        assert_eq!(table.calculate_delivery_cost(Money::from_cents(100000)), Money::zero());
    }

    #[test]
    fn test_new_sorts_rules() {
        let table = DeliveryRules::new([
            DeliveryRule::new(Money::from_cents(9000), Money::zero()),
            DeliveryRule::new(Money::zero(), Money::from_cents(495)),
            DeliveryRule::new(Money::from_cents(5000), Money::from_cents(295)),
        ])
        .unwrap();

        assert_eq!(table, DeliveryRules::acme());
    }

    #[test]
    fn test_amount_below_every_threshold_uses_lowest_rule() {
        let table = DeliveryRules::new([
            DeliveryRule::new(Money::from_cents(1000), Money::from_cents(300)),
            DeliveryRule::new(Money::from_cents(2000), Money::from_cents(100)),
        ])
        .unwrap();

        assert_eq!(table.calculate_delivery_cost(Money::from_cents(500)), Money::from_cents(300));
    }

    #[test]
    fn test_empty_table_is_free() {
        let table = DeliveryRules::default();
        assert!(table.is_empty());
        assert_eq!(table.calculate_delivery_cost(Money::from_cents(1234)), Money::zero());
    }

    #[test]
    fn test_new_rejects_bad_rules() {
        let duplicate = DeliveryRules::new([
            DeliveryRule::new(Money::zero(), Money::from_cents(495)),
            DeliveryRule::new(Money::zero(), Money::from_cents(295)),
        ]);
        assert!(matches!(duplicate, Err(ValidationError::Duplicate { .. })));

        let negative = DeliveryRules::new([DeliveryRule::new(Money::zero(), Money::from_cents(-1))]);
        assert!(negative.is_err());
    }
}
