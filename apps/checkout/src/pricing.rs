//! Prices configured scenarios against one shared set of collaborators.

use std::sync::Arc;

use acme_core::{Basket, DeliveryRules, FixedClock, OfferCalculator, ProductCatalogue};
use chrono::NaiveDate;
use tracing::{debug, info};

use crate::config::Scenario;
use crate::error::CheckoutResult;
use crate::report::ScenarioReport;

/// Validated collaborators shared by every basket priced in one run.
#[derive(Debug, Clone)]
pub struct Pricing {
    pub catalogue: Arc<ProductCatalogue>,
    pub delivery: Arc<DeliveryRules>,
    pub offers: Arc<OfferCalculator>,
}

impl Pricing {
    /// Builds an empty basket dated `today`.
    ///
    /// With `with_offers` false the basket gets an empty offer set.
    pub fn basket(&self, today: NaiveDate, with_offers: bool) -> Basket {
        let offers = if with_offers {
            Arc::clone(&self.offers)
        } else {
            Arc::new(OfferCalculator::default())
        };

        Basket::new(self.catalogue.clone(), self.delivery.clone(), offers)
            .with_clock(Arc::new(FixedClock(today)))
    }

    /// Fills a fresh basket with the scenario's products and prices it.
    ///
    /// Fails on the first unknown product code.
    pub fn price(&self, scenario: &Scenario, today: NaiveDate) -> CheckoutResult<ScenarioReport> {
        let mut basket = self.basket(today, scenario.with_offers);
        for code in &scenario.products {
            basket.add(code)?;
        }

        let summary = basket.summary();
        info!(
            scenario = %scenario.description,
            total = %summary.total,
            "Priced scenario"
        );

        Ok(ScenarioReport {
            description: scenario.description.clone(),
            products: scenario.products.clone(),
            summary,
        })
    }

    /// Prices every scenario in order.
    pub fn price_all(&self, scenarios: &[Scenario], today: NaiveDate) -> CheckoutResult<Vec<ScenarioReport>> {
        debug!(count = scenarios.len(), %today, "Pricing scenarios");
        scenarios.iter().map(|scenario| self.price(scenario, today)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CheckoutConfig;
    use crate::error::CheckoutError;
    use acme_core::{CoreError, Money};

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 18).unwrap()
    }

    #[test]
    fn test_default_scenarios() {
        let config = CheckoutConfig::default();
        let pricing = config.build_pricing(today()).unwrap();

        let totals: Vec<Money> = pricing
            .price_all(&config.scenarios, today())
            .unwrap()
            .into_iter()
            .map(|report| report.summary.total)
            .collect();

        let expected: Vec<Money> = [1290, 5295, 8533, 5438, 9033, 5485, 6885]
            .into_iter()
            .map(Money::from_cents)
            .collect();
        assert_eq!(totals, expected);
    }

    #[test]
    fn test_scenario_without_offers_ignores_them() {
        let pricing = CheckoutConfig::default().build_pricing(today()).unwrap();

        let with = Scenario::new("Blue pair", ["B01", "B01"]);
        let without = with.clone().without_offers();

        assert_eq!(pricing.price(&with, today()).unwrap().summary.total, Money::from_cents(1290));
        let report = pricing.price(&without, today()).unwrap();
        assert_eq!(report.summary.total, Money::from_cents(2085));
        assert!(report.summary.applied_offers.is_empty());
    }

    #[test]
    fn test_demo_offers_expire_with_the_month() {
        // Offers built for October, basket priced in November
        let pricing = CheckoutConfig::default().build_pricing(today()).unwrap();
        let november = NaiveDate::from_ymd_opt(2026, 11, 2).unwrap();

        let report = pricing
            .price(&Scenario::new("Blue pair", ["B01", "B01"]), november)
            .unwrap();
        assert_eq!(report.summary.total, Money::from_cents(2085));
    }

    #[test]
    fn test_unknown_code_fails_the_scenario() {
        let pricing = CheckoutConfig::default().build_pricing(today()).unwrap();
        let err = pricing
            .price(&Scenario::new("Typo", ["R01", "Q42"]), today())
            .unwrap_err();

        assert!(matches!(
            err,
            CheckoutError::Core(CoreError::ProductNotFound(ref code)) if code == "Q42"
        ));
    }
}
