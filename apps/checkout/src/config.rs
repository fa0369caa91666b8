//! # Checkout Configuration
//!
//! Catalogue, delivery table, offers and demo scenarios for the checkout.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Command line flags (highest priority)                              │
//! │     --date 2026-10-18   --json                                          │
//! │                                                                         │
//! │  2. Environment Variables                                              │
//! │     ACME_TODAY=2026-10-18                                               │
//! │     ACME_OUTPUT=json                                                    │
//! │                                                                         │
//! │  3. TOML Config File                                                   │
//! │     --config PATH, or ACME_CONFIG, or                                  │
//! │     ~/.config/acme-checkout/checkout.toml (Linux)                      │
//! │                                                                         │
//! │  4. Default Values (lowest priority)                                   │
//! │     Acme catalogue, delivery bands, this month's offers                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! Amounts and dates are quoted strings.
//! ```toml
//! today = "2026-10-18"
//! output = "text"
//!
//! [[products]]
//! code = "R01"
//! name = "Red Widget"
//! price = "32.95"
//!
//! [[delivery]]
//! threshold = "0"
//! cost = "4.95"
//!
//! [[offers]]
//! name = "Buy One Get One Free Blue Widget"
//! discount_type = "bogo"
//! product_code = "B01"
//! min_quantity = 2
//! start_date = "2026-10-01"
//! end_date = "2026-10-31"
//!
//! [[scenarios]]
//! description = "Two blue widgets"
//! products = ["B01", "B01"]
//! ```

use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::Arc;

use acme_core::{
    DeliveryRule, DeliveryRules, Money, Offer, OfferCalculator, OfferConfig, Product,
    ProductCatalogue,
};
use chrono::{Datelike, Months, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{CheckoutError, CheckoutResult};
use crate::pricing::Pricing;

// =============================================================================
// Output Format
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl FromStr for OutputFormat {
    type Err = CheckoutError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            _ => Err(CheckoutError::InvalidValue("output".to_string())),
        }
    }
}

// =============================================================================
// Scenario
// =============================================================================

/// A named basket to price.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scenario {
    pub description: String,
    pub products: Vec<String>,
    /// Price without any offers when false.
    #[serde(default = "default_true")]
    pub with_offers: bool,
}

fn default_true() -> bool {
    true
}

impl Scenario {
    pub fn new<I, S>(description: impl Into<String>, products: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Scenario {
            description: description.into(),
            products: products.into_iter().map(Into::into).collect(),
            with_offers: true,
        }
    }

    pub fn without_offers(mut self) -> Self {
        self.with_offers = false;
        self
    }
}

// =============================================================================
// Main Checkout Configuration
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckoutConfig {
    /// Pins "today"; the local date is used when unset.
    #[serde(default)]
    pub today: Option<NaiveDate>,

    #[serde(default)]
    pub output: OutputFormat,

    #[serde(default = "default_products")]
    pub products: Vec<Product>,

    #[serde(default = "default_delivery")]
    pub delivery: Vec<DeliveryRule>,

    /// `None` selects the demo offers, valid for the current month.
    #[serde(default)]
    pub offers: Option<Vec<OfferConfig>>,

    #[serde(default = "default_scenarios")]
    pub scenarios: Vec<Scenario>,
}

impl Default for CheckoutConfig {
    fn default() -> Self {
        CheckoutConfig {
            today: None,
            output: OutputFormat::default(),
            products: default_products(),
            delivery: default_delivery(),
            offers: None,
            scenarios: default_scenarios(),
        }
    }
}

impl CheckoutConfig {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (checkout.toml)
    /// 3. Environment variables
    ///
    /// A path given explicitly (argument or `ACME_CONFIG`) must exist; the
    /// platform default path is optional.
    pub fn load(config_path: Option<PathBuf>) -> CheckoutResult<Self> {
        let explicit = config_path.or_else(|| std::env::var_os("ACME_CONFIG").map(PathBuf::from));

        let mut config = match (&explicit, Self::default_config_path()) {
            (Some(path), _) if !path.exists() => {
                return Err(CheckoutError::ConfigNotFound(path.clone()));
            }
            (Some(path), _) => Self::from_file(path)?,
            (None, Some(path)) if path.exists() => Self::from_file(&path)?,
            (None, path) => {
                debug!(?path, "Config file not found, using defaults");
                Self::default()
            }
        };

        config.apply_overrides(|key| std::env::var(key).ok())?;
        config.validate()?;

        Ok(config)
    }

    /// Parses a TOML config file.
    pub fn from_file(path: &Path) -> CheckoutResult<Self> {
        info!(?path, "Loading checkout config from file");
        let contents = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&contents)?)
    }

    /// Applies `ACME_*` overrides read through `lookup`.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> CheckoutResult<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(today) = lookup("ACME_TODAY") {
            let parsed = today
                .trim()
                .parse::<NaiveDate>()
                .map_err(|_| CheckoutError::InvalidValue("ACME_TODAY".to_string()))?;
            debug!(%parsed, "Overriding today from environment");
            self.today = Some(parsed);
        }

        if let Some(output) = lookup("ACME_OUTPUT") {
            self.output = output
                .parse()
                .map_err(|_| CheckoutError::InvalidValue("ACME_OUTPUT".to_string()))?;
        }

        Ok(())
    }

    /// Checks that the catalogue, delivery table and offers all build.
    pub fn validate(&self) -> CheckoutResult<()> {
        let today = self.today.unwrap_or_else(|| chrono::Local::now().date_naive());
        self.build_pricing(today).map(|_| ())
    }

    /// Offer definitions in effect, demo offers for the month of `today`
    /// when none are configured.
    pub fn offer_configs(&self, today: NaiveDate) -> Vec<OfferConfig> {
        self.offers.clone().unwrap_or_else(|| demo_offers(today))
    }

    /// Builds the validated collaborators for pricing baskets.
    pub fn build_pricing(&self, today: NaiveDate) -> CheckoutResult<Pricing> {
        let catalogue = ProductCatalogue::try_new(self.products.iter().cloned())?;
        let delivery = DeliveryRules::new(self.delivery.iter().copied())?;

        let offers = self
            .offer_configs(today)
            .into_iter()
            .map(|config| {
                let name = config.name.clone();
                config
                    .build()
                    .map_err(|source| CheckoutError::InvalidOffer { name, source })
            })
            .collect::<CheckoutResult<Vec<Offer>>>()?;

        debug!(
            products = catalogue.len(),
            delivery_rules = delivery.rules().len(),
            offers = offers.len(),
            "Pricing configuration built"
        );

        Ok(Pricing {
            catalogue: Arc::new(catalogue),
            delivery: Arc::new(delivery),
            offers: Arc::new(OfferCalculator::new(offers)),
        })
    }

    /// Returns the default config file path.
    fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "acme", "acme-checkout")
            .map(|dirs| dirs.config_dir().join("checkout.toml"))
    }
}

// =============================================================================
// Defaults
// =============================================================================

fn default_products() -> Vec<Product> {
    ProductCatalogue::acme().all()
}

fn default_delivery() -> Vec<DeliveryRule> {
    DeliveryRules::acme().rules().to_vec()
}

fn default_scenarios() -> Vec<Scenario> {
    vec![
        Scenario::new("Buy One Get One Free on Blue Widget (BOGO)", ["B01", "B01"]),
        Scenario::new("Bundle Offer on Red + Green Widget", ["R01", "G01"]),
        Scenario::new("Buy One Get One 50% Off on Red Widget", ["R01", "R01", "R01"]),
        Scenario::new("Buy One Get One 50% Off on Red Widget", ["R01", "R01"]),
        Scenario::new("Multiple offers applied", ["B01", "B01", "R01", "R01", "R01"]),
        Scenario::new("No offer applies (just Green Widgets)", ["G01", "G01"]),
        Scenario::new("No offers applied (Red Widget x2)", ["R01", "R01"]).without_offers(),
    ]
}

/// First and last day of the month containing `today`.
fn month_window(today: NaiveDate) -> (NaiveDate, NaiveDate) {
    let start = today.with_day(1).unwrap_or(today);
    let end = start
        .checked_add_months(Months::new(1))
        .and_then(|next| next.pred_opt())
        .unwrap_or(today);
    (start, end)
}

/// The three Acme promotions, running for the month of `today`.
pub fn demo_offers(today: NaiveDate) -> Vec<OfferConfig> {
    let (start, end) = month_window(today);

    vec![
        OfferConfig::percentage("Buy One Get One 50% Off Red Widget", "R01", Decimal::from(50))
            .min_quantity(2)
            .max_discount(Money::from_cents(2000))
            .starting(start)
            .ending(end),
        OfferConfig::bogo("Buy One Get One Free Blue Widget", "B01")
            .min_quantity(2)
            .max_discount(Money::from_cents(1590))
            .starting(start)
            .ending(end),
        OfferConfig::bundle(
            "Red + Green Bundle for $50",
            ["R01", "G01"],
            Money::from_cents(5000),
        )
        .max_discount(Money::from_cents(1000))
        .starting(start)
        .ending(end),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_default_config() {
        let config = CheckoutConfig::default();
        assert_eq!(config.products.len(), 3);
        assert_eq!(config.delivery.len(), 3);
        assert_eq!(config.scenarios.len(), 7);
        assert!(!config.scenarios[6].with_offers);
        assert_eq!(config.output, OutputFormat::Text);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_month_window() {
        assert_eq!(month_window(date(2026, 10, 18)), (date(2026, 10, 1), date(2026, 10, 31)));
        assert_eq!(month_window(date(2028, 2, 29)), (date(2028, 2, 1), date(2028, 2, 29)));
        assert_eq!(month_window(date(2026, 12, 31)), (date(2026, 12, 1), date(2026, 12, 31)));
    }

    #[test]
    fn test_demo_offers_run_for_the_month() {
        let offers = demo_offers(date(2026, 10, 18));
        assert_eq!(offers.len(), 3);
        for offer in offers {
            let offer = offer.build().unwrap();
            assert!(offer.is_valid_on(date(2026, 10, 1)));
            assert!(offer.is_valid_on(date(2026, 10, 31)));
            assert!(!offer.is_valid_on(date(2026, 11, 1)));
        }
    }

    #[test]
    fn test_toml_file_round_trip() {
        let toml_str = r#"
today = "2026-10-18"
output = "json"

[[products]]
code = "R01"
name = "Red Widget"
price = "32.95"

[[delivery]]
threshold = "0"
cost = "3.00"

[[offers]]
name = "Red half price"
discount_type = "percentage"
product_code = "R01"
discount_value = "50"
min_quantity = 2
start_date = "2026-10-01"
end_date = "2026-10-31"

[[scenarios]]
description = "Two reds"
products = ["R01", "R01"]
"#;
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(toml_str.as_bytes()).unwrap();

        let config = CheckoutConfig::load(Some(file.path().to_path_buf())).unwrap();
        assert_eq!(config.today, Some(date(2026, 10, 18)));
        assert_eq!(config.output, OutputFormat::Json);
        assert_eq!(config.products.len(), 1);
        assert_eq!(config.scenarios[0].products, vec!["R01", "R01"]);
        assert!(config.scenarios[0].with_offers);

        let pricing = config.build_pricing(date(2026, 10, 18)).unwrap();
        assert_eq!(pricing.offers.len(), 1);
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let config: CheckoutConfig = toml::from_str("today = \"2026-10-18\"").unwrap();
        assert_eq!(config.products.len(), 3);
        assert!(config.offers.is_none());
        assert_eq!(config.offer_configs(date(2026, 10, 18)).len(), 3);
    }

    #[test]
    fn test_missing_explicit_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope.toml");
        assert!(matches!(
            CheckoutConfig::load(Some(path)),
            Err(CheckoutError::ConfigNotFound(_))
        ));
    }

    #[test]
    fn test_unknown_discount_type_is_rejected() {
        let toml_str = r#"
[[offers]]
name = "Mystery"
discount_type = "mystery_box"
product_code = "R01"
"#;
        let config: CheckoutConfig = toml::from_str(toml_str).unwrap();
        let err = config.validate().unwrap_err();
        assert!(matches!(err, CheckoutError::InvalidOffer { ref name, .. } if name == "Mystery"));
    }

    #[test]
    fn test_duplicate_product_codes_are_rejected() {
        let mut config = CheckoutConfig::default();
        config.products.push(Product::new("R01", "Another Red", Money::from_cents(100)));
        assert!(matches!(config.validate(), Err(CheckoutError::Validation(_))));
    }

    #[test]
    fn test_overrides() {
        let env: HashMap<&str, &str> = [("ACME_TODAY", "2026-10-18"), ("ACME_OUTPUT", "JSON")]
            .into_iter()
            .collect();

        let mut config = CheckoutConfig::default();
        config
            .apply_overrides(|key| env.get(key).map(|v| v.to_string()))
            .unwrap();

        assert_eq!(config.today, Some(date(2026, 10, 18)));
        assert_eq!(config.output, OutputFormat::Json);
    }

    #[test]
    fn test_bad_override_is_an_error() {
        let mut config = CheckoutConfig::default();
        let result = config.apply_overrides(|key| (key == "ACME_TODAY").then(|| "18/10/2026".to_string()));
        assert!(matches!(result, Err(CheckoutError::InvalidValue(_))));
    }

    #[test]
    fn test_toml_serialization() {
        let config = CheckoutConfig::default();
        let toml_str = toml::to_string_pretty(&config).unwrap();
        assert!(toml_str.contains("[[products]]"));
        assert!(toml_str.contains("[[scenarios]]"));
    }
}
