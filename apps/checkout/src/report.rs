//! # Report Rendering
//!
//! ```text
//! Acme Widget Co - Basket Totals
//! ==================================================
//!
//! Test 1: Buy One Get One Free on Blue Widget (BOGO)
//!   Products:  B01, B01
//!   Subtotal:  $15.90
//!   Discount:  $7.95
//!     - Buy One Get One Free Blue Widget: $7.95
//!   Delivery:  $4.95
//!   Total:     $12.90
//! ```

use std::fmt::Write;

use acme_core::BasketSummary;
use serde::Serialize;

use crate::error::CheckoutResult;

const TITLE: &str = "Acme Widget Co - Basket Totals";
const RULE_WIDTH: usize = 50;

/// Priced scenario ready for output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScenarioReport {
    pub description: String,
    pub products: Vec<String>,
    pub summary: BasketSummary,
}

/// Human readable report, one numbered block per scenario.
pub fn render_text(reports: &[ScenarioReport]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{TITLE}");
    let _ = writeln!(out, "{}", "=".repeat(RULE_WIDTH));

    for (index, report) in reports.iter().enumerate() {
        let summary = &report.summary;
        let _ = writeln!(out);
        let _ = writeln!(out, "Test {}: {}", index + 1, report.description);
        let _ = writeln!(out, "  Products:  {}", report.products.join(", "));
        let _ = writeln!(out, "  Subtotal:  {}", summary.subtotal);
        let _ = writeln!(out, "  Discount:  {}", summary.discount);
        for applied in &summary.applied_offers {
            let _ = writeln!(out, "    - {}: {}", applied.name, applied.discount);
        }
        let _ = writeln!(out, "  Delivery:  {}", summary.delivery);
        let _ = writeln!(out, "  Total:     {}", summary.total);
    }

    out
}

/// Pretty-printed JSON array of reports.
pub fn render_json(reports: &[ScenarioReport]) -> CheckoutResult<String> {
    Ok(serde_json::to_string_pretty(reports)?)
}
