//! # acme-checkout
//!
//! Command line front end for the Acme basket pricer.
//!
//! ## Startup Sequence
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  1. Initialize tracing (stderr) ──────────────────────────────────────► │
//! │     • Default: info, acme_checkout=debug; override with RUST_LOG        │
//! │                                                                         │
//! │  2. Parse CLI ────────────────────────────────────────────────────────► │
//! │     acme-checkout [--config PATH] [--date YYYY-MM-DD] [--json] [CODES]  │
//! │                                                                         │
//! │  3. Load CheckoutConfig (defaults → TOML → ACME_* env) ───────────────► │
//! │                                                                         │
//! │  4. Build catalogue, delivery table, offers ──────────────────────────► │
//! │                                                                         │
//! │  5. Price the CODES given, or every configured scenario ──────────────► │
//! │                                                                         │
//! │  6. Print text or JSON report to stdout                                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod config;
pub mod error;
pub mod pricing;
pub mod report;

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use chrono::NaiveDate;
use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use config::{CheckoutConfig, OutputFormat, Scenario};

/// Price Acme Widget Co baskets.
#[derive(Debug, Parser)]
#[command(name = "acme-checkout", version, about)]
pub struct Cli {
    /// Path to a checkout.toml config file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Price as of this date instead of today
    #[arg(long, value_name = "YYYY-MM-DD")]
    pub date: Option<NaiveDate>,

    /// Print the report as JSON
    #[arg(long)]
    pub json: bool,

    /// Product codes for a single basket; prices the configured scenarios when empty
    #[arg(value_name = "CODES")]
    pub products: Vec<String>,
}

/// Entry point used by the binary.
pub fn run() -> ExitCode {
    init_tracing();

    let cli = Cli::parse();
    match execute(&cli) {
        Ok(report) => {
            print!("{report}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            error!(error = %err, "Checkout failed");
            eprintln!("Error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

/// Loads configuration, prices the baskets and renders the report.
pub fn execute(cli: &Cli) -> anyhow::Result<String> {
    let mut config = CheckoutConfig::load(cli.config.clone()).context("Failed to load checkout config")?;
    if cli.json {
        config.output = OutputFormat::Json;
    }

    let today = cli
        .date
        .or(config.today)
        .unwrap_or_else(|| chrono::Local::now().date_naive());
    info!(%today, "Pricing baskets");

    let pricing = config.build_pricing(today)?;

    let scenarios = if cli.products.is_empty() {
        config.scenarios.clone()
    } else {
        vec![Scenario::new("Command line basket", cli.products.iter().cloned())]
    };

    let reports = pricing.price_all(&scenarios, today)?;

    let rendered = match config.output {
        OutputFormat::Text => report::render_text(&reports),
        OutputFormat::Json => report::render_json(&reports)? + "\n",
    };
    Ok(rendered)
}

/// Initializes the tracing subscriber on stderr.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=acme_core=trace` - Per-offer discount detail
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,acme_checkout=debug"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
