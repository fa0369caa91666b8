//! # Checkout Error Types
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Checkout Error Categories                            │
//! │                                                                         │
//! │  ┌─────────────────┐  ┌─────────────────┐  ┌─────────────────────────┐ │
//! │  │  Configuration  │  │    Pricing      │  │      Output             │ │
//! │  │                 │  │                 │  │                         │ │
//! │  │  ConfigNotFound │  │  Core           │  │  Json                   │ │
//! │  │  Io / Parse     │  │  (unknown code) │  │                         │ │
//! │  │  InvalidValue   │  │                 │  │                         │ │
//! │  │  InvalidOffer   │  │                 │  │                         │ │
//! │  └─────────────────┘  └─────────────────┘  └─────────────────────────┘ │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use acme_core::{CoreError, ValidationError};
use thiserror::Error;

/// Result type alias for checkout operations.
pub type CheckoutResult<T> = Result<T, CheckoutError>;

#[derive(Debug, Error)]
pub enum CheckoutError {
    // =========================================================================
    // Configuration Errors
    // =========================================================================
    /// A config file was named explicitly but does not exist.
    #[error("Config file not found: {}", .0.display())]
    ConfigNotFound(PathBuf),

    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    /// An environment override could not be parsed.
    #[error("Invalid value for {0}")]
    InvalidValue(String),

    #[error("Invalid offer '{name}': {source}")]
    InvalidOffer {
        name: String,
        #[source]
        source: ValidationError,
    },

    /// Catalogue or delivery table rejected.
    #[error("Invalid configuration: {0}")]
    Validation(#[from] ValidationError),

    // =========================================================================
    // Pricing Errors
    // =========================================================================
    #[error(transparent)]
    Core(#[from] CoreError),

    // =========================================================================
    // Output Errors
    // =========================================================================
    #[error("Failed to render JSON: {0}")]
    Json(#[from] serde_json::Error),
}
