//! CLI error types

use hedge_core::types::PricingError;
use thiserror::Error;

/// Errors surfaced by the `hedgelab` binary.
#[derive(Debug, Error)]
pub enum CliError {
    /// Engine rejected the inputs or failed numerically.
    #[error("Pricing error: {0}")]
    Pricing(#[from] PricingError),

    /// Settings could not be loaded or deserialised.
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    /// A setting parsed but holds an unusable value.
    #[error("Invalid setting: {0}")]
    InvalidSetting(String),

    /// JSON output failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// CSV output failed.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Writing to stdout failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;
