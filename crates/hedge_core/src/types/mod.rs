//! Core market and error types.
//!
//! This module provides:
//! - `market`: [`MarketParameters`] and [`OptionType`], the inputs of every engine
//! - `error`: Structured error types for pricing and solver operations
//!
//! # Re-exports
//!
//! For convenience, commonly used types are re-exported at this module level.

pub mod error;
pub mod market;

// Re-export commonly used types at module level
pub use error::{PricingError, SolverError};
pub use market::{MarketParameters, OptionType};
