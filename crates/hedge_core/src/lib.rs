//! # hedge_core: Foundation layer for hedgelab
//!
//! ## Layer 1 (Foundation) Role
//!
//! hedge_core is the bottom layer of the workspace and provides:
//! - Market inputs: [`MarketParameters`](types::MarketParameters), [`OptionType`](types::OptionType)
//! - Error taxonomy: [`PricingError`](types::PricingError), [`SolverError`](types::SolverError)
//! - Standard normal distribution functions (`math::distributions`)
//! - Bracketing root finder for inversions such as implied volatility (`math::solvers`)
//!
//! ## Zero Dependency Principle
//!
//! Layer 1 has no dependencies on other hedge_* crates, with minimal external dependencies:
//! - num-traits: generic numerical computation
//! - thiserror: error derivation
//! - serde: serialisation of market inputs
//!
//! ## Usage Examples
//!
//! ```rust
//! use hedge_core::math::distributions::{norm_cdf, norm_pdf};
//! use hedge_core::types::{MarketParameters, OptionType};
//!
//! let params = MarketParameters::new(2500.0, 2600.0, 0.25, 0.25, 0.08, 0.02).unwrap();
//! assert_eq!(params.strike, 2600.0);
//! assert_eq!("put".parse::<OptionType>().unwrap(), OptionType::Put);
//!
//! assert!((norm_cdf(0.0_f64) - 0.5).abs() < 1e-7);
//! assert!(norm_pdf(0.0_f64) > 0.39);
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod math;
pub mod types;
