//! # hedge_models (L2: Business Logic)
//!
//! Closed-form option pricing for hedgelab.
//!
//! This crate provides:
//! - Black-Scholes-Merton prices and Greeks with a convenience yield `q`
//! - Desk-unit [`Greeks`](analytical::Greeks) (theta per day, vega and rho per 1%)
//! - Implied volatility through a bracketing root finder
//!
//! ## Usage
//!
//! ```rust
//! use hedge_core::types::{MarketParameters, OptionType};
//! use hedge_models::analytical::price;
//!
//! let params = MarketParameters::new(100.0, 100.0, 1.0, 0.2, 0.05, 0.0).unwrap();
//! let call = price(&params, OptionType::Call).unwrap();
//! let put = price(&params, OptionType::Put).unwrap();
//!
//! // Delta of a call minus delta of a put is e^(-qT) = 1 here
//! assert!((call.delta - put.delta - 1.0).abs() < 1e-12);
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod analytical;
