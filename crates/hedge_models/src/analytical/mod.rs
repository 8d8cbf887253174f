//! Analytical pricing formulas for European options.
//!
//! This module provides closed-form solutions under Black-Scholes-Merton:
//! - [`BlackScholesMerton`]: price and analytical Greeks with a continuous yield
//! - [`price`]: one-call entry point from [`MarketParameters`](hedge_core::types::MarketParameters)
//! - [`implied_volatility`]: inversion of the price for σ
//!
//! ## Design Principles
//!
//! - **Generic over `T: Float`**: the model works for `f64` and `f32`
//! - **Explicit degeneracy**: non-finite results surface as errors, never as NaN
//! - **Numerical Stability**: erfc-based CDF with exact symmetry

pub mod black_scholes;
pub mod greeks;
pub mod implied;

pub use black_scholes::{price, BlackScholesMerton};
pub use greeks::Greeks;
pub use hedge_core::math::distributions::{norm_cdf, norm_pdf};
pub use implied::{implied_volatility, MAX_IMPLIED_VOL, MIN_IMPLIED_VOL};
