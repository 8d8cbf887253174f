//! Numeric primitives shared by the pricing layers.
//!
//! - [`distributions`]: standard normal CDF and PDF
//! - [`solvers`]: bracketing root finder

pub mod distributions;
pub mod solvers;
