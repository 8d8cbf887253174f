//! Root-finding solvers for numerical inversion.
//!
//! Used to back out implied volatility from a quoted premium.
//!
//! - [`BrentSolver`]: robust bracketing method without derivative requirement
//! - [`SolverConfig`]: tolerance and iteration limit
//!
//! ## Example
//!
//! ```
//! use hedge_core::math::solvers::{BrentSolver, SolverConfig};
//!
//! let solver = BrentSolver::new(SolverConfig::default());
//! let root = solver.find_root(|x: f64| x * x - 2.0, 0.0, 2.0).unwrap();
//! assert!((root - std::f64::consts::SQRT_2).abs() < 1e-10);
//! ```

mod brent;
mod config;

pub use brent::BrentSolver;
pub use config::SolverConfig;
