//! Error types for structured error handling.
//!
//! This module provides:
//! - `PricingError`: Errors from pricing, simulation and hedging operations
//! - `SolverError`: Errors from root-finding solvers

use thiserror::Error;

/// Categorised pricing errors.
///
/// Every operation in the workspace surfaces failures through this type.
/// Nothing is clamped or swallowed: a legitimate edge case such as an
/// expired option (`T = 0`) returns a value, while a configuration bug
/// returns an error.
///
/// # Variants
/// - `InvalidParameter`: Non-positive price/strike/volatility, negative time,
///   mismatched lengths, unknown enum text, invalid configuration
/// - `NumericalDegeneracy`: A computation produced a non-finite value
/// - `Cancelled`: A Monte Carlo batch was stopped before completion
/// - `Solver`: A root finder failed (e.g. implied volatility)
///
/// # Examples
/// ```
/// use hedge_core::types::PricingError;
///
/// let err = PricingError::invalid("spot", "must be positive, got -1");
/// assert_eq!(
///     format!("{}", err),
///     "Invalid parameter 'spot': must be positive, got -1"
/// );
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PricingError {
    /// Invalid input data or parameters.
    #[error("Invalid parameter '{name}': {reason}")]
    InvalidParameter {
        /// Parameter name.
        name: &'static str,
        /// Description of the invalid value.
        reason: String,
    },

    /// Computation would produce NaN or infinity.
    #[error("Numerical degeneracy: {0}")]
    NumericalDegeneracy(String),

    /// Batch stopped by a cancellation token or deadline.
    #[error("Simulation cancelled after {completed_paths} paths")]
    Cancelled {
        /// Number of paths fully simulated before the stop was observed.
        completed_paths: usize,
    },

    /// Root finding failed.
    #[error("Solver failure: {0}")]
    Solver(#[from] SolverError),
}

impl PricingError {
    /// Shorthand for [`PricingError::InvalidParameter`].
    pub fn invalid(name: &'static str, reason: impl Into<String>) -> Self {
        PricingError::InvalidParameter {
            name,
            reason: reason.into(),
        }
    }

    /// Returns `true` for configuration/input errors.
    pub fn is_invalid_parameter(&self) -> bool {
        matches!(self, PricingError::InvalidParameter { .. })
    }
}

/// Root-finding solver errors.
///
/// # Examples
/// ```
/// use hedge_core::types::SolverError;
///
/// let err = SolverError::MaxIterationsExceeded { iterations: 100 };
/// assert!(format!("{}", err).contains("100 iterations"));
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SolverError {
    /// Solver failed to converge within maximum iterations.
    #[error("Failed to converge after {iterations} iterations")]
    MaxIterationsExceeded {
        /// Number of iterations attempted
        iterations: usize,
    },

    /// No valid bracket (function values at endpoints have same sign).
    #[error("No bracket: f({a}) and f({b}) have same sign")]
    NoBracket {
        /// Left bracket endpoint
        a: f64,
        /// Right bracket endpoint
        b: f64,
    },
}
