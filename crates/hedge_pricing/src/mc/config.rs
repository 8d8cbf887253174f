//! Monte Carlo simulation configuration.
//!
//! This module provides the configuration type and its validating builder
//! for Monte Carlo valuation runs.

use std::time::Duration;

use hedge_core::types::PricingError;
use serde::{Deserialize, Serialize};

/// Maximum number of simulation paths allowed.
pub const MAX_PATHS: usize = 10_000_000;

/// Maximum time-step density (steps per year) allowed.
pub const MAX_STEPS_PER_YEAR: usize = 10_000;

/// Maximum number of time steps on a single path.
pub const MAX_STEPS_PER_PATH: usize = 100_000;

/// Default time-step density: one step per trading day.
pub const DEFAULT_STEPS_PER_YEAR: usize = 252;

/// Default number of paths per parallel chunk.
pub const DEFAULT_CHUNK_SIZE: usize = 4_096;

/// Default master seed.
pub const DEFAULT_SEED: u64 = 42;

/// Monte Carlo simulation configuration.
///
/// Immutable configuration specifying simulation parameters.
/// Use [`MonteCarloConfigBuilder`] to construct instances; deserialisation
/// goes through the same validation.
///
/// # Examples
///
/// ```rust
/// use hedge_pricing::mc::MonteCarloConfig;
///
/// let config = MonteCarloConfig::builder()
///     .n_paths(10_000)
///     .seed(42)
///     .build()
///     .expect("valid configuration");
///
/// assert_eq!(config.n_paths(), 10_000);
/// assert_eq!(config.steps_per_year(), 252);
/// assert_eq!(config.steps_for(0.25).unwrap(), 63);
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "MonteCarloConfigBuilder")]
pub struct MonteCarloConfig {
    /// Number of simulation paths.
    n_paths: usize,
    /// Time-step density in steps per year.
    steps_per_year: usize,
    /// Master seed for the per-chunk seed stream.
    seed: u64,
    /// Paths per parallel chunk.
    chunk_size: usize,
    /// Wall-clock budget for one valuation.
    timeout: Option<Duration>,
}

impl MonteCarloConfig {
    /// Creates a new configuration builder.
    #[inline]
    pub fn builder() -> MonteCarloConfigBuilder {
        MonteCarloConfigBuilder::default()
    }

    /// Returns the number of simulation paths.
    #[inline]
    pub fn n_paths(&self) -> usize {
        self.n_paths
    }

    /// Returns the time-step density in steps per year.
    #[inline]
    pub fn steps_per_year(&self) -> usize {
        self.steps_per_year
    }

    /// Returns the master seed.
    #[inline]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Returns the number of paths per parallel chunk.
    #[inline]
    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    /// Returns the wall-clock budget, if any.
    #[inline]
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    /// Returns a copy with a different path count and seed.
    ///
    /// # Errors
    ///
    /// `InvalidParameter` if `n_paths` is outside `[2, MAX_PATHS]`.
    pub fn with_paths_and_seed(&self, n_paths: usize, seed: u64) -> Result<Self, PricingError> {
        let config = Self {
            n_paths,
            seed,
            ..self.clone()
        };
        config.validate()?;
        Ok(config)
    }

    /// Number of time steps for an option expiring in `expiry` years.
    ///
    /// `max(1, ceil(expiry · steps_per_year))`.
    ///
    /// # Errors
    ///
    /// `InvalidParameter` if `expiry` is negative or non-finite, or the step
    /// count would exceed [`MAX_STEPS_PER_PATH`].
    pub fn steps_for(&self, expiry: f64) -> Result<usize, PricingError> {
        if !expiry.is_finite() || expiry < 0.0 {
            return Err(PricingError::invalid(
                "expiry",
                format!("must be non-negative and finite, got {}", expiry),
            ));
        }
        let raw = (expiry * self.steps_per_year as f64).ceil();
        if raw > MAX_STEPS_PER_PATH as f64 {
            return Err(PricingError::invalid(
                "steps_per_path",
                format!(
                    "{} steps exceed the maximum of {}",
                    raw, MAX_STEPS_PER_PATH
                ),
            ));
        }
        Ok((raw as usize).max(1))
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` if:
    /// - `n_paths` is below 2 or greater than 10,000,000
    /// - `steps_per_year` is 0 or greater than 10,000
    /// - `chunk_size` is 0
    /// - `timeout` is zero
    pub fn validate(&self) -> Result<(), PricingError> {
        if self.n_paths < 2 || self.n_paths > MAX_PATHS {
            return Err(PricingError::invalid(
                "n_paths",
                format!(
                    "{} outside [2, {}]; a standard error needs two paths",
                    self.n_paths, MAX_PATHS
                ),
            ));
        }
        if self.steps_per_year == 0 || self.steps_per_year > MAX_STEPS_PER_YEAR {
            return Err(PricingError::invalid(
                "steps_per_year",
                format!(
                    "{} outside [1, {}]",
                    self.steps_per_year, MAX_STEPS_PER_YEAR
                ),
            ));
        }
        if self.chunk_size == 0 {
            return Err(PricingError::invalid("chunk_size", "must be at least 1"));
        }
        if self.timeout == Some(Duration::ZERO) {
            return Err(PricingError::invalid("timeout", "must be non-zero when set"));
        }
        Ok(())
    }
}

/// Builder for [`MonteCarloConfig`].
///
/// Provides a fluent API with validation at build time. Only `n_paths`
/// is mandatory.
///
/// # Examples
///
/// ```rust
/// use std::time::Duration;
/// use hedge_pricing::mc::MonteCarloConfig;
///
/// let config = MonteCarloConfig::builder()
///     .n_paths(50_000)
///     .steps_per_year(52)  // Weekly steps
///     .chunk_size(1_000)
///     .timeout(Duration::from_secs(5))
///     .build()
///     .expect("valid config");
///
/// assert_eq!(config.timeout(), Some(Duration::from_secs(5)));
/// ```
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct MonteCarloConfigBuilder {
    n_paths: Option<usize>,
    steps_per_year: usize,
    seed: u64,
    chunk_size: usize,
    timeout: Option<Duration>,
}

impl Default for MonteCarloConfigBuilder {
    fn default() -> Self {
        Self {
            n_paths: None,
            steps_per_year: DEFAULT_STEPS_PER_YEAR,
            seed: DEFAULT_SEED,
            chunk_size: DEFAULT_CHUNK_SIZE,
            timeout: None,
        }
    }
}

impl MonteCarloConfigBuilder {
    /// Sets the number of simulation paths, in `[2, 10_000_000]`.
    #[inline]
    pub fn n_paths(mut self, n_paths: usize) -> Self {
        self.n_paths = Some(n_paths);
        self
    }

    /// Sets the time-step density, in `[1, 10_000]` steps per year.
    #[inline]
    pub fn steps_per_year(mut self, steps_per_year: usize) -> Self {
        self.steps_per_year = steps_per_year;
        self
    }

    /// Sets the master seed for reproducibility.
    #[inline]
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Sets the number of paths simulated per parallel chunk.
    #[inline]
    pub fn chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size;
        self
    }

    /// Sets a wall-clock budget; the run is cancelled once it elapses.
    #[inline]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Builds the configuration.
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` if `n_paths` is not set or any field is
    /// out of range (see [`MonteCarloConfig::validate`]).
    pub fn build(self) -> Result<MonteCarloConfig, PricingError> {
        let n_paths = self
            .n_paths
            .ok_or_else(|| PricingError::invalid("n_paths", "must be specified"))?;

        let config = MonteCarloConfig {
            n_paths,
            steps_per_year: self.steps_per_year,
            seed: self.seed,
            chunk_size: self.chunk_size,
            timeout: self.timeout,
        };

        config.validate()?;
        Ok(config)
    }
}

impl TryFrom<MonteCarloConfigBuilder> for MonteCarloConfig {
    type Error = PricingError;

    fn try_from(builder: MonteCarloConfigBuilder) -> Result<Self, Self::Error> {
        builder.build()
    }
}
