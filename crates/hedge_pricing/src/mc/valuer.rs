//! Monte Carlo valuation of European options.
//!
//! Paths are split into fixed-size chunks. Each chunk owns a generator
//! seeded from a [`SeedStream`] and accumulates its payoffs with Welford's
//! update. Chunk statistics are merged in chunk order, so the estimate for a
//! given configuration does not depend on how rayon schedules the work.

use hedge_core::types::{MarketParameters, OptionType, PricingError};
use rayon::prelude::*;
use serde::Serialize;
use tracing::{debug, warn};

use super::cancel::{CancellationToken, StopSignal};
use super::config::{MonteCarloConfig, MAX_PATHS};
use super::paths::{GbmPathSimulator, StepCoefficients};
use crate::rng::{RandomSource, SeedStream};

/// Monte Carlo price estimate.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct ValuationResult {
    /// Discounted mean payoff.
    pub price: f64,
    /// Standard error of the price estimate.
    pub std_error: f64,
    /// Number of simulated paths (0 for an expired option).
    pub n_paths: usize,
    /// Time steps per path (0 for an expired option).
    pub steps_per_path: usize,
}

impl ValuationResult {
    /// Returns the 95% confidence interval half-width.
    #[inline]
    pub fn confidence_95(&self) -> f64 {
        1.96 * self.std_error
    }

    /// Returns the 99% confidence interval half-width.
    #[inline]
    pub fn confidence_99(&self) -> f64 {
        2.576 * self.std_error
    }
}

/// Outcome of [`MonteCarloValuer::value_to_tolerance`].
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct ToleranceResult {
    /// Estimate from the last round run.
    pub result: ValuationResult,
    /// Whether the last estimate met the requested standard error.
    pub converged: bool,
    /// Number of rounds run.
    pub rounds: usize,
}

// ============================================================================
// Running statistics
// ============================================================================

/// Streaming mean and sum of squared deviations.
#[derive(Clone, Copy, Debug, Default)]
struct RunningStats {
    count: usize,
    mean: f64,
    m2: f64,
}

impl RunningStats {
    #[inline]
    fn push(&mut self, x: f64) {
        self.count += 1;
        let delta = x - self.mean;
        self.mean += delta / self.count as f64;
        self.m2 += delta * (x - self.mean);
    }

    /// Chan's pairwise combination.
    fn merge(&mut self, other: &RunningStats) {
        if other.count == 0 {
            return;
        }
        if self.count == 0 {
            *self = *other;
            return;
        }
        let n_a = self.count as f64;
        let n_b = other.count as f64;
        let n = n_a + n_b;
        let delta = other.mean - self.mean;
        self.mean += delta * n_b / n;
        self.m2 += other.m2 + delta * delta * n_a * n_b / n;
        self.count += other.count;
    }

    fn sample_variance(&self) -> f64 {
        if self.count < 2 {
            0.0
        } else {
            self.m2 / (self.count - 1) as f64
        }
    }
}

struct ChunkOutcome {
    stats: RunningStats,
    complete: bool,
}

// ============================================================================
// Valuer
// ============================================================================

/// Monte Carlo valuer for European calls and puts under GBM.
///
/// # Examples
///
/// ```rust
/// use hedge_core::types::{MarketParameters, OptionType};
/// use hedge_pricing::mc::{MonteCarloConfig, MonteCarloValuer};
///
/// let config = MonteCarloConfig::builder()
///     .n_paths(20_000)
///     .steps_per_year(12)
///     .seed(7)
///     .build()
///     .unwrap();
/// let valuer = MonteCarloValuer::new(config);
///
/// let params = MarketParameters::new(100.0, 100.0, 1.0, 0.2, 0.05, 0.0).unwrap();
/// let result = valuer.value(&params, OptionType::Call).unwrap();
///
/// // Closed form is about 10.45
/// assert!((result.price - 10.45).abs() < 4.0 * result.std_error);
/// ```
#[derive(Debug, Clone)]
pub struct MonteCarloValuer {
    config: MonteCarloConfig,
    token: CancellationToken,
}

impl MonteCarloValuer {
    /// Creates a valuer with its own cancellation token.
    pub fn new(config: MonteCarloConfig) -> Self {
        Self {
            config,
            token: CancellationToken::new(),
        }
    }

    /// Creates a valuer that stops when `token` is cancelled.
    pub fn with_cancellation(config: MonteCarloConfig, token: CancellationToken) -> Self {
        Self { config, token }
    }

    /// Returns the configuration.
    #[inline]
    pub fn config(&self) -> &MonteCarloConfig {
        &self.config
    }

    /// Returns a handle that cancels runs of this valuer.
    pub fn cancellation_token(&self) -> CancellationToken {
        self.token.clone()
    }

    /// Validates inputs and resolves the step count.
    ///
    /// `Ok(None)` means the option has expired and no simulation is needed.
    fn prepare(
        &self,
        params: &MarketParameters,
    ) -> Result<Option<(GbmPathSimulator, StepCoefficients)>, PricingError> {
        params.validate()?;
        self.config.validate()?;
        if params.expiry == 0.0 {
            return Ok(None);
        }
        let steps = self.config.steps_for(params.expiry)?;
        let simulator = GbmPathSimulator::new(*params)?;
        let coeffs = simulator.coefficients(steps)?;
        Ok(Some((simulator, coeffs)))
    }

    fn expired(params: &MarketParameters, option_type: OptionType) -> ValuationResult {
        ValuationResult {
            price: option_type.intrinsic(params.spot, params.strike),
            std_error: 0.0,
            n_paths: 0,
            steps_per_path: 0,
        }
    }

    fn finish(
        &self,
        stats: &RunningStats,
        params: &MarketParameters,
        steps: usize,
    ) -> Result<ValuationResult, PricingError> {
        let df = params.discount_factor();
        let price = df * stats.mean;
        let std_error = df * (stats.sample_variance() / stats.count as f64).sqrt();
        if !price.is_finite() || !std_error.is_finite() {
            return Err(PricingError::NumericalDegeneracy(format!(
                "Monte Carlo estimate is not finite: price={}, std_error={}",
                price, std_error
            )));
        }
        debug!(
            n_paths = stats.count,
            steps,
            price,
            std_error,
            "Monte Carlo valuation finished"
        );
        Ok(ValuationResult {
            price,
            std_error,
            n_paths: stats.count,
            steps_per_path: steps,
        })
    }

    fn cancelled(completed_paths: usize) -> PricingError {
        warn!(completed_paths, "Monte Carlo valuation cancelled");
        PricingError::Cancelled { completed_paths }
    }

    /// Values the option sequentially from a caller-supplied source.
    ///
    /// The configured seed and chunk size are ignored; every draw comes from
    /// `rng`.
    ///
    /// # Errors
    ///
    /// - `InvalidParameter` for invalid market parameters or configuration
    /// - `Cancelled` if the token fires or the timeout elapses
    /// - `NumericalDegeneracy` if the estimate is not finite
    pub fn value_with_rng<R>(
        &self,
        params: &MarketParameters,
        option_type: OptionType,
        rng: &mut R,
    ) -> Result<ValuationResult, PricingError>
    where
        R: RandomSource + ?Sized,
    {
        let (simulator, coeffs) = match self.prepare(params)? {
            Some(prepared) => prepared,
            None => return Ok(Self::expired(params, option_type)),
        };
        let steps = coeffs.steps();
        debug!(
            n_paths = self.config.n_paths(),
            steps,
            "Monte Carlo valuation started (sequential)"
        );

        let stop = StopSignal::new(self.token.clone(), self.config.timeout());
        let mut stats = RunningStats::default();
        for _ in 0..self.config.n_paths() {
            if stop.should_stop() {
                return Err(Self::cancelled(stats.count));
            }
            let terminal = simulator.terminal_with(&coeffs, rng);
            stats.push(option_type.intrinsic(terminal, params.strike));
        }

        self.finish(&stats, params, steps)
    }

    /// Values the option in parallel from the configured seed.
    ///
    /// Chunk `c` draws from `SeedStream::new(seed).rng_for(c)`. For a given
    /// configuration the result is bit-for-bit identical whatever the size
    /// of the rayon pool.
    ///
    /// # Errors
    ///
    /// Same as [`value_with_rng`](Self::value_with_rng).
    pub fn value(
        &self,
        params: &MarketParameters,
        option_type: OptionType,
    ) -> Result<ValuationResult, PricingError> {
        let (simulator, coeffs) = match self.prepare(params)? {
            Some(prepared) => prepared,
            None => return Ok(Self::expired(params, option_type)),
        };
        let steps = coeffs.steps();
        let n_paths = self.config.n_paths();
        let chunk_size = self.config.chunk_size();
        let n_chunks = n_paths.div_ceil(chunk_size);
        debug!(
            n_paths,
            steps,
            seed = self.config.seed(),
            n_chunks,
            "Monte Carlo valuation started"
        );

        let stream = SeedStream::new(self.config.seed());
        let stop = StopSignal::new(self.token.clone(), self.config.timeout());
        let strike = params.strike;

        let outcomes: Vec<ChunkOutcome> = (0..n_chunks)
            .into_par_iter()
            .map(|chunk| {
                let len = chunk_size.min(n_paths - chunk * chunk_size);
                let mut rng = stream.rng_for(chunk as u64);
                let mut stats = RunningStats::default();
                for _ in 0..len {
                    if stop.should_stop() {
                        return ChunkOutcome {
                            stats,
                            complete: false,
                        };
                    }
                    let terminal = simulator.terminal_with(&coeffs, &mut rng);
                    stats.push(option_type.intrinsic(terminal, strike));
                }
                ChunkOutcome {
                    stats,
                    complete: true,
                }
            })
            .collect();

        let mut total = RunningStats::default();
        let mut complete = true;
        for outcome in &outcomes {
            total.merge(&outcome.stats);
            complete &= outcome.complete;
        }
        if !complete {
            return Err(Self::cancelled(total.count));
        }

        self.finish(&total, params, steps)
    }

    /// Repeats [`value`](Self::value) until the standard error reaches
    /// `target_std_error`.
    ///
    /// Round `k` uses seed `SeedStream::new(seed).seed_for(k)` and twice the
    /// paths of round `k - 1`, starting from the configured count and capped
    /// at [`MAX_PATHS`]. The configured timeout applies to each round.
    ///
    /// # Errors
    ///
    /// - `InvalidParameter` if `target_std_error` is not positive and finite
    ///   or `max_rounds` is 0
    /// - any error of [`value`](Self::value)
    pub fn value_to_tolerance(
        &self,
        params: &MarketParameters,
        option_type: OptionType,
        target_std_error: f64,
        max_rounds: usize,
    ) -> Result<ToleranceResult, PricingError> {
        if !target_std_error.is_finite() || target_std_error <= 0.0 {
            return Err(PricingError::invalid(
                "target_std_error",
                format!("must be positive and finite, got {}", target_std_error),
            ));
        }
        if max_rounds == 0 {
            return Err(PricingError::invalid("max_rounds", "must be at least 1"));
        }

        let seeds = SeedStream::new(self.config.seed());
        let mut n_paths = self.config.n_paths();
        let mut rounds = 0;

        loop {
            let config = self
                .config
                .with_paths_and_seed(n_paths, seeds.seed_for(rounds as u64))?;
            let valuer = Self::with_cancellation(config, self.token.clone());
            let result = valuer.value(params, option_type)?;
            rounds += 1;

            let converged = result.std_error <= target_std_error;
            if converged || rounds == max_rounds || n_paths == MAX_PATHS {
                debug!(rounds, converged, n_paths, "Tolerance driver finished");
                return Ok(ToleranceResult {
                    result,
                    converged,
                    rounds,
                });
            }
            n_paths = n_paths.saturating_mul(2).min(MAX_PATHS);
        }
    }
}
