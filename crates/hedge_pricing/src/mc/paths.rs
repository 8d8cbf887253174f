//! Path generation for Monte Carlo simulation.
//!
//! Geometric Brownian Motion under the risk-neutral measure with a
//! continuous yield, using the exact log-normal step:
//!
//! ```text
//! S(t+dt) = S(t)·exp((r - q - σ²/2)·dt + σ·√dt·Z),   Z ~ N(0, 1)
//! ```
//!
//! The full path and the terminal-only fast path used by the valuer apply
//! the same multiplications in the same order, so their terminals agree
//! bit for bit. A zero increment multiplies by exactly one.

use std::ops::Index;

use hedge_core::types::{MarketParameters, PricingError};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::rng::{RandomSource, SeedStream};

/// An ordered sequence of strictly positive prices.
///
/// Index 0 is the initial spot; a path over `n` steps has `n + 1` points.
/// Immutable once built.
///
/// # Examples
///
/// ```rust
/// use hedge_pricing::mc::PricePath;
///
/// let path = PricePath::new(vec![100.0, 101.5, 99.8]).unwrap();
/// assert_eq!(path.steps(), 2);
/// assert_eq!(path[1], 101.5);
/// assert_eq!(path.terminal(), 99.8);
///
/// assert!(PricePath::new(vec![]).is_err());
/// assert!(PricePath::new(vec![100.0, 0.0]).is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<f64>", into = "Vec<f64>")]
pub struct PricePath {
    points: Vec<f64>,
}

impl PricePath {
    /// Wraps a price series after checking it is non-empty, finite and positive.
    ///
    /// # Errors
    ///
    /// `InvalidParameter` naming the first offending point.
    pub fn new(points: Vec<f64>) -> Result<Self, PricingError> {
        if points.is_empty() {
            return Err(PricingError::invalid("path", "must contain at least one price"));
        }
        if let Some((i, p)) = points
            .iter()
            .enumerate()
            .find(|(_, p)| !p.is_finite() || **p <= 0.0)
        {
            return Err(PricingError::invalid(
                "path",
                format!("price at index {} must be positive and finite, got {}", i, p),
            ));
        }
        Ok(Self { points })
    }

    /// Returns the prices as a slice.
    #[inline]
    pub fn as_slice(&self) -> &[f64] {
        &self.points
    }

    /// Returns the number of points (`steps + 1`).
    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Always `false`; a path holds at least its initial price.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Returns the number of steps (`len - 1`).
    #[inline]
    pub fn steps(&self) -> usize {
        self.points.len() - 1
    }

    /// Returns the initial price.
    #[inline]
    pub fn initial(&self) -> f64 {
        self.points[0]
    }

    /// Returns the last price.
    #[inline]
    pub fn terminal(&self) -> f64 {
        self.points[self.points.len() - 1]
    }

    /// Returns the price at `index`, if present.
    #[inline]
    pub fn get(&self, index: usize) -> Option<f64> {
        self.points.get(index).copied()
    }

    /// Iterates over the prices in order.
    pub fn iter(&self) -> impl Iterator<Item = f64> + '_ {
        self.points.iter().copied()
    }

    /// Consumes the path and returns the underlying prices.
    pub fn into_inner(self) -> Vec<f64> {
        self.points
    }
}

impl Index<usize> for PricePath {
    type Output = f64;

    fn index(&self, index: usize) -> &f64 {
        &self.points[index]
    }
}

impl TryFrom<Vec<f64>> for PricePath {
    type Error = PricingError;

    fn try_from(points: Vec<f64>) -> Result<Self, Self::Error> {
        Self::new(points)
    }
}

impl From<PricePath> for Vec<f64> {
    fn from(path: PricePath) -> Self {
        path.points
    }
}

/// Per-step constants of the log-normal step.
#[derive(Debug, Clone, Copy)]
pub(crate) struct StepCoefficients {
    /// `(r - q - σ²/2)·dt`
    drift: f64,
    /// `σ·√dt`
    diffusion: f64,
    steps: usize,
}

impl StepCoefficients {
    #[inline]
    pub(crate) fn steps(&self) -> usize {
        self.steps
    }
}

/// GBM path simulator with injected randomness.
///
/// Holds validated market parameters; every draw comes from the
/// [`RandomSource`] handed to each call.
///
/// # Examples
///
/// ```rust
/// use hedge_core::types::MarketParameters;
/// use hedge_pricing::mc::GbmPathSimulator;
/// use hedge_pricing::rng::PricerRng;
///
/// let params = MarketParameters::new(100.0, 100.0, 1.0, 0.2, 0.05, 0.0).unwrap();
/// let simulator = GbmPathSimulator::new(params).unwrap();
///
/// let mut rng = PricerRng::from_seed(42);
/// let path = simulator.generate_path(252, &mut rng).unwrap();
/// assert_eq!(path.len(), 253);
/// assert_eq!(path.initial(), 100.0);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct GbmPathSimulator {
    params: MarketParameters,
}

impl GbmPathSimulator {
    /// Creates a simulator for the given market.
    ///
    /// # Errors
    ///
    /// `InvalidParameter` if the parameters fail validation.
    pub fn new(params: MarketParameters) -> Result<Self, PricingError> {
        params.validate()?;
        Ok(Self { params })
    }

    /// Returns the market parameters.
    #[inline]
    pub fn params(&self) -> &MarketParameters {
        &self.params
    }

    pub(crate) fn coefficients(&self, steps: usize) -> Result<StepCoefficients, PricingError> {
        if steps == 0 {
            return Err(PricingError::invalid("steps", "must be at least 1"));
        }
        let p = &self.params;
        let dt = p.expiry / steps as f64;
        Ok(StepCoefficients {
            drift: (p.carry() - 0.5 * p.volatility * p.volatility) * dt,
            diffusion: p.volatility * dt.sqrt(),
            steps,
        })
    }

    /// Generates one path of `steps` steps over `[0, T]`.
    ///
    /// With `T = 0` every increment is zero and the path stays at spot.
    ///
    /// # Errors
    ///
    /// - `InvalidParameter` if `steps == 0`
    /// - `NumericalDegeneracy` if a simulated price overflows or underflows
    pub fn generate_path<R>(&self, steps: usize, rng: &mut R) -> Result<PricePath, PricingError>
    where
        R: RandomSource + ?Sized,
    {
        let coeffs = self.coefficients(steps)?;
        self.path_with(&coeffs, rng)
    }

    pub(crate) fn path_with<R>(
        &self,
        coeffs: &StepCoefficients,
        rng: &mut R,
    ) -> Result<PricePath, PricingError>
    where
        R: RandomSource + ?Sized,
    {
        let mut points = Vec::with_capacity(coeffs.steps + 1);
        let mut spot = self.params.spot;
        points.push(spot);

        for _ in 0..coeffs.steps {
            spot *= (coeffs.drift + coeffs.diffusion * rng.next_normal()).exp();
            points.push(spot);
        }

        if let Some(bad) = points.iter().find(|p| !p.is_finite() || **p <= 0.0) {
            return Err(PricingError::NumericalDegeneracy(format!(
                "simulated price {} left the representable range",
                bad
            )));
        }
        Ok(PricePath { points })
    }

    /// Simulates only the terminal price of a path.
    ///
    /// Consumes exactly the same draws as [`path_with`](Self::path_with), so
    /// for a given generator state the result equals that path's terminal.
    #[inline]
    pub(crate) fn terminal_with<R>(&self, coeffs: &StepCoefficients, rng: &mut R) -> f64
    where
        R: RandomSource + ?Sized,
    {
        let mut spot = self.params.spot;
        for _ in 0..coeffs.steps {
            spot *= (coeffs.drift + coeffs.diffusion * rng.next_normal()).exp();
        }
        spot
    }

    /// Generates `n_paths` independent paths sequentially from one source.
    ///
    /// # Errors
    ///
    /// `InvalidParameter` if `steps == 0` or `n_paths == 0`, plus the
    /// errors of [`generate_path`](Self::generate_path).
    pub fn generate_batch<R>(
        &self,
        steps: usize,
        n_paths: usize,
        rng: &mut R,
    ) -> Result<Vec<PricePath>, PricingError>
    where
        R: RandomSource + ?Sized,
    {
        if n_paths == 0 {
            return Err(PricingError::invalid("n_paths", "must be at least 1"));
        }
        let coeffs = self.coefficients(steps)?;
        (0..n_paths).map(|_| self.path_with(&coeffs, rng)).collect()
    }

    /// Generates `n_paths` independent paths in parallel.
    ///
    /// Path `i` draws from its own generator seeded with
    /// `SeedStream::new(seed).seed_for(i)`, so the batch is identical for a
    /// given seed whatever the thread count.
    ///
    /// # Errors
    ///
    /// Same as [`generate_batch`](Self::generate_batch).
    pub fn generate_batch_parallel(
        &self,
        steps: usize,
        n_paths: usize,
        seed: u64,
    ) -> Result<Vec<PricePath>, PricingError> {
        if n_paths == 0 {
            return Err(PricingError::invalid("n_paths", "must be at least 1"));
        }
        let coeffs = self.coefficients(steps)?;
        let stream = SeedStream::new(seed);

        (0..n_paths)
            .into_par_iter()
            .map(|i| {
                let mut rng = stream.rng_for(i as u64);
                self.path_with(&coeffs, &mut rng)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::PricerRng;
    use approx::assert_relative_eq;

    /// Returns the same normal draw forever.
    struct ConstantNormal(f64);

    impl RandomSource for ConstantNormal {
        fn next_uniform(&mut self) -> f64 {
            0.5
        }

        fn next_normal(&mut self) -> f64 {
            self.0
        }
    }

    fn params() -> MarketParameters {
        MarketParameters::new(100.0, 100.0, 1.0, 0.2, 0.05, 0.02).unwrap()
    }

    // ==========================================================
    // PricePath
    // ==========================================================

    #[test]
    fn test_price_path_rejects_bad_points() {
        assert!(PricePath::new(vec![]).unwrap_err().is_invalid_parameter());
        assert!(PricePath::new(vec![100.0, -1.0]).is_err());
        assert!(PricePath::new(vec![100.0, f64::NAN]).is_err());
        assert!(PricePath::new(vec![f64::INFINITY]).is_err());
    }

    #[test]
    fn test_price_path_accessors() {
        let path = PricePath::new(vec![10.0, 11.0, 12.0]).unwrap();
        assert_eq!(path.len(), 3);
        assert!(!path.is_empty());
        assert_eq!(path.steps(), 2);
        assert_eq!(path.initial(), 10.0);
        assert_eq!(path.terminal(), 12.0);
        assert_eq!(path.get(3), None);
        assert_eq!(path.iter().sum::<f64>(), 33.0);
        assert_eq!(path.into_inner(), vec![10.0, 11.0, 12.0]);
    }

    #[test]
    fn test_price_path_serde_validates() {
        let path: PricePath = serde_json::from_str("[1.0, 2.0]").unwrap();
        assert_eq!(path.as_slice(), &[1.0, 2.0]);
        assert_eq!(serde_json::to_string(&path).unwrap(), "[1.0,2.0]");
        assert!(serde_json::from_str::<PricePath>("[1.0, -2.0]").is_err());
    }

    // ==========================================================
    // Simulator
    // ==========================================================

    #[test]
    fn test_path_shape() {
        let sim = GbmPathSimulator::new(params()).unwrap();
        let mut rng = PricerRng::from_seed(1);
        let path = sim.generate_path(50, &mut rng).unwrap();
        assert_eq!(path.len(), 51);
        assert_eq!(path.initial(), 100.0);
        assert!(path.iter().all(|p| p > 0.0));
    }

    #[test]
    fn test_zero_steps_rejected() {
        let sim = GbmPathSimulator::new(params()).unwrap();
        let mut rng = PricerRng::from_seed(1);
        assert!(sim
            .generate_path(0, &mut rng)
            .unwrap_err()
            .is_invalid_parameter());
        assert!(sim.generate_batch(10, 0, &mut rng).is_err());
    }

    #[test]
    fn test_invalid_params_rejected() {
        let mut p = params();
        p.spot = -5.0;
        assert!(GbmPathSimulator::new(p).is_err());
    }

    #[test]
    fn test_zero_normals_follow_deterministic_drift() {
        let p = params();
        let sim = GbmPathSimulator::new(p).unwrap();
        let path = sim.generate_path(10, &mut ConstantNormal(0.0)).unwrap();
        let expected = p.spot * ((p.rate - p.dividend_yield - 0.5 * 0.04) * p.expiry).exp();
        assert_relative_eq!(path.terminal(), expected, max_relative = 1e-12);
    }

    #[test]
    fn test_expired_path_is_flat() {
        let sim = GbmPathSimulator::new(params().with_expiry(0.0)).unwrap();
        let mut rng = PricerRng::from_seed(3);
        let path = sim.generate_path(5, &mut rng).unwrap();
        assert!(path.iter().all(|p| p == 100.0));

        let batch = sim.generate_batch_parallel(3, 4, 9).unwrap();
        assert!(batch.iter().all(|b| b.len() == 4 && b.iter().all(|p| p == 100.0)));
    }

    #[test]
    fn test_path_follows_multiplicative_recurrence() {
        let p = params();
        let sim = GbmPathSimulator::new(p).unwrap();
        let coeffs = sim.coefficients(4).unwrap();
        let path = sim.generate_path(4, &mut ConstantNormal(0.3)).unwrap();
        let factor = (coeffs.drift + coeffs.diffusion * 0.3).exp();
        for t in 0..4 {
            assert_eq!(path[t + 1], path[t] * factor);
        }
    }

    #[test]
    fn test_terminal_fast_path_matches_full_path() {
        let sim = GbmPathSimulator::new(params()).unwrap();
        let coeffs = sim.coefficients(30).unwrap();
        let mut a = PricerRng::from_seed(11);
        let mut b = PricerRng::from_seed(11);
        for _ in 0..20 {
            let full = sim.path_with(&coeffs, &mut a).unwrap();
            let terminal = sim.terminal_with(&coeffs, &mut b);
            assert_eq!(full.terminal(), terminal);
        }
    }

    #[test]
    fn test_overflow_is_degenerate() {
        let p = MarketParameters::new(1e300, 1.0, 1.0, 0.2, 0.0, 0.0).unwrap();
        let sim = GbmPathSimulator::new(p).unwrap();
        let result = sim.generate_path(1, &mut ConstantNormal(10_000.0));
        assert!(matches!(result, Err(PricingError::NumericalDegeneracy(_))));
    }

    #[test]
    fn test_batch_paths_are_independent() {
        let sim = GbmPathSimulator::new(params()).unwrap();
        let mut rng = PricerRng::from_seed(5);
        let batch = sim.generate_batch(20, 3, &mut rng).unwrap();
        assert_eq!(batch.len(), 3);
        assert_ne!(batch[0], batch[1]);
        assert_ne!(batch[1], batch[2]);
    }

    #[test]
    fn test_parallel_batch_reproducible() {
        let sim = GbmPathSimulator::new(params()).unwrap();
        let a = sim.generate_batch_parallel(12, 64, 77).unwrap();
        let b = sim.generate_batch_parallel(12, 64, 77).unwrap();
        assert_eq!(a, b);

        // Path i comes from seed stream entry i
        let mut rng = SeedStream::new(77).rng_for(5);
        assert_eq!(a[5], sim.generate_path(12, &mut rng).unwrap());
    }

    #[test]
    fn test_terminal_mean_is_forward() {
        let p = params();
        let sim = GbmPathSimulator::new(p).unwrap();
        let paths = sim.generate_batch_parallel(4, 40_000, 2024).unwrap();

        let n = paths.len() as f64;
        let terminals: Vec<f64> = paths.iter().map(|x| x.terminal()).collect();
        let mean = terminals.iter().sum::<f64>() / n;
        let var = terminals.iter().map(|t| (t - mean).powi(2)).sum::<f64>() / (n - 1.0);
        let se = (var / n).sqrt();

        assert!((mean - p.forward()).abs() < 4.0 * se, "mean {} vs forward {}", mean, p.forward());
    }
}
