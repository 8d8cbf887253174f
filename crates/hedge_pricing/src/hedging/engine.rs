//! Discrete-time delta hedging.
//!
//! Each day the option is repriced in closed form at the day's spot and
//! remaining maturity `τ = T·(1 − d/steps)`. On rebalance days the
//! underlying holding moves to `−delta · position` when the adjustment
//! exceeds the minimum trade size, so the book is delta neutral after the
//! trade. Cash finances every trade and its cost.
//!
//! # Sign convention
//!
//! The hedge opposes the option book: the target holding is
//! `−delta · initial_position`, not `delta · initial_position`. A short call
//! (`initial_position = −1`) therefore holds `+delta` units of the
//! underlying, and a long put holds `+|delta|`. Taking `delta · position`
//! literally would add to the option's exposure instead of cancelling it.

use hedge_core::types::PricingError;
use hedge_models::analytical::price;
use tracing::{debug, trace};

use super::config::HedgeSimulationConfig;
use super::position::{HedgePosition, TransactionRecord};
use super::result::{DailySnapshot, SimulationResult};
use crate::mc::{GbmPathSimulator, PricePath};
use crate::rng::{PricerRng, RandomSource};

/// Option notional below which the hedging error percentage is undefined.
const NOTIONAL_EPSILON: f64 = 1e-8;

/// Runs delta-hedging simulations for one configuration.
///
/// # Examples
///
/// ```rust
/// use hedge_pricing::hedging::{DeltaHedgeEngine, HedgeSimulationConfig};
///
/// let config = HedgeSimulationConfig::builder()
///     .simulation_steps(30)
///     .build()
///     .unwrap();
/// let engine = DeltaHedgeEngine::new(config).unwrap();
///
/// let result = engine.run_with_seed(7).unwrap();
/// assert_eq!(result.snapshots().len(), 31);
/// println!("final P&L {:.2}", result.summary().final_pnl);
/// ```
#[derive(Debug, Clone)]
pub struct DeltaHedgeEngine {
    config: HedgeSimulationConfig,
}

impl DeltaHedgeEngine {
    /// Creates an engine after validating `config`.
    ///
    /// # Errors
    ///
    /// `InvalidParameter` if the configuration is invalid.
    pub fn new(config: HedgeSimulationConfig) -> Result<Self, PricingError> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Returns the configuration.
    pub fn config(&self) -> &HedgeSimulationConfig {
        &self.config
    }

    /// Simulates a GBM path from `rng` and hedges along it.
    pub fn run<R>(&self, rng: &mut R) -> Result<SimulationResult, PricingError>
    where
        R: RandomSource + ?Sized,
    {
        let simulator = GbmPathSimulator::new(*self.config.params())?;
        let path = simulator.generate_path(self.config.simulation_steps(), rng)?;
        self.run_on_path(&path)
    }

    /// Same as [`run`](Self::run) with a fresh [`PricerRng`] seeded by `seed`.
    pub fn run_with_seed(&self, seed: u64) -> Result<SimulationResult, PricingError> {
        let mut rng = PricerRng::from_seed(seed);
        self.run(&mut rng)
    }

    /// Hedges along a supplied path.
    ///
    /// # Errors
    ///
    /// - `InvalidParameter` if the path does not have `simulation_steps + 1` points
    /// - `NumericalDegeneracy` if repricing fails on some day
    pub fn run_on_path(&self, path: &PricePath) -> Result<SimulationResult, PricingError> {
        let cfg = &self.config;
        let steps = cfg.simulation_steps();
        if path.len() != steps + 1 {
            return Err(PricingError::invalid(
                "path",
                format!("expected {} prices, got {}", steps + 1, path.len()),
            ));
        }

        let params = cfg.params();
        let position = cfg.initial_position();
        let frequency = cfg.hedge_frequency();
        debug!(
            steps,
            %frequency,
            option_type = %cfg.option_type(),
            position,
            "Hedging simulation started"
        );

        let mut book = HedgePosition::default();
        let mut snapshots = Vec::with_capacity(steps + 1);
        let mut transactions = Vec::new();
        let mut initial_portfolio = None;

        for (day, spot) in path.iter().enumerate() {
            let tau = params.expiry * (steps - day) as f64 / steps as f64;
            let greeks = price(&params.with_spot(spot).with_expiry(tau), cfg.option_type())?;

            let target = -greeks.delta * position;
            if frequency.is_rebalance_day(day)
                && (target - book.hedge_units).abs() > cfg.min_trade_size()
            {
                let (trade_size, cost) =
                    book.rebalance(target, spot, cfg.transaction_cost_rate());
                trace!(day, spot, trade_size, cost, "Hedge trade executed");
                transactions.push(TransactionRecord {
                    day,
                    price: spot,
                    delta: greeks.delta,
                    trade_size,
                    cost,
                    pnl_impact: -cost,
                });
            }

            let option_notional = greeks.price * position;
            let portfolio_value = option_notional + book.mark_to_market(spot);
            let initial = *initial_portfolio.get_or_insert(portfolio_value);
            let hedging_error_pct = if option_notional.abs() > NOTIONAL_EPSILON {
                Some(portfolio_value.abs() / option_notional.abs() * 100.0)
            } else {
                None
            };

            snapshots.push(DailySnapshot {
                day,
                time_to_expiry: tau,
                price: spot,
                option_value: greeks.price,
                delta: greeks.delta,
                hedge_position: book.hedge_units,
                cash: book.cash_balance,
                portfolio_value,
                hedging_error_pct,
                tracking_error: portfolio_value - initial,
            });
        }

        let result = SimulationResult::new(
            cfg.option_type(),
            position,
            snapshots,
            transactions,
            book,
        );
        let summary = result.summary();
        debug!(
            n_trades = summary.n_trades,
            total_cost = summary.total_transaction_cost,
            final_pnl = summary.final_pnl,
            "Hedging simulation finished"
        );
        Ok(result)
    }
}
