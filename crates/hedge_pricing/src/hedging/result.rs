//! Output of a hedging run.

use hedge_core::types::OptionType;
use serde::Serialize;

use super::position::{HedgePosition, TransactionRecord};

/// State of the hedged book at the end of one simulated day.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct DailySnapshot {
    /// Day index, 0 at inception.
    pub day: usize,
    /// Remaining time to expiry in years.
    pub time_to_expiry: f64,
    /// Underlying price.
    pub price: f64,
    /// Closed-form value of one option contract.
    pub option_value: f64,
    /// Option delta.
    pub delta: f64,
    /// Units of the underlying held after rebalancing.
    pub hedge_position: f64,
    /// Cash balance after rebalancing.
    pub cash: f64,
    /// Options, underlying and cash marked to market.
    pub portfolio_value: f64,
    /// `|portfolio| / |option value · position| · 100`, `None` when the
    /// option notional is effectively zero.
    pub hedging_error_pct: Option<f64>,
    /// Portfolio value less its day-0 value.
    pub tracking_error: f64,
}

/// Totals over a whole run.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct HedgeSummary {
    /// Total transaction cost paid.
    pub total_transaction_cost: f64,
    /// Number of executed trades.
    pub n_trades: usize,
    /// Final portfolio value less the initial one.
    pub final_pnl: f64,
    /// Largest absolute tracking error seen on any day.
    pub max_abs_tracking_error: f64,
}

/// Day-by-day record of a delta-hedging simulation.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SimulationResult {
    option_type: OptionType,
    initial_position: f64,
    snapshots: Vec<DailySnapshot>,
    transactions: Vec<TransactionRecord>,
    final_position: HedgePosition,
}

impl SimulationResult {
    pub(crate) fn new(
        option_type: OptionType,
        initial_position: f64,
        snapshots: Vec<DailySnapshot>,
        transactions: Vec<TransactionRecord>,
        final_position: HedgePosition,
    ) -> Self {
        Self {
            option_type,
            initial_position,
            snapshots,
            transactions,
            final_position,
        }
    }

    /// Option side that was hedged.
    pub fn option_type(&self) -> OptionType {
        self.option_type
    }

    /// Signed option contracts held.
    pub fn initial_position(&self) -> f64 {
        self.initial_position
    }

    /// One snapshot per day, `steps + 1` in total.
    pub fn snapshots(&self) -> &[DailySnapshot] {
        &self.snapshots
    }

    /// Executed trades in day order.
    pub fn transactions(&self) -> &[TransactionRecord] {
        &self.transactions
    }

    /// Hedge book after the last day.
    pub fn final_position(&self) -> &HedgePosition {
        &self.final_position
    }

    /// Underlying price per day.
    pub fn prices(&self) -> Vec<f64> {
        self.snapshots.iter().map(|s| s.price).collect()
    }

    /// Option delta per day.
    pub fn deltas(&self) -> Vec<f64> {
        self.snapshots.iter().map(|s| s.delta).collect()
    }

    /// Hedge units held per day.
    pub fn hedge_positions(&self) -> Vec<f64> {
        self.snapshots.iter().map(|s| s.hedge_position).collect()
    }

    /// Portfolio value per day.
    pub fn portfolio_values(&self) -> Vec<f64> {
        self.snapshots.iter().map(|s| s.portfolio_value).collect()
    }

    /// Hedging error percentage per day.
    pub fn hedging_errors(&self) -> Vec<Option<f64>> {
        self.snapshots.iter().map(|s| s.hedging_error_pct).collect()
    }

    /// Tracking error per day.
    pub fn tracking_errors(&self) -> Vec<f64> {
        self.snapshots.iter().map(|s| s.tracking_error).collect()
    }

    /// Totals over the run.
    pub fn summary(&self) -> HedgeSummary {
        let initial = self.snapshots.first().map_or(0.0, |s| s.portfolio_value);
        let last = self.snapshots.last().map_or(0.0, |s| s.portfolio_value);
        HedgeSummary {
            total_transaction_cost: self.transactions.iter().map(|t| t.cost).sum(),
            n_trades: self.transactions.len(),
            final_pnl: last - initial,
            max_abs_tracking_error: self
                .snapshots
                .iter()
                .map(|s| s.tracking_error.abs())
                .fold(0.0, f64::max),
        }
    }
}
