//! Hedge book state and trade records.

use serde::Serialize;

/// Running state of the hedge for one simulation.
///
/// Starts flat with no cash. Cash pays for every trade and its cost; no
/// interest accrues on it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct HedgePosition {
    /// Units of the underlying held.
    pub hedge_units: f64,
    /// Cash account.
    pub cash_balance: f64,
    /// Sum of all transaction costs paid so far.
    pub cumulative_transaction_cost: f64,
}

impl HedgePosition {
    /// Moves the hedge to `target` units at `price`, paying `cost_rate` on
    /// the traded notional. Returns `(trade_size, cost)`.
    pub(crate) fn rebalance(&mut self, target: f64, price: f64, cost_rate: f64) -> (f64, f64) {
        let trade = target - self.hedge_units;
        let cost = trade.abs() * price * cost_rate;
        self.cash_balance -= trade * price + cost;
        self.cumulative_transaction_cost += cost;
        self.hedge_units = target;
        (trade, cost)
    }

    /// Value of the underlying and cash at `price`.
    #[inline]
    pub fn mark_to_market(&self, price: f64) -> f64 {
        self.hedge_units * price + self.cash_balance
    }
}

/// A hedge trade that was executed.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct TransactionRecord {
    /// Simulation day of the trade.
    pub day: usize,
    /// Underlying price the trade executed at.
    pub price: f64,
    /// Option delta that set the target.
    pub delta: f64,
    /// Signed units bought (positive) or sold (negative).
    pub trade_size: f64,
    /// Transaction cost paid.
    pub cost: f64,
    /// Direct P&L effect of the trade, `-cost`.
    pub pnl_impact: f64,
}
