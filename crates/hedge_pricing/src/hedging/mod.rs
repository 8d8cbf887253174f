//! Delta-hedging simulation.
//!
//! A [`DeltaHedgeEngine`] walks a price path day by day, reprices the
//! option in closed form and keeps an offsetting position in the
//! underlying. The run produces a [`SimulationResult`] with one
//! [`DailySnapshot`] per day and a [`TransactionRecord`] per executed trade.
//!
//! ```rust
//! use hedge_pricing::hedging::{DeltaHedgeEngine, HedgeFrequency, HedgeSimulationConfig};
//!
//! let config = HedgeSimulationConfig::builder()
//!     .hedge_frequency(HedgeFrequency::Weekly)
//!     .build()
//!     .unwrap();
//! let result = DeltaHedgeEngine::new(config).unwrap().run_with_seed(42).unwrap();
//!
//! let summary = result.summary();
//! assert!(summary.n_trades <= 14);
//! ```

mod config;
mod engine;
mod frequency;
mod position;
mod result;

pub use config::{
    HedgeSimulationConfig, HedgeSimulationConfigBuilder, DEFAULT_INITIAL_POSITION,
    DEFAULT_MIN_TRADE_SIZE, DEFAULT_SIMULATION_STEPS, DEFAULT_TRANSACTION_COST_RATE,
};
pub use engine::DeltaHedgeEngine;
pub use frequency::HedgeFrequency;
pub use position::{HedgePosition, TransactionRecord};
pub use result::{DailySnapshot, HedgeSummary, SimulationResult};
