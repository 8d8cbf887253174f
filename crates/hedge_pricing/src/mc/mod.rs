//! Monte Carlo simulation of GBM price paths and European option values.
//!
//! # Architecture
//!
//! ```text
//! MonteCarloValuer
//! ├── MonteCarloConfig   (validated builder: paths, steps/year, seed, chunks, timeout)
//! ├── GbmPathSimulator   (exact GBM step, injected RandomSource)
//! ├── SeedStream         (one PricerRng per chunk)
//! └── CancellationToken  (cooperative stop, checked between paths)
//! ```
//!
//! # Example
//!
//! ```rust
//! use hedge_core::types::{MarketParameters, OptionType};
//! use hedge_pricing::mc::{MonteCarloConfig, MonteCarloValuer};
//!
//! let config = MonteCarloConfig::builder()
//!     .n_paths(10_000)
//!     .seed(42)
//!     .build()
//!     .unwrap();
//!
//! let params = MarketParameters::default();
//! let result = MonteCarloValuer::new(config)
//!     .value(&params, OptionType::Call)
//!     .unwrap();
//! println!("Price: {:.4} +/- {:.4}", result.price, result.confidence_95());
//! ```

mod cancel;
mod config;
mod paths;
mod valuer;

pub use cancel::CancellationToken;
pub use config::{
    MonteCarloConfig, MonteCarloConfigBuilder, DEFAULT_CHUNK_SIZE, DEFAULT_SEED,
    DEFAULT_STEPS_PER_YEAR, MAX_PATHS, MAX_STEPS_PER_PATH, MAX_STEPS_PER_YEAR,
};
pub use paths::{GbmPathSimulator, PricePath};
pub use valuer::{MonteCarloValuer, ToleranceResult, ValuationResult};
