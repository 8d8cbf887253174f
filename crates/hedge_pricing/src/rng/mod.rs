//! # Random Number Generation Infrastructure
//!
//! Randomness for the simulators is always passed in explicitly; nothing
//! in this crate reaches for an ambient generator.
//!
//! ## Module Structure
//!
//! - [`RandomSource`]: the trait every simulator draws from
//! - [`PricerRng`]: seeded `StdRng` wrapper implementing it
//! - [`SeedStream`]: SplitMix64 derivation of per-worker seeds
//!
//! ## Usage Example
//!
//! ```rust
//! use hedge_pricing::rng::{PricerRng, RandomSource, SeedStream};
//!
//! // Create a seeded RNG for reproducible simulations
//! let mut rng = PricerRng::from_seed(12345);
//! let z = rng.next_normal();
//! assert!(z.is_finite());
//!
//! // One generator per parallel worker, all derived from one master seed
//! let stream = SeedStream::new(12345);
//! let workers: Vec<PricerRng> = (0..4).map(|i| stream.rng_for(i)).collect();
//! assert_eq!(workers.len(), 4);
//! ```

mod prng;
mod source;
mod stream;

// Public re-exports
pub use prng::PricerRng;
pub use source::RandomSource;
pub use stream::SeedStream;

#[cfg(test)]
mod tests;
