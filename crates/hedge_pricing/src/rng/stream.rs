//! Deterministic per-worker seed derivation.

use super::PricerRng;

const GOLDEN_GAMMA: u64 = 0x9E37_79B9_7F4A_7C15;

/// SplitMix64 finaliser.
#[inline]
fn mix64(mut z: u64) -> u64 {
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

/// Derives independent seeds from a master seed with SplitMix64.
///
/// `seed_for(i)` is a pure function of `(master, i)`, so a parallel batch
/// can hand chunk `i` its own generator without any shared state, and the
/// result does not depend on how rayon schedules the chunks.
///
/// # Examples
///
/// ```rust
/// use hedge_pricing::rng::SeedStream;
///
/// let stream = SeedStream::new(42);
/// assert_eq!(stream.seed_for(3), SeedStream::new(42).seed_for(3));
/// assert_ne!(stream.seed_for(0), stream.seed_for(1));
///
/// let first: Vec<u64> = stream.iter().take(2).collect();
/// assert_eq!(first, vec![stream.seed_for(0), stream.seed_for(1)]);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SeedStream {
    master: u64,
}

impl SeedStream {
    /// Creates a stream rooted at `master`.
    #[inline]
    pub fn new(master: u64) -> Self {
        Self { master }
    }

    /// Returns the master seed.
    #[inline]
    pub fn master(&self) -> u64 {
        self.master
    }

    /// Returns the `index`-th derived seed.
    #[inline]
    pub fn seed_for(&self, index: u64) -> u64 {
        mix64(
            self.master
                .wrapping_add(GOLDEN_GAMMA.wrapping_mul(index.wrapping_add(1))),
        )
    }

    /// Returns a generator seeded with the `index`-th derived seed.
    #[inline]
    pub fn rng_for(&self, index: u64) -> PricerRng {
        PricerRng::from_seed(self.seed_for(index))
    }

    /// Returns the sub-stream rooted at the `index`-th derived seed.
    #[inline]
    pub fn substream(&self, index: u64) -> SeedStream {
        SeedStream::new(self.seed_for(index))
    }

    /// Iterates over the derived seeds in index order.
    pub fn iter(&self) -> impl Iterator<Item = u64> + '_ {
        (0u64..).map(move |i| self.seed_for(i))
    }
}
