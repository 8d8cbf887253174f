//! The randomness seam between simulators and generators.

use std::f64::consts::TAU;

/// A stream of uniform variates, with normal variates derived from it.
///
/// Every simulator in this crate takes its randomness through this trait,
/// so tests can script the draws and production code can plug in a seeded
/// generator such as [`PricerRng`](super::PricerRng).
///
/// Implementors only supply [`next_uniform`](Self::next_uniform). The
/// provided [`next_normal`](Self::next_normal) applies the Box-Muller
/// transform to two uniforms.
///
/// # Examples
///
/// ```rust
/// use hedge_pricing::rng::RandomSource;
///
/// /// Cycles through a fixed list of uniforms.
/// struct Scripted {
///     values: Vec<f64>,
///     pos: usize,
/// }
///
/// impl RandomSource for Scripted {
///     fn next_uniform(&mut self) -> f64 {
///         let v = self.values[self.pos % self.values.len()];
///         self.pos += 1;
///         v
///     }
/// }
///
/// // A zero uniform is skipped rather than fed into ln(0)
/// let mut source = Scripted { values: vec![0.0, 0.5, 0.25], pos: 0 };
/// let z = source.next_normal();
/// assert!(z.is_finite());
/// ```
pub trait RandomSource {
    /// Draws a uniform variate in `[0, 1)`.
    fn next_uniform(&mut self) -> f64;

    /// Draws a standard normal variate.
    ///
    /// Box-Muller on two uniforms: `√(-2 ln u₁)·cos(2π u₂)`. A first uniform
    /// that is not strictly positive is discarded and redrawn.
    fn next_normal(&mut self) -> f64 {
        let u1 = loop {
            let u = self.next_uniform();
            if u > 0.0 {
                break u;
            }
        };
        let u2 = self.next_uniform();
        (-2.0 * u1.ln()).sqrt() * (TAU * u2).cos()
    }

    /// Fills `buffer` with standard normal variates.
    fn fill_normal(&mut self, buffer: &mut [f64]) {
        for value in buffer.iter_mut() {
            *value = self.next_normal();
        }
    }
}

/// Both outputs of a Box-Muller transform, `(cos branch, sin branch)`.
///
/// `u1` must lie in `(0, 1]`.
#[inline]
pub(crate) fn box_muller_pair(u1: f64, u2: f64) -> (f64, f64) {
    let radius = (-2.0 * u1.ln()).sqrt();
    let angle = TAU * u2;
    (radius * angle.cos(), radius * angle.sin())
}
