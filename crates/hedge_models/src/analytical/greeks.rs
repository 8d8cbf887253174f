//! Price and sensitivities of a single European option.

use num_traits::Float;
use serde::{Deserialize, Serialize};

/// Closed-form price and Greeks in trading-desk units.
///
/// | Field | Unit |
/// |-------|------|
/// | `price` | currency per unit of underlying |
/// | `delta` | ∂V/∂S |
/// | `gamma` | ∂²V/∂S² |
/// | `theta` | value change per calendar day (÷365) |
/// | `vega` | value change per 1% vol move (×0.01) |
/// | `rho` | value change per 1% rate move (÷100) |
///
/// Produced fresh by every evaluation; treat as a value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Greeks<T: Float = f64> {
    /// Option premium.
    pub price: T,
    /// First derivative with respect to spot.
    pub delta: T,
    /// Second derivative with respect to spot.
    pub gamma: T,
    /// Time decay per calendar day.
    pub theta: T,
    /// Sensitivity to a one percentage point volatility move.
    pub vega: T,
    /// Sensitivity to a one percentage point rate move.
    pub rho: T,
}

impl<T: Float> Greeks<T> {
    /// Greeks of an expired option: the payoff and nothing else.
    pub fn expired(intrinsic: T) -> Self {
        let zero = T::zero();
        Self {
            price: intrinsic,
            delta: zero,
            gamma: zero,
            theta: zero,
            vega: zero,
            rho: zero,
        }
    }

    /// Returns `true` when every field is finite.
    pub fn is_finite(&self) -> bool {
        [
            self.price, self.delta, self.gamma, self.theta, self.vega, self.rho,
        ]
        .iter()
        .all(|v| v.is_finite())
    }

    /// Scales every field by a position size (signed number of contracts).
    pub fn scaled(&self, quantity: T) -> Self {
        Self {
            price: self.price * quantity,
            delta: self.delta * quantity,
            gamma: self.gamma * quantity,
            theta: self.theta * quantity,
            vega: self.vega * quantity,
            rho: self.rho * quantity,
        }
    }
}
