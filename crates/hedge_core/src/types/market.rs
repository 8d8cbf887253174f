//! Market inputs for a single European option.
//!
//! [`MarketParameters`] is the flat record every engine consumes. The
//! convenience yield `q` enters the drift as `r - q`, so a positive `q`
//! lowers the forward and a negative `q` (storage cost) raises it.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::error::PricingError;

/// Option side.
///
/// # Examples
/// ```
/// use hedge_core::types::OptionType;
///
/// assert_eq!("Call".parse::<OptionType>().unwrap(), OptionType::Call);
/// assert!("straddle".parse::<OptionType>().is_err());
/// assert_eq!(OptionType::Put.intrinsic(90.0, 100.0), 10.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OptionType {
    /// Right to buy at the strike.
    Call,
    /// Right to sell at the strike.
    Put,
}

impl OptionType {
    /// Returns `true` for [`OptionType::Call`].
    #[inline]
    pub fn is_call(&self) -> bool {
        matches!(self, OptionType::Call)
    }

    /// Payoff at expiry for a terminal price `spot`.
    #[inline]
    pub fn intrinsic(&self, spot: f64, strike: f64) -> f64 {
        match self {
            OptionType::Call => (spot - strike).max(0.0),
            OptionType::Put => (strike - spot).max(0.0),
        }
    }
}

impl FromStr for OptionType {
    type Err = PricingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "call" | "c" => Ok(OptionType::Call),
            "put" | "p" => Ok(OptionType::Put),
            other => Err(PricingError::invalid(
                "option_type",
                format!("unknown option type '{}', expected call or put", other),
            )),
        }
    }
}

impl fmt::Display for OptionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OptionType::Call => write!(f, "call"),
            OptionType::Put => write!(f, "put"),
        }
    }
}

/// Market and contract parameters for Black-Scholes-Merton style models.
///
/// # Invariants
/// - `spot`, `strike`, `volatility` strictly positive and finite
/// - `expiry >= 0` (years); `expiry == 0` is the expired-option edge case
/// - `rate` and `dividend_yield` finite, any sign
///
/// Construct through [`MarketParameters::new`] to have the invariants
/// checked, or deserialise and call [`MarketParameters::validate`].
///
/// # Examples
/// ```
/// use hedge_core::types::MarketParameters;
///
/// let params = MarketParameters::new(100.0, 100.0, 1.0, 0.2, 0.05, 0.0).unwrap();
/// assert!(params.validate().is_ok());
///
/// assert!(MarketParameters::new(100.0, 100.0, -1.0, 0.2, 0.05, 0.0).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MarketParameters {
    /// Spot price of the underlying (S).
    pub spot: f64,
    /// Strike price (K).
    pub strike: f64,
    /// Time to expiry in years (T).
    pub expiry: f64,
    /// Annualised volatility (σ).
    pub volatility: f64,
    /// Continuously compounded risk-free rate (r).
    pub rate: f64,
    /// Continuous convenience/dividend yield (q).
    #[serde(default)]
    pub dividend_yield: f64,
}

impl MarketParameters {
    /// Creates validated market parameters.
    ///
    /// # Errors
    /// `PricingError::InvalidParameter` if any invariant is violated.
    pub fn new(
        spot: f64,
        strike: f64,
        expiry: f64,
        volatility: f64,
        rate: f64,
        dividend_yield: f64,
    ) -> Result<Self, PricingError> {
        let params = Self {
            spot,
            strike,
            expiry,
            volatility,
            rate,
            dividend_yield,
        };
        params.validate()?;
        Ok(params)
    }

    /// Checks the invariants listed on the type.
    pub fn validate(&self) -> Result<(), PricingError> {
        if !(self.spot.is_finite() && self.spot > 0.0) {
            return Err(PricingError::invalid(
                "spot",
                format!("must be positive and finite, got {}", self.spot),
            ));
        }
        if !(self.strike.is_finite() && self.strike > 0.0) {
            return Err(PricingError::invalid(
                "strike",
                format!("must be positive and finite, got {}", self.strike),
            ));
        }
        if !(self.volatility.is_finite() && self.volatility > 0.0) {
            return Err(PricingError::invalid(
                "volatility",
                format!("must be positive and finite, got {}", self.volatility),
            ));
        }
        if !(self.expiry.is_finite() && self.expiry >= 0.0) {
            return Err(PricingError::invalid(
                "expiry",
                format!("must be non-negative and finite, got {}", self.expiry),
            ));
        }
        if !self.rate.is_finite() {
            return Err(PricingError::invalid("rate", "must be finite"));
        }
        if !self.dividend_yield.is_finite() {
            return Err(PricingError::invalid("dividend_yield", "must be finite"));
        }
        Ok(())
    }

    /// Copy with a different spot. Not validated.
    #[inline]
    pub fn with_spot(self, spot: f64) -> Self {
        Self { spot, ..self }
    }

    /// Copy with a different time to expiry. Not validated.
    #[inline]
    pub fn with_expiry(self, expiry: f64) -> Self {
        Self { expiry, ..self }
    }

    /// Copy with a different volatility. Not validated.
    #[inline]
    pub fn with_volatility(self, volatility: f64) -> Self {
        Self { volatility, ..self }
    }

    /// Risk-neutral drift of the underlying, `r - q`.
    #[inline]
    pub fn carry(&self) -> f64 {
        self.rate - self.dividend_yield
    }

    /// Discount factor `e^(-rT)`.
    #[inline]
    pub fn discount_factor(&self) -> f64 {
        (-self.rate * self.expiry).exp()
    }

    /// Yield discount factor `e^(-qT)`.
    #[inline]
    pub fn yield_factor(&self) -> f64 {
        (-self.dividend_yield * self.expiry).exp()
    }

    /// Forward price `S e^((r-q)T)`.
    #[inline]
    pub fn forward(&self) -> f64 {
        self.spot * (self.carry() * self.expiry).exp()
    }
}

impl Default for MarketParameters {
    /// The commodity demo's default display values.
    fn default() -> Self {
        Self {
            spot: 2500.0,
            strike: 2600.0,
            expiry: 0.25,
            volatility: 0.25,
            rate: 0.08,
            dividend_yield: 0.02,
        }
    }
}
