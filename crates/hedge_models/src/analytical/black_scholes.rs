//! Black-Scholes-Merton pricing model for European options.
//!
//! Closed-form prices and Greeks under lognormal dynamics with a
//! continuous convenience (dividend) yield `q`.
//!
//! ## Mathematical Formulas
//!
//! **Call Price**: C = S·e^(-qT)·N(d₁) - K·e^(-rT)·N(d₂)
//! **Put Price**: P = K·e^(-rT)·N(-d₂) - S·e^(-qT)·N(-d₁)
//!
//! Where:
//! - d₁ = (ln(S/K) + (r - q + σ²/2)T) / (σ√T)
//! - d₂ = d₁ - σ√T
//!
//! Setting `q = 0` recovers the plain Black-Scholes formulas through the
//! same code path.

use hedge_core::math::distributions::{norm_cdf, norm_pdf};
use hedge_core::types::{MarketParameters, OptionType, PricingError};
use num_traits::Float;

use super::greeks::Greeks;

/// Black-Scholes-Merton model for European option pricing.
///
/// Holds the market state (spot, volatility, rate, yield); contract terms
/// (strike, expiry, side) are passed per call so one model prices a strip.
///
/// Expiry `T <= 0` is the expired-option edge case: prices collapse to
/// intrinsic value and every sensitivity to zero.
///
/// # Type Parameters
/// * `T` - Floating-point type implementing `Float` (e.g., `f64`, `f32`)
///
/// # Examples
/// ```
/// use hedge_core::types::OptionType;
/// use hedge_models::analytical::BlackScholesMerton;
///
/// let bsm = BlackScholesMerton::new(100.0_f64, 0.2, 0.05, 0.03).unwrap();
/// let call = bsm.price(100.0, 1.0, OptionType::Call);
/// let put = bsm.price(100.0, 1.0, OptionType::Put);
///
/// // Put-call parity: C - P = S·e^(-qT) - K·e^(-rT)
/// let parity = call - put - (100.0 * (-0.03_f64).exp() - 100.0 * (-0.05_f64).exp());
/// assert!(parity.abs() < 1e-10);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct BlackScholesMerton<T: Float> {
    /// Spot price (S)
    spot: T,
    /// Volatility (σ)
    volatility: T,
    /// Risk-free interest rate (r)
    rate: T,
    /// Continuous dividend/convenience yield (q)
    dividend_yield: T,
}

impl<T: Float> BlackScholesMerton<T> {
    /// Creates a new Black-Scholes-Merton model.
    ///
    /// # Arguments
    /// * `spot` - Current spot price (must be positive)
    /// * `volatility` - Volatility (must be positive)
    /// * `rate` - Risk-free interest rate (annualised, any sign)
    /// * `dividend_yield` - Continuous yield (any sign)
    ///
    /// # Errors
    /// `PricingError::InvalidParameter` if spot or volatility is not
    /// strictly positive, or any input is non-finite.
    pub fn new(spot: T, volatility: T, rate: T, dividend_yield: T) -> Result<Self, PricingError> {
        let zero = T::zero();

        if !spot.is_finite() || spot <= zero {
            return Err(PricingError::invalid(
                "spot",
                format!("must be positive and finite, got {}", to_f64(spot)),
            ));
        }
        if !volatility.is_finite() || volatility <= zero {
            return Err(PricingError::invalid(
                "volatility",
                format!("must be positive and finite, got {}", to_f64(volatility)),
            ));
        }
        if !rate.is_finite() {
            return Err(PricingError::invalid("rate", "must be finite"));
        }
        if !dividend_yield.is_finite() {
            return Err(PricingError::invalid("dividend_yield", "must be finite"));
        }

        Ok(Self {
            spot,
            volatility,
            rate,
            dividend_yield,
        })
    }

    /// Returns the spot price.
    #[inline]
    pub fn spot(&self) -> T {
        self.spot
    }

    /// Returns the volatility.
    #[inline]
    pub fn volatility(&self) -> T {
        self.volatility
    }

    /// Returns the risk-free rate.
    #[inline]
    pub fn rate(&self) -> T {
        self.rate
    }

    /// Returns the continuous dividend yield.
    #[inline]
    pub fn dividend_yield(&self) -> T {
        self.dividend_yield
    }

    /// Computes the d1 term.
    ///
    /// d₁ = (ln(S/K) + (r - q + σ²/2)T) / (σ√T)
    ///
    /// Only meaningful for `expiry > 0`.
    #[inline]
    pub fn d1(&self, strike: T, expiry: T) -> T {
        let half = T::from(0.5).unwrap();
        let vol_sqrt_t = self.volatility * expiry.sqrt();
        let log_moneyness = (self.spot / strike).ln();
        let drift = (self.rate - self.dividend_yield + half * self.volatility * self.volatility)
            * expiry;

        (log_moneyness + drift) / vol_sqrt_t
    }

    /// Computes the d2 term.
    ///
    /// d₂ = d₁ - σ√T
    #[inline]
    pub fn d2(&self, strike: T, expiry: T) -> T {
        self.d1(strike, expiry) - self.volatility * expiry.sqrt()
    }

    #[inline]
    fn discount(&self, expiry: T) -> T {
        (-self.rate * expiry).exp()
    }

    #[inline]
    fn yield_discount(&self, expiry: T) -> T {
        (-self.dividend_yield * expiry).exp()
    }

    fn intrinsic(&self, strike: T, option_type: OptionType) -> T {
        let zero = T::zero();
        let payoff = match option_type {
            OptionType::Call => self.spot - strike,
            OptionType::Put => strike - self.spot,
        };
        if payoff > zero {
            payoff
        } else {
            zero
        }
    }

    /// Computes the option premium.
    ///
    /// Returns intrinsic value when `expiry <= 0`.
    ///
    /// # Examples
    /// ```
    /// use hedge_core::types::OptionType;
    /// use hedge_models::analytical::BlackScholesMerton;
    ///
    /// let bsm = BlackScholesMerton::new(110.0_f64, 0.2, 0.05, 0.0).unwrap();
    /// assert_eq!(bsm.price(100.0, 0.0, OptionType::Call), 10.0);
    /// assert!(bsm.price(100.0, 1.0, OptionType::Call) > 10.0);
    /// ```
    #[inline]
    pub fn price(&self, strike: T, expiry: T, option_type: OptionType) -> T {
        if expiry <= T::zero() {
            return self.intrinsic(strike, option_type);
        }

        let d1 = self.d1(strike, expiry);
        let d2 = self.d2(strike, expiry);
        let forward_spot = self.spot * self.yield_discount(expiry);
        let discounted_strike = strike * self.discount(expiry);

        match option_type {
            // C = S·e^(-qT)·N(d₁) - K·e^(-rT)·N(d₂)
            OptionType::Call => forward_spot * norm_cdf(d1) - discounted_strike * norm_cdf(d2),
            // P = K·e^(-rT)·N(-d₂) - S·e^(-qT)·N(-d₁)
            OptionType::Put => discounted_strike * norm_cdf(-d2) - forward_spot * norm_cdf(-d1),
        }
    }

    /// Computes Delta (∂V/∂S).
    ///
    /// - Call Delta = e^(-qT)·N(d₁)
    /// - Put Delta = e^(-qT)·(N(d₁) - 1)
    #[inline]
    pub fn delta(&self, strike: T, expiry: T, option_type: OptionType) -> T {
        if expiry <= T::zero() {
            return T::zero();
        }

        let n_d1 = norm_cdf(self.d1(strike, expiry));
        let eq = self.yield_discount(expiry);
        match option_type {
            OptionType::Call => eq * n_d1,
            OptionType::Put => eq * (n_d1 - T::one()),
        }
    }

    /// Computes Gamma (∂²V/∂S²).
    ///
    /// Gamma = e^(-qT)·φ(d₁) / (S·σ·√T), identical for calls and puts.
    #[inline]
    pub fn gamma(&self, strike: T, expiry: T) -> T {
        if expiry <= T::zero() {
            return T::zero();
        }

        let d1 = self.d1(strike, expiry);
        self.yield_discount(expiry) * norm_pdf(d1)
            / (self.spot * self.volatility * expiry.sqrt())
    }

    /// Computes Vega (∂V/∂σ) per unit of volatility.
    ///
    /// Vega = S·e^(-qT)·φ(d₁)·√T, identical for calls and puts.
    /// [`greeks`](Self::greeks) reports this ×0.01 (per 1% vol).
    #[inline]
    pub fn vega(&self, strike: T, expiry: T) -> T {
        if expiry <= T::zero() {
            return T::zero();
        }

        let d1 = self.d1(strike, expiry);
        self.spot * self.yield_discount(expiry) * norm_pdf(d1) * expiry.sqrt()
    }

    /// Computes Theta (∂V/∂t) per year.
    ///
    /// - Call: -S·e^(-qT)·φ(d₁)·σ/(2√T) - r·K·e^(-rT)·N(d₂) + q·S·e^(-qT)·N(d₁)
    /// - Put: -S·e^(-qT)·φ(d₁)·σ/(2√T) + r·K·e^(-rT)·N(-d₂) - q·S·e^(-qT)·N(-d₁)
    #[inline]
    pub fn theta(&self, strike: T, expiry: T, option_type: OptionType) -> T {
        if expiry <= T::zero() {
            return T::zero();
        }

        let two = T::from(2.0).unwrap();
        let d1 = self.d1(strike, expiry);
        let d2 = self.d2(strike, expiry);
        let forward_spot = self.spot * self.yield_discount(expiry);
        let discounted_strike = strike * self.discount(expiry);

        let decay = -forward_spot * norm_pdf(d1) * self.volatility / (two * expiry.sqrt());

        match option_type {
            OptionType::Call => {
                decay - self.rate * discounted_strike * norm_cdf(d2)
                    + self.dividend_yield * forward_spot * norm_cdf(d1)
            }
            OptionType::Put => {
                decay + self.rate * discounted_strike * norm_cdf(-d2)
                    - self.dividend_yield * forward_spot * norm_cdf(-d1)
            }
        }
    }

    /// Computes Rho (∂V/∂r) per unit of rate.
    ///
    /// - Call Rho = K·T·e^(-rT)·N(d₂)
    /// - Put Rho = -K·T·e^(-rT)·N(-d₂)
    #[inline]
    pub fn rho(&self, strike: T, expiry: T, option_type: OptionType) -> T {
        if expiry <= T::zero() {
            return T::zero();
        }

        let d2 = self.d2(strike, expiry);
        let scale = strike * expiry * self.discount(expiry);
        match option_type {
            OptionType::Call => scale * norm_cdf(d2),
            OptionType::Put => -scale * norm_cdf(-d2),
        }
    }

    /// Computes price and all Greeks in desk units (see [`Greeks`]).
    ///
    /// # Errors
    /// - `InvalidParameter` for a non-positive strike or negative/non-finite expiry
    /// - `NumericalDegeneracy` if `σ√T` underflows to zero or any output is non-finite
    pub fn greeks(
        &self,
        strike: T,
        expiry: T,
        option_type: OptionType,
    ) -> Result<Greeks<T>, PricingError> {
        let zero = T::zero();

        if !strike.is_finite() || strike <= zero {
            return Err(PricingError::invalid(
                "strike",
                format!("must be positive and finite, got {}", to_f64(strike)),
            ));
        }
        if !expiry.is_finite() || expiry < zero {
            return Err(PricingError::invalid(
                "expiry",
                format!("must be non-negative and finite, got {}", to_f64(expiry)),
            ));
        }

        if expiry == zero {
            return Ok(Greeks::expired(self.intrinsic(strike, option_type)));
        }

        if self.volatility * expiry.sqrt() == zero {
            return Err(PricingError::NumericalDegeneracy(format!(
                "σ√T underflows to zero (σ = {}, T = {})",
                to_f64(self.volatility),
                to_f64(expiry)
            )));
        }

        let days_per_year = T::from(365.0).unwrap();
        let per_percent = T::from(0.01).unwrap();

        let greeks = Greeks {
            price: self.price(strike, expiry, option_type),
            delta: self.delta(strike, expiry, option_type),
            gamma: self.gamma(strike, expiry),
            theta: self.theta(strike, expiry, option_type) / days_per_year,
            vega: self.vega(strike, expiry) * per_percent,
            rho: self.rho(strike, expiry, option_type) * per_percent,
        };

        if !greeks.is_finite() {
            return Err(PricingError::NumericalDegeneracy(format!(
                "non-finite Greeks for K = {}, T = {}",
                to_f64(strike),
                to_f64(expiry)
            )));
        }

        Ok(greeks)
    }
}

impl BlackScholesMerton<f64> {
    /// Builds the model from the market half of [`MarketParameters`].
    ///
    /// # Errors
    /// `PricingError::InvalidParameter` if the parameters fail validation.
    pub fn from_params(params: &MarketParameters) -> Result<Self, PricingError> {
        params.validate()?;
        Self::new(
            params.spot,
            params.volatility,
            params.rate,
            params.dividend_yield,
        )
    }
}

/// Prices a European option and returns its Greeks.
///
/// This is the single entry point the Monte Carlo valuer and the hedging
/// engine use for the closed-form value.
///
/// # Errors
/// - `InvalidParameter` when S ≤ 0, K ≤ 0, σ ≤ 0, T < 0 or any input is non-finite
/// - `NumericalDegeneracy` when σ√T underflows or a result is non-finite
///
/// # Examples
/// ```
/// use hedge_core::types::{MarketParameters, OptionType};
/// use hedge_models::analytical::price;
///
/// let params = MarketParameters::new(2500.0, 2600.0, 0.25, 0.25, 0.08, 0.02).unwrap();
/// let greeks = price(&params, OptionType::Call).unwrap();
/// assert!((greeks.delta - 0.4455).abs() < 1e-3);
/// ```
pub fn price(params: &MarketParameters, option_type: OptionType) -> Result<Greeks, PricingError> {
    BlackScholesMerton::from_params(params)?.greeks(params.strike, params.expiry, option_type)
}

fn to_f64<T: Float>(value: T) -> f64 {
    value.to_f64().unwrap_or(f64::NAN)
}
