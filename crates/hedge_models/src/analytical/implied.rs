//! Implied volatility by root finding on the closed-form price.

use hedge_core::math::solvers::{BrentSolver, SolverConfig};
use hedge_core::types::{MarketParameters, OptionType, PricingError};

use super::black_scholes::BlackScholesMerton;

/// Lower end of the volatility search bracket.
pub const MIN_IMPLIED_VOL: f64 = 1e-6;

/// Upper end of the volatility search bracket (500%).
pub const MAX_IMPLIED_VOL: f64 = 5.0;

/// Backs out the volatility that reproduces `premium`.
///
/// The `volatility` field of `params` is ignored; every other field is
/// used as-is. The search runs Brent's method on
/// `σ ∈ [MIN_IMPLIED_VOL, MAX_IMPLIED_VOL]`.
///
/// # Errors
/// - `InvalidParameter` if `params` fail validation, `T = 0`, or the premium
///   is non-finite or outside the no-arbitrage bounds
///   (call: `(S·e^(-qT) - K·e^(-rT))⁺ < C < S·e^(-qT)`,
///   put: `(K·e^(-rT) - S·e^(-qT))⁺ < P < K·e^(-rT)`)
/// - `Solver` if the premium is arbitrage-free but outside the prices
///   reachable inside the bracket
///
/// # Examples
/// ```
/// use hedge_core::types::{MarketParameters, OptionType};
/// use hedge_models::analytical::{implied_volatility, price};
///
/// let params = MarketParameters::new(100.0, 105.0, 0.5, 0.3, 0.03, 0.01).unwrap();
/// let premium = price(&params, OptionType::Call).unwrap().price;
///
/// let vol = implied_volatility(&params, OptionType::Call, premium).unwrap();
/// assert!((vol - 0.3).abs() < 1e-8);
/// ```
pub fn implied_volatility(
    params: &MarketParameters,
    option_type: OptionType,
    premium: f64,
) -> Result<f64, PricingError> {
    params.validate()?;

    if params.expiry == 0.0 {
        return Err(PricingError::invalid(
            "expiry",
            "implied volatility is undefined for an expired option",
        ));
    }
    if !premium.is_finite() {
        return Err(PricingError::invalid("premium", "must be finite"));
    }

    let forward_spot = params.spot * params.yield_factor();
    let discounted_strike = params.strike * params.discount_factor();
    let (lower, upper) = match option_type {
        OptionType::Call => ((forward_spot - discounted_strike).max(0.0), forward_spot),
        OptionType::Put => ((discounted_strike - forward_spot).max(0.0), discounted_strike),
    };
    if premium <= lower || premium >= upper {
        return Err(PricingError::invalid(
            "premium",
            format!(
                "{} lies outside the no-arbitrage bounds ({}, {})",
                premium, lower, upper
            ),
        ));
    }

    let objective = |vol: f64| -> f64 {
        match BlackScholesMerton::new(params.spot, vol, params.rate, params.dividend_yield) {
            Ok(model) => model.price(params.strike, params.expiry, option_type) - premium,
            Err(_) => f64::NAN,
        }
    };

    let solver = BrentSolver::new(SolverConfig::default().with_tolerance(1e-12));
    let vol = solver.find_root(objective, MIN_IMPLIED_VOL, MAX_IMPLIED_VOL)?;
    Ok(vol)
}
