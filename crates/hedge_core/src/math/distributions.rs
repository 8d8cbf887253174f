//! Standard normal distribution functions.
//!
//! This module provides:
//! - `norm_cdf`: Cumulative distribution function (CDF)
//! - `norm_pdf`: Probability density function (PDF)
//!
//! Both are generic over `T: Float` and free of side effects. Inputs must be
//! finite; callers guard `T > 0` and `σ > 0` before forming `d1`/`d2`.

use num_traits::Float;

/// Square root of 2.
const SQRT_2: f64 = std::f64::consts::SQRT_2;

/// 1 / sqrt(2 * pi)
const FRAC_1_SQRT_2PI: f64 = 0.398_942_280_401_432_7;

// Abramowitz and Stegun 7.1.26 coefficients.
const AS_P: f64 = 0.327_591_1;
const AS_A1: f64 = 0.254_829_592;
const AS_A2: f64 = -0.284_496_736;
const AS_A3: f64 = 1.421_413_741;
const AS_A4: f64 = -1.453_152_027;
const AS_A5: f64 = 1.061_405_429;

/// Complementary error function for a non-negative argument.
///
/// Abramowitz and Stegun 7.1.26, maximum absolute error 1.5e-7 on erf.
#[inline]
fn erfc_non_negative<T: Float>(x: T) -> T {
    let one = T::one();

    let p = T::from(AS_P).unwrap();
    let a1 = T::from(AS_A1).unwrap();
    let a2 = T::from(AS_A2).unwrap();
    let a3 = T::from(AS_A3).unwrap();
    let a4 = T::from(AS_A4).unwrap();
    let a5 = T::from(AS_A5).unwrap();

    let t = one / (one + p * x);
    let poly = a1 + t * (a2 + t * (a3 + t * (a4 + t * a5)));
    t * poly * (-x * x).exp()
}

/// Standard normal cumulative distribution function.
///
/// Computes P(X <= x) where X ~ N(0, 1).
///
/// # Mathematical Definition
/// Φ(x) = 1/2 + sign(x) * erf(|x| / sqrt(2)) / 2
///
/// The odd part is evaluated once on |x| and mirrored, so Φ(0) = 1/2 and
/// Φ(-x) = 1 - Φ(x) hold exactly under the approximation.
///
/// # Accuracy
/// Absolute error below 1e-7 over the working range |x| <= 8. The result
/// is monotonic in `x`.
///
/// # Examples
/// ```
/// use hedge_core::math::distributions::norm_cdf;
///
/// assert_eq!(norm_cdf(0.0_f64), 0.5);
/// assert!(norm_cdf(-3.0_f64) < 0.01);
/// assert!(norm_cdf(3.0_f64) > 0.99);
/// ```
#[inline]
pub fn norm_cdf<T: Float>(x: T) -> T {
    let half = T::from(0.5).unwrap();
    let zero = T::zero();
    if x == zero {
        return half;
    }

    let sqrt_2 = T::from(SQRT_2).unwrap();
    let erf_abs = T::one() - erfc_non_negative(x.abs() / sqrt_2);
    if x > zero {
        half + half * erf_abs
    } else {
        half - half * erf_abs
    }
}

/// Standard normal probability density function.
///
/// φ(x) = (1 / sqrt(2π)) * exp(-x² / 2), evaluated exactly.
///
/// # Examples
/// ```
/// use hedge_core::math::distributions::norm_pdf;
///
/// assert!((norm_pdf(0.0_f64) - 0.3989422804).abs() < 1e-9);
/// assert!((norm_pdf(1.0_f64) - 0.2419707245).abs() < 1e-9);
/// ```
#[inline]
pub fn norm_pdf<T: Float>(x: T) -> T {
    let frac_1_sqrt_2pi = T::from(FRAC_1_SQRT_2PI).unwrap();
    let half = T::from(0.5).unwrap();
    frac_1_sqrt_2pi * (-half * x * x).exp()
}
