//! Monte Carlo valuation against the closed form.
//!
//! # Test Categories
//!
//! 1. **Convergence**: 100 000 paths land within 3 standard errors
//! 2. **Determinism**: identical results across rayon pool sizes
//! 3. **Cancellation**: token and timeout stop a large run
//! 4. **Degenerate expiry** and the tolerance driver

use std::thread;
use std::time::Duration;

use hedge_core::types::{MarketParameters, OptionType, PricingError};
use hedge_models::analytical::price;
use hedge_pricing::mc::{MonteCarloConfig, MonteCarloValuer, MAX_PATHS};
use hedge_pricing::rng::{PricerRng, RandomSource};

fn config(n_paths: usize, seed: u64) -> MonteCarloConfig {
    MonteCarloConfig::builder()
        .n_paths(n_paths)
        .seed(seed)
        .build()
        .unwrap()
}

// ============================================================================
// Convergence
// ============================================================================

#[test]
fn test_demo_call_within_three_standard_errors() {
    let params = MarketParameters::default();
    let mc = MonteCarloValuer::new(config(100_000, 42))
        .value(&params, OptionType::Call)
        .unwrap();
    let exact = price(&params, OptionType::Call).unwrap().price;

    assert_eq!(mc.n_paths, 100_000);
    assert_eq!(mc.steps_per_path, 63);
    assert!(
        (mc.price - exact).abs() < 3.0 * mc.std_error,
        "mc {} exact {} se {}",
        mc.price,
        exact,
        mc.std_error
    );
}

#[test]
fn test_put_with_yield_within_three_standard_errors() {
    let params = MarketParameters::new(100.0, 110.0, 1.0, 0.3, 0.03, 0.04).unwrap();
    let valuer = MonteCarloValuer::new(
        MonteCarloConfig::builder()
            .n_paths(100_000)
            .steps_per_year(12)
            .seed(2024)
            .build()
            .unwrap(),
    );
    let mc = valuer.value(&params, OptionType::Put).unwrap();
    let exact = price(&params, OptionType::Put).unwrap().price;
    assert!((mc.price - exact).abs() < 3.0 * mc.std_error);
}

#[test]
fn test_sequential_source_through_trait_object() {
    let params = MarketParameters::new(100.0, 100.0, 0.5, 0.2, 0.05, 0.0).unwrap();
    let valuer = MonteCarloValuer::new(config(50_000, 0));
    let mut rng = PricerRng::from_seed(17);
    let source: &mut dyn RandomSource = &mut rng;

    let mc = valuer.value_with_rng(&params, OptionType::Call, source).unwrap();
    let exact = price(&params, OptionType::Call).unwrap().price;
    assert!((mc.price - exact).abs() < 4.0 * mc.std_error);
}

#[test]
fn test_standard_error_shrinks_with_paths() {
    let params = MarketParameters::default();
    let small = MonteCarloValuer::new(config(2_500, 1))
        .value(&params, OptionType::Call)
        .unwrap();
    let large = MonteCarloValuer::new(config(40_000, 1))
        .value(&params, OptionType::Call)
        .unwrap();
    // 16x the paths, about a quarter of the error
    let ratio = large.std_error / small.std_error;
    assert!(ratio > 0.18 && ratio < 0.33, "ratio {}", ratio);
}

// ============================================================================
// Determinism
// ============================================================================

#[test]
fn test_result_independent_of_thread_count() {
    let params = MarketParameters::default();
    let valuer = MonteCarloValuer::new(
        MonteCarloConfig::builder()
            .n_paths(20_000)
            .chunk_size(1_000)
            .seed(7)
            .build()
            .unwrap(),
    );

    let run_on = |threads: usize| {
        rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build()
            .unwrap()
            .install(|| valuer.value(&params, OptionType::Put).unwrap())
    };

    let one = run_on(1);
    assert_eq!(one, run_on(3));
    assert_eq!(one, run_on(8));
}

#[test]
fn test_different_seeds_give_different_estimates() {
    let params = MarketParameters::default();
    let a = MonteCarloValuer::new(config(5_000, 1))
        .value(&params, OptionType::Call)
        .unwrap();
    let b = MonteCarloValuer::new(config(5_000, 2))
        .value(&params, OptionType::Call)
        .unwrap();
    assert_ne!(a.price, b.price);
}

// ============================================================================
// Cancellation
// ============================================================================

#[test]
fn test_timeout_cancels_large_run() {
    let valuer = MonteCarloValuer::new(
        MonteCarloConfig::builder()
            .n_paths(MAX_PATHS)
            .timeout(Duration::from_millis(5))
            .build()
            .unwrap(),
    );
    let params = MarketParameters::default().with_expiry(2.0);

    match valuer.value(&params, OptionType::Call) {
        Err(PricingError::Cancelled { completed_paths }) => assert!(completed_paths < MAX_PATHS),
        other => panic!("expected cancellation, got {:?}", other),
    }
}

#[test]
fn test_token_cancels_from_another_thread() {
    let valuer = MonteCarloValuer::new(config(MAX_PATHS, 3));
    let token = valuer.cancellation_token();
    let params = MarketParameters::default().with_expiry(2.0);

    let canceller = thread::spawn(move || {
        thread::sleep(Duration::from_millis(20));
        token.cancel();
    });
    let result = valuer.value(&params, OptionType::Call);
    canceller.join().unwrap();

    assert!(matches!(result, Err(PricingError::Cancelled { .. })));
}

// ============================================================================
// Degenerate expiry and tolerance driver
// ============================================================================

#[test]
fn test_expired_option_needs_no_simulation() {
    let params = MarketParameters::default().with_spot(2650.0).with_expiry(0.0);
    let r = MonteCarloValuer::new(config(1_000, 1))
        .value(&params, OptionType::Call)
        .unwrap();
    assert_eq!(r.price, 50.0);
    assert_eq!(r.std_error, 0.0);
    assert_eq!(r.confidence_95(), 0.0);
}

#[test]
fn test_tolerance_driver_meets_target() {
    let params = MarketParameters::default();
    let valuer = MonteCarloValuer::new(config(4_000, 11));
    let out = valuer
        .value_to_tolerance(&params, OptionType::Call, 0.5, 12)
        .unwrap();
    let exact = price(&params, OptionType::Call).unwrap().price;

    assert!(out.converged);
    assert!(out.result.std_error <= 0.5);
    assert!((out.result.price - exact).abs() < 4.0 * out.result.std_error);
}
