//! End-to-end delta-hedging scenarios.
//!
//! # Test Categories
//!
//! 1. **Idealised hedge**: zero cost, daily rebalancing, deterministic path
//! 2. **Discretisation**: finer rebalancing tracks the option more closely
//! 3. **Costs and schedules**: cost drag and trade counts
//! 4. **Reproducibility and export**

use approx::assert_relative_eq;
use hedge_core::types::{MarketParameters, OptionType};
use hedge_models::analytical::price;
use hedge_pricing::hedging::{
    DeltaHedgeEngine, HedgeFrequency, HedgeSimulationConfig, SimulationResult,
};
use hedge_pricing::mc::{GbmPathSimulator, PricePath};
use hedge_pricing::rng::PricerRng;

fn zero_rate_atm() -> MarketParameters {
    MarketParameters::new(100.0, 100.0, 1.0, 0.2, 0.0, 0.0).unwrap()
}

fn run(params: MarketParameters, steps: usize, frequency: HedgeFrequency, cost: f64, seed: u64) -> SimulationResult {
    let config = HedgeSimulationConfig::builder()
        .params(params)
        .simulation_steps(steps)
        .hedge_frequency(frequency)
        .transaction_cost_rate(cost)
        .min_trade_size(0.0)
        .build()
        .unwrap();
    DeltaHedgeEngine::new(config).unwrap().run_with_seed(seed).unwrap()
}

// ============================================================================
// Idealised hedge
// ============================================================================

#[test]
fn test_constant_path_deep_in_the_money_stays_flat() {
    let params = MarketParameters::new(120.0, 100.0, 0.25, 0.05, 0.0, 0.0).unwrap();
    let config = HedgeSimulationConfig::builder()
        .params(params)
        .transaction_cost_rate(0.0)
        .build()
        .unwrap();
    let engine = DeltaHedgeEngine::new(config).unwrap();
    let path = PricePath::new(vec![120.0; 91]).unwrap();

    let result = engine.run_on_path(&path).unwrap();
    let summary = result.summary();

    // Open on day 0, unwind at expiry
    let days: Vec<usize> = result.transactions().iter().map(|t| t.day).collect();
    assert_eq!(days, vec![0, 90]);
    assert!(summary.max_abs_tracking_error < 1e-6);
    assert_eq!(summary.total_transaction_cost, 0.0);
    assert_relative_eq!(result.portfolio_values()[90], -20.0, epsilon = 1e-6);
    assert!(result.final_position().hedge_units.abs() < 1e-12);
}

// ============================================================================
// Discretisation
// ============================================================================

#[test]
fn test_finer_rebalancing_tracks_better() {
    let params = zero_rate_atm();
    let premium = price(&params, OptionType::Call).unwrap().price;

    const SEEDS: u64 = 40;

    let mean_abs_error = |steps: usize| {
        (0..SEEDS)
            .map(|s| {
                let r = run(params, steps, HedgeFrequency::Daily, 0.0, s);
                r.tracking_errors().last().copied().unwrap().abs()
            })
            .sum::<f64>()
            / SEEDS as f64
    };

    let fine = mean_abs_error(250);
    let coarse = mean_abs_error(25);
    assert!(fine < coarse, "fine {} coarse {}", fine, coarse);
    assert!(fine < 0.15 * premium, "fine {} premium {}", fine, premium);
}

// ============================================================================
// Costs and schedules
// ============================================================================

#[test]
fn test_costs_drag_pnl_by_their_total() {
    let params = zero_rate_atm();
    let free = run(params, 60, HedgeFrequency::Daily, 0.0, 9);
    let costly = run(params, 60, HedgeFrequency::Daily, 0.01, 9);

    assert_eq!(free.transactions().len(), costly.transactions().len());

    // Day-0 cost is already in the baseline portfolio value
    let day0_cost = costly.transactions()[0].cost;
    let drag = free.summary().final_pnl - costly.summary().final_pnl;
    assert_relative_eq!(
        drag,
        costly.summary().total_transaction_cost - day0_cost,
        max_relative = 1e-9
    );
}

#[test]
fn test_less_frequent_hedging_trades_less() {
    let params = zero_rate_atm();
    let daily = run(params, 90, HedgeFrequency::Daily, 0.001, 4);
    let weekly = run(params, 90, HedgeFrequency::Weekly, 0.001, 4);
    let monthly = run(params, 90, HedgeFrequency::Monthly, 0.001, 4);

    assert!(daily.summary().n_trades > weekly.summary().n_trades);
    assert!(weekly.summary().n_trades > monthly.summary().n_trades);
    assert!(monthly.summary().n_trades <= 4);
    assert!(daily.summary().total_transaction_cost > monthly.summary().total_transaction_cost);
}

// ============================================================================
// Reproducibility and export
// ============================================================================

#[test]
fn test_seeded_run_matches_supplied_path() {
    let params = zero_rate_atm();
    let config = HedgeSimulationConfig::builder()
        .params(params)
        .simulation_steps(30)
        .build()
        .unwrap();
    let engine = DeltaHedgeEngine::new(config).unwrap();

    let mut rng = PricerRng::from_seed(21);
    let path = GbmPathSimulator::new(params)
        .unwrap()
        .generate_path(30, &mut rng)
        .unwrap();

    assert_eq!(engine.run_with_seed(21).unwrap(), engine.run_on_path(&path).unwrap());
    assert_eq!(engine.run_with_seed(21).unwrap().prices(), path.as_slice());
}

#[test]
fn test_result_serialises_to_json() {
    let result = run(zero_rate_atm(), 5, HedgeFrequency::Daily, 0.001, 1);
    let json = serde_json::to_value(&result).unwrap();

    assert_eq!(json["snapshots"].as_array().unwrap().len(), 6);
    assert_eq!(json["option_type"], "call");
    assert!(json["transactions"][0]["pnl_impact"].as_f64().unwrap() <= 0.0);
}
