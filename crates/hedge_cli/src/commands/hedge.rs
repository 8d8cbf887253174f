//! Hedge command implementation
//!
//! Runs the delta-hedging simulation on a seeded GBM path.

use std::io::Write;

use hedge_pricing::hedging::{
    DeltaHedgeEngine, HedgeSimulationConfig, HedgeSummary, SimulationResult,
};
use serde::Serialize;
use tracing::info;

use crate::output::{fmt_num, write_csv, write_json, OutputFormat, Table};
use crate::settings::Settings;
use crate::Result;

/// JSON document for a hedging run.
#[derive(Debug, Serialize)]
struct HedgeReport<'a> {
    config: &'a HedgeSimulationConfig,
    seed: u64,
    summary: HedgeSummary,
    result: &'a SimulationResult,
}

/// Runs the simulation described by `settings`.
pub fn compute(settings: &Settings) -> Result<(HedgeSimulationConfig, SimulationResult)> {
    let config = settings.hedge_config()?;
    let engine = DeltaHedgeEngine::new(config.clone())?;
    let result = engine.run_with_seed(settings.hedge.seed)?;
    Ok((config, result))
}

fn pct(value: Option<f64>) -> String {
    value.map_or_else(|| "n/a".to_string(), |v| format!("{:.2}%", v))
}

/// Run the hedge command
pub fn run<W: Write>(settings: &Settings, format: OutputFormat, out: &mut W) -> Result<()> {
    let h = &settings.hedge;
    info!(
        steps = h.steps,
        frequency = %h.frequency,
        cost_rate = h.cost_rate,
        position = h.position,
        seed = h.seed,
        "Starting hedging simulation"
    );
    let (config, result) = compute(settings)?;
    let summary = result.summary();

    match format {
        OutputFormat::Json => write_json(
            out,
            &HedgeReport {
                config: &config,
                seed: h.seed,
                summary,
                result: &result,
            },
        ),
        OutputFormat::Csv => write_csv(out, result.snapshots()),
        OutputFormat::Table => {
            let mut totals = Table::new(
                format!(
                    "Delta hedge: {} {} x {}, {} rebalancing",
                    if config.initial_position() < 0.0 { "short" } else { "long" },
                    config.initial_position().abs(),
                    config.option_type(),
                    config.hedge_frequency()
                ),
                &["Metric", "Value"],
            );
            totals.push_row(vec!["trades".into(), summary.n_trades.to_string()]);
            totals.push_row(vec![
                "transaction cost".into(),
                fmt_num(summary.total_transaction_cost, 4),
            ]);
            totals.push_row(vec!["final P&L".into(), fmt_num(summary.final_pnl, 4)]);
            totals.push_row(vec![
                "max |tracking error|".into(),
                fmt_num(summary.max_abs_tracking_error, 4),
            ]);
            totals.render(out)?;

            let interval = config.hedge_frequency().interval();
            let last = result.snapshots().len() - 1;
            let mut daily = Table::new(
                "Daily snapshots (rebalance days and expiry)",
                &["Day", "Spot", "Option", "Delta", "Hedge", "Cash", "Portfolio", "Hedge err", "Tracking"],
            );
            for s in result
                .snapshots()
                .iter()
                .filter(|s| s.day % interval == 0 || s.day == last)
            {
                daily.push_row(vec![
                    s.day.to_string(),
                    fmt_num(s.price, 2),
                    fmt_num(s.option_value, 4),
                    fmt_num(s.delta, 4),
                    fmt_num(s.hedge_position, 4),
                    fmt_num(s.cash, 2),
                    fmt_num(s.portfolio_value, 4),
                    pct(s.hedging_error_pct),
                    fmt_num(s.tracking_error, 4),
                ]);
            }
            daily.render(out)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hedge_pricing::hedging::HedgeFrequency;

    #[test]
    fn test_default_run_shape() {
        let (config, result) = compute(&Settings::default()).unwrap();
        assert_eq!(config.simulation_steps(), 90);
        assert_eq!(result.snapshots().len(), 91);
    }

    #[test]
    fn test_csv_has_one_row_per_day() {
        let mut settings = Settings::default();
        settings.hedge.steps = 10;
        let mut out = Vec::new();
        run(&settings, OutputFormat::Csv, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 12);
        assert!(lines[0].starts_with("day,time_to_expiry,price,option_value,delta"));
    }

    #[test]
    fn test_table_shows_schedule_rows() {
        let mut settings = Settings::default();
        settings.hedge.frequency = HedgeFrequency::Monthly;
        let mut out = Vec::new();
        run(&settings, OutputFormat::Table, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("monthly rebalancing"));
        assert!(text.contains("final P&L"));
    }

    #[test]
    fn test_json_carries_summary_and_seed() {
        let mut out = Vec::new();
        run(&Settings::default(), OutputFormat::Json, &mut out).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(value["seed"], 42);
        assert!(value["summary"]["n_trades"].as_u64().unwrap() > 0);
        assert_eq!(value["result"]["snapshots"].as_array().unwrap().len(), 91);
    }
}
