//! Monte Carlo command implementation
//!
//! Values the configured option by simulation and sets the estimate next to
//! the closed form.

use std::io::Write;

use hedge_core::types::OptionType;
use hedge_models::analytical::price;
use hedge_pricing::mc::MonteCarloValuer;
use serde::Serialize;
use tracing::info;

use crate::output::{fmt_num, write_csv, write_json, OutputFormat, Table};
use crate::settings::Settings;
use crate::Result;

/// Optional precision target for the re-seeding driver.
#[derive(Debug, Clone, Copy)]
pub struct PrecisionTarget {
    /// Largest acceptable standard error.
    pub std_error: f64,
    /// Most rounds to run.
    pub max_rounds: usize,
}

/// Monte Carlo estimate against the closed form.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct McRow {
    /// Option side.
    pub option_type: OptionType,
    /// Monte Carlo price.
    pub mc_price: f64,
    /// Standard error of the estimate.
    pub std_error: f64,
    /// Lower end of the 95% interval.
    pub ci95_low: f64,
    /// Upper end of the 95% interval.
    pub ci95_high: f64,
    /// Closed-form price.
    pub closed_form: f64,
    /// (MC − closed form) in standard errors; 0 when the error is 0.
    pub error_in_std_errors: f64,
    /// Paths simulated in the final estimate.
    pub n_paths: usize,
    /// Time steps per path.
    pub steps_per_path: usize,
    /// Rounds run by the precision driver, if used.
    pub rounds: Option<usize>,
    /// Whether the precision target was met, if one was set.
    pub converged: Option<bool>,
}

/// Runs the valuation.
pub fn compute(settings: &Settings, target: Option<PrecisionTarget>) -> Result<McRow> {
    let ot = settings.option_type;
    let valuer = MonteCarloValuer::new(settings.monte_carlo_config()?);

    let (result, rounds, converged) = match target {
        Some(t) => {
            let out = valuer.value_to_tolerance(&settings.market, ot, t.std_error, t.max_rounds)?;
            (out.result, Some(out.rounds), Some(out.converged))
        }
        None => (valuer.value(&settings.market, ot)?, None, None),
    };
    let closed_form = price(&settings.market, ot)?.price;
    let error_in_std_errors = if result.std_error > 0.0 {
        (result.price - closed_form) / result.std_error
    } else {
        0.0
    };

    Ok(McRow {
        option_type: ot,
        mc_price: result.price,
        std_error: result.std_error,
        ci95_low: result.price - result.confidence_95(),
        ci95_high: result.price + result.confidence_95(),
        closed_form,
        error_in_std_errors,
        n_paths: result.n_paths,
        steps_per_path: result.steps_per_path,
        rounds,
        converged,
    })
}

/// Run the mc command
pub fn run<W: Write>(
    settings: &Settings,
    target: Option<PrecisionTarget>,
    format: OutputFormat,
    out: &mut W,
) -> Result<()> {
    let mc = &settings.monte_carlo;
    info!(
        paths = mc.paths,
        seed = mc.seed,
        steps_per_year = mc.steps_per_year,
        "Starting Monte Carlo valuation"
    );
    let row = compute(settings, target)?;

    match format {
        OutputFormat::Json => write_json(out, &row),
        OutputFormat::Csv => write_csv(out, &[row]),
        OutputFormat::Table => {
            let mut table = Table::new(
                format!("Monte Carlo valuation ({})", row.option_type),
                &["Field", "Value"],
            );
            table.push_row(vec!["MC price".into(), fmt_num(row.mc_price, 4)]);
            table.push_row(vec!["std error".into(), fmt_num(row.std_error, 4)]);
            table.push_row(vec![
                "95% interval".into(),
                format!("[{:.4}, {:.4}]", row.ci95_low, row.ci95_high),
            ]);
            table.push_row(vec!["closed form".into(), fmt_num(row.closed_form, 4)]);
            table.push_row(vec!["error / std error".into(), fmt_num(row.error_in_std_errors, 2)]);
            table.push_row(vec!["paths".into(), row.n_paths.to_string()]);
            table.push_row(vec!["steps per path".into(), row.steps_per_path.to_string()]);
            if let (Some(rounds), Some(converged)) = (row.rounds, row.converged) {
                table.push_row(vec!["rounds".into(), rounds.to_string()]);
                table.push_row(vec!["converged".into(), converged.to_string()]);
            }
            table.render(out)
        }
    }
}
