//! Implied volatility command implementation

use std::io::Write;

use hedge_core::types::OptionType;
use hedge_models::analytical::{implied_volatility, price};
use serde::Serialize;
use tracing::info;

use crate::output::{fmt_num, write_csv, write_json, OutputFormat, Table};
use crate::settings::Settings;
use crate::Result;

/// Implied volatility of one quoted premium.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct ImpliedVolRow {
    /// Option side.
    pub option_type: OptionType,
    /// Quoted premium.
    pub premium: f64,
    /// Volatility that reprices the premium.
    pub implied_volatility: f64,
    /// Closed-form price at the implied volatility.
    pub repriced: f64,
}

/// Inverts the closed form for `premium`.
pub fn compute(settings: &Settings, premium: f64) -> Result<ImpliedVolRow> {
    let ot = settings.option_type;
    let iv = implied_volatility(&settings.market, ot, premium)?;
    let repriced = price(&settings.market.with_volatility(iv), ot)?.price;
    Ok(ImpliedVolRow {
        option_type: ot,
        premium,
        implied_volatility: iv,
        repriced,
    })
}

/// Run the implied-vol command
pub fn run<W: Write>(settings: &Settings, premium: f64, format: OutputFormat, out: &mut W) -> Result<()> {
    info!(premium, option_type = %settings.option_type, "Solving for implied volatility");
    let row = compute(settings, premium)?;

    match format {
        OutputFormat::Json => write_json(out, &row),
        OutputFormat::Csv => write_csv(out, &[row]),
        OutputFormat::Table => {
            let mut table = Table::new("Implied volatility", &["Field", "Value"]);
            table.push_row(vec!["option type".into(), row.option_type.to_string()]);
            table.push_row(vec!["premium".into(), fmt_num(row.premium, 4)]);
            table.push_row(vec![
                "implied vol".into(),
                format!("{:.4}%", row.implied_volatility * 100.0),
            ]);
            table.push_row(vec!["repriced".into(), fmt_num(row.repriced, 6)]);
            table.render(out)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CliError;
    use approx::assert_relative_eq;

    #[test]
    fn test_recovers_configured_volatility() {
        let settings = Settings::default();
        let premium = price(&settings.market, settings.option_type).unwrap().price;
        let row = compute(&settings, premium).unwrap();
        assert_relative_eq!(row.implied_volatility, 0.25, epsilon = 1e-8);
        assert_relative_eq!(row.repriced, premium, epsilon = 1e-8);
    }

    #[test]
    fn test_arbitrage_premium_rejected() {
        let err = compute(&Settings::default(), 1e6).unwrap_err();
        assert!(matches!(err, CliError::Pricing(e) if e.is_invalid_parameter()));
    }
}
