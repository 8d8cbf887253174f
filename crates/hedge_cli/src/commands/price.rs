//! Price command implementation
//!
//! Closed-form Black-Scholes-Merton price and Greeks.

use std::io::Write;

use hedge_core::types::{OptionType, PricingError};
use hedge_models::analytical::{price, Greeks};
use serde::Serialize;
use tracing::info;

use crate::output::{fmt_num, write_csv, write_json, OutputFormat, Table};
use crate::settings::Settings;
use crate::Result;

/// One option side with its Greeks in desk units.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct GreeksRow {
    /// Option side.
    pub option_type: OptionType,
    /// Premium.
    pub price: f64,
    /// dV/dS.
    pub delta: f64,
    /// d²V/dS².
    pub gamma: f64,
    /// Per calendar day.
    pub theta: f64,
    /// Per 1% volatility.
    pub vega: f64,
    /// Per 1% rate.
    pub rho: f64,
}

impl GreeksRow {
    fn new(option_type: OptionType, g: &Greeks) -> Self {
        Self {
            option_type,
            price: g.price,
            delta: g.delta,
            gamma: g.gamma,
            theta: g.theta,
            vega: g.vega,
            rho: g.rho,
        }
    }
}

/// Prices the configured option, or both sides when `both` is set.
pub fn compute(settings: &Settings, both: bool) -> Result<Vec<GreeksRow>> {
    let sides = if both {
        vec![OptionType::Call, OptionType::Put]
    } else {
        vec![settings.option_type]
    };
    let rows = sides
        .into_iter()
        .map(|ot| price(&settings.market, ot).map(|g| GreeksRow::new(ot, &g)))
        .collect::<std::result::Result<Vec<_>, PricingError>>()?;
    Ok(rows)
}

/// Run the price command
pub fn run<W: Write>(settings: &Settings, both: bool, format: OutputFormat, out: &mut W) -> Result<()> {
    let m = &settings.market;
    info!(
        spot = m.spot,
        strike = m.strike,
        expiry = m.expiry,
        volatility = m.volatility,
        "Pricing in closed form"
    );
    let rows = compute(settings, both)?;

    match format {
        OutputFormat::Json => write_json(out, &rows),
        OutputFormat::Csv => write_csv(out, &rows),
        OutputFormat::Table => {
            let title = format!(
                "Black-Scholes-Merton  S={} K={} T={} σ={} r={} q={}",
                m.spot, m.strike, m.expiry, m.volatility, m.rate, m.dividend_yield
            );
            let mut headers = vec!["Greek".to_string()];
            headers.extend(rows.iter().map(|r| r.option_type.to_string()));
            let header_refs: Vec<&str> = headers.iter().map(String::as_str).collect();
            let mut table = Table::new(title, &header_refs);

            let fields: [(&str, fn(&GreeksRow) -> f64, usize); 6] = [
                ("price", |r| r.price, 4),
                ("delta", |r| r.delta, 4),
                ("gamma", |r| r.gamma, 6),
                ("theta (per day)", |r| r.theta, 4),
                ("vega (per 1%)", |r| r.vega, 4),
                ("rho (per 1%)", |r| r.rho, 4),
            ];
            for (name, get, decimals) in fields {
                let mut row = vec![name.to_string()];
                row.extend(rows.iter().map(|r| fmt_num(get(r), decimals)));
                table.push_row(row);
            }
            table.render(out)
        }
    }
}
