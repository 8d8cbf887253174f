//! hedgelab CLI - option pricing, Monte Carlo valuation and hedging simulation
//!
//! # Commands
//!
//! - `hedgelab price [--both]` - Closed-form price and Greeks
//! - `hedgelab implied-vol --premium <p>` - Implied volatility from a premium
//! - `hedgelab mc [--paths N] [--seed S] [--timeout-ms T]` - Monte Carlo valuation
//! - `hedgelab hedge [--steps N] [--frequency F] [--cost-rate c]` - Delta-hedging simulation
//!
//! Every command accepts `--format table|json|csv`. Settings are layered as
//! defaults, then `hedgelab.toml`, then `HEDGELAB__*` environment variables,
//! then the flags given here.

use std::io;
use std::path::PathBuf;
use std::str::FromStr;

use clap::{Args, Parser, Subcommand};
use hedge_core::types::OptionType;
use hedge_pricing::hedging::HedgeFrequency;
use tracing::debug;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod commands;
mod error;
mod output;
mod settings;

pub use error::Result;

use commands::mc::PrecisionTarget;
use output::OutputFormat;
use settings::{LogLevel, Settings};

/// Option pricing, Monte Carlo valuation and delta-hedging simulation
#[derive(Parser)]
#[command(name = "hedgelab")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Settings file path (optional)
    #[arg(short, long, global = true, default_value = "hedgelab.toml")]
    config: PathBuf,

    /// Output format
    #[arg(short, long, global = true, value_enum, default_value_t = OutputFormat::Table)]
    format: OutputFormat,

    /// Log level when RUST_LOG is unset (trace, debug, info, warn, error)
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(flatten)]
    market: MarketArgs,

    #[command(subcommand)]
    command: Commands,
}

/// Market overrides shared by every command.
#[derive(Args)]
struct MarketArgs {
    /// Spot price
    #[arg(long, global = true)]
    spot: Option<f64>,

    /// Strike price
    #[arg(long, global = true)]
    strike: Option<f64>,

    /// Time to expiry in years
    #[arg(long, global = true, allow_negative_numbers = true)]
    expiry: Option<f64>,

    /// Annualised volatility
    #[arg(long = "vol", global = true)]
    volatility: Option<f64>,

    /// Continuously compounded risk-free rate; may be negative
    #[arg(long, global = true, allow_negative_numbers = true)]
    rate: Option<f64>,

    /// Continuous dividend or convenience yield; negative for a storage cost
    #[arg(long = "yield", global = true, allow_negative_numbers = true)]
    dividend_yield: Option<f64>,

    /// Option type (call or put)
    #[arg(short = 't', long, global = true)]
    option_type: Option<OptionType>,
}

#[derive(Subcommand)]
enum Commands {
    /// Closed-form price and Greeks
    Price {
        /// Show call and put side by side
        #[arg(long)]
        both: bool,
    },

    /// Implied volatility from a market premium
    ImpliedVol {
        /// Observed option premium
        #[arg(long)]
        premium: f64,
    },

    /// Monte Carlo valuation next to the closed form
    Mc {
        /// Number of paths
        #[arg(short = 'n', long)]
        paths: Option<usize>,

        /// Master seed
        #[arg(short, long)]
        seed: Option<u64>,

        /// Time steps per year
        #[arg(long)]
        steps_per_year: Option<usize>,

        /// Wall-clock budget in milliseconds
        #[arg(long)]
        timeout_ms: Option<u64>,

        /// Keep doubling paths until the standard error reaches this value
        #[arg(long)]
        target_std_error: Option<f64>,

        /// Most rounds for --target-std-error
        #[arg(long, default_value = "8")]
        max_rounds: usize,
    },

    /// Delta-hedging simulation on a simulated path
    Hedge {
        /// Simulated days
        #[arg(long)]
        steps: Option<usize>,

        /// Rebalancing frequency (daily, weekly, monthly)
        #[arg(long)]
        frequency: Option<HedgeFrequency>,

        /// Proportional transaction cost
        #[arg(long)]
        cost_rate: Option<f64>,

        /// Signed option contracts; negative is short
        #[arg(long, allow_hyphen_values = true)]
        position: Option<f64>,

        /// Smallest hedge adjustment worth trading
        #[arg(long)]
        min_trade_size: Option<f64>,

        /// Path seed
        #[arg(short, long)]
        seed: Option<u64>,
    },
}

impl MarketArgs {
    fn apply(&self, settings: &mut Settings) {
        let m = &mut settings.market;
        if let Some(v) = self.spot {
            m.spot = v;
        }
        if let Some(v) = self.strike {
            m.strike = v;
        }
        if let Some(v) = self.expiry {
            m.expiry = v;
        }
        if let Some(v) = self.volatility {
            m.volatility = v;
        }
        if let Some(v) = self.rate {
            m.rate = v;
        }
        if let Some(v) = self.dividend_yield {
            m.dividend_yield = v;
        }
        if let Some(ot) = self.option_type {
            settings.option_type = ot;
        }
    }
}

impl Commands {
    fn apply(&self, settings: &mut Settings) {
        match self {
            Commands::Mc {
                paths,
                seed,
                steps_per_year,
                timeout_ms,
                ..
            } => {
                let mc = &mut settings.monte_carlo;
                if let Some(v) = *paths {
                    mc.paths = v;
                }
                if let Some(v) = *seed {
                    mc.seed = v;
                }
                if let Some(v) = *steps_per_year {
                    mc.steps_per_year = v;
                }
                if timeout_ms.is_some() {
                    mc.timeout_ms = *timeout_ms;
                }
            }
            Commands::Hedge {
                steps,
                frequency,
                cost_rate,
                position,
                min_trade_size,
                seed,
            } => {
                let h = &mut settings.hedge;
                if let Some(v) = *steps {
                    h.steps = v;
                }
                if let Some(v) = *frequency {
                    h.frequency = v;
                }
                if let Some(v) = *cost_rate {
                    h.cost_rate = v;
                }
                if let Some(v) = *position {
                    h.position = v;
                }
                if let Some(v) = *min_trade_size {
                    h.min_trade_size = v;
                }
                if let Some(v) = *seed {
                    h.seed = v;
                }
            }
            Commands::Price { .. } | Commands::ImpliedVol { .. } => {}
        }
    }
}

fn init_tracing(log_level: &str) {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level)))
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut settings = Settings::load(&cli.config)?;
    if let Some(level) = &cli.log_level {
        settings.log_level = LogLevel::from_str(level)?;
    }
    cli.market.apply(&mut settings);
    cli.command.apply(&mut settings);

    init_tracing(settings.log_level.as_filter_str());
    debug!(config = %cli.config.display(), log_level = %settings.log_level, "Settings loaded");

    let mut out = io::stdout().lock();
    match cli.command {
        Commands::Price { both } => commands::price::run(&settings, both, cli.format, &mut out),
        Commands::ImpliedVol { premium } => {
            commands::implied_vol::run(&settings, premium, cli.format, &mut out)
        }
        Commands::Mc {
            target_std_error,
            max_rounds,
            ..
        } => {
            let target = target_std_error.map(|std_error| PrecisionTarget {
                std_error,
                max_rounds,
            });
            commands::mc::run(&settings, target, cli.format, &mut out)
        }
        Commands::Hedge { .. } => commands::hedge::run(&settings, cli.format, &mut out),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_negative_rate_and_yield_parse() {
        let cli = Cli::try_parse_from(["hedgelab", "--yield", "-0.01", "--rate", "-0.005", "price"])
            .unwrap();
        assert_eq!(cli.market.dividend_yield, Some(-0.01));
        assert_eq!(cli.market.rate, Some(-0.005));

        let mut settings = Settings::default();
        cli.market.apply(&mut settings);
        assert_eq!(settings.market.dividend_yield, -0.01);
        assert_eq!(settings.market.rate, -0.005);
    }

    #[test]
    fn test_negative_values_after_subcommand_parse() {
        let cli = Cli::try_parse_from(["hedgelab", "hedge", "--rate=-0.02", "--yield", "-0.03"])
            .unwrap();
        assert_eq!(cli.market.rate, Some(-0.02));
        assert_eq!(cli.market.dividend_yield, Some(-0.03));
        assert!(matches!(cli.command, Commands::Hedge { .. }));
    }

    #[test]
    fn test_negative_position_parses() {
        let cli = Cli::try_parse_from(["hedgelab", "hedge", "--position", "-2"]).unwrap();
        match cli.command {
            Commands::Hedge { position, .. } => assert_eq!(position, Some(-2.0)),
            _ => panic!("expected hedge command"),
        }
    }
}
