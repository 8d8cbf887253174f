//! Layered settings for the CLI
//!
//! Settings are layered with the `config` crate. From lowest to highest
//! priority:
//!
//! 1. Built-in defaults (the demo scenario)
//! 2. TOML file (`--config`, optional)
//! 3. Environment variables prefixed `HEDGELAB__`, nested with `__`
//!    (e.g. `HEDGELAB__MARKET__SPOT=2550`)
//! 4. Command-line flags, applied by the caller after loading

use std::collections::HashMap;
use std::fmt;
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

use config::{Config, Environment, File};
use hedge_core::types::{MarketParameters, OptionType, PricingError};
use hedge_pricing::hedging::{
    HedgeFrequency, HedgeSimulationConfig, DEFAULT_INITIAL_POSITION, DEFAULT_MIN_TRADE_SIZE,
    DEFAULT_SIMULATION_STEPS, DEFAULT_TRANSACTION_COST_RATE,
};
use hedge_pricing::mc::{MonteCarloConfig, DEFAULT_CHUNK_SIZE, DEFAULT_SEED, DEFAULT_STEPS_PER_YEAR};
use serde::{Deserialize, Serialize};

use crate::error::{CliError, Result};

/// Prefix of environment variables read into the settings.
pub const ENV_PREFIX: &str = "HEDGELAB";

/// Log levels accepted in settings and on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Every event, including per-trade hedge records.
    Trace,
    /// Run boundaries.
    Debug,
    /// Default.
    #[default]
    Info,
    /// Cancellations and other warnings.
    Warn,
    /// Errors only.
    Error,
}

impl FromStr for LogLevel {
    type Err = CliError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "trace" => Ok(LogLevel::Trace),
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" => Ok(LogLevel::Warn),
            "error" => Ok(LogLevel::Error),
            _ => Err(CliError::InvalidSetting(format!(
                "log level '{}', expected one of: trace, debug, info, warn, error",
                s
            ))),
        }
    }
}

impl LogLevel {
    /// Convert log level to tracing filter string
    pub fn as_filter_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_filter_str())
    }
}

fn deserialize_log_level<'de, D>(deserializer: D) -> std::result::Result<LogLevel, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    LogLevel::from_str(&s).map_err(serde::de::Error::custom)
}

/// Monte Carlo section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MonteCarloSettings {
    /// Number of paths.
    pub paths: usize,
    /// Time steps per year.
    pub steps_per_year: usize,
    /// Master seed.
    pub seed: u64,
    /// Paths per parallel chunk.
    pub chunk_size: usize,
    /// Wall-clock budget in milliseconds.
    pub timeout_ms: Option<u64>,
}

impl Default for MonteCarloSettings {
    fn default() -> Self {
        Self {
            paths: 100_000,
            steps_per_year: DEFAULT_STEPS_PER_YEAR,
            seed: DEFAULT_SEED,
            chunk_size: DEFAULT_CHUNK_SIZE,
            timeout_ms: None,
        }
    }
}

/// Hedging section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HedgeSettings {
    /// Simulated days.
    pub steps: usize,
    /// Rebalancing schedule.
    pub frequency: HedgeFrequency,
    /// Proportional transaction cost.
    pub cost_rate: f64,
    /// Signed option contracts; negative is short.
    pub position: f64,
    /// Smallest hedge adjustment worth trading.
    pub min_trade_size: f64,
    /// Seed of the simulated path.
    pub seed: u64,
}

impl Default for HedgeSettings {
    fn default() -> Self {
        Self {
            steps: DEFAULT_SIMULATION_STEPS,
            frequency: HedgeFrequency::Daily,
            cost_rate: DEFAULT_TRANSACTION_COST_RATE,
            position: DEFAULT_INITIAL_POSITION,
            min_trade_size: DEFAULT_MIN_TRADE_SIZE,
            seed: DEFAULT_SEED,
        }
    }
}

/// Full settings tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Tracing level used when `RUST_LOG` is unset.
    #[serde(deserialize_with = "deserialize_log_level")]
    pub log_level: LogLevel,
    /// Option side.
    pub option_type: OptionType,
    /// Market and contract inputs.
    pub market: MarketParameters,
    /// Monte Carlo settings.
    pub monte_carlo: MonteCarloSettings,
    /// Hedging settings.
    pub hedge: HedgeSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            log_level: LogLevel::Info,
            option_type: OptionType::Call,
            market: MarketParameters::default(),
            monte_carlo: MonteCarloSettings::default(),
            hedge: HedgeSettings::default(),
        }
    }
}

impl Settings {
    /// Loads defaults, then `path` if it exists, then `HEDGELAB__*` variables.
    pub fn load(path: &Path) -> Result<Self> {
        Self::load_with(Some(path), None)
    }

    /// Same as [`load`](Self::load) with an explicit environment map in
    /// place of the process environment when `env` is `Some`.
    pub fn load_with(path: Option<&Path>, env: Option<HashMap<String, String>>) -> Result<Self> {
        let mut builder = Config::builder().add_source(Config::try_from(&Settings::default())?);
        if let Some(path) = path {
            builder = builder.add_source(File::from(path).required(false));
        }
        let environment = Environment::with_prefix(ENV_PREFIX)
            .prefix_separator("__")
            .separator("__")
            .try_parsing(true)
            .source(env);

        let settings: Settings = builder.add_source(environment).build()?.try_deserialize()?;
        settings.market.validate()?;
        Ok(settings)
    }

    /// Builds the Monte Carlo configuration.
    pub fn monte_carlo_config(&self) -> std::result::Result<MonteCarloConfig, PricingError> {
        let mc = &self.monte_carlo;
        let mut builder = MonteCarloConfig::builder()
            .n_paths(mc.paths)
            .steps_per_year(mc.steps_per_year)
            .seed(mc.seed)
            .chunk_size(mc.chunk_size);
        if let Some(ms) = mc.timeout_ms {
            builder = builder.timeout(Duration::from_millis(ms));
        }
        builder.build()
    }

    /// Builds the hedging configuration.
    pub fn hedge_config(&self) -> std::result::Result<HedgeSimulationConfig, PricingError> {
        let h = &self.hedge;
        HedgeSimulationConfig::builder()
            .params(self.market)
            .option_type(self.option_type)
            .initial_position(h.position)
            .simulation_steps(h.steps)
            .hedge_frequency(h.frequency)
            .transaction_cost_rate(h.cost_rate)
            .min_trade_size(h.min_trade_size)
            .build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn env(pairs: &[(&str, &str)]) -> Option<HashMap<String, String>> {
        Some(
            pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        )
    }

    #[test]
    fn test_log_level_parsing() {
        assert_eq!(LogLevel::from_str("trace").unwrap(), LogLevel::Trace);
        assert_eq!(LogLevel::from_str("DEBUG").unwrap(), LogLevel::Debug);
        assert_eq!(LogLevel::from_str("Warn").unwrap(), LogLevel::Warn);
        assert!(LogLevel::from_str("verbose").is_err());
        assert_eq!(LogLevel::Error.to_string(), "error");
    }

    #[test]
    fn test_defaults_without_sources() {
        let settings = Settings::load_with(None, env(&[])).unwrap();
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.market.strike, 2600.0);
        assert_eq!(settings.monte_carlo.paths, 100_000);
        assert_eq!(settings.hedge.steps, 90);
    }

    #[test]
    fn test_environment_overrides_nested_keys() {
        let settings = Settings::load_with(
            None,
            env(&[
                ("HEDGELAB__MARKET__SPOT", "2550"),
                ("HEDGELAB__HEDGE__FREQUENCY", "weekly"),
                ("HEDGELAB__OPTION_TYPE", "put"),
                ("HEDGELAB__LOG_LEVEL", "debug"),
            ]),
        )
        .unwrap();
        assert_eq!(settings.market.spot, 2550.0);
        assert_eq!(settings.market.strike, 2600.0);
        assert_eq!(settings.hedge.frequency, HedgeFrequency::Weekly);
        assert_eq!(settings.option_type, OptionType::Put);
        assert_eq!(settings.log_level, LogLevel::Debug);
    }

    #[test]
    fn test_file_then_environment() {
        let path = std::env::temp_dir().join(format!("hedgelab-test-{}.toml", std::process::id()));
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(
            file,
            "log_level = \"warn\"\n[market]\nspot = 100.0\nstrike = 100.0\n[monte_carlo]\npaths = 5000\n"
        )
        .unwrap();

        let settings =
            Settings::load_with(Some(&path), env(&[("HEDGELAB__MONTE_CARLO__PATHS", "7000")])).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(settings.log_level, LogLevel::Warn);
        assert_eq!(settings.market.spot, 100.0);
        assert_eq!(settings.market.volatility, 0.25);
        assert_eq!(settings.monte_carlo.paths, 7000);
    }

    #[test]
    fn test_missing_file_is_ignored() {
        let settings =
            Settings::load_with(Some(Path::new("/nonexistent/hedgelab.toml")), env(&[])).unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_invalid_values_rejected() {
        assert!(Settings::load_with(None, env(&[("HEDGELAB__LOG_LEVEL", "loud")])).is_err());
        assert!(Settings::load_with(None, env(&[("HEDGELAB__MARKET__SPOT", "-1")])).is_err());
    }

    #[test]
    fn test_engine_configs_built() {
        let mut settings = Settings::default();
        settings.monte_carlo.timeout_ms = Some(250);
        let mc = settings.monte_carlo_config().unwrap();
        assert_eq!(mc.n_paths(), 100_000);
        assert_eq!(mc.timeout(), Some(Duration::from_millis(250)));

        let hedge = settings.hedge_config().unwrap();
        assert_eq!(hedge.initial_position(), -1.0);

        settings.hedge.steps = 0;
        assert!(settings.hedge_config().is_err());
    }
}
