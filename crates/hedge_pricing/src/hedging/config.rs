//! Hedging simulation configuration.

use hedge_core::types::{MarketParameters, OptionType, PricingError};
use serde::{Deserialize, Serialize};

use super::frequency::HedgeFrequency;
use crate::mc::MAX_STEPS_PER_PATH;

/// Default option position: short one contract.
pub const DEFAULT_INITIAL_POSITION: f64 = -1.0;

/// Default number of simulated days.
pub const DEFAULT_SIMULATION_STEPS: usize = 90;

/// Default proportional transaction cost (0.1%).
pub const DEFAULT_TRANSACTION_COST_RATE: f64 = 0.001;

/// Default smallest hedge adjustment worth trading.
pub const DEFAULT_MIN_TRADE_SIZE: f64 = 0.01;

/// Inputs of a delta-hedging run.
///
/// Built through [`HedgeSimulationConfigBuilder`]; deserialisation applies
/// the same defaults and validation.
///
/// # Examples
///
/// ```rust
/// use hedge_pricing::hedging::{HedgeFrequency, HedgeSimulationConfig};
///
/// let config = HedgeSimulationConfig::builder()
///     .simulation_steps(60)
///     .hedge_frequency(HedgeFrequency::Weekly)
///     .build()
///     .unwrap();
///
/// assert_eq!(config.initial_position(), -1.0);
/// assert_eq!(config.transaction_cost_rate(), 0.001);
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "HedgeSimulationConfigBuilder")]
pub struct HedgeSimulationConfig {
    params: MarketParameters,
    option_type: OptionType,
    /// Signed option contracts; negative is short.
    initial_position: f64,
    simulation_steps: usize,
    hedge_frequency: HedgeFrequency,
    transaction_cost_rate: f64,
    min_trade_size: f64,
}

impl HedgeSimulationConfig {
    /// Creates a builder populated with the defaults.
    pub fn builder() -> HedgeSimulationConfigBuilder {
        HedgeSimulationConfigBuilder::default()
    }

    /// Market parameters at inception.
    #[inline]
    pub fn params(&self) -> &MarketParameters {
        &self.params
    }

    /// Option side.
    #[inline]
    pub fn option_type(&self) -> OptionType {
        self.option_type
    }

    /// Signed option contracts held.
    #[inline]
    pub fn initial_position(&self) -> f64 {
        self.initial_position
    }

    /// Number of simulated days; a path has one more point.
    #[inline]
    pub fn simulation_steps(&self) -> usize {
        self.simulation_steps
    }

    /// Rebalancing schedule.
    #[inline]
    pub fn hedge_frequency(&self) -> HedgeFrequency {
        self.hedge_frequency
    }

    /// Cost per unit of traded notional.
    #[inline]
    pub fn transaction_cost_rate(&self) -> f64 {
        self.transaction_cost_rate
    }

    /// Adjustments at or below this size are skipped.
    #[inline]
    pub fn min_trade_size(&self) -> f64 {
        self.min_trade_size
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` if:
    /// - the market parameters are invalid
    /// - `initial_position` is not finite
    /// - `simulation_steps` is 0 or above [`MAX_STEPS_PER_PATH`]
    /// - `transaction_cost_rate` or `min_trade_size` is negative or not finite
    pub fn validate(&self) -> Result<(), PricingError> {
        self.params.validate()?;
        if !self.initial_position.is_finite() {
            return Err(PricingError::invalid(
                "initial_position",
                format!("must be finite, got {}", self.initial_position),
            ));
        }
        if self.simulation_steps == 0 || self.simulation_steps > MAX_STEPS_PER_PATH {
            return Err(PricingError::invalid(
                "simulation_steps",
                format!(
                    "{} outside [1, {}]",
                    self.simulation_steps, MAX_STEPS_PER_PATH
                ),
            ));
        }
        if !self.transaction_cost_rate.is_finite() || self.transaction_cost_rate < 0.0 {
            return Err(PricingError::invalid(
                "transaction_cost_rate",
                format!("must be non-negative, got {}", self.transaction_cost_rate),
            ));
        }
        if !self.min_trade_size.is_finite() || self.min_trade_size < 0.0 {
            return Err(PricingError::invalid(
                "min_trade_size",
                format!("must be non-negative, got {}", self.min_trade_size),
            ));
        }
        Ok(())
    }
}

/// Builder for [`HedgeSimulationConfig`].
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct HedgeSimulationConfigBuilder {
    params: MarketParameters,
    option_type: OptionType,
    initial_position: f64,
    simulation_steps: usize,
    hedge_frequency: HedgeFrequency,
    transaction_cost_rate: f64,
    min_trade_size: f64,
}

impl Default for HedgeSimulationConfigBuilder {
    fn default() -> Self {
        Self {
            params: MarketParameters::default(),
            option_type: OptionType::Call,
            initial_position: DEFAULT_INITIAL_POSITION,
            simulation_steps: DEFAULT_SIMULATION_STEPS,
            hedge_frequency: HedgeFrequency::Daily,
            transaction_cost_rate: DEFAULT_TRANSACTION_COST_RATE,
            min_trade_size: DEFAULT_MIN_TRADE_SIZE,
        }
    }
}

impl HedgeSimulationConfigBuilder {
    /// Sets the market parameters.
    pub fn params(mut self, params: MarketParameters) -> Self {
        self.params = params;
        self
    }

    /// Sets the option side.
    pub fn option_type(mut self, option_type: OptionType) -> Self {
        self.option_type = option_type;
        self
    }

    /// Sets the signed option position.
    pub fn initial_position(mut self, initial_position: f64) -> Self {
        self.initial_position = initial_position;
        self
    }

    /// Sets the number of simulated days.
    pub fn simulation_steps(mut self, simulation_steps: usize) -> Self {
        self.simulation_steps = simulation_steps;
        self
    }

    /// Sets the rebalancing schedule.
    pub fn hedge_frequency(mut self, hedge_frequency: HedgeFrequency) -> Self {
        self.hedge_frequency = hedge_frequency;
        self
    }

    /// Sets the proportional transaction cost.
    pub fn transaction_cost_rate(mut self, transaction_cost_rate: f64) -> Self {
        self.transaction_cost_rate = transaction_cost_rate;
        self
    }

    /// Sets the minimum trade size.
    pub fn min_trade_size(mut self, min_trade_size: f64) -> Self {
        self.min_trade_size = min_trade_size;
        self
    }

    /// Builds and validates the configuration.
    ///
    /// # Errors
    ///
    /// See [`HedgeSimulationConfig::validate`].
    pub fn build(self) -> Result<HedgeSimulationConfig, PricingError> {
        let config = HedgeSimulationConfig {
            params: self.params,
            option_type: self.option_type,
            initial_position: self.initial_position,
            simulation_steps: self.simulation_steps,
            hedge_frequency: self.hedge_frequency,
            transaction_cost_rate: self.transaction_cost_rate,
            min_trade_size: self.min_trade_size,
        };
        config.validate()?;
        Ok(config)
    }
}

impl TryFrom<HedgeSimulationConfigBuilder> for HedgeSimulationConfig {
    type Error = PricingError;

    fn try_from(builder: HedgeSimulationConfigBuilder) -> Result<Self, Self::Error> {
        builder.build()
    }
}
