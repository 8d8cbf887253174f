//! Rebalancing schedules.

use std::fmt;
use std::str::FromStr;

use hedge_core::types::PricingError;
use serde::{Deserialize, Serialize};

/// How often the hedge is brought back to target.
///
/// Days are simulation steps. Day 0 is always a rebalance day.
///
/// # Examples
/// ```
/// use hedge_pricing::hedging::HedgeFrequency;
///
/// let weekly: HedgeFrequency = "weekly".parse().unwrap();
/// assert!(weekly.is_rebalance_day(14));
/// assert!(!weekly.is_rebalance_day(15));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HedgeFrequency {
    /// Every step.
    #[default]
    Daily,
    /// Every 7 steps.
    Weekly,
    /// Every 30 steps.
    Monthly,
}

impl HedgeFrequency {
    /// Steps between rebalances.
    #[inline]
    pub fn interval(&self) -> usize {
        match self {
            HedgeFrequency::Daily => 1,
            HedgeFrequency::Weekly => 7,
            HedgeFrequency::Monthly => 30,
        }
    }

    /// Returns `true` when a rebalance is due on `day`.
    #[inline]
    pub fn is_rebalance_day(&self, day: usize) -> bool {
        day % self.interval() == 0
    }
}

impl FromStr for HedgeFrequency {
    type Err = PricingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "daily" | "d" => Ok(HedgeFrequency::Daily),
            "weekly" | "w" => Ok(HedgeFrequency::Weekly),
            "monthly" | "m" => Ok(HedgeFrequency::Monthly),
            other => Err(PricingError::invalid(
                "hedge_frequency",
                format!("unknown frequency '{}', expected daily, weekly or monthly", other),
            )),
        }
    }
}

impl fmt::Display for HedgeFrequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HedgeFrequency::Daily => write!(f, "daily"),
            HedgeFrequency::Weekly => write!(f, "weekly"),
            HedgeFrequency::Monthly => write!(f, "monthly"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rebalance_days() {
        let daily: Vec<usize> = (0..10).filter(|d| HedgeFrequency::Daily.is_rebalance_day(*d)).collect();
        assert_eq!(daily.len(), 10);

        let monthly: Vec<usize> = (0..=90)
            .filter(|d| HedgeFrequency::Monthly.is_rebalance_day(*d))
            .collect();
        assert_eq!(monthly, vec![0, 30, 60, 90]);
    }

    #[test]
    fn test_parse_and_display() {
        for f in [HedgeFrequency::Daily, HedgeFrequency::Weekly, HedgeFrequency::Monthly] {
            assert_eq!(f.to_string().parse::<HedgeFrequency>().unwrap(), f);
        }
        assert_eq!(" MONTHLY ".parse::<HedgeFrequency>().unwrap(), HedgeFrequency::Monthly);
        assert!("hourly".parse::<HedgeFrequency>().unwrap_err().is_invalid_parameter());
    }
}
