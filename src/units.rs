//! Time units for arrival and service rates.
//!
//! All model formulas work in per-hour rates. Rates entered per minute are
//! normalized before validation.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Minutes per hour.
pub const MINUTES_PER_HOUR: f64 = 60.0;

/// Time base a rate is expressed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RateUnit {
    /// Events per hour (the model's native unit).
    #[default]
    PerHour,
    /// Events per minute.
    PerMinute,
}

impl RateUnit {
    /// Convert a rate in this unit to events per hour.
    #[must_use]
    pub fn to_per_hour(self, rate: f64) -> f64 {
        match self {
            Self::PerHour => rate,
            Self::PerMinute => rate * MINUTES_PER_HOUR,
        }
    }

    /// Convert a per-hour rate into this unit.
    #[must_use]
    pub fn from_per_hour(self, rate: f64) -> f64 {
        match self {
            Self::PerHour => rate,
            Self::PerMinute => rate / MINUTES_PER_HOUR,
        }
    }

    /// Short suffix for display.
    #[must_use]
    pub const fn suffix(self) -> &'static str {
        match self {
            Self::PerHour => "/h",
            Self::PerMinute => "/min",
        }
    }
}

impl fmt::Display for RateUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PerHour => write!(f, "per hour"),
            Self::PerMinute => write!(f, "per minute"),
        }
    }
}

/// A rate tagged with its unit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rate {
    /// Numeric value in `unit`.
    pub value: f64,
    /// Time base of `value`.
    #[serde(default)]
    pub unit: RateUnit,
}

impl Rate {
    /// Rate in events per hour.
    #[must_use]
    pub const fn per_hour(value: f64) -> Self {
        Self {
            value,
            unit: RateUnit::PerHour,
        }
    }

    /// Rate in events per minute.
    #[must_use]
    pub const fn per_minute(value: f64) -> Self {
        Self {
            value,
            unit: RateUnit::PerMinute,
        }
    }

    /// Normalized value in events per hour.
    #[must_use]
    pub fn as_per_hour(self) -> f64 {
        self.unit.to_per_hour(self.value)
    }
}

impl fmt::Display for Rate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.value, self.unit.suffix())
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Converting to per-hour and back recovers the original rate.
        #[test]
        fn prop_minute_conversion_inverts(rate in 1e-6f64..1e6) {
            let back = RateUnit::PerMinute.from_per_hour(RateUnit::PerMinute.to_per_hour(rate));
            prop_assert!((back - rate).abs() <= rate * 1e-12);
        }
    }
}
