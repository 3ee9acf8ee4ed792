//! Quote provider trait and structured data errors.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::Bar;

/// Fetch window. Each period maps to a fixed daily bar count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Period {
    #[serde(rename = "3mo")]
    ThreeMonths,
    #[default]
    #[serde(rename = "6mo")]
    SixMonths,
    #[serde(rename = "1y")]
    OneYear,
}

impl Period {
    /// Number of daily bars a synthetic series of this period contains.
    pub fn bar_count(self) -> usize {
        match self {
            Period::ThreeMonths => 65,
            Period::SixMonths => 130,
            Period::OneYear => 260,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Period::ThreeMonths => "3mo",
            Period::SixMonths => "6mo",
            Period::OneYear => "1y",
        }
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Period {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "3mo" => Ok(Period::ThreeMonths),
            "6mo" => Ok(Period::SixMonths),
            "1y" => Ok(Period::OneYear),
            other => Err(format!("unknown period '{other}' (expected 3mo, 6mo or 1y)")),
        }
    }
}

/// Structured errors for data operations.
///
/// `Unavailable` is internal to the live path — `fetch()` consumes it and
/// falls back to synthetic data, so callers only ever see `Fatal`.
#[derive(Debug, Error)]
pub enum DataError {
    #[error("no data available for '{ticker}': {reason}")]
    Unavailable { ticker: String, reason: String },

    #[error("fatal data configuration error: {0}")]
    Fatal(String),
}

/// Trait for live quote providers, mockable in tests.
pub trait QuoteProvider: Send + Sync {
    /// Human-readable name of this provider.
    fn name(&self) -> &str;

    /// Fetch daily OHLCV bars for a ticker over a trailing period.
    fn fetch_daily(&self, ticker: &str, period: Period, interval: &str)
        -> Result<Vec<Bar>, DataError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn period_parses_and_displays() {
        assert_eq!("6mo".parse::<Period>().unwrap(), Period::SixMonths);
        assert_eq!(Period::OneYear.to_string(), "1y");
        assert!("2w".parse::<Period>().is_err());
    }

    #[test]
    fn period_bar_counts() {
        assert_eq!(Period::ThreeMonths.bar_count(), 65);
        assert_eq!(Period::SixMonths.bar_count(), 130);
        assert_eq!(Period::OneYear.bar_count(), 260);
    }
}
