//! Buy signals — the strategy evaluator's output.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Discrete signal strength. Rows without a signal are simply absent from
/// the [`SignalSet`]; `value()` maps back to the 0/1/2 wire encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SignalStrength {
    Buy,
    StrongBuy,
}

impl SignalStrength {
    pub fn value(self) -> u8 {
        match self {
            SignalStrength::Buy => 1,
            SignalStrength::StrongBuy => 2,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SignalStrength::Buy => "BUY",
            SignalStrength::StrongBuy => "STRONG_BUY",
        }
    }
}

/// One bar that fired a signal. References the series' date/close; the
/// series itself is not copied.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignalRow {
    pub date: NaiveDate,
    pub close: f64,
    pub strength: SignalStrength,
}

/// The subset of a series' rows with a signal, in date order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignalSet {
    pub ticker: String,
    pub rows: Vec<SignalRow>,
}

impl SignalSet {
    pub fn empty(ticker: impl Into<String>) -> Self {
        Self {
            ticker: ticker.into(),
            rows: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn strong_count(&self) -> usize {
        self.rows
            .iter()
            .filter(|r| r.strength == SignalStrength::StrongBuy)
            .count()
    }
}
