//! Technical indicator computations.
//!
//! Each module computes one indicator family as a `Vec<f64>` aligned with
//! the input rows, with `f64::NAN` during the warm-up window. The
//! [`engine`] module assembles all columns onto a [`crate::domain::Series`]
//! and applies the final drop-any-NaN-row trim.

pub mod atr;
pub mod bollinger;
pub mod ema;
pub mod engine;
pub mod features;
pub mod macd;
pub mod rolling;
pub mod rsi;
pub mod stochastic;
pub mod volume;
pub mod williams;

pub use engine::{enrich, IndicatorError};

/// Create synthetic bars from close prices for testing.
///
/// Open = previous close (or close for the first bar), high/low bracket the
/// body by 1.0, volume = 1000.
#[cfg(test)]
pub fn make_bars(closes: &[f64]) -> Vec<crate::domain::Bar> {
    use crate::domain::Bar;
    let base_date = chrono::NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
    closes
        .iter()
        .enumerate()
        .map(|(i, &close)| {
            let open = if i == 0 { close } else { closes[i - 1] };
            let high = open.max(close) + 1.0;
            let low = open.min(close) - 1.0;
            Bar {
                date: base_date + chrono::Duration::days(i as i64),
                open,
                high,
                low,
                close,
                volume: 1000,
            }
        })
        .collect()
}

/// Assert two f64 values are approximately equal (within epsilon).
#[cfg(test)]
pub fn assert_approx(actual: f64, expected: f64, epsilon: f64) {
    assert!(
        (actual - expected).abs() < epsilon,
        "assert_approx failed: actual={actual}, expected={expected}, diff={}, epsilon={epsilon}",
        (actual - expected).abs()
    );
}
