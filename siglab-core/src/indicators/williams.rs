//! Williams %R.
//!
//! %R = -100 * (HH(period) - close) / (HH(period) - LL(period)), in [-100, 0].

use super::rolling::{rolling_max, rolling_min};
use crate::domain::Bar;

pub fn williams_r(bars: &[Bar], period: usize) -> Vec<f64> {
    let highs: Vec<f64> = bars.iter().map(|b| b.high).collect();
    let lows: Vec<f64> = bars.iter().map(|b| b.low).collect();

    let highest = rolling_max(&highs, period);
    let lowest = rolling_min(&lows, period);

    let mut out = vec![f64::NAN; bars.len()];
    for (i, bar) in bars.iter().enumerate() {
        let range = highest[i] - lowest[i];
        if range.is_nan() || range == 0.0 {
            continue;
        }
        out[i] = -100.0 * (highest[i] - bar.close) / range;
    }
    out
}
