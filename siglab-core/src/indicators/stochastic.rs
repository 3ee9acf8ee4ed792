//! Stochastic oscillator (%K, %D).
//!
//! raw %K = 100 * (close - LL(k)) / (HH(k) - LL(k))
//! %K = SMA(raw, smooth_k), %D = SMA(%K, d_period).
//! A flat window (HH == LL) yields NaN for that row.

use super::rolling::{rolling_max, rolling_mean, rolling_min};
use crate::domain::Bar;

#[derive(Debug, Clone)]
pub struct Stochastic {
    pub k: Vec<f64>,
    pub d: Vec<f64>,
}

pub fn stochastic(bars: &[Bar], k_period: usize, smooth_k: usize, d_period: usize) -> Stochastic {
    let highs: Vec<f64> = bars.iter().map(|b| b.high).collect();
    let lows: Vec<f64> = bars.iter().map(|b| b.low).collect();

    let highest = rolling_max(&highs, k_period);
    let lowest = rolling_min(&lows, k_period);

    let mut raw = vec![f64::NAN; bars.len()];
    for (i, bar) in bars.iter().enumerate() {
        let range = highest[i] - lowest[i];
        if range.is_nan() || range == 0.0 {
            continue;
        }
        raw[i] = 100.0 * (bar.close - lowest[i]) / range;
    }

    let k = rolling_mean(&raw, smooth_k);
    let d = rolling_mean(&k, d_period);

    Stochastic { k, d }
}
