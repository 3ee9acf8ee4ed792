//! Bollinger Bands — SMA(close) +/- a standard-deviation multiplier.
//!
//! Five row-aligned outputs: lower, middle, upper, bandwidth, %B.
//! Uses sample stddev (ddof = 1); bandwidth = 100 * (upper - lower) / middle
//! and %B = (close - lower) / (upper - lower).

use super::rolling::{rolling_mean, rolling_std};

#[derive(Debug, Clone)]
pub struct BollingerBands {
    pub lower: Vec<f64>,
    pub middle: Vec<f64>,
    pub upper: Vec<f64>,
    pub bandwidth: Vec<f64>,
    pub percent_b: Vec<f64>,
}

pub fn bollinger(closes: &[f64], period: usize, multiplier: f64) -> BollingerBands {
    let middle = rolling_mean(closes, period);
    let std = rolling_std(closes, period);

    let n = closes.len();
    let mut lower = vec![f64::NAN; n];
    let mut upper = vec![f64::NAN; n];
    let mut bandwidth = vec![f64::NAN; n];
    let mut percent_b = vec![f64::NAN; n];

    for i in 0..n {
        if middle[i].is_nan() || std[i].is_nan() {
            continue;
        }
        lower[i] = middle[i] - multiplier * std[i];
        upper[i] = middle[i] + multiplier * std[i];
        if middle[i] != 0.0 {
            bandwidth[i] = 100.0 * (upper[i] - lower[i]) / middle[i];
        }
        let range = upper[i] - lower[i];
        if range != 0.0 {
            percent_b[i] = (closes[i] - lower[i]) / range;
        }
    }

    BollingerBands {
        lower,
        middle,
        upper,
        bandwidth,
        percent_b,
    }
}
