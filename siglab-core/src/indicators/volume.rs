//! Volume-based indicators: Accumulation/Distribution and On-Balance Volume.
//!
//! Both are cumulative and defined from the first row (no warm-up).

use crate::domain::Bar;

/// Accumulation/Distribution line.
///
/// Money-flow multiplier ((close-low) - (high-close)) / (high-low), zero for
/// a flat bar, times volume, accumulated.
pub fn accumulation_distribution(bars: &[Bar]) -> Vec<f64> {
    let mut out = Vec::with_capacity(bars.len());
    let mut acc = 0.0;
    for bar in bars {
        let range = bar.high - bar.low;
        let multiplier = if range == 0.0 {
            0.0
        } else {
            ((bar.close - bar.low) - (bar.high - bar.close)) / range
        };
        acc += multiplier * bar.volume as f64;
        out.push(acc);
    }
    out
}

/// On-Balance Volume: running volume total signed by the close-to-close move.
pub fn on_balance_volume(bars: &[Bar]) -> Vec<f64> {
    let mut out = Vec::with_capacity(bars.len());
    let mut obv = 0.0;
    for (i, bar) in bars.iter().enumerate() {
        if i == 0 {
            obv = bar.volume as f64;
        } else if bar.close > bars[i - 1].close {
            obv += bar.volume as f64;
        } else if bar.close < bars[i - 1].close {
            obv -= bar.volume as f64;
        }
        out.push(obv);
    }
    out
}
