//! Average True Range (ATR).
//!
//! True range: max(high - low, |high - prev_close|, |low - prev_close|).
//! ATR is the Wilder moving average of the true range, seeded with the SMA
//! of the first `period` true ranges. First defined value at index `period`.

use crate::domain::Bar;

pub fn true_range(bars: &[Bar]) -> Vec<f64> {
    bars.iter()
        .enumerate()
        .map(|(i, bar)| {
            if i == 0 {
                bar.high - bar.low
            } else {
                let prev_close = bars[i - 1].close;
                (bar.high - bar.low)
                    .max((bar.high - prev_close).abs())
                    .max((bar.low - prev_close).abs())
            }
        })
        .collect()
}

pub fn atr(bars: &[Bar], period: usize) -> Vec<f64> {
    let n = bars.len();
    let mut result = vec![f64::NAN; n];
    if period == 0 || n < period + 1 {
        return result;
    }

    let tr = true_range(bars);

    // Seed from tr[1..=period]; tr[0] has no previous close.
    let seed = tr[1..=period].iter().sum::<f64>() / period as f64;
    result[period] = seed;

    let mut prev = seed;
    for i in (period + 1)..n {
        prev = (prev * (period as f64 - 1.0) + tr[i]) / period as f64;
        result[i] = prev;
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::{assert_approx, make_bars};

    #[test]
    fn true_range_covers_gaps() {
        let mut bars = make_bars(&[100.0, 100.0, 100.0]);
        // Gap up: previous close far below today's low.
        bars[2].low = 110.0;
        bars[2].high = 112.0;
        bars[2].close = 111.0;
        let tr = true_range(&bars);
        assert_approx(tr[2], 12.0, 1e-12);
    }

    #[test]
    fn atr_positive_after_warmup() {
        let closes: Vec<f64> = (0..30).map(|i| 100.0 + (i as f64).sin() * 3.0).collect();
        let bars = make_bars(&closes);
        let out = atr(&bars, 14);
        assert!(out[13].is_nan());
        for v in out.iter().skip(14) {
            assert!(*v > 0.0);
        }
    }

    #[test]
    fn constant_range_converges_to_range() {
        // make_bars gives every bar a high-low span of 2.0 for flat closes.
        let bars = make_bars(&[100.0; 40]);
        let out = atr(&bars, 14);
        assert_approx(*out.last().unwrap(), 2.0, 1e-9);
    }
}
