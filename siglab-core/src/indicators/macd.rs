//! MACD — Moving Average Convergence/Divergence.
//!
//! line = EMA(close, fast) - EMA(close, slow)
//! signal = EMA(line, signal_period)
//! histogram = line - signal

use super::ema::ema;

/// MACD line, signal line, and histogram, all row-aligned with the input.
#[derive(Debug, Clone)]
pub struct Macd {
    pub line: Vec<f64>,
    pub signal: Vec<f64>,
    pub histogram: Vec<f64>,
}

pub fn macd(closes: &[f64], fast: usize, slow: usize, signal_period: usize) -> Macd {
    let fast_ema = ema(closes, fast);
    let slow_ema = ema(closes, slow);

    let line: Vec<f64> = fast_ema
        .iter()
        .zip(&slow_ema)
        .map(|(f, s)| f - s)
        .collect();
    let signal = ema(&line, signal_period);
    let histogram: Vec<f64> = line.iter().zip(&signal).map(|(l, s)| l - s).collect();

    Macd {
        line,
        signal,
        histogram,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::assert_approx;

    #[test]
    fn warmup_lengths() {
        let closes: Vec<f64> = (0..60).map(|i| 100.0 + i as f64).collect();
        let out = macd(&closes, 12, 26, 9);
        // Line defined from slow EMA seed (index 25); signal needs 9 line
        // values, first defined at 25 + 9 - 1 = 33.
        assert!(out.line[24].is_nan());
        assert!(!out.line[25].is_nan());
        assert!(out.signal[32].is_nan());
        assert!(!out.signal[33].is_nan());
        assert!(!out.histogram[33].is_nan());
    }

    #[test]
    fn histogram_is_line_minus_signal() {
        let closes: Vec<f64> = (0..60).map(|i| 100.0 + (i as f64 * 0.7).sin()).collect();
        let out = macd(&closes, 12, 26, 9);
        for i in 33..closes.len() {
            assert_approx(out.histogram[i], out.line[i] - out.signal[i], 1e-12);
        }
    }

    #[test]
    fn steady_uptrend_has_positive_line() {
        let closes: Vec<f64> = (0..60).map(|i| 100.0 * 1.01f64.powi(i)).collect();
        let out = macd(&closes, 12, 26, 9);
        assert!(out.line[40] > 0.0);
    }
}
