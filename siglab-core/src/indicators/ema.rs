//! Exponential Moving Average (EMA).
//!
//! Recursive: EMA[t] = alpha * value[t] + (1 - alpha) * EMA[t-1], with
//! alpha = 2 / (period + 1). Seeded with the SMA of the first full window.
//! Leading NaNs in the input (a derived series such as the MACD line) shift
//! the seed window forward; a NaN after the seed taints the rest.

/// EMA over an arbitrary value series.
pub fn ema(values: &[f64], period: usize) -> Vec<f64> {
    let n = values.len();
    let mut result = vec![f64::NAN; n];
    if period == 0 {
        return result;
    }

    let start = match values.iter().position(|v| !v.is_nan()) {
        Some(s) => s,
        None => return result,
    };
    if n - start < period {
        return result;
    }

    let alpha = 2.0 / (period as f64 + 1.0);

    let seed_window = &values[start..start + period];
    if seed_window.iter().any(|v| v.is_nan()) {
        return result;
    }
    let seed = seed_window.iter().sum::<f64>() / period as f64;
    let seed_idx = start + period - 1;
    result[seed_idx] = seed;

    let mut prev = seed;
    for i in (seed_idx + 1)..n {
        if values[i].is_nan() {
            break;
        }
        prev = alpha * values[i] + (1.0 - alpha) * prev;
        result[i] = prev;
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::assert_approx;

    #[test]
    fn seeds_with_sma() {
        let out = ema(&[1.0, 2.0, 3.0, 4.0], 3);
        assert!(out[0].is_nan());
        assert!(out[1].is_nan());
        assert_approx(out[2], 2.0, 1e-12);
        // alpha = 0.5: 0.5*4 + 0.5*2 = 3
        assert_approx(out[3], 3.0, 1e-12);
    }

    #[test]
    fn leading_nans_shift_the_seed() {
        let out = ema(&[f64::NAN, f64::NAN, 1.0, 2.0, 3.0, 4.0], 3);
        assert!(out[3].is_nan());
        assert_approx(out[4], 2.0, 1e-12);
        assert_approx(out[5], 3.0, 1e-12);
    }

    #[test]
    fn short_input_all_nan() {
        assert!(ema(&[1.0, 2.0], 3).iter().all(|v| v.is_nan()));
    }

    #[test]
    fn nan_after_seed_taints_remainder() {
        let out = ema(&[1.0, 2.0, 3.0, f64::NAN, 5.0], 3);
        assert_approx(out[2], 2.0, 1e-12);
        assert!(out[3].is_nan());
        assert!(out[4].is_nan());
    }
}
