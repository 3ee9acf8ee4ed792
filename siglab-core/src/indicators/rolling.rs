//! Rolling-window primitives shared by the indicator modules.
//!
//! All functions return a vector the same length as the input with NaN for
//! warm-up rows; a NaN anywhere in a window makes that window's output NaN.

/// Rolling arithmetic mean.
pub fn rolling_mean(values: &[f64], period: usize) -> Vec<f64> {
    rolling_apply(values, period, |window| {
        window.iter().sum::<f64>() / window.len() as f64
    })
}

/// Rolling sample standard deviation (ddof = 1).
pub fn rolling_std(values: &[f64], period: usize) -> Vec<f64> {
    rolling_apply(values, period, |window| {
        if window.len() < 2 {
            return f64::NAN;
        }
        let mean = window.iter().sum::<f64>() / window.len() as f64;
        let var = window.iter().map(|v| (v - mean).powi(2)).sum::<f64>()
            / (window.len() - 1) as f64;
        var.sqrt()
    })
}

/// Rolling minimum.
pub fn rolling_min(values: &[f64], period: usize) -> Vec<f64> {
    rolling_apply(values, period, |window| {
        window.iter().copied().fold(f64::INFINITY, f64::min)
    })
}

/// Rolling maximum.
pub fn rolling_max(values: &[f64], period: usize) -> Vec<f64> {
    rolling_apply(values, period, |window| {
        window.iter().copied().fold(f64::NEG_INFINITY, f64::max)
    })
}

/// Fractional change from the previous value. First row is NaN.
pub fn pct_change(values: &[f64]) -> Vec<f64> {
    let mut out = vec![f64::NAN; values.len()];
    for i in 1..values.len() {
        out[i] = (values[i] - values[i - 1]) / values[i - 1];
    }
    out
}

fn rolling_apply(values: &[f64], period: usize, f: impl Fn(&[f64]) -> f64) -> Vec<f64> {
    let n = values.len();
    let mut out = vec![f64::NAN; n];
    if period == 0 || n < period {
        return out;
    }
    for i in (period - 1)..n {
        let window = &values[i + 1 - period..=i];
        if window.iter().any(|v| v.is_nan()) {
            continue;
        }
        out[i] = f(window);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::assert_approx;

    #[test]
    fn mean_basic() {
        let out = rolling_mean(&[1.0, 2.0, 3.0, 4.0], 2);
        assert!(out[0].is_nan());
        assert_approx(out[1], 1.5, 1e-12);
        assert_approx(out[3], 3.5, 1e-12);
    }

    #[test]
    fn nan_in_window_poisons_only_that_window() {
        let out = rolling_mean(&[1.0, f64::NAN, 3.0, 4.0], 2);
        assert!(out[1].is_nan());
        assert!(out[2].is_nan());
        assert_approx(out[3], 3.5, 1e-12);
    }

    #[test]
    fn std_is_sample_std() {
        // [1, 2, 3]: mean 2, sample variance ((1)+(0)+(1))/2 = 1
        let out = rolling_std(&[1.0, 2.0, 3.0], 3);
        assert_approx(out[2], 1.0, 1e-12);
    }

    #[test]
    fn min_max_track_window() {
        let values = [5.0, 1.0, 4.0, 2.0];
        assert_approx(rolling_min(&values, 3)[2], 1.0, 1e-12);
        assert_approx(rolling_max(&values, 3)[3], 4.0, 1e-12);
    }

    #[test]
    fn pct_change_first_is_nan() {
        let out = pct_change(&[100.0, 110.0, 99.0]);
        assert!(out[0].is_nan());
        assert_approx(out[1], 0.1, 1e-12);
        assert_approx(out[2], -0.1, 1e-12);
    }

    #[test]
    fn short_input_all_nan() {
        assert!(rolling_mean(&[1.0], 5).iter().all(|v| v.is_nan()));
    }
}
