//! Custom derived features: daily changes, candle geometry, and rolling
//! support/resistance distances.

use super::rolling::{rolling_max, rolling_min};
use crate::domain::Bar;

#[derive(Debug, Clone)]
pub struct DerivedFeatures {
    pub high_low_pct: Vec<f64>,
    pub open_close_pct: Vec<f64>,
    pub support: Vec<f64>,
    pub resistance: Vec<f64>,
    pub dist_support: Vec<f64>,
    pub dist_resistance: Vec<f64>,
}

/// Compute candle-geometry and support/resistance features.
///
/// Support = rolling min of lows, resistance = rolling max of highs, both
/// over `window` bars; distances are normalized by the close.
pub fn derived_features(bars: &[Bar], window: usize) -> DerivedFeatures {
    let n = bars.len();
    let lows: Vec<f64> = bars.iter().map(|b| b.low).collect();
    let highs: Vec<f64> = bars.iter().map(|b| b.high).collect();

    let support = rolling_min(&lows, window);
    let resistance = rolling_max(&highs, window);

    let mut high_low_pct = vec![f64::NAN; n];
    let mut open_close_pct = vec![f64::NAN; n];
    let mut dist_support = vec![f64::NAN; n];
    let mut dist_resistance = vec![f64::NAN; n];

    for (i, bar) in bars.iter().enumerate() {
        if bar.close != 0.0 {
            high_low_pct[i] = (bar.high - bar.low) / bar.close;
            dist_support[i] = (bar.close - support[i]) / bar.close;
            dist_resistance[i] = (resistance[i] - bar.close) / bar.close;
        }
        if bar.open != 0.0 {
            open_close_pct[i] = (bar.close - bar.open) / bar.open;
        }
    }

    DerivedFeatures {
        high_low_pct,
        open_close_pct,
        support,
        resistance,
        dist_support,
        dist_resistance,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::{assert_approx, make_bars};

    #[test]
    fn candle_geometry() {
        let bars = make_bars(&[100.0, 110.0]);
        let out = derived_features(&bars, 2);
        // Bar 1: open 100, close 110, high 111, low 99.
        assert_approx(out.open_close_pct[1], 0.1, 1e-12);
        assert_approx(out.high_low_pct[1], 12.0 / 110.0, 1e-12);
    }

    #[test]
    fn support_resistance_track_extremes() {
        let bars = make_bars(&[100.0, 105.0, 95.0, 101.0]);
        let out = derived_features(&bars, 3);
        // Window over bars 1..=3: lows are 99, 94, 94 → support 94.
        assert_approx(out.support[3], 94.0, 1e-12);
        // Highs are 106, 106, 102 → resistance 106.
        assert_approx(out.resistance[3], 106.0, 1e-12);
        assert!(out.dist_support[3] > 0.0);
        assert!(out.dist_resistance[3] > 0.0);
    }

    #[test]
    fn warmup_rows_are_nan() {
        let bars = make_bars(&[100.0, 101.0, 102.0]);
        let out = derived_features(&bars, 3);
        assert!(out.support[1].is_nan());
        assert!(!out.support[2].is_nan());
        assert!(out.dist_support[1].is_nan());
    }
}
