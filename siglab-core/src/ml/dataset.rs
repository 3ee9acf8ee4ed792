//! Training data preparation: labeling, feature selection, row filtering,
//! stratified splitting, and standardization.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use crate::domain::Series;
use crate::indicators::engine::col;

/// Candidate model features, in fixed order. Only columns actually present
/// on the series are used.
pub const CANDIDATE_FEATURES: [&str; 21] = [
    col::RSI_14,
    col::MACD,
    col::MACD_SIGNAL,
    col::MACD_HIST,
    col::STOCH_K,
    col::STOCH_D,
    col::WILLR_14,
    col::BB_LOWER,
    col::BB_MID,
    col::BB_UPPER,
    col::BB_BANDWIDTH,
    col::BB_PERCENT,
    col::ATR_14,
    col::AD,
    col::OBV,
    col::PRICE_CHANGE,
    col::VOLUME_CHANGE,
    col::HIGH_LOW_PCT,
    col::OPEN_CLOSE_PCT,
    col::DIST_SUPPORT,
    col::DIST_RESISTANCE,
];

/// Feature matrix (row-major) with a binary next-day-direction target.
#[derive(Debug, Clone)]
pub struct Dataset {
    pub feature_names: Vec<String>,
    pub x: Vec<Vec<f64>>,
    pub y: Vec<u8>,
}

impl Dataset {
    /// Build from an enriched series.
    ///
    /// `target[i] = 1` when `close[i+1] > close[i]`; the final row has no
    /// label and is excluded. Rows with an undefined value in any used
    /// feature are dropped.
    pub fn from_series(series: &Series) -> Option<Dataset> {
        let feature_names: Vec<String> = CANDIDATE_FEATURES
            .iter()
            .filter(|name| series.has_column(name))
            .map(|name| name.to_string())
            .collect();
        if feature_names.is_empty() {
            return None;
        }

        let columns: Vec<&[f64]> = feature_names
            .iter()
            .map(|name| series.column(name).expect("feature present"))
            .collect();
        let closes = series.closes();

        let mut x = Vec::new();
        let mut y = Vec::new();
        for i in 0..series.len().saturating_sub(1) {
            let row: Vec<f64> = columns.iter().map(|c| c[i]).collect();
            if row.iter().any(|v| !v.is_finite()) {
                continue;
            }
            x.push(row);
            y.push(u8::from(closes[i + 1] > closes[i]));
        }

        Some(Dataset {
            feature_names,
            x,
            y,
        })
    }

    pub fn len(&self) -> usize {
        self.y.len()
    }

    pub fn is_empty(&self) -> bool {
        self.y.is_empty()
    }

    pub fn feature_count(&self) -> usize {
        self.feature_names.len()
    }
}

/// A stratified train/test partition.
#[derive(Debug, Clone)]
pub struct TrainTestSplit {
    pub x_train: Vec<Vec<f64>>,
    pub y_train: Vec<u8>,
    pub x_test: Vec<Vec<f64>>,
    pub y_test: Vec<u8>,
}

/// Stratified split: each class is shuffled and divided separately so the
/// test set preserves the full set's class balance within rounding.
pub fn stratified_split(dataset: &Dataset, test_fraction: f64, seed: u64) -> TrainTestSplit {
    let mut rng = StdRng::seed_from_u64(seed);

    let mut split = TrainTestSplit {
        x_train: Vec::new(),
        y_train: Vec::new(),
        x_test: Vec::new(),
        y_test: Vec::new(),
    };

    for class in [0u8, 1u8] {
        let mut indices: Vec<usize> = (0..dataset.len())
            .filter(|&i| dataset.y[i] == class)
            .collect();
        if indices.is_empty() {
            continue;
        }
        indices.shuffle(&mut rng);

        let mut n_test = (test_fraction * indices.len() as f64).round() as usize;
        // Keep at least one row per class on each side where possible.
        if indices.len() >= 2 {
            n_test = n_test.clamp(1, indices.len() - 1);
        } else {
            n_test = 0;
        }

        for (pos, &i) in indices.iter().enumerate() {
            if pos < n_test {
                split.x_test.push(dataset.x[i].clone());
                split.y_test.push(class);
            } else {
                split.x_train.push(dataset.x[i].clone());
                split.y_train.push(class);
            }
        }
    }

    split
}

/// Zero-mean unit-variance scaler, fit on training rows only.
#[derive(Debug, Clone)]
pub struct StandardScaler {
    means: Vec<f64>,
    stds: Vec<f64>,
}

impl StandardScaler {
    pub fn fit(rows: &[Vec<f64>]) -> StandardScaler {
        let n_features = rows.first().map_or(0, Vec::len);
        let n = rows.len() as f64;
        let mut means = vec![0.0; n_features];
        for row in rows {
            for (m, v) in means.iter_mut().zip(row) {
                *m += v;
            }
        }
        for m in &mut means {
            *m /= n;
        }

        let mut stds = vec![0.0; n_features];
        for row in rows {
            for (s, (v, m)) in stds.iter_mut().zip(row.iter().zip(&means)) {
                *s += (v - m).powi(2);
            }
        }
        for s in &mut stds {
            *s = (*s / n).sqrt();
            // Constant features pass through unscaled.
            if *s == 0.0 {
                *s = 1.0;
            }
        }

        StandardScaler { means, stds }
    }

    pub fn transform(&self, rows: &[Vec<f64>]) -> Vec<Vec<f64>> {
        rows.iter()
            .map(|row| {
                row.iter()
                    .zip(self.means.iter().zip(&self.stds))
                    .map(|(v, (m, s))| (v - m) / s)
                    .collect()
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Bar;
    use chrono::NaiveDate;

    fn labeled_series(closes: &[f64], features: &[(&str, Vec<f64>)]) -> Series {
        let base = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
        let bars: Vec<Bar> = closes
            .iter()
            .enumerate()
            .map(|(i, &c)| Bar {
                date: base + chrono::Duration::days(i as i64),
                open: c,
                high: c + 1.0,
                low: c - 1.0,
                close: c,
                volume: 1000,
            })
            .collect();
        let mut s = Series::new("TEST", bars);
        for (name, values) in features {
            s.insert_column(*name, values.clone());
        }
        s
    }

    #[test]
    fn target_is_next_day_direction() {
        let closes = [100.0, 101.0, 99.0, 102.0];
        let s = labeled_series(&closes, &[(col::RSI_14, vec![50.0; 4])]);
        let ds = Dataset::from_series(&s).unwrap();
        // Final row excluded: 3 labeled rows.
        assert_eq!(ds.len(), 3);
        assert_eq!(ds.y, vec![1, 0, 1]);
    }

    #[test]
    fn nan_feature_rows_are_dropped() {
        let closes = [100.0, 101.0, 99.0, 102.0];
        let mut rsi = vec![50.0; 4];
        rsi[1] = f64::NAN;
        let s = labeled_series(&closes, &[(col::RSI_14, rsi)]);
        let ds = Dataset::from_series(&s).unwrap();
        assert_eq!(ds.len(), 2);
    }

    #[test]
    fn only_present_candidates_are_used() {
        let closes = [100.0, 101.0, 99.0];
        let s = labeled_series(
            &closes,
            &[
                (col::RSI_14, vec![50.0; 3]),
                (col::MACD, vec![0.1; 3]),
                ("unrelated", vec![9.0; 3]),
            ],
        );
        let ds = Dataset::from_series(&s).unwrap();
        assert_eq!(ds.feature_names, vec![col::RSI_14, col::MACD]);
    }

    fn balanced_dataset(n: usize) -> Dataset {
        Dataset {
            feature_names: vec!["f".into()],
            x: (0..n).map(|i| vec![i as f64]).collect(),
            y: (0..n).map(|i| (i % 2) as u8).collect(),
        }
    }

    #[test]
    fn split_sizes_match_fraction_within_rounding() {
        let ds = balanced_dataset(100);
        let split = stratified_split(&ds, 0.3, 42);
        assert_eq!(split.y_test.len(), 30);
        assert_eq!(split.y_train.len(), 70);
    }

    #[test]
    fn split_preserves_class_balance() {
        let ds = balanced_dataset(100);
        let split = stratified_split(&ds, 0.3, 42);
        let test_pos = split.y_test.iter().filter(|&&y| y == 1).count();
        let train_pos = split.y_train.iter().filter(|&&y| y == 1).count();
        assert_eq!(test_pos, 15);
        assert_eq!(train_pos, 35);
    }

    #[test]
    fn split_is_reproducible() {
        let ds = balanced_dataset(50);
        let a = stratified_split(&ds, 0.3, 42);
        let b = stratified_split(&ds, 0.3, 42);
        assert_eq!(a.x_test, b.x_test);
        assert_eq!(a.y_train, b.y_train);
    }

    #[test]
    fn scaler_standardizes_train_and_reuses_stats_on_test() {
        let train = vec![vec![1.0], vec![3.0]];
        let scaler = StandardScaler::fit(&train);
        let scaled = scaler.transform(&train);
        assert!((scaled[0][0] + 1.0).abs() < 1e-12);
        assert!((scaled[1][0] - 1.0).abs() < 1e-12);
        // Test rows use the training mean/std, not their own.
        let test = scaler.transform(&[vec![2.0]]);
        assert!(test[0][0].abs() < 1e-12);
    }

    #[test]
    fn scaler_leaves_constant_features_finite() {
        let train = vec![vec![5.0], vec![5.0]];
        let scaler = StandardScaler::fit(&train);
        let out = scaler.transform(&train);
        assert!(out[0][0].is_finite());
    }
}
