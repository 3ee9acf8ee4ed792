//! Series — an ordered bar sequence plus named derived columns.
//!
//! Columns are always aligned 1:1 with the bars. Indicator computation only
//! appends (or overwrites) columns; rows are removed in one place, the
//! indicator engine's warm-up trim, which drops bars and column values
//! together so alignment can never drift.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::Bar;

/// One ticker's OHLCV series with a growing set of named derived columns.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Series {
    ticker: String,
    bars: Vec<Bar>,
    columns: BTreeMap<String, Vec<f64>>,
}

impl Series {
    pub fn new(ticker: impl Into<String>, bars: Vec<Bar>) -> Self {
        Self {
            ticker: ticker.into(),
            bars,
            columns: BTreeMap::new(),
        }
    }

    pub fn ticker(&self) -> &str {
        &self.ticker
    }

    pub fn bars(&self) -> &[Bar] {
        &self.bars
    }

    /// Number of rows (bars).
    pub fn len(&self) -> usize {
        self.bars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    /// Insert (or overwrite) a named column.
    ///
    /// # Panics
    /// Panics if `values.len()` differs from the bar count — a misaligned
    /// column is a programming error, not a data condition.
    pub fn insert_column(&mut self, name: impl Into<String>, values: Vec<f64>) {
        assert_eq!(
            values.len(),
            self.bars.len(),
            "column length must match bar count"
        );
        self.columns.insert(name.into(), values);
    }

    pub fn column(&self, name: &str) -> Option<&[f64]> {
        self.columns.get(name).map(|v| v.as_slice())
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.columns.contains_key(name)
    }

    /// Schema descriptor: names of all computed columns, sorted.
    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.keys().map(|s| s.as_str())
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Close prices as a vector (convenience for indicator inputs).
    pub fn closes(&self) -> Vec<f64> {
        self.bars.iter().map(|b| b.close).collect()
    }

    /// Volumes as f64 (rolling-mean inputs).
    pub fn volumes(&self) -> Vec<f64> {
        self.bars.iter().map(|b| b.volume as f64).collect()
    }

    /// Keep only the rows where `keep[i]` is true, dropping the bar and every
    /// column value for discarded rows.
    ///
    /// # Panics
    /// Panics if `keep.len()` differs from the bar count.
    pub fn retain_rows(&mut self, keep: &[bool]) {
        assert_eq!(keep.len(), self.bars.len(), "mask length must match bar count");
        let mut idx = 0;
        self.bars.retain(|_| {
            let k = keep[idx];
            idx += 1;
            k
        });
        for values in self.columns.values_mut() {
            let mut idx = 0;
            values.retain(|_| {
                let k = keep[idx];
                idx += 1;
                k
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn make_series(closes: &[f64]) -> Series {
        let base = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
        let bars = closes
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
        Series::new("TEST", bars)
    }

    #[test]
    fn insert_and_read_column() {
        let mut s = make_series(&[1.0, 2.0, 3.0]);
        s.insert_column("sma_2", vec![f64::NAN, 1.5, 2.5]);
        assert!(s.has_column("sma_2"));
        assert_eq!(s.column("sma_2").unwrap()[2], 2.5);
        assert_eq!(s.column_count(), 1);
    }

    #[test]
    #[should_panic(expected = "column length must match bar count")]
    fn misaligned_column_panics() {
        let mut s = make_series(&[1.0, 2.0, 3.0]);
        s.insert_column("bad", vec![1.0]);
    }

    #[test]
    fn retain_rows_keeps_alignment() {
        let mut s = make_series(&[1.0, 2.0, 3.0, 4.0]);
        s.insert_column("x", vec![10.0, 20.0, 30.0, 40.0]);
        s.retain_rows(&[false, true, false, true]);
        assert_eq!(s.len(), 2);
        assert_eq!(s.bars()[0].close, 2.0);
        assert_eq!(s.column("x").unwrap(), &[20.0, 40.0]);
    }

    #[test]
    fn overwrite_replaces_column() {
        let mut s = make_series(&[1.0, 2.0]);
        s.insert_column("x", vec![1.0, 1.0]);
        s.insert_column("x", vec![2.0, 2.0]);
        assert_eq!(s.column("x").unwrap(), &[2.0, 2.0]);
        assert_eq!(s.column_count(), 1);
    }
}
