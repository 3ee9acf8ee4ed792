//! Chart artifact export.
//!
//! Writes one CSV per ticker with OHLCV, the key overlay columns, and a
//! signal-marker column, ready for an external plotter. Purely
//! presentational; nothing downstream reads these files back.

use std::path::{Path, PathBuf};

use thiserror::Error;

use siglab_core::domain::{Series, SignalSet};
use siglab_core::indicators::engine::col;

#[derive(Debug, Error)]
pub enum ChartError {
    #[error("failed to create output directory: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to write chart csv: {0}")]
    Csv(#[from] csv::Error),
}

/// Overlay columns included in the artifact, in header order.
const OVERLAYS: [&str; 7] = [
    col::SMA_20,
    col::SMA_50,
    col::BB_UPPER,
    col::BB_LOWER,
    col::RSI_14,
    col::MACD,
    col::MACD_SIGNAL,
];

/// Write the chart CSV for a series and its signals.
///
/// Returns the artifact path, or `None` for an empty series (nothing to
/// plot). Overlay cells are blank where the series lacks the column.
pub fn render_chart(
    series: &Series,
    signals: &SignalSet,
    out_dir: &Path,
) -> Result<Option<PathBuf>, ChartError> {
    if series.is_empty() {
        return Ok(None);
    }

    std::fs::create_dir_all(out_dir)?;
    let path = out_dir.join(format!("{}_chart.csv", series.ticker()));
    let mut writer = csv::Writer::from_path(&path)?;

    let mut header = vec!["date", "open", "high", "low", "close", "volume"];
    header.extend_from_slice(&OVERLAYS);
    header.push("signal");
    writer.write_record(&header)?;

    let overlays: Vec<Option<&[f64]>> = OVERLAYS.iter().map(|name| series.column(name)).collect();

    for (i, bar) in series.bars().iter().enumerate() {
        let mut record = vec![
            bar.date.to_string(),
            format_cell(bar.open),
            format_cell(bar.high),
            format_cell(bar.low),
            format_cell(bar.close),
            bar.volume.to_string(),
        ];
        for column in &overlays {
            record.push(match column {
                Some(values) => format_cell(values[i]),
                None => String::new(),
            });
        }
        let marker = signals
            .rows
            .iter()
            .find(|row| row.date == bar.date)
            .map(|row| row.strength.label())
            .unwrap_or("");
        record.push(marker.to_string());
        writer.write_record(&record)?;
    }

    writer.flush()?;
    Ok(Some(path))
}

fn format_cell(value: f64) -> String {
    if value.is_finite() {
        format!("{value:.4}")
    } else {
        String::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use siglab_core::domain::{Bar, SignalRow, SignalStrength};

    fn sample_series(n: usize) -> Series {
        let base = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
        let bars: Vec<Bar> = (0..n)
            .map(|i| {
                let c = 100.0 + i as f64;
                Bar {
                    date: base + chrono::Duration::days(i as i64),
                    open: c,
                    high: c + 1.0,
                    low: c - 1.0,
                    close: c,
                    volume: 1000,
                }
            })
            .collect();
        let mut s = Series::new("TEST.NS", bars);
        s.insert_column(col::SMA_20, vec![99.5; n]);
        s
    }

    #[test]
    fn empty_series_produces_no_artifact() {
        let dir = tempfile::tempdir().unwrap();
        let series = Series::new("EMPTY", Vec::new());
        let signals = SignalSet::empty("EMPTY");
        let path = render_chart(&series, &signals, dir.path()).unwrap();
        assert!(path.is_none());
    }

    #[test]
    fn artifact_has_one_row_per_bar_and_signal_markers() {
        let dir = tempfile::tempdir().unwrap();
        let series = sample_series(5);
        let mut signals = SignalSet::empty("TEST.NS");
        signals.rows.push(SignalRow {
            date: NaiveDate::from_ymd_opt(2024, 1, 4).unwrap(),
            close: 102.0,
            strength: SignalStrength::StrongBuy,
        });

        let path = render_chart(&series, &signals, dir.path())
            .unwrap()
            .unwrap();
        assert!(path.ends_with("TEST.NS_chart.csv"));

        let text = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 6);
        assert!(lines[0].starts_with("date,open,high,low,close,volume,sma_20"));
        assert!(lines[3].ends_with("STRONG_BUY"));
        // Missing overlay columns come out blank, not zero.
        assert!(lines[1].contains(",,"));
    }
}
