//! Indicator engine: compute every column, then trim warm-up rows.
//!
//! Column order and parameters are fixed; the output series is shorter than
//! the input by the longest warm-up (49 rows for sma_50 on a clean input)
//! because any row with an undefined value in any column is dropped.

use thiserror::Error;

use super::atr::atr;
use super::bollinger::bollinger;
use super::ema::ema;
use super::features::derived_features;
use super::macd::macd;
use super::rolling::{pct_change, rolling_mean};
use super::rsi::rsi;
use super::stochastic::stochastic;
use super::volume::{accumulation_distribution, on_balance_volume};
use super::williams::williams_r;
use crate::domain::Series;
use crate::logging::RunLog;

/// Canonical column names shared by the engine, strategy, and trainer.
pub mod col {
    pub const RSI_14: &str = "rsi_14";
    pub const SMA_20: &str = "sma_20";
    pub const SMA_50: &str = "sma_50";
    pub const EMA_12: &str = "ema_12";
    pub const EMA_26: &str = "ema_26";
    pub const MACD: &str = "macd";
    pub const MACD_SIGNAL: &str = "macd_signal";
    pub const MACD_HIST: &str = "macd_hist";
    pub const BB_LOWER: &str = "bb_lower";
    pub const BB_MID: &str = "bb_mid";
    pub const BB_UPPER: &str = "bb_upper";
    pub const BB_BANDWIDTH: &str = "bb_bandwidth";
    pub const BB_PERCENT: &str = "bb_percent";
    pub const STOCH_K: &str = "stoch_k";
    pub const STOCH_D: &str = "stoch_d";
    pub const WILLR_14: &str = "willr_14";
    pub const ATR_14: &str = "atr_14";
    pub const AD: &str = "ad";
    pub const OBV: &str = "obv";
    pub const PRICE_CHANGE: &str = "price_change";
    pub const VOLUME_CHANGE: &str = "volume_change";
    pub const HIGH_LOW_PCT: &str = "high_low_pct";
    pub const OPEN_CLOSE_PCT: &str = "open_close_pct";
    pub const SUPPORT: &str = "support";
    pub const RESISTANCE: &str = "resistance";
    pub const DIST_SUPPORT: &str = "dist_support";
    pub const DIST_RESISTANCE: &str = "dist_resistance";
}

#[derive(Debug, Error)]
pub enum IndicatorError {
    #[error("empty input series")]
    EmptyInput,

    #[error("indicator computation failed: {0}")]
    Computation(String),
}

/// Enrich a series with all indicator and feature columns, then drop every
/// row that is undefined in any column.
///
/// Idempotent: columns are recomputed from OHLCV, so re-enriching an
/// already-enriched series overwrites each column with identical values
/// (and drops no further rows on a clean input).
pub fn enrich(mut series: Series, log: &RunLog) -> Result<Series, IndicatorError> {
    if series.is_empty() {
        log.error("no data provided for indicator calculation");
        return Err(IndicatorError::EmptyInput);
    }
    if let Err(reason) = validate_dates(&series) {
        log.error(format!("indicator computation failed: {reason}"));
        return Err(IndicatorError::Computation(reason));
    }

    log.info(format!(
        "calculating indicators for {} ({} bars)",
        series.ticker(),
        series.len()
    ));

    let closes = series.closes();
    let volumes = series.volumes();
    let bars = series.bars().to_vec();

    series.insert_column(col::RSI_14, rsi(&closes, 14));
    series.insert_column(col::SMA_20, rolling_mean(&closes, 20));
    series.insert_column(col::SMA_50, rolling_mean(&closes, 50));
    series.insert_column(col::EMA_12, ema(&closes, 12));
    series.insert_column(col::EMA_26, ema(&closes, 26));

    let macd_out = macd(&closes, 12, 26, 9);
    series.insert_column(col::MACD, macd_out.line);
    series.insert_column(col::MACD_SIGNAL, macd_out.signal);
    series.insert_column(col::MACD_HIST, macd_out.histogram);

    let bb = bollinger(&closes, 20, 2.0);
    series.insert_column(col::BB_LOWER, bb.lower);
    series.insert_column(col::BB_MID, bb.middle);
    series.insert_column(col::BB_UPPER, bb.upper);
    series.insert_column(col::BB_BANDWIDTH, bb.bandwidth);
    series.insert_column(col::BB_PERCENT, bb.percent_b);

    let stoch = stochastic(&bars, 14, 3, 3);
    series.insert_column(col::STOCH_K, stoch.k);
    series.insert_column(col::STOCH_D, stoch.d);

    series.insert_column(col::WILLR_14, williams_r(&bars, 14));
    series.insert_column(col::ATR_14, atr(&bars, 14));
    series.insert_column(col::AD, accumulation_distribution(&bars));
    series.insert_column(col::OBV, on_balance_volume(&bars));

    series.insert_column(col::PRICE_CHANGE, pct_change(&closes));
    series.insert_column(col::VOLUME_CHANGE, pct_change(&volumes));

    let feats = derived_features(&bars, 20);
    series.insert_column(col::HIGH_LOW_PCT, feats.high_low_pct);
    series.insert_column(col::OPEN_CLOSE_PCT, feats.open_close_pct);
    series.insert_column(col::SUPPORT, feats.support);
    series.insert_column(col::RESISTANCE, feats.resistance);
    series.insert_column(col::DIST_SUPPORT, feats.dist_support);
    series.insert_column(col::DIST_RESISTANCE, feats.dist_resistance);

    trim_undefined_rows(&mut series);

    log.info(format!(
        "indicators ready for {}: {} rows x {} columns",
        series.ticker(),
        series.len(),
        series.column_count()
    ));

    Ok(series)
}

fn validate_dates(series: &Series) -> Result<(), String> {
    for pair in series.bars().windows(2) {
        if pair[0].date >= pair[1].date {
            return Err(format!(
                "bar dates must be strictly ascending, got {} then {}",
                pair[0].date, pair[1].date
            ));
        }
    }
    Ok(())
}

/// Drop every row that has a non-finite value in any computed column.
fn trim_undefined_rows(series: &mut Series) {
    let names: Vec<String> = series.column_names().map(str::to_string).collect();
    let mut keep = vec![true; series.len()];
    for name in &names {
        let values = series.column(name).expect("column listed in schema");
        for (i, v) in values.iter().enumerate() {
            if !v.is_finite() {
                keep[i] = false;
            }
        }
    }
    series.retain_rows(&keep);
}
