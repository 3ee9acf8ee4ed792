//! Rule-based buy strategy.
//!
//! Six boolean conditions are evaluated per row over the indicator columns;
//! a standard buy needs the first four, a strong buy additionally needs the
//! stochastic-oversold and support-distance confirmations. Strong buy
//! overwrites standard buy on the same row, so `StrongBuy` always implies
//! the standard conjunction held.

use serde::{Deserialize, Serialize};

use crate::domain::{Series, SignalRow, SignalSet, SignalStrength};
use crate::indicators::engine::col;
use crate::indicators::rolling::rolling_mean;
use crate::logging::RunLog;

/// Strategy thresholds, TOML-overridable at the run level.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StrategyConfig {
    /// RSI below this is oversold.
    pub rsi_oversold: f64,
    /// Stochastic %K below this is oversold.
    pub stoch_oversold: f64,
    /// Minimum normalized distance above rolling support.
    pub min_support_distance: f64,
    /// Window for the volume-confirmation rolling mean.
    pub volume_window: usize,
}

impl Default for StrategyConfig {
    fn default() -> Self {
        Self {
            rsi_oversold: 35.0,
            stoch_oversold: 30.0,
            min_support_distance: 0.01,
            volume_window: 20,
        }
    }
}

/// Per-row rule outcomes, exposed for tests and diagnostics.
#[derive(Debug, Clone)]
pub struct RuleHits {
    pub rsi_oversold: Vec<bool>,
    pub sma_crossover: Vec<bool>,
    pub volume_confirm: Vec<bool>,
    pub macd_bullish: Vec<bool>,
    pub stoch_oversold: Vec<bool>,
    pub price_above_support: Vec<bool>,
}

/// Evaluate the strategy over an enriched series.
///
/// Returns the buy-signal subset; empty when the series lacks the RSI
/// column (insufficient data) or when any required column is missing
/// (logged, non-fatal).
pub fn evaluate(series: &Series, config: &StrategyConfig, log: &RunLog) -> SignalSet {
    if series.is_empty() || !series.has_column(col::RSI_14) {
        log.warn(format!(
            "insufficient data for strategy application on {}",
            series.ticker()
        ));
        return SignalSet::empty(series.ticker());
    }

    log.info(format!("applying trading strategy to {}", series.ticker()));

    let hits = match rule_hits(series, config) {
        Ok(hits) => hits,
        Err(missing) => {
            log.error(format!(
                "strategy evaluation failed for {}: missing column {missing}",
                series.ticker()
            ));
            return SignalSet::empty(series.ticker());
        }
    };

    let mut set = SignalSet::empty(series.ticker());
    for (i, bar) in series.bars().iter().enumerate() {
        let standard = hits.rsi_oversold[i]
            && hits.sma_crossover[i]
            && hits.volume_confirm[i]
            && hits.macd_bullish[i];
        if !standard {
            continue;
        }
        let strength = if hits.stoch_oversold[i] && hits.price_above_support[i] {
            SignalStrength::StrongBuy
        } else {
            SignalStrength::Buy
        };
        set.rows.push(SignalRow {
            date: bar.date,
            close: bar.close,
            strength,
        });
    }

    log.info(format!(
        "generated {} buy signals for {} ({} strong)",
        set.len(),
        series.ticker(),
        set.strong_count()
    ));

    set
}

/// Evaluate all six rule conditions per row.
///
/// Errs with the missing column name if the series schema is incomplete.
pub fn rule_hits(series: &Series, config: &StrategyConfig) -> Result<RuleHits, &'static str> {
    let rsi = series.column(col::RSI_14).ok_or(col::RSI_14)?;
    let sma_20 = series.column(col::SMA_20).ok_or(col::SMA_20)?;
    let sma_50 = series.column(col::SMA_50).ok_or(col::SMA_50)?;
    let macd = series.column(col::MACD).ok_or(col::MACD)?;
    let macd_signal = series.column(col::MACD_SIGNAL).ok_or(col::MACD_SIGNAL)?;
    let stoch_k = series.column(col::STOCH_K).ok_or(col::STOCH_K)?;
    let dist_support = series.column(col::DIST_SUPPORT).ok_or(col::DIST_SUPPORT)?;

    let volumes = series.volumes();
    let volume_mean = rolling_mean(&volumes, config.volume_window);

    let n = series.len();
    let mut hits = RuleHits {
        rsi_oversold: vec![false; n],
        sma_crossover: vec![false; n],
        volume_confirm: vec![false; n],
        macd_bullish: vec![false; n],
        stoch_oversold: vec![false; n],
        price_above_support: vec![false; n],
    };

    for i in 0..n {
        hits.rsi_oversold[i] = rsi[i] < config.rsi_oversold;
        // A true upward cross event: above now, at-or-below on the prior row.
        hits.sma_crossover[i] =
            i > 0 && sma_20[i] > sma_50[i] && sma_20[i - 1] <= sma_50[i - 1];
        hits.volume_confirm[i] = volumes[i] > volume_mean[i];
        hits.macd_bullish[i] = macd[i] > macd_signal[i];
        hits.stoch_oversold[i] = stoch_k[i] < config.stoch_oversold;
        hits.price_above_support[i] = dist_support[i] > config.min_support_distance;
    }

    Ok(hits)
}
