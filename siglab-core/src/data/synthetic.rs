//! Deterministic synthetic OHLCV generation.
//!
//! Mock series are a pure function of (ticker, period): the RNG seed is
//! derived from a BLAKE3 hash of the ticker symbol, so repeated mock runs
//! for the same ticker are reproducible. The price path is a log-return
//! random walk with mild first-order autocorrelation; OHLC rows are clamped
//! so `high >= max(open, close)` and `low <= min(open, close)` always hold.

use chrono::{Datelike, NaiveDate, Utc, Weekday};
use rand::rngs::StdRng;
use rand::SeedableRng;
use rand_distr::{Distribution, LogNormal, Normal};

use super::provider::{DataError, Period};
use crate::domain::{Bar, Series};
use crate::logging::RunLog;

/// Per-ticker price-path parameters for the synthetic generator.
#[derive(Debug, Clone, Copy)]
pub struct TickerParams {
    pub base_price: f64,
    pub volatility: f64,
    pub trend: f64,
}

/// Defaults for tickers not in the table.
pub const DEFAULT_PARAMS: TickerParams = TickerParams {
    base_price: 1000.0,
    volatility: 0.025,
    trend: 0.0001,
};

/// Look up path parameters for a ticker; unknown tickers get
/// [`DEFAULT_PARAMS`].
pub fn params_for(ticker: &str) -> TickerParams {
    match ticker {
        "RELIANCE.NS" => TickerParams {
            base_price: 2400.0,
            volatility: 0.025,
            trend: 0.0002,
        },
        "TCS.NS" => TickerParams {
            base_price: 3500.0,
            volatility: 0.020,
            trend: 0.0003,
        },
        "HDFCBANK.NS" => TickerParams {
            base_price: 1600.0,
            volatility: 0.030,
            trend: 0.0001,
        },
        "INFY.NS" => TickerParams {
            base_price: 1400.0,
            volatility: 0.025,
            trend: 0.0002,
        },
        "HINDUNILVR.NS" => TickerParams {
            base_price: 2600.0,
            volatility: 0.018,
            trend: 0.0001,
        },
        _ => DEFAULT_PARAMS,
    }
}

/// Deterministic RNG seed for a ticker: first 8 bytes of BLAKE3(ticker).
pub fn ticker_seed(ticker: &str) -> u64 {
    let hash = blake3::hash(ticker.as_bytes());
    u64::from_le_bytes(hash.as_bytes()[..8].try_into().expect("blake3 hash is 32 bytes"))
}

/// The last `count` business days (Mon–Fri) ending at `end`, ascending.
fn business_days_ending(end: NaiveDate, count: usize) -> Result<Vec<NaiveDate>, DataError> {
    let mut dates = Vec::with_capacity(count);
    let mut day = end;
    while dates.len() < count {
        if !matches!(day.weekday(), Weekday::Sat | Weekday::Sun) {
            dates.push(day);
        }
        day = day
            .pred_opt()
            .ok_or_else(|| DataError::Fatal(format!("date range underflow before {day}")))?;
    }
    dates.reverse();
    Ok(dates)
}

fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

fn normal(mean: f64, std_dev: f64) -> Result<Normal<f64>, DataError> {
    Normal::new(mean, std_dev)
        .map_err(|e| DataError::Fatal(format!("bad distribution parameters: {e}")))
}

/// Generate a mock series for one ticker and period.
///
/// Never returns an empty series; the only failure mode is a malformed
/// date range or distribution parameters, which is fatal.
pub fn generate_mock_series(
    ticker: &str,
    period: Period,
    log: &RunLog,
) -> Result<Series, DataError> {
    log.info(format!("generating mock data for {ticker} ({period})"));

    let params = params_for(ticker);
    let n = period.bar_count();
    let today = Utc::now().date_naive();
    let dates = business_days_ending(today, n)?;

    let mut rng = StdRng::seed_from_u64(ticker_seed(ticker));

    // Log returns with first-order autocorrelation.
    let return_dist = normal(params.trend, params.volatility)?;
    let mut returns: Vec<f64> = (0..n).map(|_| return_dist.sample(&mut rng)).collect();
    for i in 1..n {
        returns[i] += 0.1 * returns[i - 1];
    }

    let mut closes = Vec::with_capacity(n);
    let mut cum = 0.0;
    for r in &returns {
        cum += r;
        closes.push(params.base_price * cum.exp());
    }

    let daily_vol = params.volatility * 0.5;
    let open_noise = normal(0.0, daily_vol / 2.0)?;
    let wick_noise = normal(0.0, daily_vol / 3.0)?;
    let volume_dist = LogNormal::new(15.0, 0.5)
        .map_err(|e| DataError::Fatal(format!("bad volume distribution: {e}")))?;

    let mut bars = Vec::with_capacity(n);
    for (i, (&date, &close)) in dates.iter().zip(closes.iter()).enumerate() {
        let prev_close = if i == 0 { closes[0] } else { closes[i - 1] };
        let open = prev_close * (1.0 + open_noise.sample(&mut rng));

        let body_high = open.max(close);
        let body_low = open.min(close);
        let high = body_high * (1.0 + wick_noise.sample(&mut rng).abs());
        let low = body_low * (1.0 - wick_noise.sample(&mut rng).abs());

        let high = round2(high.max(body_high));
        let low = round2(low.min(body_low));
        let volume = volume_dist.sample(&mut rng) as u64;

        bars.push(Bar {
            date,
            open: round2(open),
            high,
            low,
            close: round2(close),
            volume,
        });
    }

    Ok(Series::new(ticker, bars))
}
