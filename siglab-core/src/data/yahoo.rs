//! Yahoo Finance quote provider.
//!
//! Fetches daily OHLCV bars from Yahoo's v8 chart API using a trailing
//! `range` query. Yahoo has no official API and changes formats without
//! notice; every parse failure maps to `DataError::Unavailable` so the
//! caller's synthetic fallback can take over.

use std::time::Duration;

use serde::Deserialize;

use super::provider::{DataError, Period, QuoteProvider};
use crate::domain::Bar;

/// Yahoo Finance v8 chart API response.
#[derive(Debug, Deserialize)]
struct ChartResponse {
    chart: ChartResult,
}

#[derive(Debug, Deserialize)]
struct ChartResult {
    result: Option<Vec<ChartData>>,
    error: Option<ChartError>,
}

#[derive(Debug, Deserialize)]
struct ChartError {
    code: String,
    description: String,
}

#[derive(Debug, Deserialize)]
struct ChartData {
    timestamp: Option<Vec<i64>>,
    indicators: Indicators,
}

#[derive(Debug, Deserialize)]
struct Indicators {
    quote: Vec<QuoteData>,
}

#[derive(Debug, Deserialize)]
struct QuoteData {
    open: Vec<Option<f64>>,
    high: Vec<Option<f64>>,
    low: Vec<Option<f64>>,
    close: Vec<Option<f64>>,
    volume: Vec<Option<u64>>,
}

/// Yahoo Finance quote provider with an explicit request timeout.
///
/// A slow or dead network degrades to the synthetic fallback instead of
/// blocking the run indefinitely.
pub struct YahooProvider {
    client: reqwest::blocking::Client,
}

impl YahooProvider {
    pub fn new() -> Self {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(30))
            .user_agent("Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36")
            .build()
            .expect("failed to build HTTP client");
        Self { client }
    }

    fn chart_url(ticker: &str, period: Period, interval: &str) -> String {
        format!(
            "https://query2.finance.yahoo.com/v8/finance/chart/{ticker}\
             ?range={}&interval={interval}&includeAdjustedClose=true",
            period.as_str()
        )
    }

    fn unavailable(ticker: &str, reason: impl Into<String>) -> DataError {
        DataError::Unavailable {
            ticker: ticker.to_string(),
            reason: reason.into(),
        }
    }

    fn parse_response(ticker: &str, resp: ChartResponse) -> Result<Vec<Bar>, DataError> {
        let result = resp.chart.result.ok_or_else(|| {
            let reason = match resp.chart.error {
                Some(err) => format!("{}: {}", err.code, err.description),
                None => "empty result with no error".to_string(),
            };
            Self::unavailable(ticker, reason)
        })?;

        let data = result
            .into_iter()
            .next()
            .ok_or_else(|| Self::unavailable(ticker, "result array is empty"))?;

        let timestamps = data
            .timestamp
            .ok_or_else(|| Self::unavailable(ticker, "no timestamps"))?;

        let quote = data
            .indicators
            .quote
            .into_iter()
            .next()
            .ok_or_else(|| Self::unavailable(ticker, "no quote data"))?;

        let mut bars = Vec::with_capacity(timestamps.len());
        for (i, &ts) in timestamps.iter().enumerate() {
            let date = chrono::DateTime::from_timestamp(ts, 0)
                .map(|dt| dt.naive_utc().date())
                .ok_or_else(|| Self::unavailable(ticker, format!("invalid timestamp: {ts}")))?;

            // Yahoo nulls out partially-traded days; skip incomplete rows.
            let (open, high, low, close, volume) = match (
                quote.open.get(i).copied().flatten(),
                quote.high.get(i).copied().flatten(),
                quote.low.get(i).copied().flatten(),
                quote.close.get(i).copied().flatten(),
                quote.volume.get(i).copied().flatten(),
            ) {
                (Some(o), Some(h), Some(l), Some(c), Some(v)) => (o, h, l, c, v),
                _ => continue,
            };

            let bar = Bar {
                date,
                open,
                high,
                low,
                close,
                volume,
            };
            if bar.is_sane() {
                bars.push(bar);
            }
        }

        if bars.is_empty() {
            return Err(Self::unavailable(ticker, "no usable rows in response"));
        }
        Ok(bars)
    }
}

impl Default for YahooProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl QuoteProvider for YahooProvider {
    fn name(&self) -> &str {
        "yahoo-finance"
    }

    fn fetch_daily(
        &self,
        ticker: &str,
        period: Period,
        interval: &str,
    ) -> Result<Vec<Bar>, DataError> {
        let url = Self::chart_url(ticker, period, interval);
        let resp = self
            .client
            .get(&url)
            .send()
            .map_err(|e| Self::unavailable(ticker, format!("request failed: {e}")))?;

        if !resp.status().is_success() {
            return Err(Self::unavailable(
                ticker,
                format!("HTTP {}", resp.status()),
            ));
        }

        let chart: ChartResponse = resp
            .json()
            .map_err(|e| Self::unavailable(ticker, format!("bad response body: {e}")))?;

        Self::parse_response(ticker, chart)
    }
}
