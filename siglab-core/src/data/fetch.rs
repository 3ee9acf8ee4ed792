//! Top-level fetch: live retrieval with an unconditional synthetic fallback.

use super::provider::{DataError, Period, QuoteProvider};
use super::synthetic::generate_mock_series;
use super::yahoo::YahooProvider;
use crate::domain::Series;
use crate::logging::RunLog;

/// Fetch an OHLCV series for a ticker.
///
/// Unless `use_mock` is set, the live provider is tried first; any fetch or
/// parse failure is logged and silently replaced by the synthetic generator.
/// Callers therefore only ever see a populated series, or `DataError::Fatal`
/// from a catastrophic generator misconfiguration.
pub fn fetch(
    ticker: &str,
    period: Period,
    interval: &str,
    use_mock: bool,
    log: &RunLog,
) -> Result<Series, DataError> {
    if use_mock {
        return generate_mock_series(ticker, period, log);
    }
    fetch_with_provider(&YahooProvider::new(), ticker, period, interval, log)
}

/// Same as [`fetch`] on the live path, with an injectable provider.
pub fn fetch_with_provider(
    provider: &dyn QuoteProvider,
    ticker: &str,
    period: Period,
    interval: &str,
    log: &RunLog,
) -> Result<Series, DataError> {
    log.info(format!(
        "fetching {ticker} ({period}, {interval}) from {}",
        provider.name()
    ));

    match provider.fetch_daily(ticker, period, interval) {
        Ok(bars) if !bars.is_empty() => {
            log.info(format!("fetched {} bars for {ticker}", bars.len()));
            Ok(Series::new(ticker, bars))
        }
        Ok(_) => {
            log.warn(format!("no rows returned for {ticker}; using mock data"));
            generate_mock_series(ticker, period, log)
        }
        Err(DataError::Unavailable { reason, .. }) => {
            log.warn(format!("fetch failed for {ticker} ({reason}); using mock data"));
            generate_mock_series(ticker, period, log)
        }
        Err(fatal) => Err(fatal),
    }
}
