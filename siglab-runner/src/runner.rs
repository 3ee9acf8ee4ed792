//! Run orchestration.
//!
//! Processes each configured ticker sequentially through the full pipeline:
//! fetch, indicator enrichment, strategy evaluation, model bake-off, chart
//! export. A stage failure logs, skips the rest of that ticker, and moves
//! on; the run itself never aborts and progress always completes.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tracing::info;

use siglab_core::data::fetch;
use siglab_core::domain::Series;
use siglab_core::indicators::engine::enrich;
use siglab_core::logging::RunLog;
use siglab_core::ml::{self, ModelReport};
use siglab_core::strategy;

use crate::chart::render_chart;
use crate::config::RunConfig;
use crate::summary::{hypothetical_trades, portfolio_summary, PortfolioSummary, TradeOutcome};

/// Progress callback for multi-ticker runs.
pub trait RunProgress: Send {
    /// Called when a ticker's pipeline starts.
    fn on_start(&mut self, ticker: &str, index: usize, total: usize);

    /// Called when a ticker's pipeline finishes, successfully or not.
    fn on_complete(&mut self, ticker: &str, index: usize, total: usize, outcome: &TickerOutcome);

    /// Called once after the final ticker.
    fn on_batch_complete(&mut self, succeeded: usize, failed: usize, total: usize);
}

/// Progress reporter that prints to stdout.
pub struct StdoutProgress;

impl RunProgress for StdoutProgress {
    fn on_start(&mut self, ticker: &str, index: usize, total: usize) {
        println!("[{}/{}] Analyzing {ticker}...", index + 1, total);
    }

    fn on_complete(&mut self, ticker: &str, _index: usize, _total: usize, outcome: &TickerOutcome) {
        match &outcome.error {
            None => println!(
                "  OK: {ticker} ({} signals, {} strong)",
                outcome.signal_count, outcome.strong_signal_count
            ),
            Some(reason) => println!("  SKIP: {ticker}: {reason}"),
        }
    }

    fn on_batch_complete(&mut self, succeeded: usize, failed: usize, total: usize) {
        println!("\nRun complete: {succeeded}/{total} succeeded, {failed} skipped");
    }
}

/// Silent progress sink for embedding and tests.
pub struct NullProgress;

impl RunProgress for NullProgress {
    fn on_start(&mut self, _ticker: &str, _index: usize, _total: usize) {}
    fn on_complete(&mut self, _t: &str, _i: usize, _n: usize, _o: &TickerOutcome) {}
    fn on_batch_complete(&mut self, _s: usize, _f: usize, _t: usize) {}
}

/// Per-ticker pipeline result.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TickerOutcome {
    pub ticker: String,
    /// Enriched rows surviving the indicator warm-up trim.
    pub bar_count: usize,
    pub signal_count: usize,
    pub strong_signal_count: usize,
    pub best_model: Option<ModelReport>,
    pub chart_path: Option<PathBuf>,
    /// Set when a stage failed and the remainder of the ticker was skipped.
    pub error: Option<String>,
}

impl TickerOutcome {
    fn skipped(ticker: &str, reason: String) -> Self {
        Self {
            ticker: ticker.to_string(),
            bar_count: 0,
            signal_count: 0,
            strong_signal_count: 0,
            best_model: None,
            chart_path: None,
            error: Some(reason),
        }
    }
}

/// Aggregated result of one run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunSummary {
    pub outcomes: Vec<TickerOutcome>,
    pub portfolio: PortfolioSummary,
}

impl RunSummary {
    pub fn succeeded(&self) -> usize {
        self.outcomes.iter().filter(|o| o.error.is_none()).count()
    }

    pub fn failed(&self) -> usize {
        self.outcomes.len() - self.succeeded()
    }
}

/// Execute the full run described by `config`.
///
/// Infallible by design: per-ticker errors are captured on the outcome and
/// the remaining tickers still run.
pub fn run(config: &RunConfig, log: &RunLog, progress: &mut dyn RunProgress) -> RunSummary {
    let total = config.tickers.len();
    info!(tickers = total, mock = config.use_mock, "starting run");

    let mut outcomes = Vec::with_capacity(total);
    let mut trades: Vec<TradeOutcome> = Vec::new();

    for (index, ticker) in config.tickers.iter().enumerate() {
        progress.on_start(ticker, index, total);
        let outcome = run_ticker(ticker, config, log, &mut trades);
        progress.on_complete(ticker, index, total, &outcome);
        outcomes.push(outcome);
    }

    let summary = RunSummary {
        portfolio: portfolio_summary(config.initial_capital, &trades),
        outcomes,
    };
    progress.on_batch_complete(summary.succeeded(), summary.failed(), total);
    summary
}

fn run_ticker(
    ticker: &str,
    config: &RunConfig,
    log: &RunLog,
    trades: &mut Vec<TradeOutcome>,
) -> TickerOutcome {
    let raw = match fetch(ticker, config.period, &config.interval, config.use_mock, log) {
        Ok(series) => series,
        Err(err) => {
            log.error(format!("fetch failed for {ticker}: {err}"));
            return TickerOutcome::skipped(ticker, format!("fetch failed: {err}"));
        }
    };

    let enriched = match enrich(raw, log) {
        Ok(series) if !series.is_empty() => series,
        Ok(_) => {
            log.warn(format!("no rows left after indicator warm-up for {ticker}"));
            return TickerOutcome::skipped(ticker, "no rows after indicator warm-up".to_string());
        }
        Err(err) => {
            log.error(format!("indicator enrichment failed for {ticker}: {err}"));
            return TickerOutcome::skipped(ticker, format!("enrichment failed: {err}"));
        }
    };

    let signals = strategy::evaluate(&enriched, &config.strategy, log);
    trades.extend(hypothetical_trades(&enriched, &signals));

    let best_model = match ml::train(&enriched, log) {
        Ok(report) => Some(report),
        Err(err) => {
            log.warn(format!("model training skipped for {ticker}: {err}"));
            return finish_without_chart(ticker, &enriched, &signals, format!("training failed: {err}"));
        }
    };

    let chart_path = match render_chart(&enriched, &signals, &config.out_dir) {
        Ok(path) => path,
        Err(err) => {
            log.error(format!("chart export failed for {ticker}: {err}"));
            return TickerOutcome {
                ticker: ticker.to_string(),
                bar_count: enriched.len(),
                signal_count: signals.len(),
                strong_signal_count: signals.strong_count(),
                best_model,
                chart_path: None,
                error: Some(format!("chart export failed: {err}")),
            };
        }
    };

    TickerOutcome {
        ticker: ticker.to_string(),
        bar_count: enriched.len(),
        signal_count: signals.len(),
        strong_signal_count: signals.strong_count(),
        best_model,
        chart_path,
        error: None,
    }
}

fn finish_without_chart(
    ticker: &str,
    enriched: &Series,
    signals: &siglab_core::domain::SignalSet,
    reason: String,
) -> TickerOutcome {
    TickerOutcome {
        ticker: ticker.to_string(),
        bar_count: enriched.len(),
        signal_count: signals.len(),
        strong_signal_count: signals.strong_count(),
        best_model: None,
        chart_path: None,
        error: Some(reason),
    }
}
