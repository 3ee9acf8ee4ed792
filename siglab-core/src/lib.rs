//! SigLab Core — the signal/indicator/ML pipeline.
//!
//! This crate contains the pipeline stages that turn a raw OHLCV series into
//! signals and model reports:
//! - Domain types (bars, series with named indicator columns, signals)
//! - Data providers (Yahoo Finance live fetch, deterministic synthetic fallback)
//! - Indicator engine (RSI, SMAs, EMAs, MACD, Bollinger, stochastic, ATR, AD,
//!   OBV, plus support/resistance features) with a drop-any-NaN-row trim
//! - Rule-based strategy evaluator emitting buy / strong-buy signals
//! - Model trainer: decision tree vs logistic regression bake-off on a
//!   next-day-direction label
//!
//! Every stage takes an explicit [`logging::RunLog`] context instead of a
//! process-global logger, so callers can surface captured records in a UI.

pub mod data;
pub mod domain;
pub mod indicators;
pub mod logging;
pub mod ml;
pub mod strategy;

#[cfg(test)]
mod tests {
    use super::*;

    /// Compile-time check: pipeline types are Send + Sync so a future
    /// parallel runner can process tickers on worker threads.
    #[allow(dead_code)]
    fn assert_send_sync() {
        fn require_send<T: Send>() {}
        fn require_sync<T: Sync>() {}

        require_send::<domain::Bar>();
        require_sync::<domain::Bar>();
        require_send::<domain::Series>();
        require_sync::<domain::Series>();
        require_send::<domain::SignalSet>();
        require_sync::<domain::SignalSet>();
        require_send::<logging::RunLog>();
        require_sync::<logging::RunLog>();
        require_send::<ml::ModelReport>();
        require_sync::<ml::ModelReport>();
        require_send::<strategy::StrategyConfig>();
        require_sync::<strategy::StrategyConfig>();
    }
}
