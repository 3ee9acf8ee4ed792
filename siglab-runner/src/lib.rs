//! SigLab Runner — run orchestration on top of `siglab-core`.
//!
//! This crate provides:
//! - TOML run configuration with per-field defaults
//! - The sequential per-ticker pipeline driver with progress callbacks
//! - Chart CSV artifact export
//! - The portfolio summary over hypothetical one-bar trades

pub mod chart;
pub mod config;
pub mod runner;
pub mod summary;

pub use chart::{render_chart, ChartError};
pub use config::{default_tickers, ConfigError, RunConfig};
pub use runner::{run, NullProgress, RunProgress, RunSummary, StdoutProgress, TickerOutcome};
pub use summary::{
    hypothetical_trades, portfolio_summary, PortfolioSummary, TradeOutcome,
};

#[cfg(test)]
mod send_sync_checks {
    use super::*;

    fn assert_send<T: Send>() {}
    fn assert_sync<T: Sync>() {}

    #[test]
    fn summary_types_are_send_sync() {
        assert_send::<RunSummary>();
        assert_sync::<RunSummary>();
        assert_send::<TickerOutcome>();
        assert_sync::<TickerOutcome>();
        assert_send::<PortfolioSummary>();
        assert_sync::<PortfolioSummary>();
    }
}
