//! Portfolio summary over hypothetical one-bar trades.
//!
//! Each buy signal is treated as a trade entered at the signal bar's close
//! and exited at the next bar's close. Capital is divided equally across
//! all trades in the run, so the summary reflects signal quality rather
//! than position-sizing choices.

use serde::{Deserialize, Serialize};

use siglab_core::domain::{Series, SignalSet};

/// One hypothetical trade derived from a buy signal.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TradeOutcome {
    pub ticker: String,
    pub entry_date: chrono::NaiveDate,
    pub entry: f64,
    pub exit: f64,
}

impl TradeOutcome {
    /// Fractional return of the one-bar hold.
    pub fn return_fraction(&self) -> f64 {
        (self.exit - self.entry) / self.entry
    }

    pub fn is_win(&self) -> bool {
        self.exit > self.entry
    }
}

/// Derive one-bar trades from a series and its signals.
///
/// A signal on the final bar has no exit and produces no trade.
pub fn hypothetical_trades(series: &Series, signals: &SignalSet) -> Vec<TradeOutcome> {
    let bars = series.bars();
    signals
        .rows
        .iter()
        .filter_map(|row| {
            let i = bars.iter().position(|b| b.date == row.date)?;
            let exit = bars.get(i + 1)?;
            Some(TradeOutcome {
                ticker: series.ticker().to_string(),
                entry_date: row.date,
                entry: row.close,
                exit: exit.close,
            })
        })
        .collect()
}

/// Aggregate run performance across all tickers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PortfolioSummary {
    pub total_capital: f64,
    pub total_return: f64,
    pub total_return_pct: f64,
    pub total_trades: usize,
    /// Percentage of trades that closed higher than they opened.
    pub overall_win_rate: f64,
}

/// Build the summary from all trades in a run, splitting `initial_capital`
/// equally across them. Zero trades leaves the capital untouched.
pub fn portfolio_summary(initial_capital: f64, trades: &[TradeOutcome]) -> PortfolioSummary {
    if trades.is_empty() {
        return PortfolioSummary {
            total_capital: initial_capital,
            total_return: 0.0,
            total_return_pct: 0.0,
            total_trades: 0,
            overall_win_rate: 0.0,
        };
    }

    let slice = initial_capital / trades.len() as f64;
    let total_return: f64 = trades.iter().map(|t| slice * t.return_fraction()).sum();
    let wins = trades.iter().filter(|t| t.is_win()).count();

    PortfolioSummary {
        total_capital: initial_capital + total_return,
        total_return,
        total_return_pct: total_return / initial_capital * 100.0,
        total_trades: trades.len(),
        overall_win_rate: wins as f64 / trades.len() as f64 * 100.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use siglab_core::domain::{Bar, SignalRow, SignalStrength};

    fn series_with_closes(closes: &[f64]) -> Series {
        let base = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
        let bars: Vec<Bar> = closes
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

    fn signal_at(series: &Series, index: usize) -> SignalRow {
        let bar = &series.bars()[index];
        SignalRow {
            date: bar.date,
            close: bar.close,
            strength: SignalStrength::Buy,
        }
    }

    #[test]
    fn trades_enter_at_signal_close_and_exit_next_close() {
        let series = series_with_closes(&[100.0, 110.0, 99.0]);
        let mut signals = SignalSet::empty("TEST");
        signals.rows.push(signal_at(&series, 0));
        signals.rows.push(signal_at(&series, 1));

        let trades = hypothetical_trades(&series, &signals);
        assert_eq!(trades.len(), 2);
        assert_eq!(trades[0].entry, 100.0);
        assert_eq!(trades[0].exit, 110.0);
        assert!(trades[0].is_win());
        assert!(!trades[1].is_win());
    }

    #[test]
    fn final_bar_signal_produces_no_trade() {
        let series = series_with_closes(&[100.0, 110.0]);
        let mut signals = SignalSet::empty("TEST");
        signals.rows.push(signal_at(&series, 1));
        assert!(hypothetical_trades(&series, &signals).is_empty());
    }

    #[test]
    fn summary_splits_capital_equally() {
        // Two trades: +10% and -10% on equal slices cancel out.
        let trades = vec![
            TradeOutcome {
                ticker: "A".into(),
                entry_date: NaiveDate::from_ymd_opt(2024, 1, 2).unwrap(),
                entry: 100.0,
                exit: 110.0,
            },
            TradeOutcome {
                ticker: "B".into(),
                entry_date: NaiveDate::from_ymd_opt(2024, 1, 2).unwrap(),
                entry: 200.0,
                exit: 180.0,
            },
        ];
        let summary = portfolio_summary(100_000.0, &trades);
        assert_eq!(summary.total_trades, 2);
        assert!((summary.total_return - 0.0).abs() < 1e-9);
        assert!((summary.total_capital - 100_000.0).abs() < 1e-9);
        assert!((summary.overall_win_rate - 50.0).abs() < 1e-9);
    }

    #[test]
    fn zero_trades_keeps_capital() {
        let summary = portfolio_summary(50_000.0, &[]);
        assert_eq!(summary.total_capital, 50_000.0);
        assert_eq!(summary.total_return_pct, 0.0);
        assert_eq!(summary.total_trades, 0);
        assert_eq!(summary.overall_win_rate, 0.0);
    }

    #[test]
    fn single_winning_trade_moves_all_capital() {
        let trades = vec![TradeOutcome {
            ticker: "A".into(),
            entry_date: NaiveDate::from_ymd_opt(2024, 1, 2).unwrap(),
            entry: 100.0,
            exit: 105.0,
        }];
        let summary = portfolio_summary(10_000.0, &trades);
        assert!((summary.total_return - 500.0).abs() < 1e-9);
        assert!((summary.total_return_pct - 5.0).abs() < 1e-9);
        assert_eq!(summary.overall_win_rate, 100.0);
    }
}
