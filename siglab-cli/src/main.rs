//! SigLab CLI — run the signal pipeline over a watchlist.
//!
//! Commands:
//! - `run` — fetch, enrich, evaluate, and train for each ticker, then print
//!   a results table, the portfolio summary, and the captured run log

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use siglab_core::data::Period;
use siglab_core::logging::RunLog;
use siglab_runner::{run, RunConfig, RunSummary, StdoutProgress, TickerOutcome};

#[derive(Parser)]
#[command(name = "siglab", about = "SigLab CLI — stock signal and model pipeline")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the pipeline for a set of tickers.
    Run {
        /// Tickers to analyze (e.g., RELIANCE.NS TCS.NS). Defaults to the
        /// built-in NSE watchlist.
        tickers: Vec<String>,

        /// Path to a TOML config file. Command-line flags override it.
        #[arg(long)]
        config: Option<PathBuf>,

        /// Use deterministic synthetic data instead of the live fetch.
        #[arg(long, default_value_t = false)]
        mock: bool,

        /// Fetch window: 3mo, 6mo, or 1y.
        #[arg(long)]
        period: Option<Period>,

        /// Initial capital for the portfolio summary.
        #[arg(long)]
        capital: Option<f64>,

        /// Output directory for chart CSV artifacts.
        #[arg(long)]
        out: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_target(false)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Run {
            tickers,
            config,
            mock,
            period,
            capital,
            out,
        } => run_cmd(tickers, config, mock, period, capital, out),
    }
}

fn run_cmd(
    tickers: Vec<String>,
    config_path: Option<PathBuf>,
    mock: bool,
    period: Option<Period>,
    capital: Option<f64>,
    out: Option<PathBuf>,
) -> Result<()> {
    let mut config = match config_path {
        Some(path) => RunConfig::from_path(&path)?,
        None => RunConfig::default(),
    };

    // Flags override the file.
    if !tickers.is_empty() {
        config.tickers = tickers;
    }
    if mock {
        config.use_mock = true;
    }
    if let Some(period) = period {
        config.period = period;
    }
    if let Some(capital) = capital {
        config.initial_capital = capital;
    }
    if let Some(out) = out {
        config.out_dir = out;
    }
    config.validate()?;

    let log = RunLog::new();
    let summary = run(&config, &log, &mut StdoutProgress);

    print_results(&summary);
    print_log(&log);

    // Per-ticker failures are reported above, not through the exit code.
    Ok(())
}

fn print_results(summary: &RunSummary) {
    println!();
    println!("=== Results ===");
    println!(
        "{:<14} {:>6} {:>8} {:>7} {:<20} {:>9}",
        "Ticker", "Bars", "Signals", "Strong", "Best Model", "Accuracy"
    );
    println!("{}", "-".repeat(70));
    for outcome in &summary.outcomes {
        print_outcome_row(outcome);
    }

    let p = &summary.portfolio;
    println!();
    println!("--- Portfolio Summary ---");
    println!("Total Capital:  {:.2}", p.total_capital);
    println!(
        "Total Return:   {:.2} ({:+.2}%)",
        p.total_return, p.total_return_pct
    );
    println!("Total Trades:   {}", p.total_trades);
    println!("Win Rate:       {:.1}%", p.overall_win_rate);
}

fn print_outcome_row(outcome: &TickerOutcome) {
    if let Some(reason) = &outcome.error {
        println!("{:<14} skipped: {reason}", outcome.ticker);
        return;
    }
    let (model, accuracy) = match &outcome.best_model {
        Some(report) => (report.model.label(), format!("{:.4}", report.accuracy)),
        None => ("-", "-".to_string()),
    };
    println!(
        "{:<14} {:>6} {:>8} {:>7} {:<20} {:>9}",
        outcome.ticker,
        outcome.bar_count,
        outcome.signal_count,
        outcome.strong_signal_count,
        model,
        accuracy
    );
}

fn print_log(log: &RunLog) {
    let records = log.records();
    if records.is_empty() {
        return;
    }
    println!();
    println!("--- Run Log ---");
    for record in &records {
        println!(
            "{} [{}] {}",
            record.timestamp.format("%H:%M:%S"),
            record.level,
            record.message
        );
    }
}
