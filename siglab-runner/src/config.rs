//! Serializable run configuration.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use siglab_core::data::Period;
use siglab_core::strategy::StrategyConfig;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("no tickers configured")]
    NoTickers,

    #[error("initial capital must be positive, got {0}")]
    NonPositiveCapital(f64),
}

/// Configuration for one run: which tickers, which data source, and the
/// strategy thresholds. Every field has a default so a TOML file only needs
/// to name what it overrides.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    pub tickers: Vec<String>,
    pub use_mock: bool,
    pub period: Period,
    pub interval: String,
    pub initial_capital: f64,
    pub out_dir: PathBuf,
    pub strategy: StrategyConfig,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            tickers: default_tickers(),
            use_mock: false,
            period: Period::SixMonths,
            interval: "1d".to_string(),
            initial_capital: 100_000.0,
            out_dir: PathBuf::from("results"),
            strategy: StrategyConfig::default(),
        }
    }
}

/// The default NSE watchlist.
pub fn default_tickers() -> Vec<String> {
    [
        "RELIANCE.NS",
        "TCS.NS",
        "HDFCBANK.NS",
        "INFY.NS",
        "HINDUNILVR.NS",
    ]
    .into_iter()
    .map(str::to_string)
    .collect()
}

impl RunConfig {
    /// Load and validate a TOML config file.
    pub fn from_path(path: &Path) -> Result<RunConfig, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        let config: RunConfig = toml::from_str(&text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tickers.is_empty() {
            return Err(ConfigError::NoTickers);
        }
        if self.initial_capital <= 0.0 {
            return Err(ConfigError::NonPositiveCapital(self.initial_capital));
        }
        Ok(())
    }
}
