//! Data sources: Yahoo Finance live fetch with a deterministic synthetic
//! fallback.

pub mod fetch;
pub mod provider;
pub mod synthetic;
pub mod yahoo;

pub use fetch::{fetch, fetch_with_provider};
pub use provider::{DataError, Period, QuoteProvider};
pub use synthetic::generate_mock_series;
pub use yahoo::YahooProvider;
