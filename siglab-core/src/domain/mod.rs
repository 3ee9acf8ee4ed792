//! Domain types: bars, series with named columns, signals.

pub mod bar;
pub mod series;
pub mod signal;

pub use bar::Bar;
pub use series::Series;
pub use signal::{SignalRow, SignalSet, SignalStrength};
