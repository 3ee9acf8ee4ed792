//! Explicit run-log context.
//!
//! Stages log through a `RunLog` handed in by the caller instead of a
//! process-global logger, so a UI can display the captured records for one
//! run without touching global handler state. Records are mirrored to the
//! `tracing` facade for terminal output.

use std::sync::Mutex;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LogLevel {
    Info,
    Warn,
    Error,
}

impl LogLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            LogLevel::Info => "INFO",
            LogLevel::Warn => "WARN",
            LogLevel::Error => "ERROR",
        }
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One captured log event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogRecord {
    pub timestamp: DateTime<Utc>,
    pub level: LogLevel,
    pub message: String,
}

/// In-memory leveled log sink for a single run.
///
/// Interior mutability via `Mutex` so stages can share `&RunLog`; the run is
/// single-threaded today but the sink stays usable from a parallel runner.
#[derive(Debug, Default)]
pub struct RunLog {
    records: Mutex<Vec<LogRecord>>,
}

impl RunLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn info(&self, message: impl Into<String>) {
        let message = message.into();
        tracing::info!("{message}");
        self.push(LogLevel::Info, message);
    }

    pub fn warn(&self, message: impl Into<String>) {
        let message = message.into();
        tracing::warn!("{message}");
        self.push(LogLevel::Warn, message);
    }

    pub fn error(&self, message: impl Into<String>) {
        let message = message.into();
        tracing::error!("{message}");
        self.push(LogLevel::Error, message);
    }

    fn push(&self, level: LogLevel, message: String) {
        let record = LogRecord {
            timestamp: Utc::now(),
            level,
            message,
        };
        self.records
            .lock()
            .expect("run log mutex poisoned")
            .push(record);
    }

    /// Snapshot of all records captured so far, in emission order.
    pub fn records(&self) -> Vec<LogRecord> {
        self.records.lock().expect("run log mutex poisoned").clone()
    }

    pub fn clear(&self) {
        self.records.lock().expect("run log mutex poisoned").clear();
    }
}
