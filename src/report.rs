//! Injected log sink for the collector and the downloader.
//!
//! Components receive an `Arc<dyn Reporter>` instead of configuring a global
//! logger, so every run (and every test) decides where its records go.

use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::Path;
use std::sync::{Arc, Mutex};

use chrono::Local;

pub use tracing::Level;

use crate::Result;

pub trait Reporter: Send + Sync {
    fn record(&self, level: Level, message: &str);
}

impl<R: Reporter + ?Sized> Reporter for Arc<R> {
    fn record(&self, level: Level, message: &str) {
        (**self).record(level, message)
    }
}

/// Writes `<timestamp> - <LEVEL> - <message>` lines to any writer.
pub struct LineReporter {
    sink: Mutex<Box<dyn Write + Send>>,
}

impl LineReporter {
    pub fn new(sink: impl Write + Send + 'static) -> Self {
        Self {
            sink: Mutex::new(Box::new(sink)),
        }
    }

    /// Opens (or creates) `path` in append mode.
    pub fn append_to(path: impl AsRef<Path>) -> Result<Self> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self::new(file))
    }

    pub fn stderr() -> Self {
        Self::new(io::stderr())
    }
}

impl Reporter for LineReporter {
    fn record(&self, level: Level, message: &str) {
        let line = format_line(level, message);
        // A broken log sink must never fail a download.
        if let Ok(mut sink) = self.sink.lock() {
            let _ = sink.write_all(line.as_bytes());
            let _ = sink.flush();
        }
    }
}

fn format_line(level: Level, message: &str) -> String {
    format!(
        "{} - {} - {}\n",
        Local::now().format("%Y-%m-%d %H:%M:%S,%3f"),
        level,
        message
    )
}

/// Keeps every record in memory.
#[derive(Debug, Default)]
pub struct MemoryReporter {
    records: Mutex<Vec<(Level, String)>>,
}

impl MemoryReporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> Vec<(Level, String)> {
        self.records
            .lock()
            .map(|records| records.clone())
            .unwrap_or_default()
    }

    /// Messages recorded at exactly `level`, in recording order.
    pub fn messages_at(&self, level: Level) -> Vec<String> {
        self.records()
            .into_iter()
            .filter(|(l, _)| *l == level)
            .map(|(_, message)| message)
            .collect()
    }
}

impl Reporter for MemoryReporter {
    fn record(&self, level: Level, message: &str) {
        if let Ok(mut records) = self.records.lock() {
            records.push((level, message.to_string()));
        }
    }
}
