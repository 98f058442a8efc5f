//! Sinks that receive pre-formatted log lines.

use std::io::Write;
use std::sync::Mutex;

/// A sink that receives complete, already-terminated log lines.
pub trait LogSink: Send + Sync {
    /// Write a line to the sink.
    fn write_line(&self, line: &str);
}

/// Log sink that writes to stderr.
#[derive(Debug, Default)]
pub struct StderrLogSink;

impl LogSink for StderrLogSink {
    fn write_line(&self, line: &str) {
        let mut stderr = std::io::stderr();
        if let Err(error) = stderr.write_all(line.as_bytes()) {
            eprintln!("log sink write failed: {error}");
        }
    }
}

/// Log sink that writes to stdout.
#[derive(Debug, Default)]
pub struct StdoutLogSink;

impl LogSink for StdoutLogSink {
    fn write_line(&self, line: &str) {
        let mut stdout = std::io::stdout();
        if let Err(error) = stdout.write_all(line.as_bytes()) {
            eprintln!("log sink write failed: {error}");
        }
    }
}

/// Line collector for tests and embedders that inspect output.
#[derive(Debug, Default)]
pub struct MemorySink {
    lines: Mutex<Vec<String>>,
}

impl MemorySink {
    /// Create an empty collector.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Take all collected lines, leaving the collector empty.
    pub fn take(&self) -> Vec<String> {
        let mut guard = self.lines.lock().unwrap_or_else(|poison| poison.into_inner());
        std::mem::take(&mut *guard)
    }

    /// Snapshot the collected lines without draining them.
    pub fn lines(&self) -> Vec<String> {
        self.lines
            .lock()
            .unwrap_or_else(|poison| poison.into_inner())
            .clone()
    }
}

impl LogSink for MemorySink {
    fn write_line(&self, line: &str) {
        let mut guard = self.lines.lock().unwrap_or_else(|poison| poison.into_inner());
        guard.push(line.to_string());
    }
}
