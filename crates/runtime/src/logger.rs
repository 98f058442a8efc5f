//! Named logger handles bound to a registry.

use crate::registry::LoggerRegistry;
use logline_record::{Failure, Level, LogRecord};
use std::sync::Arc;

/// Named entry point for emitting records through a registry.
///
/// A logger is a thin handle: every call consults the registry, so level
/// changes applied after construction take effect immediately. Handles are
/// cheap to clone and safe to share across threads.
#[derive(Debug, Clone)]
pub struct Logger {
    name: Box<str>,
    registry: Arc<LoggerRegistry>,
}

impl Logger {
    /// Create a logger named `name` publishing through `registry`.
    #[must_use]
    pub fn new(name: impl Into<Box<str>>, registry: Arc<LoggerRegistry>) -> Self {
        Self {
            name: name.into(),
            registry,
        }
    }

    /// Logger name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether a record at `level` would be published.
    #[must_use]
    pub fn enabled(&self, level: Level) -> bool {
        self.registry.enabled(&self.name, level)
    }

    /// Emit `message` at `level`.
    pub fn log(&self, level: Level, message: impl Into<Box<str>>) {
        if !self.enabled(level) {
            return;
        }
        self.registry
            .publish(&LogRecord::new(self.name.clone(), level, message));
    }

    /// Emit a pre-built record.
    ///
    /// The gate uses the record's own logger name, which may differ from
    /// this handle's name.
    pub fn emit(&self, record: &LogRecord) {
        if !self.registry.enabled(record.logger(), record.level()) {
            return;
        }
        self.registry.publish(record);
    }

    /// Emit `message` at `level` with the failure details of `error`.
    pub fn log_failure<E>(&self, level: Level, message: impl Into<Box<str>>, error: &E)
    where
        E: std::error::Error,
    {
        if !self.enabled(level) {
            return;
        }
        let record = LogRecord::new(self.name.clone(), level, message)
            .with_failure(Failure::from_error(error));
        self.registry.publish(&record);
    }

    /// Emit at [`Level::DEBUG`].
    pub fn debug(&self, message: impl Into<Box<str>>) {
        self.log(Level::DEBUG, message);
    }

    /// Emit at [`Level::INFO`].
    pub fn info(&self, message: impl Into<Box<str>>) {
        self.log(Level::INFO, message);
    }

    /// Emit at [`Level::WARNING`].
    pub fn warning(&self, message: impl Into<Box<str>>) {
        self.log(Level::WARNING, message);
    }

    /// Emit at [`Level::ERROR`].
    pub fn error(&self, message: impl Into<Box<str>>) {
        self.log(Level::ERROR, message);
    }
}
