//! Log events produced by loggers and consumed by formatters.

use crate::{Failure, Level, Timestamp, current_thread_id};
use std::time::{SystemTime, UNIX_EPOCH};

/// One log event.
///
/// A record carries everything a formatter needs except the ambient
/// diagnostic context: the capture time, numeric level, logger identity,
/// optional source component and operation, the resolved message text, an
/// optional attached failure, and the producing thread's identifier.
#[derive(Debug, Clone)]
pub struct LogRecord {
    timestamp_ms: i64,
    level: Level,
    logger: Box<str>,
    component: Option<Box<str>>,
    operation: Option<Box<str>>,
    message: Box<str>,
    failure: Option<Failure>,
    thread_id: u64,
}

impl LogRecord {
    /// Create a record stamped with the current time and calling thread.
    pub fn new(logger: impl Into<Box<str>>, level: Level, message: impl Into<Box<str>>) -> Self {
        Self {
            timestamp_ms: now_epoch_ms(),
            level,
            logger: logger.into(),
            component: None,
            operation: None,
            message: message.into(),
            failure: None,
            thread_id: current_thread_id(),
        }
    }

    /// Set the source-component name.
    #[must_use]
    pub fn with_component(mut self, component: impl Into<Box<str>>) -> Self {
        self.component = Some(component.into());
        self
    }

    /// Set the source-operation name.
    #[must_use]
    pub fn with_operation(mut self, operation: impl Into<Box<str>>) -> Self {
        self.operation = Some(operation.into());
        self
    }

    /// Attach a failure.
    #[must_use]
    pub fn with_failure(mut self, failure: Failure) -> Self {
        self.failure = Some(failure);
        self
    }

    /// Override the capture timestamp (milliseconds since the epoch).
    #[must_use]
    pub const fn with_timestamp_ms(mut self, timestamp_ms: i64) -> Self {
        self.timestamp_ms = timestamp_ms;
        self
    }

    /// Override the producing thread identifier.
    #[must_use]
    pub const fn with_thread_id(mut self, thread_id: u64) -> Self {
        self.thread_id = thread_id;
        self
    }

    /// Capture timestamp in milliseconds since the epoch.
    #[must_use]
    pub const fn timestamp_ms(&self) -> i64 {
        self.timestamp_ms
    }

    /// Capture timestamp split into seconds and nanoseconds.
    #[must_use]
    pub const fn timestamp(&self) -> Timestamp {
        Timestamp::from_epoch_ms(self.timestamp_ms)
    }

    /// Numeric level.
    #[must_use]
    pub const fn level(&self) -> Level {
        self.level
    }

    /// Logger identity.
    #[must_use]
    pub fn logger(&self) -> &str {
        &self.logger
    }

    /// Source-component name, when present.
    #[must_use]
    pub fn component(&self) -> Option<&str> {
        self.component.as_deref()
    }

    /// Source-operation name, when present.
    #[must_use]
    pub fn operation(&self) -> Option<&str> {
        self.operation.as_deref()
    }

    /// Resolved message text.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Attached failure, when present.
    #[must_use]
    pub const fn failure(&self) -> Option<&Failure> {
        self.failure.as_ref()
    }

    /// Producing thread identifier.
    #[must_use]
    pub const fn thread_id(&self) -> u64 {
        self.thread_id
    }
}

/// Milliseconds since the Unix epoch, zero when the clock reads pre-epoch.
#[must_use]
pub fn now_epoch_ms() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |elapsed| {
            i64::try_from(elapsed.as_millis()).unwrap_or(i64::MAX)
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_records_capture_time_and_thread() {
        let before = now_epoch_ms();
        let record = LogRecord::new("app.http", Level::INFO, "handled request");
        let after = now_epoch_ms();

        assert!(record.timestamp_ms() >= before);
        assert!(record.timestamp_ms() <= after);
        assert_eq!(record.thread_id(), current_thread_id());
        assert_eq!(record.logger(), "app.http");
        assert_eq!(record.message(), "handled request");
        assert!(record.component().is_none());
        assert!(record.operation().is_none());
        assert!(record.failure().is_none());
    }

    #[test]
    fn builders_override_fields() {
        let failure = Failure::new("app::Error", "boom");
        let record = LogRecord::new("app", Level::ERROR, "request failed")
            .with_component("Server")
            .with_operation("handle")
            .with_failure(failure)
            .with_timestamp_ms(12_345_678)
            .with_thread_id(0xff);

        assert_eq!(record.component(), Some("Server"));
        assert_eq!(record.operation(), Some("handle"));
        assert_eq!(record.timestamp_ms(), 12_345_678);
        assert_eq!(record.timestamp().seconds, 12_345);
        assert_eq!(record.thread_id(), 0xff);
        assert!(record.failure().is_some());
    }
}
