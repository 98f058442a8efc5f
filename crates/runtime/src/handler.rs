//! Handlers connect a formatter to a sink, with an optional level gate.

use crate::sink::{LogSink, MemorySink, StderrLogSink, StdoutLogSink};
use logline_config::{FormatterKind, HandlerPlan, SinkTarget};
use logline_format::{Formatter, JsonFormatter, TextFormatter};
use logline_record::{Level, LogRecord};
use std::sync::Arc;

/// One output channel: records pass the optional gate, get formatted, and
/// the line is handed to the sink.
#[derive(Clone)]
pub struct Handler {
    name: Box<str>,
    level: Option<Level>,
    formatter: Arc<dyn Formatter>,
    sink: Arc<dyn LogSink>,
}

impl Handler {
    /// Create an ungated handler.
    pub fn new(
        name: impl Into<Box<str>>,
        formatter: Arc<dyn Formatter>,
        sink: Arc<dyn LogSink>,
    ) -> Self {
        Self {
            name: name.into(),
            level: None,
            formatter,
            sink,
        }
    }

    /// Build a handler from a validated config plan entry.
    #[must_use]
    pub fn from_plan(plan: &HandlerPlan) -> Self {
        let sink: Arc<dyn LogSink> = match plan.target {
            SinkTarget::Stderr => Arc::new(StderrLogSink),
            SinkTarget::Stdout => Arc::new(StdoutLogSink),
        };
        let formatter: Arc<dyn Formatter> = match plan.formatter {
            FormatterKind::Text => Arc::new(TextFormatter::new()),
            FormatterKind::Json => Arc::new(JsonFormatter::new()),
        };

        Self {
            name: plan.name.clone(),
            level: plan.level,
            formatter,
            sink,
        }
    }

    /// Set the handler-level gate.
    #[must_use]
    pub const fn with_level(mut self, level: Level) -> Self {
        self.level = Some(level);
        self
    }

    /// Rebind the formatter, keeping name, gate, and sink.
    #[must_use]
    pub fn with_formatter(&self, formatter: Arc<dyn Formatter>) -> Self {
        Self {
            name: self.name.clone(),
            level: self.level,
            formatter,
            sink: Arc::clone(&self.sink),
        }
    }

    /// Handler name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Handler-level gate, when set.
    #[must_use]
    pub const fn level(&self) -> Option<Level> {
        self.level
    }

    /// Format and write `record` unless the gate rejects it.
    pub fn publish(&self, record: &LogRecord) {
        if let Some(gate) = self.level {
            if record.level() < gate {
                return;
            }
        }

        let line = self.formatter.format(record);
        self.sink.write_line(&line);
    }
}

impl std::fmt::Debug for Handler {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter
            .debug_struct("Handler")
            .field("name", &self.name)
            .field("level", &self.level)
            .finish_non_exhaustive()
    }
}

/// Handler capturing lines in memory, for tests and smoke checks.
#[must_use]
pub fn memory_handler(name: impl Into<Box<str>>) -> (Handler, Arc<MemorySink>) {
    let sink = Arc::new(MemorySink::new());
    let handler = Handler::new(
        name,
        Arc::new(TextFormatter::new()),
        Arc::clone(&sink) as Arc<dyn LogSink>,
    );
    (handler, sink)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ungated_handler_publishes_everything() {
        let (handler, sink) = memory_handler("memory");
        handler.publish(&LogRecord::new("app", Level::DEBUG, "fine-grained"));
        handler.publish(&LogRecord::new("app", Level::ERROR, "broken"));

        assert_eq!(sink.take().len(), 2);
    }

    #[test]
    fn gate_drops_records_below_its_level() {
        let (handler, sink) = memory_handler("memory");
        let handler = handler.with_level(Level::WARNING);

        handler.publish(&LogRecord::new("app", Level::INFO, "routine"));
        handler.publish(&LogRecord::new("app", Level::WARNING, "low disk"));

        let lines = sink.take();
        assert_eq!(lines.len(), 1);
        assert!(lines[0].contains("low disk"));
    }

    #[test]
    fn with_formatter_rebinds_only_the_formatter() {
        let (handler, sink) = memory_handler("memory");
        let handler = handler
            .with_level(Level::INFO)
            .with_formatter(Arc::new(JsonFormatter::new()));

        assert_eq!(handler.name(), "memory");
        assert_eq!(handler.level(), Some(Level::INFO));

        handler.publish(&LogRecord::new("app", Level::INFO, "routine"));
        let lines = sink.take();
        assert_eq!(lines.len(), 1);
        assert!(lines[0].starts_with('{'));
    }
}
