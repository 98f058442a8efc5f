//! Single-line human-readable rendering.

use crate::formatter::{Formatter, LINE_TERMINATOR};
use logline_record::{LogRecord, Severity};

/// The operator-channel formatter.
///
/// Default handlers use this before structured output is mandated, and the
/// bootstrap uses it to report configuration problems. It never reads the
/// diagnostic context; operator lines stay short.
#[derive(Debug, Clone, Copy, Default)]
pub struct TextFormatter;

impl TextFormatter {
    /// Create the formatter.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Formatter for TextFormatter {
    fn format(&self, record: &LogRecord) -> String {
        let severity = Severity::for_level(record.level());

        let mut line = String::new();
        line.push_str(severity.as_str());
        line.push(' ');
        match record.component() {
            Some(component) => line.push_str(component),
            None => line.push_str(record.logger()),
        }
        if let Some(operation) = record.operation() {
            line.push(' ');
            line.push_str(operation);
        }
        line.push_str(&format!("[{:x}]: ", record.thread_id()));
        line.push_str(record.message());

        if let Some(failure) = record.failure() {
            for trace_line in failure.render().lines() {
                line.push_str(LINE_TERMINATOR);
                line.push_str("    ");
                line.push_str(trace_line);
            }
        }

        line.push_str(LINE_TERMINATOR);
        line
    }
}
