//! The formatter seam between records and sinks.

use logline_record::LogRecord;

/// Platform line terminator appended to every formatted line.
pub const LINE_TERMINATOR: &str = if cfg!(windows) { "\r\n" } else { "\n" };

/// Renders one record as a complete output line.
///
/// Implementations are pure with respect to the record but may read the
/// calling thread's diagnostic context as ambient state. Formatting never
/// blocks and never fails; an internal rendering problem is a programming
/// defect handled with a fallback line.
pub trait Formatter: Send + Sync {
    /// Render `record`, including the trailing line terminator.
    fn format(&self, record: &LogRecord) -> String;
}

/// Shared message-field shape: source component if present, else the
/// logger identity; the operation appended after a space; then `": "` and
/// the resolved text; then the full failure trace on following lines.
pub(crate) fn build_message(record: &LogRecord) -> String {
    let mut message = String::new();
    match record.component() {
        Some(component) => message.push_str(component),
        None => message.push_str(record.logger()),
    }
    if let Some(operation) = record.operation() {
        message.push(' ');
        message.push_str(operation);
    }
    message.push_str(": ");
    message.push_str(record.message());
    if let Some(failure) = record.failure() {
        message.push('\n');
        message.push_str(&failure.render());
    }
    message
}
