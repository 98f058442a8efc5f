//! One JSON document per line.

use crate::formatter::{Formatter, LINE_TERMINATOR, build_message};
use logline_context::{ContextValue, store};
use logline_record::{LogRecord, Severity, Timestamp};
use serde::Serialize;
use serde_json::{Map, Value};

/// The structured formatter: each record becomes one JSON object.
///
/// The first four fields are always `timestamp`, `severity`, `thread`, and
/// `message`, in that order; every entry of the calling thread's diagnostic
/// context follows. Consumers must not depend on an order among the
/// context fields.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonFormatter;

impl JsonFormatter {
    /// Create the formatter.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Formatter for JsonFormatter {
    fn format(&self, record: &LogRecord) -> String {
        let payload = JsonLine {
            timestamp: record.timestamp(),
            severity: Severity::for_level(record.level()).as_str(),
            thread: format!("{:x}", record.thread_id()),
            message: build_message(record),
            context: context_fields(),
        };

        let mut line = serde_json::to_string(&payload).map_or_else(
            |_| {
                debug_assert!(false, "log line serialization failed");
                FALLBACK_LINE.to_string()
            },
            |encoded| encoded,
        );
        line.push_str(LINE_TERMINATOR);
        line
    }
}

/// Serialization order is the wire order: the four fixed fields, then the
/// flattened context entries.
#[derive(Serialize)]
struct JsonLine {
    timestamp: Timestamp,
    severity: &'static str,
    thread: String,
    message: String,
    #[serde(flatten)]
    context: Map<String, Value>,
}

const FALLBACK_LINE: &str =
    "{\"severity\":\"ERROR\",\"message\":\"logline: log record serialization failed\"}";

fn context_fields() -> Map<String, Value> {
    let mut fields = Map::new();
    for (key, value) in store::entries() {
        let rendered = match value {
            ContextValue::Null => continue,
            ContextValue::Bool(inner) => Value::Bool(inner),
            ContextValue::Int(inner) => Value::from(inner),
            ContextValue::Float(inner) => float_value(inner),
            ContextValue::Str(inner) => Value::String(String::from(inner)),
        };
        fields.insert(String::from(key), rendered);
    }
    fields
}

// JSON has no NaN or infinities; those fall back to their string rendering.
fn float_value(value: f64) -> Value {
    serde_json::Number::from_f64(value)
        .map_or_else(|| Value::String(value.to_string()), Value::Number)
}
