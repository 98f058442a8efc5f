//! # logline-record
//!
//! Log event model: numeric levels, severity bands, capture timestamps,
//! failure descriptions, and the [`LogRecord`] type that ties them together.
//!
//! Records are plain data. Formatting and delivery live in downstream
//! crates; this one only defines what a log event *is* and how levels map
//! onto the four output severity bands.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

mod failure;
mod level;
mod record;
mod severity;
mod thread;
mod timestamp;

pub use failure::Failure;
pub use level::{Level, LevelParseError};
pub use record::{LogRecord, now_epoch_ms};
pub use severity::Severity;
pub use thread::current_thread_id;
pub use timestamp::Timestamp;

/// Crate version for diagnostics.
#[must_use]
pub const fn record_crate_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_matches_manifest() {
        assert_eq!(record_crate_version(), env!("CARGO_PKG_VERSION"));
    }

    #[test]
    fn record_severity_follows_level() {
        let record = LogRecord::new("app", Level::WARNING, "low disk");
        assert_eq!(Severity::for_level(record.level()), Severity::Warning);
    }
}
