//! Numeric log levels with named thresholds.

use logline_shared::{ErrorCode, ErrorEnvelope};
use std::fmt;

/// Numeric log level carried by a record.
///
/// Levels are plain ordered integers. The named constants mark the common
/// thresholds; any other value is legal and compares by its number, so
/// callers can define intermediate levels without this crate knowing about
/// them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Level(i32);

impl Level {
    /// Lowest possible level; enables everything.
    pub const ALL: Self = Self(i32::MIN);
    /// Fine-grained tracing detail.
    pub const TRACE: Self = Self(300);
    /// Debugging detail.
    pub const DEBUG: Self = Self(500);
    /// Routine informational events.
    pub const INFO: Self = Self(800);
    /// Conditions that deserve operator attention.
    pub const WARNING: Self = Self(900);
    /// Failures.
    pub const ERROR: Self = Self(1000);
    /// Highest possible level; disables everything.
    pub const OFF: Self = Self(i32::MAX);

    /// Wrap a raw numeric level.
    #[must_use]
    pub const fn from_value(value: i32) -> Self {
        Self(value)
    }

    /// Returns the numeric value.
    #[must_use]
    pub const fn value(self) -> i32 {
        self.0
    }

    /// Returns the canonical name when the value matches a named level.
    #[must_use]
    pub const fn name(self) -> Option<&'static str> {
        match self.0 {
            i32::MIN => Some("all"),
            300 => Some("trace"),
            500 => Some("debug"),
            800 => Some("info"),
            900 => Some("warning"),
            1000 => Some("error"),
            i32::MAX => Some("off"),
            _ => None,
        }
    }

    /// Parse a level from a case-insensitive name or a raw integer.
    ///
    /// `warn` is accepted as an alias for `warning`.
    pub fn parse(input: &str) -> Result<Self, LevelParseError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(LevelParseError::Empty);
        }

        let named = match trimmed.to_ascii_lowercase().as_str() {
            "all" => Some(Self::ALL),
            "trace" => Some(Self::TRACE),
            "debug" => Some(Self::DEBUG),
            "info" => Some(Self::INFO),
            "warn" | "warning" => Some(Self::WARNING),
            "error" => Some(Self::ERROR),
            "off" => Some(Self::OFF),
            _ => None,
        };
        if let Some(level) = named {
            return Ok(level);
        }

        trimmed
            .parse::<i32>()
            .map(Self::from_value)
            .map_err(|_| LevelParseError::Unknown {
                input: trimmed.into(),
            })
    }
}

impl fmt::Display for Level {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name() {
            Some(name) => formatter.write_str(name),
            None => write!(formatter, "{}", self.0),
        }
    }
}

/// Parse failures for [`Level`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LevelParseError {
    /// Input is empty after trimming.
    Empty,
    /// Input is neither a known name nor an integer.
    Unknown {
        /// Trimmed input that failed to parse.
        input: Box<str>,
    },
}

impl fmt::Display for LevelParseError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => formatter.write_str("level must be non-empty"),
            Self::Unknown { input } => write!(formatter, "unknown level: {input}"),
        }
    }
}

impl std::error::Error for LevelParseError {}

impl From<LevelParseError> for ErrorEnvelope {
    fn from(error: LevelParseError) -> Self {
        let envelope = Self::expected(ErrorCode::new("record", "invalid_level"), error.to_string());
        match error {
            LevelParseError::Empty => envelope,
            LevelParseError::Unknown { input } => {
                envelope.with_metadata("input", String::from(input))
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn named_levels_parse_case_insensitively() -> Result<(), LevelParseError> {
        assert_eq!(Level::parse("info")?, Level::INFO);
        assert_eq!(Level::parse("INFO")?, Level::INFO);
        assert_eq!(Level::parse(" Warning ")?, Level::WARNING);
        assert_eq!(Level::parse("warn")?, Level::WARNING);
        assert_eq!(Level::parse("off")?, Level::OFF);
        assert_eq!(Level::parse("all")?, Level::ALL);
        Ok(())
    }

    #[test]
    fn numeric_levels_parse_to_raw_values() -> Result<(), LevelParseError> {
        assert_eq!(Level::parse("850")?, Level::from_value(850));
        assert_eq!(Level::parse("-5")?, Level::from_value(-5));
        Ok(())
    }

    #[test]
    fn empty_and_unknown_inputs_are_rejected() {
        assert_eq!(Level::parse("   ").err(), Some(LevelParseError::Empty));
        assert!(matches!(
            Level::parse("chatty").err(),
            Some(LevelParseError::Unknown { .. })
        ));
    }

    #[test]
    fn levels_order_by_value() {
        assert!(Level::ERROR > Level::WARNING);
        assert!(Level::WARNING > Level::INFO);
        assert!(Level::INFO > Level::DEBUG);
        assert!(Level::DEBUG > Level::TRACE);
        assert!(Level::OFF > Level::ERROR);
        assert!(Level::ALL < Level::TRACE);
    }

    #[test]
    fn display_prefers_names() {
        assert_eq!(Level::INFO.to_string(), "info");
        assert_eq!(Level::from_value(650).to_string(), "650");
    }

    #[test]
    fn parse_error_converts_to_envelope_with_input() {
        let error = match Level::parse("chatty") {
            Err(error) => error,
            Ok(_) => return,
        };
        let envelope = ErrorEnvelope::from(error);
        assert_eq!(envelope.code, ErrorCode::new("record", "invalid_level"));
        assert_eq!(
            envelope.metadata.get("input").map(String::as_str),
            Some("chatty")
        );
    }
}
