//! Declarative logging configuration schema and validation.
//!
//! The raw schema is string-typed and round-trips through serde untouched;
//! `validate_and_normalize` resolves it into a typed execution plan the
//! runtime can apply atomically.

use logline_record::Level;
use logline_shared::{ErrorCode, ErrorEnvelope};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Config schema version this crate reads.
pub const CURRENT_CONFIG_VERSION: u32 = 1;

const MAX_LOGGER_RULES: usize = 256;
const MAX_HANDLERS: usize = 16;

/// Top-level logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields, default)]
pub struct LoggingConfig {
    /// Schema version for forward-compatible migrations.
    pub version: u32,
    /// Level applied to loggers without a more specific rule.
    pub root_level: Box<str>,
    /// Per-logger level rules keyed by dotted logger name.
    pub loggers: BTreeMap<Box<str>, Box<str>>,
    /// Output handlers keyed by handler name.
    pub handlers: BTreeMap<Box<str>, HandlerConfig>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            version: CURRENT_CONFIG_VERSION,
            root_level: "info".into(),
            loggers: BTreeMap::new(),
            handlers: default_handlers(),
        }
    }
}

impl LoggingConfig {
    /// Validate the config and resolve it into an execution plan.
    ///
    /// Logger names are trimmed; empty names, post-trim duplicates, level
    /// strings that parse as neither a name nor an integer, unknown sink
    /// targets or formatters, and oversized rule sets are all rejected.
    ///
    /// # Errors
    ///
    /// Returns the first [`ConfigSchemaError`] encountered, in field order.
    pub fn validate_and_normalize(self) -> Result<ValidatedLoggingConfig, ConfigSchemaError> {
        self.validate_version()?;
        let root_level = parse_level_field("rootLevel", &self.root_level)?;
        let logger_levels = self.validate_loggers()?;
        let handlers = self.validate_handlers()?;

        Ok(ValidatedLoggingConfig {
            plan: ConfigPlan {
                root_level,
                logger_levels,
                handlers,
            },
            raw: self,
        })
    }

    const fn validate_version(&self) -> Result<(), ConfigSchemaError> {
        if self.version != CURRENT_CONFIG_VERSION {
            return Err(ConfigSchemaError::UnsupportedVersion {
                found: self.version,
                supported: CURRENT_CONFIG_VERSION,
            });
        }
        Ok(())
    }

    fn validate_loggers(&self) -> Result<BTreeMap<Box<str>, Level>, ConfigSchemaError> {
        if self.loggers.len() > MAX_LOGGER_RULES {
            return Err(ConfigSchemaError::LimitExceeded {
                section: "loggers",
                len: self.loggers.len(),
                max: MAX_LOGGER_RULES,
            });
        }

        let mut resolved = BTreeMap::new();
        for (name, level_text) in &self.loggers {
            let trimmed = name.trim();
            if trimmed.is_empty() {
                return Err(ConfigSchemaError::EmptyName { section: "loggers" });
            }

            let field = format!("loggers.{trimmed}");
            let level = parse_level_field(&field, level_text)?;
            if resolved.insert(Box::from(trimmed), level).is_some() {
                return Err(ConfigSchemaError::DuplicateLoggerRule {
                    name: trimmed.to_string(),
                });
            }
        }
        Ok(resolved)
    }

    fn validate_handlers(&self) -> Result<Vec<HandlerPlan>, ConfigSchemaError> {
        if self.handlers.len() > MAX_HANDLERS {
            return Err(ConfigSchemaError::LimitExceeded {
                section: "handlers",
                len: self.handlers.len(),
                max: MAX_HANDLERS,
            });
        }

        let mut plans = Vec::with_capacity(self.handlers.len());
        for (name, handler) in &self.handlers {
            let trimmed = name.trim();
            if trimmed.is_empty() {
                return Err(ConfigSchemaError::EmptyName {
                    section: "handlers",
                });
            }

            let target = SinkTarget::resolve(&handler.target).ok_or_else(|| {
                ConfigSchemaError::UnknownSinkTarget {
                    handler: trimmed.to_string(),
                    target: handler.target.to_string(),
                }
            })?;
            let formatter = FormatterKind::resolve(&handler.formatter).ok_or_else(|| {
                ConfigSchemaError::UnknownFormatter {
                    handler: trimmed.to_string(),
                    formatter: handler.formatter.to_string(),
                }
            })?;
            let level = match handler.level.as_deref() {
                None => None,
                Some(input) => {
                    let field = format!("handlers.{trimmed}.level");
                    Some(parse_level_field(&field, input)?)
                },
            };

            plans.push(HandlerPlan {
                name: Box::from(trimmed),
                target,
                formatter,
                level,
            });
        }
        Ok(plans)
    }
}

/// One output handler in the raw schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields, default)]
pub struct HandlerConfig {
    /// Sink target: `stderr` or `stdout`.
    pub target: Box<str>,
    /// Formatter kind: `text` or `json`.
    pub formatter: Box<str>,
    /// Optional handler-level gate applied before formatting.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub level: Option<Box<str>>,
}

impl Default for HandlerConfig {
    fn default() -> Self {
        Self {
            target: "stderr".into(),
            formatter: "text".into(),
            level: None,
        }
    }
}

fn default_handlers() -> BTreeMap<Box<str>, HandlerConfig> {
    let mut handlers = BTreeMap::new();
    handlers.insert(Box::from("stderr"), HandlerConfig::default());
    handlers
}

/// Validated config wrapper carrying the resolved execution plan.
#[derive(Debug, Clone)]
pub struct ValidatedLoggingConfig {
    raw: LoggingConfig,
    plan: ConfigPlan,
}

impl ValidatedLoggingConfig {
    /// Access the resolved plan.
    #[must_use]
    pub const fn plan(&self) -> &ConfigPlan {
        &self.plan
    }

    /// Borrow the raw config.
    #[must_use]
    pub const fn as_ref(&self) -> &LoggingConfig {
        &self.raw
    }

    /// Consume the wrapper and return the raw config.
    #[must_use]
    pub fn into_inner(self) -> LoggingConfig {
        self.raw
    }
}

impl AsRef<LoggingConfig> for ValidatedLoggingConfig {
    fn as_ref(&self) -> &LoggingConfig {
        &self.raw
    }
}

impl std::ops::Deref for ValidatedLoggingConfig {
    type Target = LoggingConfig;

    fn deref(&self) -> &Self::Target {
        &self.raw
    }
}

/// Typed plan derived from a validated config.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigPlan {
    /// Level applied when no logger rule matches.
    pub root_level: Level,
    /// Per-logger levels keyed by trimmed dotted name.
    pub logger_levels: BTreeMap<Box<str>, Level>,
    /// Handler construction plans in name order.
    pub handlers: Vec<HandlerPlan>,
}

/// Typed plan for one handler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HandlerPlan {
    /// Handler name after trimming.
    pub name: Box<str>,
    /// Where lines are written.
    pub target: SinkTarget,
    /// How records become lines.
    pub formatter: FormatterKind,
    /// Optional handler-level gate.
    pub level: Option<Level>,
}

/// Where a handler writes formatted lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SinkTarget {
    /// Standard error.
    Stderr,
    /// Standard output.
    Stdout,
}

impl SinkTarget {
    fn resolve(input: &str) -> Option<Self> {
        match input.trim().to_ascii_lowercase().as_str() {
            "stderr" => Some(Self::Stderr),
            "stdout" => Some(Self::Stdout),
            _ => None,
        }
    }

    /// The config-file spelling of this target.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Stderr => "stderr",
            Self::Stdout => "stdout",
        }
    }
}

/// How a handler renders records.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatterKind {
    /// Single-line human-readable rendering.
    Text,
    /// One JSON document per line.
    Json,
}

impl FormatterKind {
    fn resolve(input: &str) -> Option<Self> {
        match input.trim().to_ascii_lowercase().as_str() {
            "text" => Some(Self::Text),
            "json" => Some(Self::Json),
            _ => None,
        }
    }

    /// The config-file spelling of this kind.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Json => "json",
        }
    }
}

/// Typed validation errors for the configuration schema.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSchemaError {
    /// The config version is not supported by this binary.
    UnsupportedVersion {
        /// Version found in the config.
        found: u32,
        /// Version supported by this crate.
        supported: u32,
    },
    /// A level string parses as neither a level name nor an integer.
    InvalidLevel {
        /// Field path in the config file (e.g. `rootLevel`).
        field: String,
        /// Raw input value.
        input: String,
    },
    /// A section entry has an empty name after trimming.
    EmptyName {
        /// Schema section (`loggers` or `handlers`).
        section: &'static str,
    },
    /// Two logger rules collapse to the same name after trimming.
    DuplicateLoggerRule {
        /// The colliding trimmed name.
        name: String,
    },
    /// A handler names a sink target this binary does not provide.
    UnknownSinkTarget {
        /// Handler name.
        handler: String,
        /// Raw target value.
        target: String,
    },
    /// A handler names a formatter this binary does not provide.
    UnknownFormatter {
        /// Handler name.
        handler: String,
        /// Raw formatter value.
        formatter: String,
    },
    /// A section exceeds the maximum allowed number of entries.
    LimitExceeded {
        /// Schema section (`loggers` or `handlers`).
        section: &'static str,
        /// Number of entries found.
        len: usize,
        /// Maximum allowed number of entries.
        max: usize,
    },
}

impl ConfigSchemaError {
    fn error_code(&self) -> ErrorCode {
        match self {
            Self::UnsupportedVersion { .. } => ErrorCode::new("config", "unsupported_version"),
            Self::InvalidLevel { .. } => ErrorCode::new("config", "invalid_level"),
            Self::EmptyName { .. } => ErrorCode::new("config", "empty_name"),
            Self::DuplicateLoggerRule { .. } => ErrorCode::new("config", "duplicate_logger_rule"),
            Self::UnknownSinkTarget { .. } => ErrorCode::new("config", "unknown_sink_target"),
            Self::UnknownFormatter { .. } => ErrorCode::new("config", "unknown_formatter"),
            Self::LimitExceeded { .. } => ErrorCode::new("config", "limit_exceeded"),
        }
    }
}

impl fmt::Display for ConfigSchemaError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnsupportedVersion { found, supported } => write!(
                formatter,
                "unsupported config version: {found} (supported: {supported})"
            ),
            Self::InvalidLevel { field, input } => {
                write!(formatter, "{field} has an unrecognized level: {input:?}")
            },
            Self::EmptyName { section } => {
                write!(formatter, "{section} entries must have non-empty names")
            },
            Self::DuplicateLoggerRule { name } => {
                write!(formatter, "duplicate logger rule after trimming: {name:?}")
            },
            Self::UnknownSinkTarget { handler, target } => write!(
                formatter,
                "handler {handler:?} has an unknown sink target: {target:?}"
            ),
            Self::UnknownFormatter {
                handler,
                formatter: kind,
            } => write!(
                formatter,
                "handler {handler:?} has an unknown formatter: {kind:?}"
            ),
            Self::LimitExceeded { section, len, max } => write!(
                formatter,
                "{section} must have at most {max} entries (got {len})"
            ),
        }
    }
}

impl std::error::Error for ConfigSchemaError {}

impl From<ConfigSchemaError> for ErrorEnvelope {
    fn from(error: ConfigSchemaError) -> Self {
        let code = error.error_code();
        let message = error.to_string();
        let mut envelope = Self::expected(code, message);

        match error {
            ConfigSchemaError::UnsupportedVersion { found, supported } => {
                envelope = envelope
                    .with_metadata("found", found.to_string())
                    .with_metadata("supported", supported.to_string());
            },
            ConfigSchemaError::InvalidLevel { field, input } => {
                envelope = envelope
                    .with_metadata("field", field)
                    .with_metadata("input", input);
            },
            ConfigSchemaError::EmptyName { section } => {
                envelope = envelope.with_metadata("section", section);
            },
            ConfigSchemaError::DuplicateLoggerRule { name } => {
                envelope = envelope.with_metadata("name", name);
            },
            ConfigSchemaError::UnknownSinkTarget { handler, target } => {
                envelope = envelope
                    .with_metadata("handler", handler)
                    .with_metadata("target", target);
            },
            ConfigSchemaError::UnknownFormatter { handler, formatter } => {
                envelope = envelope
                    .with_metadata("handler", handler)
                    .with_metadata("formatter", formatter);
            },
            ConfigSchemaError::LimitExceeded { section, len, max } => {
                envelope = envelope
                    .with_metadata("section", section)
                    .with_metadata("len", len.to_string())
                    .with_metadata("max", max.to_string());
            },
        }

        envelope
    }
}

fn parse_level_field(field: &str, input: &str) -> Result<Level, ConfigSchemaError> {
    Level::parse(input).map_err(|_| ConfigSchemaError::InvalidLevel {
        field: field.to_string(),
        input: input.to_string(),
    })
}
