//! Bootstrap environment lookup.
//!
//! The only variable the bootstrap consults is the config-path override.
//! Values are parsed from an explicit map so tests never touch the process
//! environment; `from_std_env` is the thin production entry point.

use logline_shared::{ErrorCode, ErrorEnvelope};
use std::collections::BTreeMap;
use std::fmt;

/// Environment variable naming the logging config file.
pub const ENV_CONFIG_PATH: &str = "LOGLINE_CONFIG_PATH";

/// Parsed bootstrap-relevant environment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BootstrapEnv {
    /// Config file path named by [`ENV_CONFIG_PATH`], when set.
    pub config_path: Option<Box<str>>,
}

impl BootstrapEnv {
    /// Parse from a key/value map (useful for tests and fixtures).
    ///
    /// # Errors
    ///
    /// Fails when a recognized variable is set but empty after trimming.
    pub fn from_map(map: &BTreeMap<String, String>) -> Result<Self, EnvParseError> {
        Ok(Self {
            config_path: parse_optional_trimmed_string(map, ENV_CONFIG_PATH)?,
        })
    }

    /// Parse from the current process environment.
    ///
    /// # Errors
    ///
    /// Fails when a recognized variable is set but empty after trimming.
    pub fn from_std_env() -> Result<Self, EnvParseError> {
        let mut map = BTreeMap::new();
        for name in [ENV_CONFIG_PATH] {
            if let Ok(value) = std::env::var(name) {
                map.insert(name.to_string(), value);
            }
        }
        Self::from_map(&map)
    }
}

/// Validation failures when parsing env variables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EnvParseError {
    /// An env var was present but empty after trimming.
    EmptyValue {
        /// Env var name.
        var: &'static str,
    },
}

impl fmt::Display for EnvParseError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyValue { var } => write!(formatter, "{var} must be non-empty"),
        }
    }
}

impl std::error::Error for EnvParseError {}

impl From<EnvParseError> for ErrorEnvelope {
    fn from(error: EnvParseError) -> Self {
        let message = error.to_string();
        let EnvParseError::EmptyValue { var } = error;
        Self::expected(ErrorCode::new("config", "empty_env_var"), message)
            .with_metadata("env_var", var)
    }
}

fn parse_optional_trimmed_string(
    map: &BTreeMap<String, String>,
    var: &'static str,
) -> Result<Option<Box<str>>, EnvParseError> {
    let Some(raw) = map.get(var) else {
        return Ok(None);
    };

    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(EnvParseError::EmptyValue { var });
    }

    Ok(Some(trimmed.to_owned().into_boxed_str()))
}
