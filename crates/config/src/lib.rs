//! # logline-config
//!
//! Declarative logging configuration: a serde schema for JSON and TOML
//! config files, validation into a typed execution plan, and the bootstrap
//! environment lookup.
//!
//! Loading never applies anything; the runtime crate takes a
//! [`ValidatedLoggingConfig`] and swaps it into the registry atomically.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

mod env;
mod load;
mod schema;

pub use env::{BootstrapEnv, ENV_CONFIG_PATH, EnvParseError};
pub use load::{
    load_config_from_path, parse_logging_config_json, parse_logging_config_toml, to_pretty_json,
    to_pretty_toml,
};
pub use schema::{
    CURRENT_CONFIG_VERSION, ConfigPlan, ConfigSchemaError, FormatterKind, HandlerConfig,
    HandlerPlan, LoggingConfig, SinkTarget, ValidatedLoggingConfig,
};

/// Crate version for diagnostics.
#[must_use]
pub const fn config_crate_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_matches_manifest() {
        assert_eq!(config_crate_version(), env!("CARGO_PKG_VERSION"));
    }
}
