//! # logline-facade
//!
//! Single entry point for embedders and the CLI. Re-exports the public
//! surface of the component crates and adds the global-registry
//! conveniences: [`init`] bootstraps the process-wide registry with the
//! standard configurators, [`logger`] hands out loggers bound to it, and
//! [`load_effective_config_json`] renders the configuration a bootstrap
//! would use.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

use std::path::Path;

pub use logline_config::{
    BootstrapEnv, CURRENT_CONFIG_VERSION, ConfigPlan, ConfigSchemaError, ENV_CONFIG_PATH,
    EnvParseError, FormatterKind, HandlerConfig, HandlerPlan, LoggingConfig, SinkTarget,
    ValidatedLoggingConfig, load_config_from_path, parse_logging_config_json,
    parse_logging_config_toml, to_pretty_json, to_pretty_toml,
};
pub use logline_context::{
    ContextEntries, ContextError, ContextSnapshot, ContextValue, DiagnosticContext,
    FromContextValue, ValueKind,
};
/// Thread-local diagnostic context operations (`put`, `get`, `entries`,
/// `detach`, `remove`, `snapshot`, `attach`).
pub use logline_context::store as context;
pub use logline_format::{Formatter, JsonFormatter, LINE_TERMINATOR, TextFormatter};
pub use logline_record::{
    Failure, Level, LevelParseError, LogRecord, Severity, Timestamp, current_thread_id,
    now_epoch_ms,
};
pub use logline_runtime::{
    BootstrapReport, ConfigSource, ConfiguratorSet, Handler, LogSink, Logger, LoggerRegistry,
    MemorySink, StderrLogSink, StdoutLogSink, StructuredOutputConfigurator, SystemConfigurator,
    initialize, initialize_with_env, memory_handler,
};
pub use logline_shared::{ErrorCode, ErrorEnvelope, ErrorKind, ErrorMetadata};

/// Crate version for diagnostics.
#[must_use]
pub const fn facade_crate_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

/// Bootstrap the process-wide registry with the standard configurators.
///
/// Runs the full startup sequence against [`LoggerRegistry::global`]: config
/// source selection (explicit path, then [`ENV_CONFIG_PATH`], then
/// defaults), atomic apply, and the standard configurator set.
///
/// # Errors
///
/// Fails only when a configurator fails; config file problems are reported
/// in the returned [`BootstrapReport`].
pub fn init(config_path: Option<&Path>) -> Result<BootstrapReport, ErrorEnvelope> {
    initialize(
        &LoggerRegistry::global(),
        config_path,
        &ConfiguratorSet::standard(),
    )
}

/// A logger bound to the process-wide registry.
#[must_use]
pub fn logger(name: impl Into<Box<str>>) -> Logger {
    LoggerRegistry::global().logger(name)
}

/// Render the effective configuration as deterministic pretty JSON.
///
/// Follows the bootstrap source order: the explicit path when given,
/// otherwise the path named by [`ENV_CONFIG_PATH`], otherwise the built-in
/// defaults. Unlike bootstrap this is a debugging surface, so a missing or
/// broken file is returned as an error instead of degrading to defaults.
pub fn load_effective_config_json(config_path: Option<&Path>) -> Result<String, ErrorEnvelope> {
    let env = BootstrapEnv::from_std_env()?;
    load_effective_config_json_with_env(&env, config_path)
}

/// [`load_effective_config_json`] with an explicit environment.
pub fn load_effective_config_json_with_env(
    env: &BootstrapEnv,
    config_path: Option<&Path>,
) -> Result<String, ErrorEnvelope> {
    let config = match config_path {
        Some(path) => load_config_from_path(path)?.into_inner(),
        None => match env.config_path.as_deref() {
            Some(path) => load_config_from_path(Path::new(path))?.into_inner(),
            None => LoggingConfig::default(),
        },
    };
    to_pretty_json(&config)
}

/// Verify thread-local context wiring: a put/get round-trip with typed
/// access, then a clean detach.
#[cfg(any(debug_assertions, feature = "dev-tools"))]
pub fn run_context_smoke() -> Result<(), ErrorEnvelope> {
    context::put("smokeKey", 41i64);
    let value: Option<i64> = context::get("smokeKey")?;
    context::remove();

    if value == Some(41) {
        Ok(())
    } else {
        Err(ErrorEnvelope::invariant(
            ErrorCode::internal(),
            "context round-trip returned the wrong value",
        ))
    }
}

/// Verify the JSON formatter produces a parseable line with the fixed
/// leading fields.
#[cfg(any(debug_assertions, feature = "dev-tools"))]
pub fn run_format_smoke() -> Result<(), ErrorEnvelope> {
    let record = LogRecord::new("logline.smoke", Level::INFO, "format smoke");
    let line = JsonFormatter::new().format(&record);
    let value: serde_json::Value = serde_json::from_str(line.trim_end()).map_err(|error| {
        ErrorEnvelope::invariant(ErrorCode::internal(), "formatter emitted invalid JSON")
            .with_metadata("cause", error.to_string())
    })?;

    if value["severity"] == "INFO" && value["message"] == "logline.smoke: format smoke" {
        Ok(())
    } else {
        Err(ErrorEnvelope::invariant(
            ErrorCode::internal(),
            "formatter output shape is wrong",
        ))
    }
}

/// Verify the registry pipeline end to end with an in-memory handler.
#[cfg(any(debug_assertions, feature = "dev-tools"))]
pub fn run_pipeline_smoke() -> Result<(), ErrorEnvelope> {
    use std::sync::Arc;

    let registry = Arc::new(LoggerRegistry::new());
    let (handler, sink) = memory_handler("smoke");
    registry.replace_handlers(vec![handler]);

    registry.logger("logline.smoke").info("pipeline smoke");

    let lines = sink.take();
    if lines.len() == 1 && lines[0].contains("pipeline smoke") {
        Ok(())
    } else {
        Err(
            ErrorEnvelope::invariant(ErrorCode::internal(), "pipeline did not deliver the record")
                .with_metadata("lines", lines.len().to_string()),
        )
    }
}
