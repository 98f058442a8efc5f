//! Config file loading: read, detect format, parse, validate.
//!
//! Every failure on this path is an expected `ErrorEnvelope` with a
//! `config:*` code; the caller decides whether it is fatal.

use crate::schema::{LoggingConfig, ValidatedLoggingConfig};
use logline_shared::{ErrorCode, ErrorEnvelope, Result, ResultExt};
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ConfigFormat {
    Json,
    Toml,
}

/// Parse and validate a JSON config document.
///
/// # Errors
///
/// Fails with `config:invalid_json` on malformed input and with the
/// relevant `config:*` code when validation rejects the parsed config.
pub fn parse_logging_config_json(input: &str) -> Result<ValidatedLoggingConfig> {
    parse_config_unvalidated(input, ConfigFormat::Json)?
        .validate_and_normalize()
        .map_err(ErrorEnvelope::from)
}

/// Parse and validate a TOML config document.
///
/// # Errors
///
/// Fails with `config:invalid_toml` on malformed input and with the
/// relevant `config:*` code when validation rejects the parsed config.
pub fn parse_logging_config_toml(input: &str) -> Result<ValidatedLoggingConfig> {
    parse_config_unvalidated(input, ConfigFormat::Toml)?
        .validate_and_normalize()
        .map_err(ErrorEnvelope::from)
}

/// Load, parse, and validate the config file at `path`.
///
/// The format is detected from the file extension; files without an
/// extension are read as JSON.
///
/// # Errors
///
/// Fails when the file cannot be read, its format is unsupported, its
/// content is malformed, or validation rejects it. The path is attached as
/// metadata on every failure.
pub fn load_config_from_path(path: &Path) -> Result<ValidatedLoggingConfig> {
    let format = detect_config_format(path)?;
    let config_text = read_config_file(path)?;

    parse_config_unvalidated(&config_text, format)
        .and_then(|config| config.validate_and_normalize().map_err(ErrorEnvelope::from))
        .map_err_with(|envelope| envelope.with_metadata("path", path.to_string_lossy()))
}

/// Serialize a config as deterministic pretty JSON (with trailing newline).
///
/// # Errors
///
/// Fails only if serde rejects the config, which indicates a programming
/// defect in the schema types.
pub fn to_pretty_json(config: &LoggingConfig) -> Result<String> {
    let mut output = serde_json::to_string_pretty(config).map_err(|error| {
        ErrorEnvelope::unexpected(
            ErrorCode::internal(),
            format!("failed to serialize config: {error}"),
        )
    })?;
    output.push('\n');
    Ok(output)
}

/// Serialize a config as deterministic pretty TOML (with trailing newline).
///
/// # Errors
///
/// Fails only if serde rejects the config, which indicates a programming
/// defect in the schema types.
pub fn to_pretty_toml(config: &LoggingConfig) -> Result<String> {
    let mut output = toml::to_string_pretty(config).map_err(|error| {
        ErrorEnvelope::unexpected(
            ErrorCode::new("config", "serialize_toml"),
            format!("failed to serialize config TOML: {error}"),
        )
    })?;
    output.push('\n');
    Ok(output)
}

fn parse_config_unvalidated(input: &str, format: ConfigFormat) -> Result<LoggingConfig> {
    match format {
        ConfigFormat::Json => serde_json::from_str(input).map_err(|error| {
            ErrorEnvelope::expected(
                ErrorCode::new("config", "invalid_json"),
                format!("invalid config JSON: {error}"),
            )
        }),
        ConfigFormat::Toml => toml::from_str(input).map_err(|error| {
            ErrorEnvelope::expected(
                ErrorCode::new("config", "invalid_toml"),
                format!("invalid config TOML: {error}"),
            )
        }),
    }
}

fn read_config_file(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|error| {
        let code = match error.kind() {
            std::io::ErrorKind::NotFound => ErrorCode::new("config", "file_not_found"),
            std::io::ErrorKind::PermissionDenied => ErrorCode::new("config", "permission_denied"),
            _ => ErrorCode::new("config", "io"),
        };

        ErrorEnvelope::expected(code, format!("failed to read config file: {error}"))
            .with_metadata("path", path.to_string_lossy())
    })
}

fn detect_config_format(path: &Path) -> Result<ConfigFormat> {
    let ext = path
        .extension()
        .and_then(|value| value.to_str())
        .map(str::to_ascii_lowercase);
    match ext.as_deref() {
        None | Some("json") => Ok(ConfigFormat::Json),
        Some("toml") => Ok(ConfigFormat::Toml),
        Some(other) => Err(ErrorEnvelope::expected(
            ErrorCode::new("config", "unsupported_format"),
            "unsupported config format; use .json or .toml",
        )
        .with_metadata("extension", other.to_string())
        .with_metadata("path", path.to_string_lossy())),
    }
}
