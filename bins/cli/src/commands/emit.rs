//! Emit command handler.

use crate::error::{CliError, ExitCode, envelope_exit_code};
use crate::format::OutputMode;
use crate::{CliOutput, format_error_output, log_info};
use logline_facade::{
    ConfigSource, ConfiguratorSet, ContextValue, Level, LogRecord, LoggerRegistry, context,
    initialize,
};
use std::path::Path;

/// Parsed flags for the emit command.
pub struct EmitCommandInput<'a> {
    pub level: &'a str,
    pub message: &'a str,
    pub logger: &'a str,
    pub component: Option<&'a str>,
    pub operation: Option<&'a str>,
    pub context: &'a [String],
    pub config: Option<&'a Path>,
}

/// Run the emit command: bootstrap, set context pairs, emit one record.
///
/// The record goes through the live handlers, so it lands wherever the
/// effective config points them; stdout carries only the summary.
pub fn run_emit(mode: OutputMode, input: &EmitCommandInput<'_>) -> Result<CliOutput, CliError> {
    let level =
        Level::parse(input.level).map_err(|error| CliError::InvalidInput(error.to_string()))?;
    let pairs = parse_context_pairs(input.context)?;

    let registry = LoggerRegistry::new();
    let report = match initialize(&registry, input.config, &ConfiguratorSet::standard()) {
        Ok(report) => report,
        Err(envelope) => {
            return Ok(format_error_output(
                mode,
                &envelope,
                envelope_exit_code(&envelope),
            ));
        },
    };

    for (key, value) in pairs {
        context::put(key, value);
    }

    let mut record = LogRecord::new(input.logger, level, input.message);
    if let Some(component) = input.component {
        record = record.with_component(component);
    }
    if let Some(operation) = input.operation {
        record = record.with_operation(operation);
    }

    let published = registry.enabled(input.logger, level);
    if published {
        registry.publish(&record);
    }

    let mut stderr = String::new();
    log_info(&mut stderr, "emit completed", mode.no_progress);

    let config_error = report.config_error().map(ToString::to_string);
    let stdout = if mode.is_json() {
        let payload = serde_json::json!({
            "status": "ok",
            "logger": input.logger,
            "level": level.to_string(),
            "published": published,
            "configSource": config_source_name(report.source()),
            "configError": config_error,
            "warnings": report.warnings(),
        });
        let mut output = serde_json::to_string_pretty(&payload)?;
        output.push('\n');
        output
    } else {
        let mut output = format!(
            "status: ok\nlogger: {}\nlevel: {level}\npublished: {published}\nconfigSource: {}\n",
            input.logger,
            config_source_name(report.source())
        );
        if let Some(message) = config_error {
            output.push_str("configError: ");
            output.push_str(&message);
            output.push('\n');
        }
        output
    };

    Ok(CliOutput {
        stdout,
        stderr,
        exit_code: ExitCode::Ok,
    })
}

const fn config_source_name(source: ConfigSource) -> &'static str {
    match source {
        ConfigSource::Explicit => "explicit",
        ConfigSource::Environment => "environment",
        ConfigSource::Defaults => "defaults",
    }
}

fn parse_context_pairs(pairs: &[String]) -> Result<Vec<(String, ContextValue)>, CliError> {
    pairs.iter().map(|pair| parse_context_pair(pair)).collect()
}

fn parse_context_pair(pair: &str) -> Result<(String, ContextValue), CliError> {
    let Some((key, value)) = pair.split_once('=') else {
        return Err(CliError::InvalidInput(format!(
            "context pair {pair:?} must be key=value"
        )));
    };

    let key = key.trim();
    if key.is_empty() {
        return Err(CliError::InvalidInput(format!(
            "context pair {pair:?} has an empty key"
        )));
    }

    Ok((key.to_string(), parse_context_value(value)))
}

/// Booleans and numbers keep their native JSON type in the record; anything
/// else rides along as a string.
fn parse_context_value(value: &str) -> ContextValue {
    if let Ok(flag) = value.parse::<bool>() {
        return ContextValue::from(flag);
    }
    if let Ok(number) = value.parse::<i64>() {
        return ContextValue::from(number);
    }
    if let Ok(number) = value.parse::<f64>() {
        return ContextValue::from(number);
    }
    ContextValue::from(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use logline_facade::ValueKind;

    #[test]
    fn context_values_keep_native_types() {
        assert_eq!(parse_context_value("true").kind(), ValueKind::Bool);
        assert_eq!(parse_context_value("42").kind(), ValueKind::Int);
        assert_eq!(parse_context_value("2.5").kind(), ValueKind::Float);
        assert_eq!(parse_context_value("t-123").kind(), ValueKind::Str);
    }

    #[test]
    fn pair_without_equals_is_rejected() {
        let error = parse_context_pair("no-separator").unwrap_err();
        assert!(matches!(error, CliError::InvalidInput(_)));
    }

    #[test]
    fn pair_with_empty_key_is_rejected() {
        let error = parse_context_pair("=value").unwrap_err();
        assert!(matches!(error, CliError::InvalidInput(_)));
    }
}
