//! CLI binary entrypoint.

mod commands;
mod error;
mod format;

use clap::{Parser, Subcommand};
use commands::{EmitCommandInput, run_check, run_emit, run_info, run_show};
use error::{CliError, ExitCode};
use format::{OutputArgs, OutputMode};
use logline_facade::ErrorEnvelope;
#[cfg(any(debug_assertions, feature = "dev-tools"))]
use logline_facade::{
    facade_crate_version, run_context_smoke, run_format_smoke, run_pipeline_smoke,
};
use std::io::{self, Write};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(
    name = "logline",
    version,
    about = "Structured logging toolkit CLI",
    long_about = None
)]
struct Cli {
    #[command(flatten)]
    output: OutputArgs,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Validate the build and logging pipeline wiring.
    #[cfg(any(debug_assertions, feature = "dev-tools"))]
    SelfCheck,
    /// Show build and version details.
    Info,
    /// Load and validate a config file.
    Check {
        /// Config file path (JSON or TOML).
        #[arg(long)]
        config: PathBuf,
    },
    /// Print the effective configuration.
    Show {
        /// Config file path; defaults to `LOGLINE_CONFIG_PATH`, then the
        /// built-in configuration.
        #[arg(long)]
        config: Option<PathBuf>,
    },
    /// Bootstrap and emit one record through the live handlers.
    Emit {
        /// Level name or number (e.g. `info`, `850`).
        #[arg(long)]
        level: String,
        /// Message text.
        #[arg(long)]
        message: String,
        /// Logger name.
        #[arg(long, default_value = "app")]
        logger: String,
        /// Source component for the message head.
        #[arg(long)]
        component: Option<String>,
        /// Operation name next to the component.
        #[arg(long)]
        operation: Option<String>,
        /// Context pair `key=value`; repeatable.
        #[arg(long = "context", value_name = "KEY=VALUE")]
        context: Vec<String>,
        /// Config file path; defaults to `LOGLINE_CONFIG_PATH`, then the
        /// built-in configuration.
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

pub(crate) struct CliOutput {
    stdout: String,
    stderr: String,
    exit_code: ExitCode,
}

fn main() -> std::process::ExitCode {
    let cli = Cli::parse();
    let mode = OutputMode::from_args(&cli.output);

    match run(&cli.command, mode) {
        Ok(output) => match write_output(&output) {
            Ok(()) => std::process::ExitCode::from(output.exit_code.as_u8()),
            Err(error) => exit_with_error(&error),
        },
        Err(error) => exit_with_error(&error),
    }
}

fn exit_with_error(error: &CliError) -> std::process::ExitCode {
    let _ = writeln!(io::stderr(), "error: {error}");
    std::process::ExitCode::from(error.exit_code().as_u8())
}

fn run(command: &Commands, mode: OutputMode) -> Result<CliOutput, CliError> {
    match command {
        #[cfg(any(debug_assertions, feature = "dev-tools"))]
        Commands::SelfCheck => self_check(mode),
        Commands::Info => run_info(mode),
        Commands::Check { config } => run_check(mode, config),
        Commands::Show { config } => run_show(mode, config.as_deref()),
        Commands::Emit {
            level,
            message,
            logger,
            component,
            operation,
            context,
            config,
        } => run_emit(
            mode,
            &EmitCommandInput {
                level,
                message,
                logger,
                component: component.as_deref(),
                operation: operation.as_deref(),
                context,
                config: config.as_deref(),
            },
        ),
    }
}

#[cfg(any(debug_assertions, feature = "dev-tools"))]
fn self_check(mode: OutputMode) -> Result<CliOutput, CliError> {
    if let Err(envelope) = run_context_smoke() {
        return Ok(format_error_output(mode, &envelope, ExitCode::Internal));
    }
    if let Err(envelope) = run_format_smoke() {
        return Ok(format_error_output(mode, &envelope, ExitCode::Internal));
    }
    if let Err(envelope) = run_pipeline_smoke() {
        return Ok(format_error_output(mode, &envelope, ExitCode::Internal));
    }

    let mut stderr = String::new();
    log_info(&mut stderr, "self-check completed", mode.no_progress);

    let stdout = if mode.is_json() {
        let payload = serde_json::json!({
            "status": "ok",
            "checks": {
                "context": "ok",
                "format": "ok",
                "pipeline": "ok",
            },
            "build": {
                "name": env!("CARGO_PKG_NAME"),
                "version": env!("CARGO_PKG_VERSION"),
                "facadeVersion": facade_crate_version(),
            }
        });
        let mut output = serde_json::to_string_pretty(&payload)?;
        output.push('\n');
        output
    } else {
        format!(
            "status: ok\ncontext: ok\nformat: ok\npipeline: ok\nversion: {}\nfacade: {}\n",
            env!("CARGO_PKG_VERSION"),
            facade_crate_version()
        )
    };

    Ok(CliOutput {
        stdout,
        stderr,
        exit_code: ExitCode::Ok,
    })
}

pub(crate) fn format_error_output(
    mode: OutputMode,
    envelope: &ErrorEnvelope,
    exit_code: ExitCode,
) -> CliOutput {
    let mut stderr = String::new();
    log_info(&mut stderr, "command failed", mode.no_progress);

    let stdout = if mode.is_json() {
        let payload = serde_json::json!({
            "status": "error",
            "error": envelope,
        });

        // This is a CLI boundary, so JSON serialization errors are internal.
        let mut output = serde_json::to_string_pretty(&payload)
            .unwrap_or_else(|_| "{\"status\":\"error\"}".to_string());
        output.push('\n');
        output
    } else {
        format_envelope_text(envelope)
    };

    CliOutput {
        stdout,
        stderr,
        exit_code,
    }
}

fn format_envelope_text(envelope: &ErrorEnvelope) -> String {
    let mut out = String::new();
    out.push_str("status: error\n");
    out.push_str("code: ");
    out.push_str(&envelope.code.to_string());
    out.push('\n');
    out.push_str("message: ");
    out.push_str(&envelope.message);
    out.push('\n');
    out.push_str("kind: ");
    out.push_str(&envelope.kind.to_string());
    out.push('\n');

    if !envelope.metadata.is_empty() {
        out.push_str("metadata:\n");
        for (key, value) in &envelope.metadata {
            out.push_str("  ");
            out.push_str(key);
            out.push_str(": ");
            out.push_str(value);
            out.push('\n');
        }
    }

    out
}

pub(crate) fn log_info(stderr: &mut String, message: &str, no_progress: bool) {
    if no_progress {
        return;
    }
    stderr.push_str("info: ");
    stderr.push_str(message);
    stderr.push('\n');
}

fn write_output(output: &CliOutput) -> Result<(), CliError> {
    let mut stdout = io::stdout();
    stdout.write_all(output.stdout.as_bytes())?;

    if !output.stderr.is_empty() {
        let mut stderr = io::stderr();
        stderr.write_all(output.stderr.as_bytes())?;
        stderr.flush()?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::OutputFormat;
    use clap::CommandFactory;
    use logline_facade::ErrorCode;
    use std::path::Path;

    fn json_mode() -> OutputMode {
        OutputMode::from_args(&OutputArgs {
            output: Some(OutputFormat::Json),
            no_progress: true,
            json: false,
        })
    }

    #[test]
    fn version_flag_is_supported() {
        let result = Cli::command().try_get_matches_from(["logline", "--version"]);
        let is_version = matches!(
            result,
            Err(error) if error.kind() == clap::error::ErrorKind::DisplayVersion
        );

        assert!(is_version, "expected clap to render version");
    }

    #[test]
    fn emit_flags_parse_with_repeated_context() -> Result<(), Box<dyn std::error::Error>> {
        let cli = Cli::try_parse_from([
            "logline", "emit", "--level", "info", "--message", "hello", "--context", "a=1",
            "--context", "flag=true",
        ])?;

        match cli.command {
            Commands::Emit {
                level,
                message,
                logger,
                context,
                ..
            } => {
                assert_eq!(level, "info");
                assert_eq!(message, "hello");
                assert_eq!(logger, "app");
                assert_eq!(context, ["a=1", "flag=true"]);
            },
            _ => return Err("expected emit command".into()),
        }
        Ok(())
    }

    #[test]
    #[cfg(any(debug_assertions, feature = "dev-tools"))]
    fn self_check_json_output_shape() -> Result<(), Box<dyn std::error::Error>> {
        let output = self_check(json_mode())?;
        let value: serde_json::Value = serde_json::from_str(output.stdout.trim())?;

        assert_eq!(value["status"], "ok");
        assert_eq!(value["checks"]["context"], "ok");
        assert_eq!(value["checks"]["format"], "ok");
        assert_eq!(value["checks"]["pipeline"], "ok");

        let build = value["build"]
            .as_object()
            .ok_or_else(|| io::Error::other("build object missing"))?;
        for key in ["name", "version", "facadeVersion"] {
            assert!(build.contains_key(key), "missing {key}");
        }
        Ok(())
    }

    #[test]
    fn check_failure_exit_code_is_invalid_input() -> Result<(), Box<dyn std::error::Error>> {
        let output = run_check(json_mode(), Path::new("/nonexistent/logging.toml"))?;

        assert_eq!(output.exit_code, ExitCode::InvalidInput);
        let value: serde_json::Value = serde_json::from_str(output.stdout.trim())?;
        assert_eq!(value["status"], "error");
        assert_eq!(value["error"]["code"]["namespace"], "config");
        assert_eq!(value["error"]["code"]["code"], "file_not_found");
        Ok(())
    }

    #[test]
    fn check_reports_plan_summary() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("logging.toml");
        std::fs::write(
            &path,
            r#"
                rootLevel = "warning"

                [loggers]
                "app.http" = "debug"
            "#,
        )?;

        let output = run_check(json_mode(), &path)?;

        assert_eq!(output.exit_code, ExitCode::Ok);
        let value: serde_json::Value = serde_json::from_str(output.stdout.trim())?;
        assert_eq!(value["status"], "ok");
        assert_eq!(value["rootLevel"], "warning");
        assert_eq!(value["loggerRules"], 1);
        assert_eq!(value["handlers"], 1);
        Ok(())
    }

    #[test]
    fn exit_codes_for_errors() -> Result<(), Box<dyn std::error::Error>> {
        let io_error = CliError::Io(io::Error::other("io"));
        let invalid = CliError::InvalidInput("bad flag".to_string());
        let serialization = match serde_json::from_str::<serde_json::Value>("not-json") {
            Ok(_) => return Err("expected serialization error".into()),
            Err(error) => CliError::Serialization(error),
        };

        assert_eq!(io_error.exit_code(), ExitCode::Io);
        assert_eq!(invalid.exit_code(), ExitCode::InvalidInput);
        assert_eq!(serialization.exit_code(), ExitCode::Internal);
        Ok(())
    }

    #[test]
    fn envelope_text_output_lists_metadata() {
        let envelope = ErrorEnvelope::expected(ErrorCode::new("config", "invalid_level"), "nope")
            .with_metadata("field", "rootLevel");
        let output = format_error_output(
            OutputMode::from_args(&OutputArgs {
                output: None,
                no_progress: true,
                json: false,
            }),
            &envelope,
            ExitCode::InvalidInput,
        );

        assert!(output.stdout.contains("code: config:invalid_level"));
        assert!(output.stdout.contains("kind: expected"));
        assert!(output.stdout.contains("  field: rootLevel"));
    }

    #[test]
    fn log_info_respects_no_progress() {
        let mut quiet = String::new();
        log_info(&mut quiet, "working", true);
        assert!(quiet.is_empty());

        let mut chatty = String::new();
        log_info(&mut chatty, "working", false);
        assert_eq!(chatty, "info: working\n");
    }
}
