//! Show command handler.

use crate::error::{CliError, ExitCode, envelope_exit_code};
use crate::format::OutputMode;
use crate::{CliOutput, format_error_output, log_info};
use logline_facade::load_effective_config_json;
use std::path::Path;

/// Run the show command.
pub fn run_show(mode: OutputMode, path: Option<&Path>) -> Result<CliOutput, CliError> {
    let config_json = match load_effective_config_json(path) {
        Ok(rendered) => rendered,
        Err(envelope) => {
            return Ok(format_error_output(
                mode,
                &envelope,
                envelope_exit_code(&envelope),
            ));
        },
    };

    let mut stderr = String::new();
    log_info(&mut stderr, "config show completed", mode.no_progress);

    // The effective config is itself pretty JSON, so text mode prints it
    // as is and JSON mode wraps it in a status payload.
    let stdout = if mode.is_json() {
        let config_value: serde_json::Value = serde_json::from_str(config_json.trim_end())?;
        let payload = serde_json::json!({
            "status": "ok",
            "path": path.map(|value| value.to_string_lossy().to_string()),
            "effectiveConfig": config_value,
        });
        let mut output = serde_json::to_string_pretty(&payload)?;
        output.push('\n');
        output
    } else {
        config_json
    };

    Ok(CliOutput {
        stdout,
        stderr,
        exit_code: ExitCode::Ok,
    })
}
