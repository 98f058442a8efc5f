//! Check command handler.

use crate::error::{CliError, ExitCode, envelope_exit_code};
use crate::format::OutputMode;
use crate::{CliOutput, format_error_output, log_info};
use logline_facade::load_config_from_path;
use std::path::Path;

/// Run the check command.
pub fn run_check(mode: OutputMode, path: &Path) -> Result<CliOutput, CliError> {
    let config = match load_config_from_path(path) {
        Ok(config) => config,
        Err(envelope) => {
            return Ok(format_error_output(
                mode,
                &envelope,
                envelope_exit_code(&envelope),
            ));
        },
    };

    let mut stderr = String::new();
    log_info(&mut stderr, "config check completed", mode.no_progress);

    let plan = config.plan();
    let stdout = if mode.is_json() {
        let payload = serde_json::json!({
            "status": "ok",
            "path": path.to_string_lossy(),
            "rootLevel": plan.root_level.to_string(),
            "loggerRules": plan.logger_levels.len(),
            "handlers": plan.handlers.len(),
        });
        let mut output = serde_json::to_string_pretty(&payload)?;
        output.push('\n');
        output
    } else {
        format!(
            "status: ok\npath: {}\nrootLevel: {}\nloggerRules: {}\nhandlers: {}\n",
            path.to_string_lossy(),
            plan.root_level,
            plan.logger_levels.len(),
            plan.handlers.len()
        )
    };

    Ok(CliOutput {
        stdout,
        stderr,
        exit_code: ExitCode::Ok,
    })
}
