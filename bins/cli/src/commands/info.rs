//! Info command handler.

use crate::CliOutput;
use crate::error::{CliError, ExitCode};
use crate::format::OutputMode;
use logline_facade::facade_crate_version;

/// Run the info command.
pub fn run_info(mode: OutputMode) -> Result<CliOutput, CliError> {
    let stdout = if mode.is_json() {
        format_info_json()?
    } else {
        format_info_text()
    };

    Ok(CliOutput {
        stdout,
        stderr: String::new(),
        exit_code: ExitCode::Ok,
    })
}

const fn build_profile() -> &'static str {
    if cfg!(debug_assertions) {
        "debug"
    } else {
        "release"
    }
}

fn format_info_text() -> String {
    format!(
        "status: ok\nname: {}\nversion: {}\nfacade: {}\nprofile: {}\n",
        env!("CARGO_PKG_NAME"),
        env!("CARGO_PKG_VERSION"),
        facade_crate_version(),
        build_profile()
    )
}

fn format_info_json() -> Result<String, CliError> {
    let payload = serde_json::json!({
        "status": "ok",
        "build": {
            "name": env!("CARGO_PKG_NAME"),
            "version": env!("CARGO_PKG_VERSION"),
            "facadeVersion": facade_crate_version(),
            "profile": build_profile(),
        }
    });
    let mut output = serde_json::to_string_pretty(&payload)?;
    output.push('\n');
    Ok(output)
}
