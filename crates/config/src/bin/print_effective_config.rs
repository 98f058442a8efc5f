//! Print the effective logging config (explicit path, env path, or
//! defaults) as JSON.

use logline_config::{BootstrapEnv, LoggingConfig, load_config_from_path};
use std::io;
use std::io::Write;
use std::path::Path;

fn main() -> std::process::ExitCode {
    match run() {
        Ok(()) => std::process::ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("error: {error}");
            std::process::ExitCode::from(1)
        },
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let explicit = std::env::args().nth(1);
    let env = BootstrapEnv::from_std_env()?;

    let config = match explicit.as_deref().or(env.config_path.as_deref()) {
        Some(path) => load_config_from_path(Path::new(path))?.into_inner(),
        None => LoggingConfig::default(),
    };

    let output = logline_config::to_pretty_json(&config)?;

    let mut stdout = io::stdout();
    stdout.write_all(output.as_bytes())?;
    stdout.flush()?;

    Ok(())
}
