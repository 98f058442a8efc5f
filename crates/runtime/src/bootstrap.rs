//! Startup sequence: pick a config source, load it, run configurators.
//!
//! Exactly one source wins per bootstrap. An explicitly passed path is used
//! when the file exists; otherwise the path named by the
//! [`ENV_CONFIG_PATH`] variable; otherwise the built-in defaults. Config
//! problems are reported to the operator and never abort startup, so the
//! process always comes up with a working logging setup. Configurator
//! failures do abort: they signal a broken deployment, not a bad file.

use crate::configurator::ConfiguratorSet;
use crate::registry::LoggerRegistry;
use crate::sink::{LogSink, StderrLogSink};
use logline_config::{load_config_from_path, BootstrapEnv, ENV_CONFIG_PATH};
use logline_format::{Formatter, TextFormatter};
use logline_record::{Level, LogRecord};
use logline_shared::{ErrorCode, ErrorEnvelope};
use std::path::{Path, PathBuf};

/// Logger name used for bootstrap's own operator reports.
const BOOTSTRAP_LOGGER: &str = "logline.bootstrap";

/// Which config source a bootstrap run ended up using.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigSource {
    /// An explicitly passed path whose file existed.
    Explicit,
    /// The path named by [`ENV_CONFIG_PATH`].
    Environment,
    /// Built-in defaults.
    Defaults,
}

/// What a bootstrap run did.
#[derive(Debug)]
pub struct BootstrapReport {
    source: ConfigSource,
    config_path: Option<PathBuf>,
    config_error: Option<ErrorEnvelope>,
    warnings: Vec<ErrorEnvelope>,
}

impl BootstrapReport {
    /// Config source that won the selection.
    #[must_use]
    pub const fn source(&self) -> ConfigSource {
        self.source
    }

    /// Path of the config file that was loaded, when a file source won.
    #[must_use]
    pub fn config_path(&self) -> Option<&Path> {
        self.config_path.as_deref()
    }

    /// Load error for the chosen file, when loading failed.
    ///
    /// A load failure leaves the registry in its prior state; it is recorded
    /// here and reported to the operator rather than aborting startup.
    #[must_use]
    pub const fn config_error(&self) -> Option<&ErrorEnvelope> {
        self.config_error.as_ref()
    }

    /// Warnings emitted during source selection, such as a set-but-missing
    /// environment path.
    #[must_use]
    pub fn warnings(&self) -> &[ErrorEnvelope] {
        &self.warnings
    }
}

/// Bootstrap using the process environment for the env-var source.
///
/// # Errors
///
/// Fails only when a configurator fails; config file problems are reported
/// in the returned [`BootstrapReport`] instead.
pub fn initialize(
    registry: &LoggerRegistry,
    explicit_path: Option<&Path>,
    configurators: &ConfiguratorSet,
) -> Result<BootstrapReport, ErrorEnvelope> {
    match BootstrapEnv::from_std_env() {
        Ok(env) => initialize_with_env(registry, explicit_path, &env, configurators),
        Err(error) => {
            let warning = ErrorEnvelope::from(error);
            report_to_operator(Level::WARNING, &format!("ignoring {ENV_CONFIG_PATH}: {warning}"));
            let mut report =
                initialize_with_env(registry, explicit_path, &BootstrapEnv::default(), configurators)?;
            report.warnings.push(warning);
            Ok(report)
        },
    }
}

/// Bootstrap with an explicit environment, for embedders and tests.
///
/// # Errors
///
/// Fails only when a configurator fails.
pub fn initialize_with_env(
    registry: &LoggerRegistry,
    explicit_path: Option<&Path>,
    env: &BootstrapEnv,
    configurators: &ConfiguratorSet,
) -> Result<BootstrapReport, ErrorEnvelope> {
    let mut report = select_source(explicit_path, env);

    match report.config_path.clone() {
        Some(path) => match load_config_from_path(&path) {
            Ok(config) => registry.apply(&config),
            Err(envelope) => {
                report_to_operator(
                    Level::ERROR,
                    &format!("failed to load logging config: {envelope}"),
                );
                report.config_error = Some(envelope);
            },
        },
        None => registry.reset(),
    }

    configurators.run_all(registry)?;
    Ok(report)
}

/// Pick the winning source. At most one of the file sources is consulted
/// for loading; a set-but-missing env path degrades to defaults with a
/// warning, while a missing explicit path falls through silently.
fn select_source(explicit_path: Option<&Path>, env: &BootstrapEnv) -> BootstrapReport {
    if let Some(path) = explicit_path {
        if path.exists() {
            return BootstrapReport {
                source: ConfigSource::Explicit,
                config_path: Some(path.to_path_buf()),
                config_error: None,
                warnings: Vec::new(),
            };
        }
    }

    if let Some(env_path) = env.config_path.as_deref() {
        let path = Path::new(env_path);
        if path.exists() {
            return BootstrapReport {
                source: ConfigSource::Environment,
                config_path: Some(path.to_path_buf()),
                config_error: None,
                warnings: Vec::new(),
            };
        }

        let warning = ErrorEnvelope::expected(
            ErrorCode::new("bootstrap", "config_source_missing"),
            format!("{ENV_CONFIG_PATH} is set but {env_path} does not exist; using defaults"),
        )
        .with_metadata("path", env_path);
        report_to_operator(Level::WARNING, &warning.to_string());
        return BootstrapReport {
            source: ConfigSource::Defaults,
            config_path: None,
            config_error: None,
            warnings: vec![warning],
        };
    }

    BootstrapReport {
        source: ConfigSource::Defaults,
        config_path: None,
        config_error: None,
        warnings: Vec::new(),
    }
}

/// Write a bootstrap diagnostic straight to stderr.
///
/// Bootstrap cannot rely on the registry it is still configuring, so its
/// own reports bypass it.
fn report_to_operator(level: Level, message: &str) {
    let record = LogRecord::new(BOOTSTRAP_LOGGER, level, message);
    let line = TextFormatter::new().format(&record);
    StderrLogSink.write_line(&line);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_win_when_nothing_is_configured() -> Result<(), Box<dyn std::error::Error>> {
        let registry = LoggerRegistry::new();
        let report = initialize_with_env(
            &registry,
            None,
            &BootstrapEnv::default(),
            &ConfiguratorSet::empty(),
        )?;

        assert_eq!(report.source(), ConfigSource::Defaults);
        assert_eq!(report.config_path(), None);
        assert!(report.config_error().is_none());
        assert!(report.warnings().is_empty());
        assert_eq!(registry.effective_level("app"), Level::INFO);
        Ok(())
    }

    #[test]
    fn missing_explicit_path_falls_through_silently() -> Result<(), Box<dyn std::error::Error>> {
        let registry = LoggerRegistry::new();
        let report = initialize_with_env(
            &registry,
            Some(Path::new("/nonexistent/logline.toml")),
            &BootstrapEnv::default(),
            &ConfiguratorSet::empty(),
        )?;

        assert_eq!(report.source(), ConfigSource::Defaults);
        assert!(report.warnings().is_empty());
        Ok(())
    }
}
