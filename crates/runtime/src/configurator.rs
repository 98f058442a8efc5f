//! Configurators that adjust the registry after bootstrap applies config.
//!
//! The set of configurators is assembled explicitly by the embedder and runs
//! in order after every bootstrap, whichever config source was used. A
//! configurator failure aborts bootstrap; these hooks are part of process
//! startup, and a half-configured process should not come up quietly.

use crate::handler::Handler;
use crate::registry::LoggerRegistry;
use crate::sink::StderrLogSink;
use logline_format::{Formatter, JsonFormatter};
use logline_shared::ErrorEnvelope;
use std::sync::Arc;

/// Startup hook that adjusts the registry once config has been applied.
pub trait SystemConfigurator: Send + Sync {
    /// Stable name for operator-facing reports.
    fn name(&self) -> &'static str;

    /// Apply this configurator's changes to `registry`.
    fn configure(&self, registry: &LoggerRegistry) -> Result<(), ErrorEnvelope>;
}

/// Ordered, explicitly assembled list of configurators.
#[derive(Default)]
pub struct ConfiguratorSet {
    entries: Vec<Box<dyn SystemConfigurator>>,
}

impl ConfiguratorSet {
    /// A set with no configurators.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// The standard set: structured JSON output on every handler.
    #[must_use]
    pub fn standard() -> Self {
        Self::empty().with(StructuredOutputConfigurator)
    }

    /// Append `configurator` to the set.
    #[must_use]
    pub fn with(mut self, configurator: impl SystemConfigurator + 'static) -> Self {
        self.entries.push(Box::new(configurator));
        self
    }

    /// Number of configurators in the set.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the set is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Run every configurator in order, stopping at the first failure.
    pub fn run_all(&self, registry: &LoggerRegistry) -> Result<(), ErrorEnvelope> {
        for configurator in &self.entries {
            configurator
                .configure(registry)
                .map_err(|envelope| envelope.with_metadata("configurator", configurator.name()))?;
        }
        Ok(())
    }
}

impl std::fmt::Debug for ConfiguratorSet {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let names: Vec<&'static str> = self.entries.iter().map(|entry| entry.name()).collect();
        formatter
            .debug_struct("ConfiguratorSet")
            .field("entries", &names)
            .finish()
    }
}

/// Rebinds every handler to the JSON formatter.
///
/// Also installs a JSON handler named `stderr` when the applied config left
/// none, so structured output always has somewhere to go.
#[derive(Debug, Default, Clone, Copy)]
pub struct StructuredOutputConfigurator;

impl SystemConfigurator for StructuredOutputConfigurator {
    fn name(&self) -> &'static str {
        "structured-output"
    }

    fn configure(&self, registry: &LoggerRegistry) -> Result<(), ErrorEnvelope> {
        let json: Arc<dyn Formatter> = Arc::new(JsonFormatter::new());
        registry.map_formatters(|_| Some(Arc::clone(&json)));

        let has_stderr = registry
            .handler_names()
            .iter()
            .any(|name| name.as_ref() == "stderr");
        if !has_stderr {
            registry.install_handler(Handler::new("stderr", json, Arc::new(StderrLogSink)));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handler::memory_handler;
    use logline_record::{Level, LogRecord};
    use logline_shared::ErrorCode;

    struct FailingConfigurator;

    impl SystemConfigurator for FailingConfigurator {
        fn name(&self) -> &'static str {
            "failing"
        }

        fn configure(&self, _registry: &LoggerRegistry) -> Result<(), ErrorEnvelope> {
            Err(ErrorEnvelope::unexpected(
                ErrorCode::internal(),
                "configurator exploded",
            ))
        }
    }

    struct MarkerConfigurator;

    impl SystemConfigurator for MarkerConfigurator {
        fn name(&self) -> &'static str {
            "marker"
        }

        fn configure(&self, registry: &LoggerRegistry) -> Result<(), ErrorEnvelope> {
            let (handler, _sink) = memory_handler("marker");
            registry.install_handler(handler);
            Ok(())
        }
    }

    #[test]
    fn run_all_stops_at_the_first_failure() {
        let registry = LoggerRegistry::new();
        let set = ConfiguratorSet::empty()
            .with(FailingConfigurator)
            .with(MarkerConfigurator);

        let error = set.run_all(&registry).unwrap_err();

        assert_eq!(error.metadata.get("configurator").map(String::as_str), Some("failing"));
        let names = registry.handler_names();
        assert!(!names.iter().any(|name| name.as_ref() == "marker"));
    }

    #[test]
    fn empty_set_succeeds() -> Result<(), Box<dyn std::error::Error>> {
        let registry = LoggerRegistry::new();
        ConfiguratorSet::empty().run_all(&registry)?;
        Ok(())
    }

    #[test]
    fn structured_output_rebinds_handlers_to_json() -> Result<(), Box<dyn std::error::Error>> {
        let registry = LoggerRegistry::new();
        let (handler, sink) = memory_handler("stderr");
        registry.replace_handlers(vec![handler]);

        ConfiguratorSet::standard().run_all(&registry)?;
        registry.publish(&LogRecord::new("app", Level::INFO, "structured"));

        let lines = sink.take();
        assert_eq!(lines.len(), 1);
        let value: serde_json::Value = serde_json::from_str(lines[0].trim_end())?;
        assert_eq!(value["message"], "app: structured");
        Ok(())
    }

    #[test]
    fn structured_output_installs_stderr_handler_when_missing() -> Result<(), Box<dyn std::error::Error>> {
        let registry = LoggerRegistry::new();
        registry.replace_handlers(Vec::new());

        ConfiguratorSet::standard().run_all(&registry)?;

        let names = registry.handler_names();
        assert!(names.iter().any(|name| name.as_ref() == "stderr"));
        Ok(())
    }
}
