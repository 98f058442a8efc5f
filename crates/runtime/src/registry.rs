//! Process-wide registry of logger levels and handlers.

use crate::handler::Handler;
use crate::logger::Logger;
use crate::sink::StderrLogSink;
use logline_config::ValidatedLoggingConfig;
use logline_format::{Formatter, TextFormatter};
use logline_record::{Level, LogRecord};
use std::collections::BTreeMap;
use std::sync::{Arc, LazyLock, RwLock, RwLockReadGuard, RwLockWriteGuard};

static GLOBAL: LazyLock<Arc<LoggerRegistry>> = LazyLock::new(|| Arc::new(LoggerRegistry::new()));

/// Level table and handler list guarded by the registry lock.
#[derive(Debug, Clone)]
struct RegistryState {
    root_level: Level,
    logger_levels: BTreeMap<Box<str>, Level>,
    handlers: Vec<Handler>,
}

impl RegistryState {
    /// Built-in state: INFO root and a single text handler on stderr.
    fn defaults() -> Self {
        Self {
            root_level: Level::INFO,
            logger_levels: BTreeMap::new(),
            handlers: vec![Handler::new(
                "stderr",
                Arc::new(TextFormatter::new()),
                Arc::new(StderrLogSink),
            )],
        }
    }
}

/// Shared table of logger levels and handlers.
///
/// Loggers consult the registry on every call, so an [`apply`] or [`reset`]
/// takes effect immediately for all of them. Configuration swaps the whole
/// state in one write, never a partial merge.
///
/// [`apply`]: LoggerRegistry::apply
/// [`reset`]: LoggerRegistry::reset
#[derive(Debug)]
pub struct LoggerRegistry {
    state: RwLock<RegistryState>,
}

impl Default for LoggerRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl LoggerRegistry {
    /// Create a registry holding the built-in defaults.
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: RwLock::new(RegistryState::defaults()),
        }
    }

    /// The process-wide registry.
    ///
    /// Tests that need isolation should construct their own registry with
    /// [`LoggerRegistry::new`] instead of sharing this one.
    #[must_use]
    pub fn global() -> Arc<Self> {
        Arc::clone(&GLOBAL)
    }

    /// Discard all configured state and restore the built-in defaults.
    pub fn reset(&self) {
        let mut state = self.write_state();
        *state = RegistryState::defaults();
    }

    /// Replace the registry state with the levels and handlers of `config`.
    ///
    /// The next state is assembled before the lock is taken, then swapped in
    /// as a whole. Readers observe either the previous state or the new one,
    /// never a mix.
    pub fn apply(&self, config: &ValidatedLoggingConfig) {
        let plan = config.plan();
        let next = RegistryState {
            root_level: plan.root_level,
            logger_levels: plan.logger_levels.clone(),
            handlers: plan.handlers.iter().map(Handler::from_plan).collect(),
        };

        let mut state = self.write_state();
        *state = next;
    }

    /// Effective level for `logger`.
    ///
    /// The most specific dot-separated prefix with a configured level wins;
    /// with no matching rule the root level applies.
    #[must_use]
    pub fn effective_level(&self, logger: &str) -> Level {
        let state = self.read_state();
        let mut scope = logger;
        loop {
            if let Some(level) = state.logger_levels.get(scope) {
                return *level;
            }
            match scope.rfind('.') {
                Some(dot) => scope = &scope[..dot],
                None => return state.root_level,
            }
        }
    }

    /// Whether a record at `level` from `logger` would be published.
    #[must_use]
    pub fn enabled(&self, logger: &str, level: Level) -> bool {
        level >= self.effective_level(logger)
    }

    /// Hand `record` to every installed handler.
    ///
    /// Handlers are cloned out of the lock first so a slow sink cannot block
    /// configuration changes.
    pub fn publish(&self, record: &LogRecord) {
        let handlers = {
            let state = self.read_state();
            state.handlers.clone()
        };
        for handler in &handlers {
            handler.publish(record);
        }
    }

    /// Append `handler` to the installed set.
    pub fn install_handler(&self, handler: Handler) {
        let mut state = self.write_state();
        state.handlers.push(handler);
    }

    /// Replace the installed handler set wholesale.
    pub fn replace_handlers(&self, handlers: Vec<Handler>) {
        let mut state = self.write_state();
        state.handlers = handlers;
    }

    /// Rebind handler formatters in place.
    ///
    /// `rebind` is called once per installed handler; returning `None` keeps
    /// that handler unchanged.
    pub fn map_formatters<F>(&self, rebind: F)
    where
        F: Fn(&Handler) -> Option<Arc<dyn Formatter>>,
    {
        let mut state = self.write_state();
        let rebound = state
            .handlers
            .iter()
            .map(|handler| match rebind(handler) {
                Some(formatter) => handler.with_formatter(formatter),
                None => handler.clone(),
            })
            .collect();
        state.handlers = rebound;
    }

    /// Names of the installed handlers, in installation order.
    #[must_use]
    pub fn handler_names(&self) -> Vec<Box<str>> {
        let state = self.read_state();
        state
            .handlers
            .iter()
            .map(|handler| handler.name().into())
            .collect()
    }

    /// Create a logger named `name` bound to this registry.
    #[must_use]
    pub fn logger(self: &Arc<Self>, name: impl Into<Box<str>>) -> Logger {
        Logger::new(name, Arc::clone(self))
    }

    fn read_state(&self) -> RwLockReadGuard<'_, RegistryState> {
        self.state
            .read()
            .unwrap_or_else(|poison| poison.into_inner())
    }

    fn write_state(&self) -> RwLockWriteGuard<'_, RegistryState> {
        self.state
            .write()
            .unwrap_or_else(|poison| poison.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handler::memory_handler;
    use logline_config::parse_logging_config_json;
    use logline_record::LogRecord;

    fn sample_config() -> Result<ValidatedLoggingConfig, Box<dyn std::error::Error>> {
        let raw = r#"{
            "rootLevel": "warning",
            "loggers": {
                "app": "debug",
                "app.db": "error"
            },
            "handlers": {
                "stderr": { "target": "stderr", "formatter": "text" }
            }
        }"#;
        Ok(parse_logging_config_json(raw)?)
    }

    #[test]
    fn new_registry_has_info_root_and_stderr_handler() {
        let registry = LoggerRegistry::new();

        assert_eq!(registry.effective_level("anything"), Level::INFO);
        let names = registry.handler_names();
        assert_eq!(names.len(), 1);
        assert_eq!(names[0].as_ref(), "stderr");
    }

    #[test]
    fn effective_level_prefers_most_specific_prefix() -> Result<(), Box<dyn std::error::Error>> {
        let registry = LoggerRegistry::new();
        registry.apply(&sample_config()?);

        assert_eq!(registry.effective_level("app"), Level::DEBUG);
        assert_eq!(registry.effective_level("app.http"), Level::DEBUG);
        assert_eq!(registry.effective_level("app.db.pool"), Level::ERROR);
        assert_eq!(registry.effective_level("other"), Level::WARNING);
        Ok(())
    }

    #[test]
    fn enabled_compares_against_effective_level() -> Result<(), Box<dyn std::error::Error>> {
        let registry = LoggerRegistry::new();
        registry.apply(&sample_config()?);

        assert!(registry.enabled("app.http", Level::DEBUG));
        assert!(!registry.enabled("app.db", Level::WARNING));
        assert!(registry.enabled("other", Level::WARNING));
        assert!(!registry.enabled("other", Level::INFO));
        Ok(())
    }

    #[test]
    fn reset_restores_defaults() -> Result<(), Box<dyn std::error::Error>> {
        let registry = LoggerRegistry::new();
        registry.apply(&sample_config()?);
        assert_eq!(registry.effective_level("other"), Level::WARNING);

        registry.reset();

        assert_eq!(registry.effective_level("other"), Level::INFO);
        assert_eq!(registry.effective_level("app.db"), Level::INFO);
        Ok(())
    }

    #[test]
    fn publish_reaches_installed_handlers() {
        let registry = LoggerRegistry::new();
        let (handler, sink) = memory_handler("memory");
        registry.replace_handlers(vec![handler]);

        let record = LogRecord::new("app", Level::INFO, "hello");
        registry.publish(&record);

        let lines = sink.take();
        assert_eq!(lines.len(), 1);
        assert!(lines[0].contains("hello"));
    }

    #[test]
    fn map_formatters_keeps_handlers_when_rebind_declines() {
        let registry = LoggerRegistry::new();
        let (handler, sink) = memory_handler("memory");
        registry.replace_handlers(vec![handler]);

        registry.map_formatters(|_| None);
        registry.publish(&LogRecord::new("app", Level::INFO, "still here"));

        assert_eq!(sink.take().len(), 1);
    }
}
