//! # logline-runtime
//!
//! The running half of logline: the [`LoggerRegistry`] that maps logger
//! names to effective levels and handlers, [`Logger`] handles that emit
//! records through it, the [`bootstrap`] startup sequence that picks a
//! config source and applies it, and the [`SystemConfigurator`] hooks that
//! run after every bootstrap.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

pub mod bootstrap;
mod configurator;
mod handler;
mod logger;
mod registry;
mod sink;

pub use bootstrap::{initialize, initialize_with_env, BootstrapReport, ConfigSource};
pub use configurator::{ConfiguratorSet, StructuredOutputConfigurator, SystemConfigurator};
pub use handler::{memory_handler, Handler};
pub use logger::Logger;
pub use registry::LoggerRegistry;
pub use sink::{LogSink, MemorySink, StderrLogSink, StdoutLogSink};

/// Crate version for diagnostics.
#[must_use]
pub const fn runtime_crate_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_matches_manifest() {
        assert_eq!(runtime_crate_version(), env!("CARGO_PKG_VERSION"));
    }
}
