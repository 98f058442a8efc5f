//! # logline-context
//!
//! Thread-scoped diagnostic context ("mapped diagnostic context"): a
//! per-thread key/value store whose entries are attached to every log
//! record the thread formats.
//!
//! Each thread owns an exclusive [`DiagnosticContext`]; handles are not
//! `Send`, so exclusivity is enforced by the compiler. Cross-thread
//! propagation is explicit: capture a [`ContextSnapshot`] on one thread and
//! [`store::attach`] it on another.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

mod context;
pub mod store;
mod value;

pub use context::{ContextEntries, ContextError, ContextSnapshot, DiagnosticContext};
pub use value::{ContextValue, FromContextValue, ValueKind};

/// Crate version for diagnostics.
#[must_use]
pub const fn context_crate_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_matches_manifest() {
        assert_eq!(context_crate_version(), env!("CARGO_PKG_VERSION"));
    }
}
