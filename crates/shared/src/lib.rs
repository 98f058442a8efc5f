//! # logline-shared
//!
//! Shared result types and error handling for the logline workspace.
//!
//! This crate provides foundational types that are used across all other crates:
//!
//! - Result and error envelope types
//! - Stable, namespaced error codes
//!
//! ## Design Principles
//!
//! 1. **No workspace dependencies** - This crate only depends on external crates
//! 2. **Zero-cost abstractions** - Types should compile away to efficient code
//! 3. **Serde-compatible** - All public types support serialization

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

pub mod errors;
pub mod result;

pub use errors::{
    ErrorCode, ErrorEnvelope, ErrorKind, ErrorMetadata, error_code_from_io_kind,
};
pub use result::{Result, ResultExt};

/// Returns the shared crate version.
#[must_use]
pub const fn shared_crate_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::errors::{ErrorCode, ErrorEnvelope, ErrorKind};
    use super::result::{Result, ResultExt};

    #[test]
    fn shared_error_types_are_available() {
        let error = ErrorEnvelope::expected(ErrorCode::invalid_input(), "invalid");
        assert_eq!(error.kind, ErrorKind::Expected);
    }

    #[test]
    fn shared_result_type_is_available() {
        let value: Result<i32> = Ok(5);
        let mapped = value.map_ok(|value| value + 1);
        assert!(matches!(mapped, Ok(6)));
    }

    #[test]
    fn crate_version_matches_manifest() {
        assert_eq!(super::shared_crate_version(), env!("CARGO_PKG_VERSION"));
    }
}
