//! # logline-format
//!
//! Record formatters: [`JsonFormatter`] renders one JSON document per line
//! with the calling thread's diagnostic context flattened in, and
//! [`TextFormatter`] renders the short operator form. Both append the
//! platform line terminator and never fail.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

mod formatter;
mod json;
mod text;

pub use formatter::{Formatter, LINE_TERMINATOR};
pub use json::JsonFormatter;
pub use text::TextFormatter;

/// Crate version for diagnostics.
#[must_use]
pub const fn format_crate_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
