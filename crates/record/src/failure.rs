//! Renderable failure traces attached to log records.

use std::backtrace::{Backtrace, BacktraceStatus};
use std::error::Error;
use std::fmt;

/// A failure attached to a log record.
///
/// Carries the originating class (type name), the failure message, and an
/// ordered frame list. [`Failure::render`] produces the complete trace with
/// no truncation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Failure {
    class: Box<str>,
    message: Box<str>,
    frames: Vec<Box<str>>,
}

impl Failure {
    /// Create a failure from an explicit class and message.
    pub fn new(class: impl Into<Box<str>>, message: impl Into<Box<str>>) -> Self {
        Self {
            class: class.into(),
            message: message.into(),
            frames: Vec::new(),
        }
    }

    /// Build a failure from an error value.
    ///
    /// The class is the concrete error type name, the message its `Display`
    /// rendering, and each link of the `source()` chain becomes one frame.
    #[must_use]
    pub fn from_error<E>(error: &E) -> Self
    where
        E: Error,
    {
        let mut failure = Self::new(std::any::type_name::<E>(), error.to_string());
        let mut source = error.source();
        while let Some(cause) = source {
            failure.frames.push(format!("caused by: {cause}").into());
            source = cause.source();
        }
        failure
    }

    /// Append one frame.
    #[must_use]
    pub fn with_frame(mut self, frame: impl Into<Box<str>>) -> Self {
        self.frames.push(frame.into());
        self
    }

    /// Append the frames of a captured backtrace.
    ///
    /// A no-op unless backtrace capture is enabled for the process (for
    /// example via `RUST_BACKTRACE=1`).
    #[must_use]
    pub fn with_captured_backtrace(mut self) -> Self {
        let backtrace = Backtrace::capture();
        if matches!(backtrace.status(), BacktraceStatus::Captured) {
            for line in backtrace.to_string().lines() {
                let trimmed = line.trim();
                if !trimmed.is_empty() {
                    self.frames.push(trimmed.into());
                }
            }
        }
        self
    }

    /// Returns the failure class.
    #[must_use]
    pub fn class(&self) -> &str {
        &self.class
    }

    /// Returns the failure message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns the frame list.
    #[must_use]
    pub fn frames(&self) -> &[Box<str>] {
        &self.frames
    }

    /// Render the complete trace.
    ///
    /// First line is `class: message`; every frame follows on its own
    /// indented line. Nothing is truncated.
    #[must_use]
    pub fn render(&self) -> String {
        let mut out = String::with_capacity(self.class.len() + self.message.len() + 2);
        out.push_str(&self.class);
        out.push_str(": ");
        out.push_str(&self.message);
        for frame in &self.frames {
            out.push_str("\n    ");
            out.push_str(frame);
        }
        out
    }
}

impl fmt::Display for Failure {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "{}: {}", self.class, self.message)
    }
}
