//! Thread-local slot holding each thread's diagnostic context.
//!
//! Every thread owns at most one context at a time. `current` creates one
//! on first use and never returns an absent value; `detach` and `remove`
//! are the two distinct ways of walking away from the current one.

use crate::context::{ContextEntries, ContextError, ContextSnapshot, DiagnosticContext};
use crate::value::{ContextValue, FromContextValue};
use std::cell::RefCell;

thread_local! {
    static CURRENT: RefCell<Option<DiagnosticContext>> = const { RefCell::new(None) };
}

/// The calling thread's context, created empty on first use.
#[must_use]
pub fn current() -> DiagnosticContext {
    CURRENT.with(|slot| {
        slot.borrow_mut()
            .get_or_insert_with(DiagnosticContext::new)
            .clone()
    })
}

/// Associate `value` with `key` in the calling thread's context.
pub fn put(key: impl Into<Box<str>>, value: impl Into<ContextValue>) {
    current().put(key, value);
}

/// Typed read from the calling thread's context.
///
/// # Errors
///
/// Fails when the key holds a value of a different kind than `T`.
pub fn get<T: FromContextValue>(key: &str) -> Result<Option<T>, ContextError> {
    current().get(key)
}

/// Iterate the calling thread's current entries.
#[must_use]
pub fn entries() -> ContextEntries {
    current().entries()
}

/// Replace the calling thread's context with a fresh, explicitly empty one.
///
/// The previous context is not restored by later `current` calls; handles
/// already held keep reading the old entries, but the thread has moved on.
pub fn detach() {
    CURRENT.with(|slot| {
        *slot.borrow_mut() = Some(DiagnosticContext::new());
    });
}

/// Discard the calling thread's context entirely.
///
/// The next `current` call creates a fresh empty context as if the thread
/// had never used one.
pub fn remove() {
    CURRENT.with(|slot| {
        *slot.borrow_mut() = None;
    });
}

/// Capture the calling thread's context as an owned snapshot.
#[must_use]
pub fn snapshot() -> ContextSnapshot {
    current().snapshot()
}

/// Install a snapshot as the calling thread's context.
///
/// This is the explicit propagation step: capture with [`snapshot`] on the
/// originating thread, move the snapshot, then `attach` on the receiving
/// thread. The receiving thread's previous context, if any, is discarded.
pub fn attach(snapshot: &ContextSnapshot) {
    CURRENT.with(|slot| {
        *slot.borrow_mut() = Some(DiagnosticContext::from_snapshot(snapshot));
    });
}
