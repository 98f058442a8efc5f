//! The diagnostic-context handle and its snapshot form.

use crate::value::{ContextValue, FromContextValue, ValueKind};
use logline_shared::{ErrorCode, ErrorEnvelope};
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::fmt;
use std::rc::Rc;

type EntryMap = BTreeMap<Box<str>, ContextValue>;

/// A mapped diagnostic context owned by exactly one thread.
///
/// Cloning the handle is cheap and shares the underlying entry map; the
/// handle itself is deliberately not `Send`, so a context can never leak to
/// another thread. Cross-thread propagation goes through [`ContextSnapshot`].
///
/// ```compile_fail
/// use logline_context::DiagnosticContext;
///
/// let context = DiagnosticContext::new();
/// std::thread::spawn(move || {
///     context.put("traceId", "abc123");
/// });
/// ```
#[derive(Debug, Clone, Default)]
pub struct DiagnosticContext {
    entries: Rc<RefCell<EntryMap>>,
}

impl DiagnosticContext {
    /// Create an empty context.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Associate `value` with `key`, silently overwriting any prior value.
    pub fn put(&self, key: impl Into<Box<str>>, value: impl Into<ContextValue>) {
        self.entries.borrow_mut().insert(key.into(), value.into());
    }

    /// Typed read of `key`.
    ///
    /// Returns `Ok(None)` when the key is absent or holds the explicit null
    /// marker, `Ok(Some(_))` when the stored value matches the requested
    /// type, and [`ContextError::TypeMismatch`] otherwise.
    ///
    /// # Errors
    ///
    /// Fails when the key holds a value of a different kind than `T`.
    pub fn get<T: FromContextValue>(&self, key: &str) -> Result<Option<T>, ContextError> {
        let entries = self.entries.borrow();
        match entries.get(key) {
            None | Some(ContextValue::Null) => Ok(None),
            Some(value) => T::from_value(value).map(Some).ok_or_else(|| {
                ContextError::TypeMismatch {
                    key: key.into(),
                    expected: T::KIND,
                    actual: value.kind(),
                }
            }),
        }
    }

    /// Raw read of `key`, including the explicit null marker.
    #[must_use]
    pub fn value(&self, key: &str) -> Option<ContextValue> {
        self.entries.borrow().get(key).cloned()
    }

    /// Whether `key` currently has an entry (null included).
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.borrow().contains_key(key)
    }

    /// Number of entries, null markers included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    /// Whether the context holds no entries at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }

    /// Finite, restartable iteration over the current entries.
    ///
    /// The iterator walks a snapshot taken at call time, so same-thread
    /// writes during iteration are safe and do not affect the sequence.
    /// Calling `entries` again restarts from the then-current state.
    /// Order is key-sorted; callers must not depend on any particular
    /// order among context fields.
    #[must_use]
    pub fn entries(&self) -> ContextEntries {
        let snapshot: Vec<(Box<str>, ContextValue)> = self
            .entries
            .borrow()
            .iter()
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect();
        ContextEntries {
            inner: snapshot.into_iter(),
        }
    }

    /// Owned, sendable copy of the current entries for explicit
    /// cross-thread propagation.
    #[must_use]
    pub fn snapshot(&self) -> ContextSnapshot {
        ContextSnapshot {
            entries: self.entries.borrow().clone(),
        }
    }

    /// Rebuild a context from a snapshot.
    #[must_use]
    pub fn from_snapshot(snapshot: &ContextSnapshot) -> Self {
        Self {
            entries: Rc::new(RefCell::new(snapshot.entries.clone())),
        }
    }

    /// Whether two handles share the same underlying entry map.
    #[must_use]
    pub fn shares_entries_with(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.entries, &other.entries)
    }
}

/// Iterator over a point-in-time copy of a context's entries.
#[derive(Debug)]
pub struct ContextEntries {
    inner: std::vec::IntoIter<(Box<str>, ContextValue)>,
}

impl Iterator for ContextEntries {
    type Item = (Box<str>, ContextValue);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl ExactSizeIterator for ContextEntries {}

/// An owned, thread-independent copy of a context's entries.
///
/// Snapshots are `Send`, so they can cross thread boundaries; installing
/// one on another thread is an explicit act via `store::attach`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ContextSnapshot {
    entries: EntryMap,
}

impl ContextSnapshot {
    /// Number of captured entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the snapshot captured no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate the captured entries in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ContextValue)> {
        self.entries.iter().map(|(key, value)| (&**key, value))
    }
}

/// Failure reading a context entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContextError {
    /// A key held a value of a different kind than the caller requested.
    TypeMismatch {
        /// The key that was read.
        key: Box<str>,
        /// The kind the caller asked for.
        expected: ValueKind,
        /// The kind actually stored.
        actual: ValueKind,
    },
}

impl fmt::Display for ContextError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TypeMismatch {
                key,
                expected,
                actual,
            } => write!(
                formatter,
                "context key {key:?} holds a {actual} value, requested {expected}"
            ),
        }
    }
}

impl std::error::Error for ContextError {}

impl From<ContextError> for ErrorEnvelope {
    fn from(error: ContextError) -> Self {
        let ContextError::TypeMismatch {
            key,
            expected,
            actual,
        } = &error;
        Self::expected(ErrorCode::new("context", "type_mismatch"), error.to_string())
            .with_metadata("key", key.to_string())
            .with_metadata("expected", expected.to_string())
            .with_metadata("actual", actual.to_string())
    }
}
