//! Values storable in a diagnostic context.

use std::fmt;

/// A value held under a diagnostic-context key.
///
/// The set is closed on purpose: formatters need to know exactly how each
/// variant renders. Booleans and numbers pass through to native JSON types,
/// strings stay strings, and [`ContextValue::Null`] marks a key whose value
/// is explicitly absent and must be omitted from formatted output.
///
/// Anything outside this set enters as its string rendering via
/// [`ContextValue::display`].
#[derive(Debug, Clone, PartialEq)]
pub enum ContextValue {
    /// Explicitly absent; formatters omit the field entirely.
    Null,
    /// Boolean, rendered as native JSON.
    Bool(bool),
    /// Signed integer, rendered as native JSON.
    Int(i64),
    /// Floating-point number, rendered as native JSON.
    Float(f64),
    /// Text, rendered as a JSON string.
    Str(Box<str>),
}

impl ContextValue {
    /// Capture an arbitrary displayable value as its string rendering.
    pub fn display(value: impl fmt::Display) -> Self {
        Self::Str(value.to_string().into_boxed_str())
    }

    /// The kind of this value, for type-mismatch diagnostics.
    #[must_use]
    pub const fn kind(&self) -> ValueKind {
        match self {
            Self::Null => ValueKind::Null,
            Self::Bool(_) => ValueKind::Bool,
            Self::Int(_) => ValueKind::Int,
            Self::Float(_) => ValueKind::Float,
            Self::Str(_) => ValueKind::Str,
        }
    }

    /// Whether this value is the explicit null marker.
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }
}

impl From<bool> for ContextValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for ContextValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<i32> for ContextValue {
    fn from(value: i32) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<u32> for ContextValue {
    fn from(value: u32) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<f64> for ContextValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<&str> for ContextValue {
    fn from(value: &str) -> Self {
        Self::Str(value.into())
    }
}

impl From<String> for ContextValue {
    fn from(value: String) -> Self {
        Self::Str(value.into_boxed_str())
    }
}

impl From<Box<str>> for ContextValue {
    fn from(value: Box<str>) -> Self {
        Self::Str(value)
    }
}

impl<T: Into<Self>> From<Option<T>> for ContextValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}

/// Discriminant of a [`ContextValue`], used in mismatch errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    /// The explicit null marker.
    Null,
    /// Boolean.
    Bool,
    /// Signed integer.
    Int,
    /// Floating-point number.
    Float,
    /// Text.
    Str,
}

impl fmt::Display for ValueKind {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => formatter.write_str("null"),
            Self::Bool => formatter.write_str("bool"),
            Self::Int => formatter.write_str("int"),
            Self::Float => formatter.write_str("float"),
            Self::Str => formatter.write_str("str"),
        }
    }
}

/// Typed extraction from a [`ContextValue`].
///
/// Implemented for the primitive types the value set covers; the store's
/// typed `get` is generic over this trait.
pub trait FromContextValue: Sized {
    /// Kind reported in type-mismatch errors.
    const KIND: ValueKind;

    /// Extract a typed copy, or `None` when the variant does not match.
    fn from_value(value: &ContextValue) -> Option<Self>;
}

impl FromContextValue for bool {
    const KIND: ValueKind = ValueKind::Bool;

    fn from_value(value: &ContextValue) -> Option<Self> {
        match value {
            ContextValue::Bool(inner) => Some(*inner),
            _ => None,
        }
    }
}

impl FromContextValue for i64 {
    const KIND: ValueKind = ValueKind::Int;

    fn from_value(value: &ContextValue) -> Option<Self> {
        match value {
            ContextValue::Int(inner) => Some(*inner),
            _ => None,
        }
    }
}

impl FromContextValue for f64 {
    const KIND: ValueKind = ValueKind::Float;

    fn from_value(value: &ContextValue) -> Option<Self> {
        match value {
            ContextValue::Float(inner) => Some(*inner),
            _ => None,
        }
    }
}

impl FromContextValue for String {
    const KIND: ValueKind = ValueKind::Str;

    fn from_value(value: &ContextValue) -> Option<Self> {
        match value {
            ContextValue::Str(inner) => Some(inner.to_string()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn conversions_preserve_kind() {
        assert_eq!(ContextValue::from(true).kind(), ValueKind::Bool);
        assert_eq!(ContextValue::from(7_i64).kind(), ValueKind::Int);
        assert_eq!(ContextValue::from(7_i32).kind(), ValueKind::Int);
        assert_eq!(ContextValue::from(0.5).kind(), ValueKind::Float);
        assert_eq!(ContextValue::from("trace").kind(), ValueKind::Str);
        assert_eq!(ContextValue::from(None::<i64>).kind(), ValueKind::Null);
        assert_eq!(ContextValue::from(Some(3_i64)), ContextValue::Int(3));
    }

    #[test]
    fn display_captures_string_rendering() {
        let value = ContextValue::display(std::net::Ipv4Addr::LOCALHOST);
        assert_eq!(value, ContextValue::Str("127.0.0.1".into()));
    }

    #[test]
    fn typed_extraction_rejects_other_variants() {
        let value = ContextValue::Int(9);
        assert_eq!(i64::from_value(&value), Some(9));
        assert_eq!(bool::from_value(&value), None);
        assert_eq!(String::from_value(&value), None);
    }
}
