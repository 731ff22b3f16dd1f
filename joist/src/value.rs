//! Cell values read from record fields.
//!
//! A [`CellValue`] is the dynamic value behind a field accessor. It carries a
//! canonical string form (used for display and for the string fallback when
//! sorting) and a total order over defined values.

use std::borrow::Cow;
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

/// A dynamic value read from a record field.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum CellValue {
    /// Missing or explicitly null.
    #[default]
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
}

impl CellValue {
    /// Check if this value is null.
    pub fn is_null(&self) -> bool {
        matches!(self, CellValue::Null)
    }

    /// Numeric view of the value, if it is a number.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            CellValue::Int(n) => Some(*n as f64),
            CellValue::Float(f) => Some(*f),
            _ => None,
        }
    }

    /// Canonical string form.
    ///
    /// Null renders as the empty string, numbers and bools in their usual
    /// decimal/literal form, text verbatim.
    pub fn canonical(&self) -> Cow<'_, str> {
        match self {
            CellValue::Null => Cow::Borrowed(""),
            CellValue::Bool(b) => Cow::Owned(b.to_string()),
            CellValue::Int(n) => Cow::Owned(n.to_string()),
            CellValue::Float(f) => Cow::Owned(f.to_string()),
            CellValue::Text(s) => Cow::Borrowed(s),
        }
    }

    /// Compare two defined values.
    ///
    /// Numbers compare numerically, with mixed int/float pairs going through
    /// subtraction. Any other pairing (including number vs text) compares the
    /// canonical strings. That fallback is deterministic but coarse: `"10"`
    /// sorts before `"9"` when one side is text.
    pub fn compare(&self, other: &CellValue) -> Ordering {
        match (self, other) {
            (CellValue::Int(a), CellValue::Int(b)) => a.cmp(b),
            _ => match (self.as_f64(), other.as_f64()) {
                (Some(a), Some(b)) => (a - b).partial_cmp(&0.0).unwrap_or(Ordering::Equal),
                _ => self.canonical().cmp(&other.canonical()),
            },
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.canonical())
    }
}

impl From<&serde_json::Value> for CellValue {
    fn from(value: &serde_json::Value) -> Self {
        use serde_json::Value;

        match value {
            Value::Null => CellValue::Null,
            Value::Bool(b) => CellValue::Bool(*b),
            Value::Number(n) => match n.as_i64() {
                Some(i) => CellValue::Int(i),
                None => n.as_f64().map(CellValue::Float).unwrap_or(CellValue::Null),
            },
            Value::String(s) => CellValue::Text(s.clone()),
            // Nested structures are opaque to sorting; keep their JSON text.
            other => CellValue::Text(other.to_string()),
        }
    }
}

impl From<bool> for CellValue {
    fn from(b: bool) -> Self {
        CellValue::Bool(b)
    }
}

impl From<i64> for CellValue {
    fn from(n: i64) -> Self {
        CellValue::Int(n)
    }
}

impl From<i32> for CellValue {
    fn from(n: i32) -> Self {
        CellValue::Int(n.into())
    }
}

impl From<u32> for CellValue {
    fn from(n: u32) -> Self {
        CellValue::Int(n.into())
    }
}

impl From<f64> for CellValue {
    fn from(f: f64) -> Self {
        CellValue::Float(f)
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::Text(s.to_string())
    }
}

impl From<String> for CellValue {
    fn from(s: String) -> Self {
        CellValue::Text(s)
    }
}

impl<V: Into<CellValue>> From<Option<V>> for CellValue {
    fn from(value: Option<V>) -> Self {
        value.map(Into::into).unwrap_or(CellValue::Null)
    }
}

// =============================================================================
// RowKey
// =============================================================================

/// Identity of a record, used for selection membership.
///
/// Built from a non-null [`CellValue`]. Whole floats are folded into
/// integers so `1` and `1.0` name the same row; otherwise equality is strict,
/// and `Int(1)` never equals `Text("1")`.
#[derive(Debug, Clone)]
pub struct RowKey(CellValue);

impl RowKey {
    /// Build a key from a field value. Returns `None` for null.
    pub fn new(value: impl Into<CellValue>) -> Option<Self> {
        match value.into() {
            CellValue::Null => None,
            CellValue::Float(f)
                if f.fract() == 0.0 && f >= i64::MIN as f64 && f < i64::MAX as f64 =>
            {
                Some(Self(CellValue::Int(f as i64)))
            }
            other => Some(Self(other)),
        }
    }

    /// The underlying value.
    pub fn value(&self) -> &CellValue {
        &self.0
    }
}

impl PartialEq for RowKey {
    fn eq(&self, other: &Self) -> bool {
        match (&self.0, &other.0) {
            (CellValue::Bool(a), CellValue::Bool(b)) => a == b,
            (CellValue::Int(a), CellValue::Int(b)) => a == b,
            (CellValue::Float(a), CellValue::Float(b)) => a.to_bits() == b.to_bits(),
            (CellValue::Text(a), CellValue::Text(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for RowKey {}

impl Hash for RowKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::mem::discriminant(&self.0).hash(state);
        match &self.0 {
            CellValue::Null => {}
            CellValue::Bool(b) => b.hash(state),
            CellValue::Int(n) => n.hash(state),
            CellValue::Float(f) => f.to_bits().hash(state),
            CellValue::Text(s) => s.hash(state),
        }
    }
}

impl fmt::Display for RowKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}
