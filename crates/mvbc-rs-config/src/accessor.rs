// crates/mvbc-rs-config/src/accessor.rs

//! Typed, path-addressable, read-only view over a parsed document.
//!
//! The parsers only ever talk to a document through [`ValueAccessor`]. Paths are
//! dotted object keys (`"config.default.poll_ms"`); array elements are reached
//! with [`ValueAccessor::get_array_element`].

use serde_json::Value;

/// The JSON type of a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    Null,
    Boolean,
    Number,
    String,
    Array,
    Object,
}

/// Read access to a hierarchical document.
pub trait ValueAccessor {
    /// Type of this value.
    fn kind(&self) -> ValueKind;

    /// Resolves a dotted path of object keys below this value.
    fn get_path(&self, path: &str) -> Option<&Self>;

    fn as_str(&self) -> Option<&str>;

    fn as_number(&self) -> Option<f64>;

    fn array_len(&self) -> Option<usize>;

    fn array_element(&self, index: usize) -> Option<&Self>;

    // --- Path helpers ---

    /// True if `path` exists and holds a value of `kind`.
    fn has_value_of_type(&self, path: &str, kind: ValueKind) -> bool {
        self.get_path(path).is_some_and(|v| v.kind() == kind)
    }

    /// The string at `path`, or `None` if absent or not a string.
    fn get_str(&self, path: &str) -> Option<&str> {
        self.get_path(path)?.as_str()
    }

    /// The number at `path`, or `None` if absent or not a number.
    fn get_number(&self, path: &str) -> Option<f64> {
        self.get_path(path)?.as_number()
    }

    /// Length of the array at `path`, or `None` if absent or not an array.
    fn get_array_len(&self, path: &str) -> Option<usize> {
        self.get_path(path)?.array_len()
    }

    fn get_array_element(&self, path: &str, index: usize) -> Option<&Self> {
        self.get_path(path)?.array_element(index)
    }
}

impl ValueAccessor for Value {
    fn kind(&self) -> ValueKind {
        match self {
            Value::Null => ValueKind::Null,
            Value::Bool(_) => ValueKind::Boolean,
            Value::Number(_) => ValueKind::Number,
            Value::String(_) => ValueKind::String,
            Value::Array(_) => ValueKind::Array,
            Value::Object(_) => ValueKind::Object,
        }
    }

    fn get_path(&self, path: &str) -> Option<&Self> {
        path.split('.')
            .try_fold(self, |value, key| value.as_object()?.get(key))
    }

    fn as_str(&self) -> Option<&str> {
        Value::as_str(self)
    }

    fn as_number(&self) -> Option<f64> {
        Value::as_f64(self)
    }

    fn array_len(&self) -> Option<usize> {
        self.as_array().map(|a| a.len())
    }

    fn array_element(&self, index: usize) -> Option<&Self> {
        self.as_array()?.get(index)
    }
}
