//! Scalar leaf values written by path mutations.

use std::fmt;

use toml::Value;

/// A scalar value assigned to a leaf by [`DocumentTree::set_path`](super::DocumentTree::set_path).
#[derive(Debug, Clone, PartialEq)]
pub enum LeafValue {
    String(String),
    Bool(bool),
    Integer(i64),
    Float(f64),
}

impl LeafValue {
    /// Returns `true` if `value` is the TOML node this leaf would be written as.
    pub fn matches(&self, value: &Value) -> bool {
        match (self, value) {
            (Self::String(a), Value::String(b)) => a == b,
            (Self::Bool(a), Value::Boolean(b)) => a == b,
            (Self::Integer(a), Value::Integer(b)) => a == b,
            (Self::Float(a), Value::Float(b)) => a == b || (a.is_nan() && b.is_nan()),
            _ => false,
        }
    }
}

impl From<LeafValue> for Value {
    fn from(leaf: LeafValue) -> Self {
        match leaf {
            LeafValue::String(s) => Value::String(s),
            LeafValue::Bool(b) => Value::Boolean(b),
            LeafValue::Integer(i) => Value::Integer(i),
            LeafValue::Float(f) => Value::Float(f),
        }
    }
}

impl From<&str> for LeafValue {
    fn from(s: &str) -> Self {
        Self::String(s.to_string())
    }
}

impl From<String> for LeafValue {
    fn from(s: String) -> Self {
        Self::String(s)
    }
}

impl From<bool> for LeafValue {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<i64> for LeafValue {
    fn from(i: i64) -> Self {
        Self::Integer(i)
    }
}

impl From<f64> for LeafValue {
    fn from(f: f64) -> Self {
        Self::Float(f)
    }
}

impl fmt::Display for LeafValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::String(s) => write!(f, "{s:?}"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Integer(i) => write!(f, "{i}"),
            Self::Float(x) => write!(f, "{x}"),
        }
    }
}
