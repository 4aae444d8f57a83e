use std::fmt;

use serde::Serialize;

/// A leaf value flowing through execution.
///
/// Scalars appear both in runtime data handed to resolvers and in the
/// serialized result tree. Enum values are represented by their `String`
/// names once serialized.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ScalarValue {
    /// A 32-bit signed integer.
    Int(i32),
    /// A double-precision floating point number.
    Float(f64),
    /// A UTF-8 string.
    String(String),
    /// A boolean.
    Boolean(bool),
}

impl ScalarValue {
    /// Returns the contained `i32`, if any.
    pub fn as_int(&self) -> Option<i32> {
        match self {
            Self::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// Returns the contained number as an `f64`, widening integers.
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Self::Int(i) => Some(f64::from(*i)),
            Self::Float(f) => Some(*f),
            _ => None,
        }
    }

    /// Returns the contained string slice, if any.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the contained `bool`, if any.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Boolean(b) => Some(*b),
            _ => None,
        }
    }
}

impl fmt::Display for ScalarValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(i) => write!(f, "{i}"),
            Self::Float(n) => write!(f, "{n}"),
            Self::String(s) => write!(f, "\"{s}\""),
            Self::Boolean(b) => write!(f, "{b}"),
        }
    }
}

impl From<i32> for ScalarValue {
    fn from(i: i32) -> Self {
        Self::Int(i)
    }
}

impl From<f64> for ScalarValue {
    fn from(f: f64) -> Self {
        Self::Float(f)
    }
}

impl From<bool> for ScalarValue {
    fn from(b: bool) -> Self {
        Self::Boolean(b)
    }
}

impl From<String> for ScalarValue {
    fn from(s: String) -> Self {
        Self::String(s)
    }
}

impl From<&str> for ScalarValue {
    fn from(s: &str) -> Self {
        Self::String(s.into())
    }
}
