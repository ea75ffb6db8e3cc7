//! The schema-less JSON value tree.
//!
//! [`Value`] is the tagged sum type produced by the generic parser and
//! consumed by the writer. Integers and floats are kept apart so that
//! 64-bit integer documents round-trip exactly.

use alloc::{collections::BTreeMap, string::String, vec::Vec};

/// Object representation used by [`Value::Object`].
pub type Map = BTreeMap<String, Value>;
/// Array representation used by [`Value::Array`].
pub type Array = Vec<Value>;

/// A JSON value as defined by [RFC 8259].
///
/// # Examples
///
/// ```
/// use jsonfrag::{Map, Value};
///
/// let mut map = Map::new();
/// map.insert("key".to_string(), Value::String("value".into()));
/// let v = Value::Object(map);
/// assert_eq!(v.to_string(), r#"{"key":"value"}"#);
/// ```
///
/// [RFC 8259]: https://datatracker.ietf.org/doc/html/rfc8259
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    Null,
    Boolean(bool),
    Integer(i64),
    Float(f64),
    String(String),
    Array(Array),
    Object(Map),
}

impl Default for Value {
    fn default() -> Self {
        Self::Null
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Boolean(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Self::Integer(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::String(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::String(v.into())
    }
}

impl From<Array> for Value {
    fn from(v: Array) -> Self {
        Self::Array(v)
    }
}

impl From<Map> for Value {
    fn from(v: Map) -> Self {
        Self::Object(v)
    }
}

impl Value {
    /// Returns `true` if the value is [`Null`].
    ///
    /// [`Null`]: Value::Null
    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Borrows the string contents, if this is a [`String`] value.
    ///
    /// [`String`]: Value::String
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the integer contents, if this is an [`Integer`] value.
    ///
    /// [`Integer`]: Value::Integer
    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Integer(n) => Some(*n),
            _ => None,
        }
    }

    /// Returns the float contents, if this is a [`Float`] value.
    ///
    /// [`Float`]: Value::Float
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Float(n) => Some(*n),
            _ => None,
        }
    }

    /// Borrows the elements, if this is an [`Array`] value.
    ///
    /// [`Array`]: Value::Array
    #[must_use]
    pub fn as_array(&self) -> Option<&Array> {
        match self {
            Self::Array(a) => Some(a),
            _ => None,
        }
    }

    /// Borrows the members, if this is an [`Object`] value.
    ///
    /// [`Object`]: Value::Object
    #[must_use]
    pub fn as_object(&self) -> Option<&Map> {
        match self {
            Self::Object(m) => Some(m),
            _ => None,
        }
    }
}

impl core::fmt::Display for Value {
    /// Renders the value as compact JSON using [`crate::writer::JsonWriter`].
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&crate::writer::write_value_string(self))
    }
}
