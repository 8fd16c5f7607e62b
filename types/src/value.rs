//! Dynamic control values.
//!
//! Controls hold values of several shapes (flags, text, numbers, selections,
//! nested lists), so the shared currency between definitions, validators and
//! the serialization boundary is a small closed enum rather than `Any`.
//!
//! Booleans are their own variant. `Value::Boolean(true)` is never an
//! integer, which keeps strict type checks structural.

use std::fmt;
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};
use serde_json::{Number, Value as JsonValue};
use thiserror::Error;

/// Discriminant of a [`Value`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueKind {
    Null,
    Boolean,
    Integer,
    Float,
    Text,
    List,
}

impl ValueKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Boolean => "boolean",
            Self::Integer => "integer",
            Self::Float => "float",
            Self::Text => "text",
            Self::List => "list",
        }
    }

    /// Integers and floats.
    #[must_use]
    pub const fn is_numeric(self) -> bool {
        matches!(self, Self::Integer | Self::Float)
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A JSON-shaped value held by a control.
///
/// Equality and hashing are total: floats compare by canonical bit pattern
/// (`-0.0 == 0.0`, all NaNs equal), so values can live in hash sets for
/// selection and uniqueness checks. Integers and floats never compare equal
/// to each other.
///
/// # Serde
///
/// Serializes through [`serde_json::Value`]. JSON objects have no
/// counterpart and fail to deserialize.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "serde_json::Value", into = "serde_json::Value")]
pub enum Value {
    Null,
    Boolean(bool),
    Integer(i64),
    Float(f64),
    Text(String),
    List(Vec<Value>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("JSON objects cannot be represented as control values")]
pub struct UnsupportedJsonError;

fn float_key(value: f64) -> u64 {
    if value.is_nan() {
        f64::NAN.to_bits()
    } else if value == 0.0 {
        0.0_f64.to_bits()
    } else {
        value.to_bits()
    }
}

impl Value {
    #[must_use]
    pub const fn kind(&self) -> ValueKind {
        match self {
            Self::Null => ValueKind::Null,
            Self::Boolean(_) => ValueKind::Boolean,
            Self::Integer(_) => ValueKind::Integer,
            Self::Float(_) => ValueKind::Float,
            Self::Text(_) => ValueKind::Text,
            Self::List(_) => ValueKind::List,
        }
    }

    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    #[must_use]
    pub const fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Boolean(value) => Some(*value),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Integer(value) => Some(*value),
            _ => None,
        }
    }

    /// Numeric view of integers and floats. Booleans are not numbers.
    #[must_use]
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Integer(value) => Some(*value as f64),
            Self::Float(value) => Some(*value),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(value) => Some(value),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Self::List(items) => Some(items),
            _ => None,
        }
    }

    /// Takes the string out of a text value, or hands the value back.
    pub fn into_text(self) -> Result<String, Self> {
        match self {
            Self::Text(value) => Ok(value),
            other => Err(other),
        }
    }

    /// Takes the elements out of a list value, or hands the value back.
    pub fn into_list(self) -> Result<Vec<Self>, Self> {
        match self {
            Self::List(items) => Ok(items),
            other => Err(other),
        }
    }

    /// Character count for text, element count for lists.
    #[must_use]
    pub fn size(&self) -> Option<usize> {
        match self {
            Self::Text(value) => Some(value.chars().count()),
            Self::List(items) => Some(items.len()),
            _ => None,
        }
    }

    /// Plain JSON rendition of this value.
    ///
    /// Non-finite floats have no JSON form and become `null`.
    #[must_use]
    pub fn to_json(&self) -> JsonValue {
        match self {
            Self::Null => JsonValue::Null,
            Self::Boolean(value) => JsonValue::Bool(*value),
            Self::Integer(value) => JsonValue::from(*value),
            Self::Float(value) => {
                Number::from_f64(*value).map_or(JsonValue::Null, JsonValue::Number)
            }
            Self::Text(value) => JsonValue::String(value.clone()),
            Self::List(items) => JsonValue::Array(items.iter().map(Self::to_json).collect()),
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Null, Self::Null) => true,
            (Self::Boolean(a), Self::Boolean(b)) => a == b,
            (Self::Integer(a), Self::Integer(b)) => a == b,
            (Self::Float(a), Self::Float(b)) => float_key(*a) == float_key(*b),
            (Self::Text(a), Self::Text(b)) => a == b,
            (Self::List(a), Self::List(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for Value {}

impl Hash for Value {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.kind().hash(state);
        match self {
            Self::Null => {}
            Self::Boolean(value) => value.hash(state),
            Self::Integer(value) => value.hash(state),
            Self::Float(value) => float_key(*value).hash(state),
            Self::Text(value) => value.hash(state),
            Self::List(items) => items.hash(state),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str("null"),
            Self::Boolean(value) => write!(f, "{value}"),
            Self::Integer(value) => write!(f, "{value}"),
            Self::Float(value) => write!(f, "{value:?}"),
            Self::Text(value) => write!(f, "{value:?}"),
            Self::List(items) => {
                f.write_str("[")?;
                for (index, item) in items.iter().enumerate() {
                    if index > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str("]")
            }
        }
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Self::Boolean(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Self::Integer(i64::from(value))
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Self::List(items.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Value>> FromIterator<T> for Value {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::List(iter.into_iter().map(Into::into).collect())
    }
}

impl From<Value> for JsonValue {
    fn from(value: Value) -> Self {
        value.to_json()
    }
}

impl TryFrom<JsonValue> for Value {
    type Error = UnsupportedJsonError;

    fn try_from(value: JsonValue) -> Result<Self, Self::Error> {
        match value {
            JsonValue::Null => Ok(Self::Null),
            JsonValue::Bool(value) => Ok(Self::Boolean(value)),
            JsonValue::Number(number) => match number.as_i64() {
                Some(value) => Ok(Self::Integer(value)),
                None => number.as_f64().map(Self::Float).ok_or(UnsupportedJsonError),
            },
            JsonValue::String(value) => Ok(Self::Text(value)),
            JsonValue::Array(items) => items
                .into_iter()
                .map(Self::try_from)
                .collect::<Result<Vec<_>, _>>()
                .map(Self::List),
            JsonValue::Object(_) => Err(UnsupportedJsonError),
        }
    }
}
