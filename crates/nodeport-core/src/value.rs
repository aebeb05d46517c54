//! Literal socket values
//!
//! An unconnected input socket carries one of these. The variants are the
//! semantic types the printer knows how to serialize.

use serde::{Deserialize, Serialize};

/// A literal default value held by an unconnected input socket
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    /// The host reported no default (pure data sockets such as geometry)
    Null,
    /// Boolean flag
    Bool(bool),
    /// Integer value, kept distinct from floats
    Int(i64),
    /// Floating point value
    Float(f64),
    /// String or enum-like value
    String(String),
    /// Vector, color, or rotation components
    Vector(Vec<f64>),
}

impl Value {
    /// Name of the value's semantic type, used in log and error messages
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::String(_) => "string",
            Value::Vector(_) => "vector",
        }
    }
}

impl TryFrom<&serde_json::Value> for Value {
    type Error = String;

    fn try_from(json: &serde_json::Value) -> std::result::Result<Self, Self::Error> {
        match json {
            serde_json::Value::Null => Ok(Value::Null),
            serde_json::Value::Bool(b) => Ok(Value::Bool(*b)),
            serde_json::Value::Number(n) => match n.as_i64() {
                Some(i) => Ok(Value::Int(i)),
                None => n
                    .as_f64()
                    .map(Value::Float)
                    .ok_or_else(|| format!("number {} is not representable", n)),
            },
            serde_json::Value::String(s) => Ok(Value::String(s.clone())),
            serde_json::Value::Array(items) => items
                .iter()
                .map(|item| {
                    item.as_f64()
                        .ok_or_else(|| format!("vector component {} is not a number", item))
                })
                .collect::<std::result::Result<Vec<_>, _>>()
                .map(Value::Vector),
            serde_json::Value::Object(_) => {
                Err("objects cannot be used as socket defaults".to_string())
            }
        }
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::String(v.to_string())
    }
}

impl From<Vec<f64>> for Value {
    fn from(v: Vec<f64>) -> Self {
        Value::Vector(v)
    }
}
