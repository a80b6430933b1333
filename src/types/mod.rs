use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// A numeric operand or result: an integer or a float.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Number {
    Int(i64),
    Float(f64),
}

impl Number {
    pub fn as_f64(&self) -> f64 {
        match *self {
            Number::Int(i) => i as f64,
            Number::Float(f) => f,
        }
    }

    pub fn is_int(&self) -> bool {
        matches!(self, Number::Int(_))
    }

    /// Convert a dynamically typed value, returning the value's kind on failure.
    pub fn from_value(value: &Value) -> Result<Self, &'static str> {
        match value {
            Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Ok(Number::Int(i))
                } else {
                    // u64 beyond i64::MAX and all floats land here
                    n.as_f64().map(Number::Float).ok_or("number")
                }
            }
            other => Err(value_kind(other)),
        }
    }
}

/// Name of a JSON value's kind, used in error reports.
pub fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

impl PartialEq for Number {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Number::Int(a), Number::Int(b)) => a == b,
            _ => self.as_f64() == other.as_f64(),
        }
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Number::Int(i) => write!(f, "{i}"),
            Number::Float(x) => write!(f, "{x}"),
        }
    }
}

impl From<i64> for Number {
    fn from(value: i64) -> Self {
        Number::Int(value)
    }
}

impl From<i32> for Number {
    fn from(value: i32) -> Self {
        Number::Int(value.into())
    }
}

impl From<f64> for Number {
    fn from(value: f64) -> Self {
        Number::Float(value)
    }
}

impl TryFrom<&Value> for Number {
    type Error = &'static str;

    fn try_from(value: &Value) -> Result<Self, Self::Error> {
        Number::from_value(value)
    }
}
