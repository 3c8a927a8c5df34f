use crate::{HostObject, MethodRef};
use std::sync::Arc;

/// Everything a template expression can evaluate to.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(Arc<str>),
    Method(MethodRef),
    Object(HostObject),
}

impl Value {
    /// Description used in diagnostics, e.g. "Expected a method, but this has evaluated to a string".
    pub fn describe(&self) -> String {
        match self {
            Value::Null => "null".to_string(),
            Value::Bool(_) => "a boolean".to_string(),
            Value::Int(_) | Value::Float(_) => "a number".to_string(),
            Value::Str(_) => "a string".to_string(),
            Value::Method(m) => format!("a method ({m})"),
            Value::Object(o) => format!("a hash ({})", o.host_type().name()),
        }
    }

    pub fn is_callable(&self) -> bool {
        matches!(self, Value::Method(_))
    }

    pub fn as_method(&self) -> Option<&MethodRef> {
        match self {
            Value::Method(m) => Some(m),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&HostObject> {
        match self {
            Value::Object(o) => Some(o),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Int(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Text for `${...}` output. Only scalars convert; `None` for null, methods and hashes.
    pub fn to_output(&self) -> Option<String> {
        match self {
            Value::Bool(b) => Some(b.to_string()),
            Value::Int(i) => Some(i.to_string()),
            Value::Float(f) => Some(f.to_string()),
            Value::Str(s) => Some(s.to_string()),
            Value::Null | Value::Method(_) | Value::Object(_) => None,
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Int(i)
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Value::Int(i64::from(i))
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Float(f)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.into())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s.into())
    }
}

impl From<Arc<str>> for Value {
    fn from(s: Arc<str>) -> Self {
        Value::Str(s)
    }
}

impl From<MethodRef> for Value {
    fn from(m: MethodRef) -> Self {
        Value::Method(m)
    }
}

impl From<HostObject> for Value {
    fn from(o: HostObject) -> Self {
        Value::Object(o)
    }
}

#[cfg(test)]
#[path = "../tests/value_tests.rs"]
mod tests;
