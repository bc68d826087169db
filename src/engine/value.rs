use std::fmt;
use std::fmt::{Display, Formatter};
use std::rc::Rc;

use crate::engine::object::ScriptObjectRef;

pub const TYPE_STR_UNDEFINED: &str = "undefined";
pub const TYPE_STR_NULL: &str = "null";
pub const TYPE_STR_BOOLEAN: &str = "boolean";
pub const TYPE_STR_STRING: &str = "string";
pub const TYPE_STR_NUMBER: &str = "number";
pub const TYPE_STR_OBJECT: &str = "object";
pub const TYPE_STR_FUNCTION: &str = "function";

/// A value as the script engine sees it.
///
/// Host values never appear here directly: host objects, callables and classes
/// cross into the engine only as `Object` wrappers.
pub enum ScriptValue {
    Undefined,
    Null,
    Boolean(bool),
    String(String),
    Number(ScriptNumber),
    Object(ScriptObjectRef),
}
impl ScriptValue {
    pub fn is_nullish(&self) -> bool {
        match self {
            ScriptValue::Undefined | ScriptValue::Null => true,
            _ => false,
        }
    }

    pub fn as_object(&self) -> Option<&ScriptObjectRef> {
        match self {
            ScriptValue::Object(o) => Some(o),
            _ => None,
        }
    }

    pub fn type_of(&self) -> &'static str {
        match self {
            ScriptValue::Undefined => TYPE_STR_UNDEFINED,
            ScriptValue::Null => TYPE_STR_NULL,
            ScriptValue::Boolean(_) => TYPE_STR_BOOLEAN,
            ScriptValue::String(_) => TYPE_STR_STRING,
            ScriptValue::Number(_) => TYPE_STR_NUMBER,
            ScriptValue::Object(o) => {
                if o.is_callable() {
                    TYPE_STR_FUNCTION
                } else {
                    TYPE_STR_OBJECT
                }
            }
        }
    }
}
impl Clone for ScriptValue {
    fn clone(&self) -> Self {
        match self {
            ScriptValue::Undefined => ScriptValue::Undefined,
            ScriptValue::Null => ScriptValue::Null,
            ScriptValue::Boolean(b) => ScriptValue::Boolean(*b),
            ScriptValue::String(s) => ScriptValue::String(s.to_string()),
            ScriptValue::Number(n) => ScriptValue::Number(n.clone()),
            ScriptValue::Object(o) => ScriptValue::Object(o.clone()),
        }
    }
}
impl Display for ScriptValue {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            ScriptValue::Undefined => write!(f, "{}", TYPE_STR_UNDEFINED),
            ScriptValue::Null => write!(f, "{}", TYPE_STR_NULL),
            ScriptValue::Boolean(b) => write!(f, "{}", b),
            ScriptValue::String(s) => write!(f, "{}", s),
            ScriptValue::Number(n) => write!(f, "{}", n),
            ScriptValue::Object(o) => write!(f, "{}", o.to_string()),
        }
    }
}
impl fmt::Debug for ScriptValue {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            ScriptValue::Undefined => write!(f, "ScriptValue::Undefined"),
            ScriptValue::Null => write!(f, "ScriptValue::Null"),
            ScriptValue::Boolean(b) => write!(f, "ScriptValue::Boolean({})", b),
            ScriptValue::String(s) => write!(f, "ScriptValue::String({:?})", s),
            ScriptValue::Number(n) => write!(f, "ScriptValue::Number({:?})", n),
            ScriptValue::Object(o) => write!(f, "ScriptValue::Object({})", o.to_string()),
        }
    }
}

/// Strict comparison: primitives by value, objects by reference.
impl PartialEq for ScriptValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (ScriptValue::Undefined, ScriptValue::Undefined) => true,
            (ScriptValue::Null, ScriptValue::Null) => true,
            (ScriptValue::Boolean(a), ScriptValue::Boolean(b)) => a == b,
            (ScriptValue::String(a), ScriptValue::String(b)) => a == b,
            (ScriptValue::Number(a), ScriptValue::Number(b)) => a == b,
            (ScriptValue::Object(a), ScriptValue::Object(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }
}
impl From<bool> for ScriptValue {
    fn from(b: bool) -> Self {
        ScriptValue::Boolean(b)
    }
}
impl From<&str> for ScriptValue {
    fn from(s: &str) -> Self {
        ScriptValue::String(s.to_string())
    }
}
impl From<String> for ScriptValue {
    fn from(s: String) -> Self {
        ScriptValue::String(s)
    }
}
impl From<i64> for ScriptValue {
    fn from(i: i64) -> Self {
        ScriptValue::Number(ScriptNumber::Integer(i))
    }
}
impl From<f64> for ScriptValue {
    fn from(n: f64) -> Self {
        ScriptValue::Number(ScriptNumber::from_f64(n))
    }
}

#[derive(Debug, PartialEq)]
pub enum ScriptNumber {
    Integer(i64),
    Float(f64),
    NaN,
    PositiveInfinity,
    NegativeInfinity,
}
impl ScriptNumber {
    pub fn from_f64(n: f64) -> Self {
        if n.is_nan() {
            ScriptNumber::NaN
        } else if n == f64::INFINITY {
            ScriptNumber::PositiveInfinity
        } else if n == f64::NEG_INFINITY {
            ScriptNumber::NegativeInfinity
        } else {
            ScriptNumber::Float(n)
        }
    }

    pub fn to_f64(&self) -> f64 {
        match self {
            ScriptNumber::Integer(i) => *i as f64,
            ScriptNumber::Float(n) => *n,
            ScriptNumber::NaN => f64::NAN,
            ScriptNumber::PositiveInfinity => f64::INFINITY,
            ScriptNumber::NegativeInfinity => f64::NEG_INFINITY,
        }
    }
}
impl Display for ScriptNumber {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            ScriptNumber::Integer(i) => write!(f, "{}", i),
            ScriptNumber::Float(n) => write!(f, "{}", n),
            ScriptNumber::NaN => write!(f, "NaN"),
            ScriptNumber::PositiveInfinity => write!(f, "Infinity"),
            ScriptNumber::NegativeInfinity => write!(f, "-Infinity"),
        }
    }
}
impl Clone for ScriptNumber {
    fn clone(&self) -> Self {
        match self {
            ScriptNumber::Integer(i) => ScriptNumber::Integer(*i),
            ScriptNumber::Float(n) => ScriptNumber::Float(*n),
            ScriptNumber::NaN => ScriptNumber::NaN,
            ScriptNumber::PositiveInfinity => ScriptNumber::PositiveInfinity,
            ScriptNumber::NegativeInfinity => ScriptNumber::NegativeInfinity,
        }
    }
}
