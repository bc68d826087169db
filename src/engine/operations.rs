//! Engine operators that drive the object protocol.
//!
//! These stand in for the interpreter's own evaluation of `a == b`, `obj.key`,
//! `obj.key = v`, `f(...)`, `new C(...)`, `x instanceof C` and `try/catch`.

use crate::bridge::execution_context::Context;
use crate::engine::error::ScriptError;
use crate::engine::object::same_object;
use crate::engine::object_property::PropertyKey;
use crate::engine::realm::Scope;
use crate::engine::value::{ScriptNumber, ScriptValue};

pub fn strict_equals(a: &ScriptValue, b: &ScriptValue) -> bool {
    match (a, b) {
        (ScriptValue::Number(ScriptNumber::NaN), _) | (_, ScriptValue::Number(ScriptNumber::NaN)) => false,
        (ScriptValue::Number(x), ScriptValue::Number(y)) => x.to_f64() == y.to_f64(),
        _ => a == b,
    }
}

/// `a == b`. Two distinct objects compare through `equivalent_values`.
pub fn loose_equals(a: &ScriptValue, b: &ScriptValue) -> bool {
    match (a, b) {
        (ScriptValue::Undefined, ScriptValue::Null) | (ScriptValue::Null, ScriptValue::Undefined) => true,
        (ScriptValue::Object(x), ScriptValue::Object(y)) => {
            same_object(x.as_ref(), y.as_ref()) || x.equivalent_values(b) || y.equivalent_values(a)
        }
        _ => strict_equals(a, b),
    }
}

/// `obj[key]`, yielding `undefined` when nothing along the lookup answers.
pub fn get_value(obj: &ScriptValue, key: &PropertyKey) -> Result<ScriptValue, ScriptError> {
    match obj {
        ScriptValue::Object(o) => Ok(o.get(key, obj)?.unwrap_or(ScriptValue::Undefined)),
        other => Err(ScriptError::TypeError(format!(
            "Cannot read property '{}' of {}",
            key, other
        ))),
    }
}

pub fn has_property(obj: &ScriptValue, key: &PropertyKey) -> Result<bool, ScriptError> {
    match obj {
        ScriptValue::Object(o) => o.has(key, obj),
        other => Err(ScriptError::TypeError(format!(
            "Cannot use 'in' operator to search for '{}' in {}",
            key, other
        ))),
    }
}

pub fn put_value(obj: &ScriptValue, key: PropertyKey, value: ScriptValue) -> Result<(), ScriptError> {
    match obj {
        ScriptValue::Object(o) => o.put(key, obj, value),
        other => Err(ScriptError::TypeError(format!(
            "Cannot set property '{}' of {}",
            key, other
        ))),
    }
}

pub fn call_function(
    f: &ScriptValue,
    ctx: Option<&Context>,
    scope: Option<&Scope>,
    this: &ScriptValue,
    args: Vec<ScriptValue>,
) -> Result<ScriptValue, ScriptError> {
    match f {
        ScriptValue::Object(o) if o.is_callable() => o.call(ctx, scope, this, args),
        other => Err(ScriptError::TypeError(format!("{} is not a function", other))),
    }
}

/// `obj.method(...args)`: looks the method up and calls it with `obj` as `this`.
pub fn call_method(
    obj: &ScriptValue,
    method: &str,
    ctx: Option<&Context>,
    scope: Option<&Scope>,
    args: Vec<ScriptValue>,
) -> Result<ScriptValue, ScriptError> {
    let f = get_value(obj, &PropertyKey::from(method))?;
    call_function(&f, ctx, scope, obj, args)
}

pub fn construct(
    ctor: &ScriptValue,
    ctx: Option<&Context>,
    scope: Option<&Scope>,
    args: Vec<ScriptValue>,
) -> Result<ScriptValue, ScriptError> {
    match ctor {
        ScriptValue::Object(o) => o.construct(ctx, scope, args),
        other => Err(ScriptError::TypeError(format!("{} is not a constructor", other))),
    }
}

pub fn instance_of(value: &ScriptValue, ctor: &ScriptValue) -> Result<bool, ScriptError> {
    match ctor {
        ScriptValue::Object(o) => o.has_instance(value),
        other => Err(ScriptError::TypeError(format!(
            "right-hand side of 'instanceof' is not an object: {}",
            other
        ))),
    }
}

/// `try { body } catch (e) { handler }`.
///
/// Every engine exception is trappable; the handler receives the value the
/// exception carries.
pub fn try_catch<B, H>(scope: Option<&Scope>, body: B, handler: H) -> Result<ScriptValue, ScriptError>
where
    B: FnOnce() -> Result<ScriptValue, ScriptError>,
    H: FnOnce(ScriptValue) -> Result<ScriptValue, ScriptError>,
{
    match body() {
        Ok(value) => Ok(value),
        Err(e) => handler(e.into_thrown_value(scope)),
    }
}
