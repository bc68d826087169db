use std::rc::Rc;

use thiserror::Error;

use crate::engine::object::{NativeObject, Scriptable};
use crate::engine::realm::Scope;
use crate::engine::value::ScriptValue;

/// An exception travelling through the engine.
///
/// Every variant is catchable by script code; see [`ScriptError::into_thrown_value`]
/// for the value a `catch (e)` clause binds.
#[derive(Debug, Clone, Error)]
pub enum ScriptError {
    #[error("Uncaught type error: {0}.")]
    TypeError(String),
    #[error("Uncaught reference error: {0}.")]
    ReferenceError(String),
    #[error("Uncaught range error: {0}.")]
    RangeError(String),
    #[error("Uncaught exception: {0}")]
    Thrown(ScriptValue),
}
impl ScriptError {
    pub fn name(&self) -> &'static str {
        match self {
            ScriptError::TypeError(_) => "TypeError",
            ScriptError::ReferenceError(_) => "ReferenceError",
            ScriptError::RangeError(_) => "RangeError",
            ScriptError::Thrown(_) => "Error",
        }
    }

    /// The value bound by a script `catch` clause.
    ///
    /// Thrown values pass through untouched. Native error kinds materialize as an
    /// ordinary error object carrying `name` and `message`.
    pub fn into_thrown_value(self, scope: Option<&Scope>) -> ScriptValue {
        let name = self.name();
        let message = match self {
            ScriptError::Thrown(value) => return value,
            ScriptError::TypeError(m) | ScriptError::ReferenceError(m) | ScriptError::RangeError(m) => m,
        };
        let error = NativeObject::new(name);
        if let Some(scope) = scope {
            let prototype: Rc<dyn Scriptable> = scope.object_prototype().clone();
            error.set_prototype(Some(prototype));
        }
        error.define("name", ScriptValue::from(name));
        error.define("message", ScriptValue::from(message));
        ScriptValue::Object(Rc::new(error))
    }
}
