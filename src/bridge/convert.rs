//! Value translation across the bridge.

use crate::bridge::constructor::ConstructorWrapper;
use crate::bridge::function::FunctionWrapper;
use crate::bridge::object::ObjectWrapper;
use crate::bridge::types::Frame;
use crate::engine::error::ScriptError;
use crate::engine::object::ScriptObjectRef;
use crate::engine::value::{ScriptNumber, ScriptValue};
use crate::host::value::HostValue;

/// Translates values between the host and the script engine.
///
/// Errors raised here propagate to script code unmodified.
pub trait ValueConverter {
    /// Host to script. Reference kinds come back as (cached) wrappers.
    fn to_script(&self, value: HostValue, frame: &Frame) -> Result<ScriptValue, ScriptError>;

    /// Script to host. Wrappers give back the value they wrap.
    fn to_host(&self, value: &ScriptValue) -> Result<HostValue, ScriptError>;

    fn args_to_host(&self, args: &[ScriptValue]) -> Result<Vec<HostValue>, ScriptError> {
        args.iter().map(|arg| self.to_host(arg)).collect()
    }
}

pub struct DefaultConverter;
impl ValueConverter for DefaultConverter {
    fn to_script(&self, value: HostValue, frame: &Frame) -> Result<ScriptValue, ScriptError> {
        let bridge = frame.bridge();
        Ok(match value {
            HostValue::Nil => ScriptValue::Null,
            HostValue::Bool(b) => ScriptValue::Boolean(b),
            HostValue::Int(i) => ScriptValue::Number(ScriptNumber::Integer(i)),
            HostValue::Float(n) => ScriptValue::Number(ScriptNumber::from_f64(n)),
            HostValue::Str(s) => ScriptValue::String(s),
            HostValue::Object(o) => {
                let wrapper = ObjectWrapper::wrap(bridge, frame.context(), o, frame.scope());
                ScriptValue::Object(wrapper as ScriptObjectRef)
            }
            HostValue::Callable(c) => {
                let wrapper = FunctionWrapper::wrap(bridge, frame.context(), c, frame.scope());
                ScriptValue::Object(wrapper as ScriptObjectRef)
            }
            HostValue::Class(c) => {
                let wrapper = ConstructorWrapper::wrap(bridge, frame.context(), c, frame.scope());
                ScriptValue::Object(wrapper as ScriptObjectRef)
            }
            HostValue::Script(v) => v,
        })
    }

    fn to_host(&self, value: &ScriptValue) -> Result<HostValue, ScriptError> {
        Ok(match value {
            ScriptValue::Undefined | ScriptValue::Null => HostValue::Nil,
            ScriptValue::Boolean(b) => HostValue::Bool(*b),
            ScriptValue::String(s) => HostValue::Str(s.to_string()),
            ScriptValue::Number(ScriptNumber::Integer(i)) => HostValue::Int(*i),
            ScriptValue::Number(n) => HostValue::Float(n.to_f64()),
            ScriptValue::Object(o) => {
                let any = o.as_any();
                if let Some(w) = any.downcast_ref::<ObjectWrapper>() {
                    w.unwrap()
                } else if let Some(w) = any.downcast_ref::<FunctionWrapper>() {
                    w.unwrap()
                } else if let Some(w) = any.downcast_ref::<ConstructorWrapper>() {
                    w.unwrap()
                } else {
                    HostValue::Script(value.clone())
                }
            }
        })
    }
}
