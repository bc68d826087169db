use std::any::Any;
use std::rc::Rc;

use tracing::{debug, trace};

use crate::bridge::cache::{cache, IdentityKey};
use crate::bridge::error::wrap_error;
use crate::bridge::execution_context::Context;
use crate::bridge::protocol::HostProtocol;
use crate::bridge::types::{BridgeRef, Frame};
use crate::engine::error::ScriptError;
use crate::engine::object::{ScriptObjectRef, Scriptable};
use crate::engine::object_property::PropertyKey;
use crate::engine::realm::Scope;
use crate::engine::value::ScriptValue;
use crate::host::callable::{Arity, HostCallable};
use crate::host::value::HostValue;

/// Fits a script argument list to a host arity.
///
/// Fixed arities get exactly that many arguments, dropping extras or padding
/// with `null`. Variadic arities are padded up to their required count and
/// otherwise passed through untouched.
pub fn reconcile_args(mut args: Vec<ScriptValue>, arity: Arity) -> Vec<ScriptValue> {
    if arity.is_variadic() {
        let required = arity.required();
        if args.len() < required {
            args.resize(required, ScriptValue::Null);
        }
    } else {
        args.resize(arity.required(), ScriptValue::Null);
    }
    args
}

/// The host call boundary.
///
/// Host failures come back as catchable wrapped errors; conversion failures
/// propagate as they are.
pub(crate) fn call_host(
    callable: &HostCallable,
    frame: &Frame,
    this: &ScriptValue,
    args: Vec<ScriptValue>,
) -> Result<ScriptValue, ScriptError> {
    let args = reconcile_args(args, callable.arity());
    trace!(callable = %callable, argc = args.len(), "host call");
    let host_args = frame.args_to_host(&args)?;
    let receiver = match callable {
        HostCallable::Unbound(_) => Some(frame.to_host(this)?),
        HostCallable::Free(_) | HostCallable::Bound(_) => None,
    };
    let result = callable.invoke(receiver, host_args).map_err(wrap_error)?;
    frame.to_script(result)
}

/// A host callable seen from script code.
pub struct FunctionWrapper {
    callable: HostCallable,
    protocol: HostProtocol,
}
impl FunctionWrapper {
    /// The wrapper for `callable` in `context`, built on first request.
    ///
    /// Callables that render the same share one wrapper.
    pub fn wrap(
        bridge: &BridgeRef,
        context: Option<&Context>,
        callable: HostCallable,
        scope: Option<&Scope>,
    ) -> Rc<FunctionWrapper> {
        let key = IdentityKey::of_callable(&callable);
        cache(context, key, move || {
            let host = HostValue::Callable(callable.clone());
            let wrapper = Rc::new(FunctionWrapper {
                callable,
                protocol: HostProtocol::new(bridge, host, context, scope),
            });
            if let Some(scope) = scope {
                wrapper.set_prototype(Some(scope.function_prototype().clone() as ScriptObjectRef));
            }
            debug!(callable = %wrapper.callable, "function wrapper created");
            wrapper
        })
    }

    pub fn unwrap(&self) -> HostValue {
        self.protocol.host().clone()
    }

    pub fn callable(&self) -> &HostCallable {
        &self.callable
    }

    /// Number of required parameters.
    pub fn length(&self) -> usize {
        self.callable.arity().required()
    }

    /// Declared name, empty for anonymous closures.
    pub fn function_name(&self) -> String {
        self.callable.name().unwrap_or("").to_string()
    }

    fn intrinsic(&self, key: &PropertyKey) -> Option<ScriptValue> {
        match key.as_str() {
            Some("length") => Some(ScriptValue::from(self.length() as i64)),
            Some("name") => Some(ScriptValue::from(self.function_name())),
            _ => None,
        }
    }
}
impl Scriptable for FunctionWrapper {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn class_name(&self) -> String {
        "Function".to_string()
    }

    fn get(&self, key: &PropertyKey, start: &ScriptValue) -> Result<Option<ScriptValue>, ScriptError> {
        self.protocol.get_with(self, key, &mut || match self.intrinsic(key) {
            Some(value) => Ok(Some(value)),
            None => self.protocol.native().get(key, start),
        })
    }

    fn has(&self, key: &PropertyKey, start: &ScriptValue) -> Result<bool, ScriptError> {
        if self.intrinsic(key).is_some() {
            return Ok(true);
        }
        self.protocol.has(self, key, start)
    }

    fn put(&self, key: PropertyKey, _start: &ScriptValue, value: ScriptValue) -> Result<(), ScriptError> {
        self.protocol.put(self, key, value)
    }

    fn get_ids(&self) -> Vec<PropertyKey> {
        self.protocol.get_ids()
    }

    fn get_prototype_of(&self) -> Option<ScriptObjectRef> {
        self.protocol.get_prototype_of()
    }

    fn set_prototype(&self, prototype: Option<ScriptObjectRef>) -> bool {
        self.protocol.set_prototype(self, prototype)
    }

    fn is_callable(&self) -> bool {
        true
    }

    fn call(
        &self,
        ctx: Option<&Context>,
        scope: Option<&Scope>,
        this: &ScriptValue,
        args: Vec<ScriptValue>,
    ) -> Result<ScriptValue, ScriptError> {
        let frame = Frame::new(self.protocol.bridge(), ctx, scope.or_else(|| self.protocol.scope()));
        call_host(&self.callable, &frame, this, args)
    }

    /// Same callable, or callables that render the same.
    fn equivalent_values(&self, other: &ScriptValue) -> bool {
        match other.as_object().and_then(|o| o.as_any().downcast_ref::<FunctionWrapper>()) {
            Some(other) => {
                self.callable.ptr_eq(&other.callable) || self.callable.to_string() == other.callable.to_string()
            }
            None => false,
        }
    }

    fn to_string(&self) -> String {
        format!("function {}() {{ [native code] }}", self.function_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn numbered(n: usize) -> Vec<ScriptValue> {
        (0..n as i64).map(ScriptValue::from).collect()
    }

    #[test]
    fn test_fixed_arity_pads_with_null() {
        let args = reconcile_args(vec![], Arity::exactly(2));
        assert_eq!(args, vec![ScriptValue::Null, ScriptValue::Null]);
    }

    #[test]
    fn test_fixed_arity_truncates() {
        let args = reconcile_args(numbered(4), Arity::exactly(1));
        assert_eq!(args, vec![ScriptValue::from(0i64)]);
    }

    #[test]
    fn test_open_arity_passes_through() {
        assert_eq!(reconcile_args(numbered(5), Arity::from_raw(-1)), numbered(5));
        assert!(reconcile_args(vec![], Arity::from_raw(-1)).is_empty());
    }

    #[test]
    fn test_variadic_pads_to_required() {
        let args = reconcile_args(numbered(1), Arity::from_raw(-3));
        assert_eq!(args, vec![ScriptValue::from(0i64), ScriptValue::Null]);
        assert_eq!(reconcile_args(numbered(6), Arity::from_raw(-3)).len(), 6);
    }

    proptest! {
        #[test]
        fn test_reconciled_length(raw in -6i32..6, supplied in 0usize..10) {
            let arity = Arity::from_raw(raw);
            let args = reconcile_args(numbered(supplied), arity);
            if raw >= 0 {
                prop_assert_eq!(args.len(), raw as usize);
            } else {
                prop_assert_eq!(args.len(), supplied.max(arity.required()));
            }
        }

        #[test]
        fn test_supplied_prefix_survives(raw in -6i32..6, supplied in 0usize..10) {
            let expected = numbered(supplied);
            let args = reconcile_args(expected.clone(), Arity::from_raw(raw));
            let kept = supplied.min(args.len());
            prop_assert_eq!(&args[..kept], &expected[..kept]);
            prop_assert!(args[kept..].iter().all(|a| *a == ScriptValue::Null));
        }
    }
}
