use std::any::Any;
use std::rc::Rc;

use tracing::debug;

use crate::bridge::cache::{cache, IdentityKey};
use crate::bridge::execution_context::Context;
use crate::bridge::function::call_host;
use crate::bridge::object::ObjectWrapper;
use crate::bridge::protocol::HostProtocol;
use crate::bridge::types::{BridgeRef, Frame};
use crate::engine::error::ScriptError;
use crate::engine::object::{ScriptObjectRef, Scriptable};
use crate::engine::object_property::PropertyKey;
use crate::engine::realm::Scope;
use crate::engine::value::ScriptValue;
use crate::host::callable::{HostCallable, HostFn};
use crate::host::class::HostClassRef;
use crate::host::value::HostValue;

/// A host class seen from script code: callable, usable with `new`, and the
/// right-hand side of `instanceof`.
pub struct ConstructorWrapper {
    class: HostClassRef,
    factory: HostCallable,
    protocol: HostProtocol,
}
impl ConstructorWrapper {
    pub fn wrap(
        bridge: &BridgeRef,
        context: Option<&Context>,
        class: HostClassRef,
        scope: Option<&Scope>,
    ) -> Rc<ConstructorWrapper> {
        let key = IdentityKey::of_class(&class);
        cache(context, key, move || {
            let target = class.clone();
            let factory = HostFn::named(
                format!("{}::new", class.name()),
                class.initializer_arity(),
                move |args| target.instantiate(args),
            );
            let wrapper = Rc::new(ConstructorWrapper {
                protocol: HostProtocol::new(bridge, HostValue::Class(class.clone()), context, scope),
                factory: HostCallable::Free(factory),
                class,
            });
            if let Some(scope) = scope {
                wrapper.set_prototype(Some(scope.function_prototype().clone() as ScriptObjectRef));
            }
            debug!(class = %wrapper.function_name(), "constructor wrapper created");
            wrapper
        })
    }

    pub fn unwrap(&self) -> HostValue {
        self.protocol.host().clone()
    }

    pub fn class(&self) -> &HostClassRef {
        &self.class
    }

    /// Number of required initializer parameters.
    pub fn length(&self) -> usize {
        self.class.initializer_arity().required()
    }

    pub fn function_name(&self) -> String {
        self.class.name()
    }

    fn intrinsic(&self, key: &PropertyKey) -> Option<ScriptValue> {
        match key.as_str() {
            Some("length") => Some(ScriptValue::from(self.length() as i64)),
            Some("name") => Some(ScriptValue::from(self.function_name())),
            _ => None,
        }
    }

    fn frame<'a>(&'a self, ctx: Option<&'a Context>, scope: Option<&'a Scope>) -> Frame<'a> {
        Frame::new(self.protocol.bridge(), ctx, scope.or_else(|| self.protocol.scope()))
    }
}
impl Scriptable for ConstructorWrapper {
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
        call_host(&self.factory, &self.frame(ctx, scope), this, args)
    }

    fn construct(
        &self,
        ctx: Option<&Context>,
        scope: Option<&Scope>,
        args: Vec<ScriptValue>,
    ) -> Result<ScriptValue, ScriptError> {
        call_host(&self.factory, &self.frame(ctx, scope), &ScriptValue::Undefined, args)
    }

    fn has_instance(&self, instance: &ScriptValue) -> Result<bool, ScriptError> {
        if instance.is_nullish() {
            return Ok(false);
        }
        if let Some(wrapped) = instance
            .as_object()
            .and_then(|o| o.as_any().downcast_ref::<ObjectWrapper>())
        {
            return Ok(self.class.is_instance(&wrapped.unwrap()));
        }
        let host = self.protocol.bridge().converter().to_host(instance)?;
        Ok(self.class.is_instance(&host))
    }

    /// Same class, or classes with the same name.
    fn equivalent_values(&self, other: &ScriptValue) -> bool {
        match other
            .as_object()
            .and_then(|o| o.as_any().downcast_ref::<ConstructorWrapper>())
        {
            Some(other) => {
                Rc::as_ptr(&self.class) as *const () == Rc::as_ptr(&other.class) as *const ()
                    || self.class.name() == other.class.name()
            }
            None => false,
        }
    }

    fn to_string(&self) -> String {
        format!("function {}() {{ [native code] }}", self.function_name())
    }
}
