use std::any::Any;
use std::rc::Rc;

use tracing::debug;

use crate::bridge::cache::{cache, IdentityKey};
use crate::bridge::execution_context::Context;
use crate::bridge::protocol::HostProtocol;
use crate::bridge::types::BridgeRef;
use crate::engine::error::ScriptError;
use crate::engine::object::{ScriptObjectRef, Scriptable};
use crate::engine::object_property::PropertyKey;
use crate::engine::realm::Scope;
use crate::engine::value::ScriptValue;
use crate::host::value::{HostObjectRef, HostValue};

/// A host object seen from script code.
pub struct ObjectWrapper {
    object: HostObjectRef,
    protocol: HostProtocol,
}
impl ObjectWrapper {
    /// The wrapper for `object` in `context`, built on first request.
    ///
    /// A freshly built wrapper joins `scope`'s object prototype.
    pub fn wrap(
        bridge: &BridgeRef,
        context: Option<&Context>,
        object: HostObjectRef,
        scope: Option<&Scope>,
    ) -> Rc<ObjectWrapper> {
        let key = IdentityKey::of_object(&object);
        cache(context, key, move || {
            let host = HostValue::Object(object.clone());
            let wrapper = Rc::new(ObjectWrapper {
                object,
                protocol: HostProtocol::new(bridge, host, context, scope),
            });
            if let Some(scope) = scope {
                wrapper.set_prototype(Some(scope.object_prototype().clone() as ScriptObjectRef));
            }
            debug!(class = %wrapper.class_name(), "object wrapper created");
            wrapper
        })
    }

    pub fn unwrap(&self) -> HostValue {
        self.protocol.host().clone()
    }

    pub fn object(&self) -> &HostObjectRef {
        &self.object
    }

    /// Own properties script code stored on the wrapper itself.
    pub fn own_keys(&self) -> Vec<PropertyKey> {
        self.protocol.native().own_property_keys()
    }
}
impl Scriptable for ObjectWrapper {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn class_name(&self) -> String {
        self.object.class_name()
    }

    fn get(&self, key: &PropertyKey, start: &ScriptValue) -> Result<Option<ScriptValue>, ScriptError> {
        self.protocol.get(self, key, start)
    }

    fn has(&self, key: &PropertyKey, start: &ScriptValue) -> Result<bool, ScriptError> {
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

    /// Host value-equality of the wrapped objects.
    fn equivalent_values(&self, other: &ScriptValue) -> bool {
        match other.as_object().and_then(|o| o.as_any().downcast_ref::<ObjectWrapper>()) {
            Some(other) => self.object.host_eq(other.object.as_ref()),
            None => false,
        }
    }

    fn to_string(&self) -> String {
        format!("[{} {}]", self.protocol.bridge().config().tag, self.class_name())
    }
}
