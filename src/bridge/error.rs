use std::any::Any;
use std::rc::Rc;

use tracing::debug;

use crate::engine::error::ScriptError;
use crate::engine::object::{ObjectBase, ScriptObjectRef, Scriptable};
use crate::engine::object_property::PropertyKey;
use crate::engine::value::ScriptValue;
use crate::host::error::HostError;

/// A host exception on its way through script code.
///
/// Script code sees an `Error` object with the host error's class as `name`
/// and its message as `message`. The original error is kept by reference.
pub struct WrappedError {
    error: Rc<HostError>,
    object_base: ObjectBase,
}
impl WrappedError {
    pub fn new(error: HostError) -> Self {
        WrappedError {
            error: Rc::new(error),
            object_base: ObjectBase::new(),
        }
    }

    /// The original host error.
    pub fn unwrap(&self) -> &Rc<HostError> {
        &self.error
    }

    /// The host error carried by `value`, if it is a wrapped error.
    pub fn from_value(value: &ScriptValue) -> Option<Rc<HostError>> {
        value
            .as_object()
            .and_then(|o| o.as_any().downcast_ref::<WrappedError>())
            .map(|w| w.error.clone())
    }

    fn intrinsic(&self, key: &PropertyKey) -> Option<ScriptValue> {
        match key.as_str() {
            Some("name") => Some(ScriptValue::from(self.error.class())),
            Some("message") => Some(ScriptValue::from(self.error.message())),
            _ => None,
        }
    }
}
impl Scriptable for WrappedError {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn class_name(&self) -> String {
        "Error".to_string()
    }

    fn get(&self, key: &PropertyKey, start: &ScriptValue) -> Result<Option<ScriptValue>, ScriptError> {
        match self.object_base.get_own_property(key) {
            Some(value) => Ok(Some(value)),
            None => match self.intrinsic(key) {
                Some(value) => Ok(Some(value)),
                None => self.object_base.get(key, start),
            },
        }
    }

    fn has(&self, key: &PropertyKey, start: &ScriptValue) -> Result<bool, ScriptError> {
        if self.intrinsic(key).is_some() {
            return Ok(true);
        }
        self.object_base.has(key, start)
    }

    fn put(&self, key: PropertyKey, _start: &ScriptValue, value: ScriptValue) -> Result<(), ScriptError> {
        self.object_base.put(key, value)
    }

    fn get_ids(&self) -> Vec<PropertyKey> {
        let mut ids = vec![PropertyKey::from("name"), PropertyKey::from("message")];
        ids.extend(
            self.object_base
                .own_property_keys()
                .into_iter()
                .filter(|k| self.intrinsic(k).is_none()),
        );
        ids
    }

    fn get_prototype_of(&self) -> Option<ScriptObjectRef> {
        self.object_base.get_prototype_of()
    }

    fn set_prototype(&self, prototype: Option<ScriptObjectRef>) -> bool {
        self.object_base.set_prototype(self, prototype)
    }

    fn to_string(&self) -> String {
        self.error.to_string()
    }
}

/// Turns a host failure into a script exception carrying it.
pub fn wrap_error(error: HostError) -> ScriptError {
    debug!(class = error.class(), message = error.message(), "host error crossed into script");
    ScriptError::Thrown(ScriptValue::Object(Rc::new(WrappedError::new(error))))
}
