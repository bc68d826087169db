use std::any::Any;
use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::ptr;
use std::rc::Rc;

use crate::bridge::execution_context::Context;
use crate::engine::error::ScriptError;
use crate::engine::object_property::PropertyKey;
use crate::engine::realm::Scope;
use crate::engine::value::ScriptValue;

pub type ScriptObjectRef = Rc<dyn Scriptable>;

/// The object protocol every script-visible object implements.
///
/// `get` answers `None` for "not found", which the engine reads as `undefined`
/// once the whole lookup has failed. `start` is the object the lookup began on.
pub trait Scriptable: Any {
    fn as_any(&self) -> &dyn Any;

    fn class_name(&self) -> String;

    fn get(&self, key: &PropertyKey, start: &ScriptValue) -> Result<Option<ScriptValue>, ScriptError>;

    fn has(&self, key: &PropertyKey, start: &ScriptValue) -> Result<bool, ScriptError>;

    fn put(&self, key: PropertyKey, start: &ScriptValue, value: ScriptValue) -> Result<(), ScriptError>;

    fn get_ids(&self) -> Vec<PropertyKey>;

    fn get_prototype_of(&self) -> Option<ScriptObjectRef>;

    fn set_prototype(&self, prototype: Option<ScriptObjectRef>) -> bool;

    fn is_callable(&self) -> bool {
        false
    }

    fn call(
        &self,
        _ctx: Option<&Context>,
        _scope: Option<&Scope>,
        _this: &ScriptValue,
        _args: Vec<ScriptValue>,
    ) -> Result<ScriptValue, ScriptError> {
        Err(ScriptError::TypeError(format!(
            "'{}' is not a function",
            self.to_string()
        )))
    }

    fn construct(
        &self,
        _ctx: Option<&Context>,
        _scope: Option<&Scope>,
        _args: Vec<ScriptValue>,
    ) -> Result<ScriptValue, ScriptError> {
        Err(ScriptError::TypeError(format!(
            "'{}' is not a constructor",
            self.to_string()
        )))
    }

    fn has_instance(&self, _instance: &ScriptValue) -> Result<bool, ScriptError> {
        Err(ScriptError::TypeError(format!(
            "right-hand side of 'instanceof' is not callable: {}",
            self.to_string()
        )))
    }

    /// Engine equality hook for two distinct objects. Identity is checked before this.
    fn equivalent_values(&self, _other: &ScriptValue) -> bool {
        false
    }

    fn to_string(&self) -> String {
        format!("[object {}]", self.class_name())
    }
}

pub fn same_object(a: &dyn Scriptable, b: &dyn Scriptable) -> bool {
    ptr::eq(
        a as *const dyn Scriptable as *const (),
        b as *const dyn Scriptable as *const (),
    )
}

/// Property storage and prototype link of an ordinary object.
///
/// This is the engine's default behavior that host wrappers fall back to.
/// Own keys keep their insertion order.
pub struct ObjectBase {
    properties: RefCell<HashMap<PropertyKey, ScriptValue>>,
    order: RefCell<Vec<PropertyKey>>,
    is_extensible: Cell<bool>,
    prototype: RefCell<Option<ScriptObjectRef>>,
}
impl ObjectBase {
    pub fn new() -> Self {
        ObjectBase {
            properties: RefCell::new(HashMap::new()),
            order: RefCell::new(Vec::new()),
            is_extensible: Cell::new(true),
            prototype: RefCell::new(None),
        }
    }

    pub fn get_own_property(&self, key: &PropertyKey) -> Option<ScriptValue> {
        self.properties.borrow().get(key).cloned()
    }

    pub fn has_own_property(&self, key: &PropertyKey) -> bool {
        self.properties.borrow().contains_key(key)
    }

    pub fn get(&self, key: &PropertyKey, start: &ScriptValue) -> Result<Option<ScriptValue>, ScriptError> {
        if let Some(value) = self.get_own_property(key) {
            return Ok(Some(value));
        }
        match self.get_prototype_of() {
            None => Ok(None),
            Some(p) => p.get(key, start),
        }
    }

    pub fn has(&self, key: &PropertyKey, start: &ScriptValue) -> Result<bool, ScriptError> {
        if self.has_own_property(key) {
            return Ok(true);
        }
        match self.get_prototype_of() {
            None => Ok(false),
            Some(p) => p.has(key, start),
        }
    }

    pub fn put(&self, key: PropertyKey, value: ScriptValue) -> Result<(), ScriptError> {
        let mut properties = self.properties.borrow_mut();
        if let Some(slot) = properties.get_mut(&key) {
            *slot = value;
            return Ok(());
        }
        if !self.is_extensible.get() {
            return Err(ScriptError::TypeError(format!(
                "Cannot add property {}, object is not extensible",
                key
            )));
        }
        self.order.borrow_mut().push(key.clone());
        properties.insert(key, value);
        Ok(())
    }

    pub fn delete(&self, key: &PropertyKey) -> bool {
        if self.properties.borrow_mut().remove(key).is_some() {
            self.order.borrow_mut().retain(|k| k != key);
        }
        true
    }

    pub fn own_property_keys(&self) -> Vec<PropertyKey> {
        self.order.borrow().clone()
    }

    pub fn is_extensible(&self) -> bool {
        self.is_extensible.get()
    }

    pub fn prevent_extensions(&self) -> bool {
        self.is_extensible.set(false);
        true
    }

    pub fn get_prototype_of(&self) -> Option<ScriptObjectRef> {
        self.prototype.borrow().clone()
    }

    /// Links `owner`'s prototype, refusing links that would close a cycle.
    pub fn set_prototype(&self, owner: &dyn Scriptable, prototype: Option<ScriptObjectRef>) -> bool {
        let new_value = match prototype {
            None => {
                *self.prototype.borrow_mut() = None;
                return true;
            }
            Some(p) => p,
        };
        if let Some(current) = &*self.prototype.borrow() {
            if same_object(current.as_ref(), new_value.as_ref()) {
                return true;
            }
        }
        if !self.is_extensible() {
            return false;
        }
        let mut p = Some(new_value.clone());
        while let Some(some_p) = p {
            if same_object(owner, some_p.as_ref()) {
                // To prevent circular chain
                return false;
            }
            p = some_p.get_prototype_of();
        }
        *self.prototype.borrow_mut() = Some(new_value);
        true
    }
}
impl Default for ObjectBase {
    fn default() -> Self {
        Self::new()
    }
}

/// An ordinary engine object: prototypes, the global object, native error values.
pub struct NativeObject {
    class_name: String,
    object_base: ObjectBase,
}
impl NativeObject {
    pub fn new(class_name: impl Into<String>) -> Self {
        NativeObject {
            class_name: class_name.into(),
            object_base: ObjectBase::new(),
        }
    }

    pub fn get_object_base(&self) -> &ObjectBase {
        &self.object_base
    }

    /// Defines an own data property, ignoring extensibility.
    pub fn define(&self, key: impl Into<PropertyKey>, value: ScriptValue) {
        let key = key.into();
        if !self.object_base.has_own_property(&key) {
            self.object_base.order.borrow_mut().push(key.clone());
        }
        self.object_base.properties.borrow_mut().insert(key, value);
    }
}
impl Scriptable for NativeObject {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn class_name(&self) -> String {
        self.class_name.to_string()
    }

    fn get(&self, key: &PropertyKey, start: &ScriptValue) -> Result<Option<ScriptValue>, ScriptError> {
        self.object_base.get(key, start)
    }

    fn has(&self, key: &PropertyKey, start: &ScriptValue) -> Result<bool, ScriptError> {
        self.object_base.has(key, start)
    }

    fn put(&self, key: PropertyKey, _start: &ScriptValue, value: ScriptValue) -> Result<(), ScriptError> {
        self.object_base.put(key, value)
    }

    fn get_ids(&self) -> Vec<PropertyKey> {
        self.object_base.own_property_keys()
    }

    fn get_prototype_of(&self) -> Option<ScriptObjectRef> {
        self.object_base.get_prototype_of()
    }

    fn set_prototype(&self, prototype: Option<ScriptObjectRef>) -> bool {
        self.object_base.set_prototype(self, prototype)
    }
}
