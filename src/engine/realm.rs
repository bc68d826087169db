use std::rc::Rc;

use crate::engine::object::{NativeObject, ScriptObjectRef, Scriptable};

/// The enclosing scope a wrapper is created under.
///
/// Only the intrinsics the bridge links against are modelled: the global object
/// and the default object and function prototypes.
#[derive(Clone)]
pub struct Scope {
    global: Rc<NativeObject>,
    object_prototype: Rc<NativeObject>,
    function_prototype: Rc<NativeObject>,
}
impl Scope {
    pub fn new() -> Self {
        let object_prototype = Rc::new(NativeObject::new("Object"));
        let function_prototype = Rc::new(NativeObject::new("Function"));
        function_prototype.set_prototype(Some(object_prototype.clone() as ScriptObjectRef));
        let global = Rc::new(NativeObject::new("global"));
        global.set_prototype(Some(object_prototype.clone() as ScriptObjectRef));
        Scope {
            global,
            object_prototype,
            function_prototype,
        }
    }

    pub fn global(&self) -> &Rc<NativeObject> {
        &self.global
    }

    pub fn object_prototype(&self) -> &Rc<NativeObject> {
        &self.object_prototype
    }

    pub fn function_prototype(&self) -> &Rc<NativeObject> {
        &self.function_prototype
    }
}
impl Default for Scope {
    fn default() -> Self {
        Self::new()
    }
}
