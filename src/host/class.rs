use std::marker::PhantomData;
use std::rc::Rc;

use crate::host::callable::{Arity, UnboundMethod};
use crate::host::error::{HostError, HostResult};
use crate::host::value::{short_type_name, HostObject, HostValue};

pub type HostClassRef = Rc<dyn HostClass>;

/// A host type that script code can instantiate with `new`.
pub trait HostClass {
    fn name(&self) -> String;

    /// Arity of the initializer, which is what `new` accepts.
    fn initializer_arity(&self) -> Arity;

    fn instantiate(&self, args: Vec<HostValue>) -> HostResult;

    /// Whether `value` is an instance of this class.
    fn is_instance(&self, value: &HostValue) -> bool;

    fn static_members(&self) -> Vec<String> {
        Vec::new()
    }

    fn static_method(&self, _name: &str) -> Option<UnboundMethod> {
        None
    }
}

type Factory<T> = dyn Fn(Vec<HostValue>) -> Result<T, HostError>;

/// A [`HostClass`] backed by a Rust type and a factory closure.
pub struct ClassDef<T: HostObject> {
    name: String,
    arity: Arity,
    factory: Box<Factory<T>>,
    _instance: PhantomData<T>,
}
impl<T: HostObject> ClassDef<T> {
    pub fn new<F>(arity: Arity, factory: F) -> Self
    where
        F: Fn(Vec<HostValue>) -> Result<T, HostError> + 'static,
    {
        ClassDef {
            name: short_type_name(std::any::type_name::<T>()),
            arity,
            factory: Box::new(factory),
            _instance: PhantomData,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }
}
impl<T: HostObject> HostClass for ClassDef<T> {
    fn name(&self) -> String {
        self.name.to_string()
    }

    fn initializer_arity(&self) -> Arity {
        self.arity
    }

    fn instantiate(&self, args: Vec<HostValue>) -> HostResult {
        let instance = (self.factory)(args)?;
        Ok(HostValue::object(instance))
    }

    fn is_instance(&self, value: &HostValue) -> bool {
        value.downcast_ref::<T>().is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::any::Any;

    struct Marker;
    impl HostObject for Marker {
        fn as_any(&self) -> &dyn Any {
            self
        }

        fn members(&self) -> Vec<String> {
            Vec::new()
        }

        fn method(&self, _name: &str) -> Option<UnboundMethod> {
            None
        }
    }

    #[test]
    fn test_class_def_instantiates_and_recognizes() {
        let class = ClassDef::new(Arity::exactly(0), |_| Ok(Marker));
        assert_eq!(class.name(), "Marker");
        let instance = class.instantiate(vec![]).unwrap();
        assert!(class.is_instance(&instance));
        assert!(!class.is_instance(&HostValue::Int(3)));
        assert_eq!(class.with_name("Flag").name(), "Flag");
    }
}
