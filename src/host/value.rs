use std::any::Any;
use std::fmt;
use std::fmt::Formatter;
use std::rc::Rc;

use crate::engine::value::ScriptValue;
use crate::host::callable::{Arity, BoundMethod, HostCallable, UnboundMethod};
use crate::host::class::HostClassRef;
use crate::host::error::HostError;

pub type HostObjectRef = Rc<dyn HostObject>;

/// Strips the module path from a type name, keeping any generic arguments.
pub fn short_type_name(full: &str) -> String {
    let (path, generics) = match full.find('<') {
        Some(i) => full.split_at(i),
        None => (full, ""),
    };
    let base = path.rsplit("::").next().unwrap_or(path);
    format!("{}{}", base, generics)
}

/// An object living on the host side.
///
/// Members are reported the way a reflective host lists them: readers by name,
/// writers with a trailing `=`, and the index operators as `[]` and `[]=`.
pub trait HostObject: Any {
    fn as_any(&self) -> &dyn Any;

    /// Public members declared by the object itself, in declaration order.
    fn members(&self) -> Vec<String>;

    fn method(&self, name: &str) -> Option<UnboundMethod>;

    /// Runtime type name. Defaults to the concrete Rust type.
    fn class_name(&self) -> String {
        short_type_name(std::any::type_name::<Self>())
    }

    /// Whether `name` is backed by a field rather than being computed.
    fn has_field(&self, _name: &str) -> bool {
        false
    }

    /// Host value-equality. Defaults to identity.
    fn host_eq(&self, other: &dyn HostObject) -> bool {
        self.as_any() as *const dyn Any as *const () == other.as_any() as *const dyn Any as *const ()
    }
}

/// A value on the host side of the bridge.
#[derive(Clone)]
pub enum HostValue {
    Nil,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    Object(HostObjectRef),
    Callable(HostCallable),
    Class(HostClassRef),
    /// A script value handed to the host opaquely.
    Script(ScriptValue),
}
impl HostValue {
    pub fn object<T: HostObject>(object: T) -> Self {
        HostValue::Object(Rc::new(object))
    }

    pub fn is_nil(&self) -> bool {
        match self {
            HostValue::Nil => true,
            _ => false,
        }
    }

    pub fn as_object(&self) -> Option<&HostObjectRef> {
        match self {
            HostValue::Object(o) => Some(o),
            _ => None,
        }
    }

    pub fn downcast_ref<T: HostObject>(&self) -> Option<&T> {
        self.as_object().and_then(|o| o.as_any().downcast_ref::<T>())
    }

    pub fn class_name(&self) -> String {
        match self {
            HostValue::Nil => "NilClass".to_string(),
            HostValue::Bool(_) => "bool".to_string(),
            HostValue::Int(_) => "i64".to_string(),
            HostValue::Float(_) => "f64".to_string(),
            HostValue::Str(_) => "String".to_string(),
            HostValue::Object(o) => o.class_name(),
            HostValue::Callable(_) => "Callable".to_string(),
            HostValue::Class(_) => "Class".to_string(),
            HostValue::Script(v) => v.type_of().to_string(),
        }
    }

    /// Public members as reflection reports them; see [`HostObject::members`].
    pub fn members(&self) -> Vec<String> {
        match self {
            HostValue::Object(o) => o.members(),
            HostValue::Callable(c) => {
                let mut members = vec!["arity".to_string(), "call".to_string()];
                if c.name().is_some() {
                    members.push("name".to_string());
                }
                members
            }
            HostValue::Class(c) => {
                let mut members = vec!["name".to_string(), "new".to_string()];
                members.extend(c.static_members());
                members
            }
            _ => Vec::new(),
        }
    }

    /// Looks up `name` and binds it to this value.
    pub fn method(&self, name: &str) -> Option<BoundMethod> {
        let unbound = match self {
            HostValue::Object(o) => o.method(name),
            HostValue::Callable(c) => callable_method(c, name),
            HostValue::Class(c) => class_method(c, name),
            _ => None,
        };
        unbound.map(|m| m.bind(self.clone()))
    }

    pub fn responds_to(&self, name: &str) -> bool {
        match self {
            HostValue::Object(o) => o.method(name).is_some(),
            _ => self.method(name).is_some(),
        }
    }

    pub fn has_field(&self, name: &str) -> bool {
        match self {
            HostValue::Object(o) => o.has_field(name),
            _ => false,
        }
    }

    /// Reference identity for reference kinds, value identity for primitives.
    pub fn identical(&self, other: &HostValue) -> bool {
        match (self, other) {
            (HostValue::Nil, HostValue::Nil) => true,
            (HostValue::Bool(a), HostValue::Bool(b)) => a == b,
            (HostValue::Int(a), HostValue::Int(b)) => a == b,
            (HostValue::Float(a), HostValue::Float(b)) => a.to_bits() == b.to_bits(),
            (HostValue::Str(a), HostValue::Str(b)) => a == b,
            (HostValue::Object(a), HostValue::Object(b)) => {
                Rc::as_ptr(a) as *const () == Rc::as_ptr(b) as *const ()
            }
            (HostValue::Callable(a), HostValue::Callable(b)) => a.ptr_eq(b),
            (HostValue::Class(a), HostValue::Class(b)) => {
                Rc::as_ptr(a) as *const () == Rc::as_ptr(b) as *const ()
            }
            (HostValue::Script(a), HostValue::Script(b)) => a == b,
            _ => false,
        }
    }
}
impl fmt::Debug for HostValue {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            HostValue::Nil => write!(f, "HostValue::Nil"),
            HostValue::Bool(b) => write!(f, "HostValue::Bool({})", b),
            HostValue::Int(i) => write!(f, "HostValue::Int({})", i),
            HostValue::Float(n) => write!(f, "HostValue::Float({})", n),
            HostValue::Str(s) => write!(f, "HostValue::Str({:?})", s),
            HostValue::Object(o) => write!(f, "HostValue::Object({})", o.class_name()),
            HostValue::Callable(c) => write!(f, "HostValue::Callable({})", c),
            HostValue::Class(c) => write!(f, "HostValue::Class({})", c.name()),
            HostValue::Script(v) => write!(f, "HostValue::Script({:?})", v),
        }
    }
}
/// Primitives by value, objects by host equality, the rest by identity.
impl PartialEq for HostValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (HostValue::Float(a), HostValue::Float(b)) => a == b,
            (HostValue::Object(a), HostValue::Object(b)) => a.host_eq(b.as_ref()),
            _ => self.identical(other),
        }
    }
}
impl From<bool> for HostValue {
    fn from(b: bool) -> Self {
        HostValue::Bool(b)
    }
}
impl From<i64> for HostValue {
    fn from(i: i64) -> Self {
        HostValue::Int(i)
    }
}
impl From<f64> for HostValue {
    fn from(n: f64) -> Self {
        HostValue::Float(n)
    }
}
impl From<&str> for HostValue {
    fn from(s: &str) -> Self {
        HostValue::Str(s.to_string())
    }
}
impl From<String> for HostValue {
    fn from(s: String) -> Self {
        HostValue::Str(s)
    }
}
impl From<HostCallable> for HostValue {
    fn from(c: HostCallable) -> Self {
        HostValue::Callable(c)
    }
}

// Anonymous callables have no `name` member.
fn callable_method(callable: &HostCallable, name: &str) -> Option<UnboundMethod> {
    let method = match name {
        "arity" => UnboundMethod::with_receiver("Callable", "arity", Arity::exactly(0), |receiver, _| {
            match receiver {
                HostValue::Callable(c) => Ok(HostValue::Int(c.arity().raw() as i64)),
                other => Err(not_a(other, "Callable")),
            }
        }),
        "name" if callable.name().is_some() => UnboundMethod::with_receiver("Callable", "name", Arity::exactly(0), |receiver, _| {
            match receiver {
                HostValue::Callable(c) => Ok(c.name().map_or(HostValue::Nil, HostValue::from)),
                other => Err(not_a(other, "Callable")),
            }
        }),
        "call" => UnboundMethod::with_receiver("Callable", "call", Arity::at_least(0), |receiver, args| {
            match receiver {
                HostValue::Callable(c) => c.invoke(None, args),
                other => Err(not_a(other, "Callable")),
            }
        }),
        _ => return None,
    };
    Some(method)
}

fn class_method(class: &HostClassRef, name: &str) -> Option<UnboundMethod> {
    match name {
        "name" => Some(UnboundMethod::with_receiver("Class", "name", Arity::exactly(0), |receiver, _| {
            match receiver {
                HostValue::Class(c) => Ok(HostValue::Str(c.name())),
                other => Err(not_a(other, "Class")),
            }
        })),
        // Open arity, so reading `new` never instantiates.
        "new" => Some(UnboundMethod::with_receiver(
            "Class",
            "new",
            Arity::at_least(0),
            |receiver, args| match receiver {
                HostValue::Class(c) => c.instantiate(args),
                other => Err(not_a(other, "Class")),
            },
        )),
        _ => class.static_method(name),
    }
}

fn not_a(value: &HostValue, expected: &str) -> HostError {
    HostError::type_error(format!("{} is not a {}", value.class_name(), expected))
}
