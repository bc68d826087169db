use std::convert::TryFrom;
use std::fmt;
use std::fmt::{Display, Formatter};
use std::rc::Rc;

use crate::host::error::{HostError, HostResult};
use crate::host::value::{HostObject, HostValue};

/// Declared parameter shape of a callable.
///
/// A non-negative raw value `a` means exactly `a` required parameters. A negative
/// one means `|a| - 1` required parameters followed by an unlimited tail, so `-1`
/// accepts anything and `-3` wants at least two.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Arity(i32);
impl Arity {
    pub fn from_raw(raw: i32) -> Self {
        Arity(raw)
    }

    /// Counts beyond `i32::MAX` saturate.
    pub fn exactly(required: usize) -> Self {
        Arity(saturated(required))
    }

    pub fn at_least(required: usize) -> Self {
        Arity(-saturated(required) - 1)
    }

    pub fn raw(self) -> i32 {
        self.0
    }

    pub fn is_variadic(self) -> bool {
        self.0 < 0
    }

    /// Count of strictly required parameters, which is also the reported `length`.
    pub fn required(self) -> usize {
        if self.0 < 0 {
            (self.0 + 1).abs() as usize
        } else {
            self.0 as usize
        }
    }
}

fn saturated(count: usize) -> i32 {
    i32::try_from(count).unwrap_or(i32::MAX)
}

type FnBody = dyn Fn(Vec<HostValue>) -> HostResult;
type MethodBody = dyn Fn(&HostValue, Vec<HostValue>) -> HostResult;

fn same_body<T: ?Sized>(a: &Rc<T>, b: &Rc<T>) -> bool {
    Rc::as_ptr(a) as *const () == Rc::as_ptr(b) as *const ()
}

/// A free function or closure.
#[derive(Clone)]
pub struct HostFn {
    name: Option<String>,
    arity: Arity,
    body: Rc<FnBody>,
}
impl HostFn {
    pub fn new<F>(arity: Arity, f: F) -> Self
    where
        F: Fn(Vec<HostValue>) -> HostResult + 'static,
    {
        HostFn {
            name: None,
            arity,
            body: Rc::new(f),
        }
    }

    pub fn named<F>(name: impl Into<String>, arity: Arity, f: F) -> Self
    where
        F: Fn(Vec<HostValue>) -> HostResult + 'static,
    {
        HostFn {
            name: Some(name.into()),
            arity,
            body: Rc::new(f),
        }
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn arity(&self) -> Arity {
        self.arity
    }

    pub fn call(&self, args: Vec<HostValue>) -> HostResult {
        (self.body)(args)
    }
}
impl Display for HostFn {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match &self.name {
            Some(name) => write!(f, "fn {}", name),
            None => write!(f, "closure@{:#x}", Rc::as_ptr(&self.body) as *const () as usize),
        }
    }
}

/// A method detached from any receiver. It must be bound before it can run.
#[derive(Clone)]
pub struct UnboundMethod {
    owner: String,
    name: String,
    arity: Arity,
    body: Rc<MethodBody>,
}
impl UnboundMethod {
    /// A method of host type `T`; binding it to anything but a `T` fails at call time.
    pub fn new<T, F>(owner: impl Into<String>, name: impl Into<String>, arity: Arity, f: F) -> Self
    where
        T: HostObject,
        F: Fn(&T, Vec<HostValue>) -> HostResult + 'static,
    {
        let owner = owner.into();
        let expected = owner.clone();
        Self::with_receiver(owner, name, arity, move |receiver, args| {
            let object = match receiver {
                HostValue::Object(o) => o.as_any().downcast_ref::<T>(),
                _ => None,
            };
            match object {
                Some(object) => f(object, args),
                None => Err(HostError::type_error(format!(
                    "bind argument must be an instance of {}, got {}",
                    expected,
                    receiver.class_name()
                ))),
            }
        })
    }

    pub fn with_receiver<F>(owner: impl Into<String>, name: impl Into<String>, arity: Arity, f: F) -> Self
    where
        F: Fn(&HostValue, Vec<HostValue>) -> HostResult + 'static,
    {
        UnboundMethod {
            owner: owner.into(),
            name: name.into(),
            arity,
            body: Rc::new(f),
        }
    }

    pub fn owner(&self) -> &str {
        &self.owner
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn arity(&self) -> Arity {
        self.arity
    }

    pub fn bind(&self, receiver: HostValue) -> BoundMethod {
        BoundMethod {
            receiver: Box::new(receiver),
            method: self.clone(),
        }
    }
}
impl Display for UnboundMethod {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "fn {}::{}", self.owner, self.name)
    }
}

/// A method together with the receiver it runs against.
#[derive(Clone)]
pub struct BoundMethod {
    receiver: Box<HostValue>,
    method: UnboundMethod,
}
impl BoundMethod {
    pub fn receiver(&self) -> &HostValue {
        &self.receiver
    }

    pub fn unbind(&self) -> UnboundMethod {
        self.method.clone()
    }

    pub fn name(&self) -> &str {
        self.method.name()
    }

    pub fn arity(&self) -> Arity {
        self.method.arity
    }

    pub fn call(&self, args: Vec<HostValue>) -> HostResult {
        (self.method.body)(&*self.receiver, args)
    }
}
/// The receiver is not part of the rendering.
impl Display for BoundMethod {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "fn {}::{} (bound)", self.method.owner, self.method.name)
    }
}

/// Every kind of host callable the bridge can wrap.
#[derive(Clone)]
pub enum HostCallable {
    Free(HostFn),
    Bound(BoundMethod),
    Unbound(UnboundMethod),
}
impl HostCallable {
    pub fn arity(&self) -> Arity {
        match self {
            HostCallable::Free(f) => f.arity(),
            HostCallable::Bound(m) => m.arity(),
            HostCallable::Unbound(m) => m.arity(),
        }
    }

    pub fn name(&self) -> Option<&str> {
        match self {
            HostCallable::Free(f) => f.name(),
            HostCallable::Bound(m) => Some(m.name()),
            HostCallable::Unbound(m) => Some(m.name()),
        }
    }

    pub fn is_unbound(&self) -> bool {
        match self {
            HostCallable::Unbound(_) => true,
            _ => false,
        }
    }

    /// Runs the callable. `receiver` is consulted only by unbound methods.
    pub fn invoke(&self, receiver: Option<HostValue>, args: Vec<HostValue>) -> HostResult {
        match self {
            HostCallable::Free(f) => f.call(args),
            HostCallable::Bound(m) => m.call(args),
            HostCallable::Unbound(m) => match receiver {
                Some(receiver) => m.bind(receiver).call(args),
                None => Err(HostError::argument(format!(
                    "unbound method {} called without a receiver",
                    m
                ))),
            },
        }
    }

    /// Same underlying body (and, for bound methods, the same receiver).
    pub fn ptr_eq(&self, other: &HostCallable) -> bool {
        match (self, other) {
            (HostCallable::Free(a), HostCallable::Free(b)) => same_body(&a.body, &b.body),
            (HostCallable::Bound(a), HostCallable::Bound(b)) => {
                same_body(&a.method.body, &b.method.body) && a.receiver.identical(&b.receiver)
            }
            (HostCallable::Unbound(a), HostCallable::Unbound(b)) => same_body(&a.body, &b.body),
            _ => false,
        }
    }
}
impl Display for HostCallable {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            HostCallable::Free(c) => write!(f, "{}", c),
            HostCallable::Bound(c) => write!(f, "{}", c),
            HostCallable::Unbound(c) => write!(f, "{}", c),
        }
    }
}
impl From<HostFn> for HostCallable {
    fn from(f: HostFn) -> Self {
        HostCallable::Free(f)
    }
}
impl From<BoundMethod> for HostCallable {
    fn from(m: BoundMethod) -> Self {
        HostCallable::Bound(m)
    }
}
impl From<UnboundMethod> for HostCallable {
    fn from(m: UnboundMethod) -> Self {
        HostCallable::Unbound(m)
    }
}
