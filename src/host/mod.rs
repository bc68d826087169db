//! The host side of the bridge: values, objects, callables and classes as the
//! embedding Rust program defines them.
//!
//! Host objects describe themselves through a small reflection surface
//! ([`HostObject::members`] and [`HostObject::method`]) which accessor
//! strategies use to answer property lookups.

pub mod callable;
pub mod class;
pub mod error;
pub mod value;

pub use callable::{Arity, BoundMethod, HostCallable, HostFn, UnboundMethod};
pub use class::{ClassDef, HostClass, HostClassRef};
pub use error::{HostError, HostResult};
pub use value::{HostObject, HostObjectRef, HostValue};
