//! Identity-preserving wrapper cache.
//!
//! Each execution context owns one [`IdentityCache`] so that wrapping the same
//! host value twice in a context yields the same wrapper object, which script
//! code can observe with `===`.

use std::any::Any;
use std::collections::HashMap;
use std::fmt;
use std::fmt::{Display, Formatter};
use std::rc::Rc;

use tracing::trace;

use crate::bridge::execution_context::Context;
use crate::host::{HostCallable, HostClassRef, HostObjectRef};

/// What a host value is cached under.
///
/// Objects and classes are keyed by address. The cached wrapper holds the value
/// alive, so an address cannot be reused while its entry exists. Callables are
/// keyed by their rendering, which treats equal renderings as the same callable.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum IdentityKey {
    Object(usize),
    Class(usize),
    Callable(String),
}
impl IdentityKey {
    pub fn of_object(object: &HostObjectRef) -> Self {
        IdentityKey::Object(Rc::as_ptr(object) as *const () as usize)
    }

    pub fn of_class(class: &HostClassRef) -> Self {
        IdentityKey::Class(Rc::as_ptr(class) as *const () as usize)
    }

    pub fn of_callable(callable: &HostCallable) -> Self {
        IdentityKey::Callable(callable.to_string())
    }
}
impl Display for IdentityKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            IdentityKey::Object(addr) => write!(f, "object@{:#x}", addr),
            IdentityKey::Class(addr) => write!(f, "class@{:#x}", addr),
            IdentityKey::Callable(repr) => write!(f, "callable {}", repr),
        }
    }
}

#[derive(Default)]
pub struct IdentityCache {
    entries: HashMap<IdentityKey, Rc<dyn Any>>,
}
impl IdentityCache {
    pub fn new() -> Self {
        IdentityCache {
            entries: HashMap::new(),
        }
    }

    pub fn get(&self, key: &IdentityKey) -> Option<Rc<dyn Any>> {
        self.entries.get(key).cloned()
    }

    pub fn insert(&mut self, key: IdentityKey, wrapper: Rc<dyn Any>) {
        self.entries.insert(key, wrapper);
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }
}

/// Returns the wrapper cached under `key` in `context`, building it on a miss.
///
/// Without a context nothing is memoized and every call builds a fresh wrapper.
pub fn cache<T, F>(context: Option<&Context>, key: IdentityKey, constructor: F) -> Rc<T>
where
    T: Any,
    F: FnOnce() -> Rc<T>,
{
    match context {
        Some(ctx) => ctx.cache(key, constructor),
        None => {
            trace!(key = %key, "no active context, wrapper not memoized");
            constructor()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bridge::types::Bridge;
    use std::cell::Cell;

    #[test]
    fn test_hit_skips_constructor() {
        let ctx = Context::new(Rc::new(Bridge::default()));
        let built = Cell::new(0);
        let key = IdentityKey::Callable("fn probe".to_string());
        let a = cache(Some(&ctx), key.clone(), || {
            built.set(built.get() + 1);
            Rc::new(String::from("wrapper"))
        });
        let b = cache(Some(&ctx), key, || {
            built.set(built.get() + 1);
            Rc::new(String::from("other"))
        });
        assert!(Rc::ptr_eq(&a, &b));
        assert_eq!(built.get(), 1);
        assert_eq!(ctx.cached_len(), 1);
    }

    #[test]
    fn test_without_context_always_constructs() {
        let built = Cell::new(0);
        let key = IdentityKey::Object(0x10);
        let a = cache(None, key.clone(), || {
            built.set(built.get() + 1);
            Rc::new(1u8)
        });
        let b = cache(None, key, || {
            built.set(built.get() + 1);
            Rc::new(1u8)
        });
        assert!(!Rc::ptr_eq(&a, &b));
        assert_eq!(built.get(), 2);
    }

    #[test]
    fn test_key_kinds_do_not_collide() {
        let mut cache = IdentityCache::new();
        cache.insert(IdentityKey::Object(8), Rc::new(1u8));
        assert!(cache.get(&IdentityKey::Object(8)).is_some());
        assert!(cache.get(&IdentityKey::Class(8)).is_none());
        assert_eq!(cache.len(), 1);
    }
}
