use std::any::Any;
use std::cell::RefCell;
use std::fmt;
use std::fmt::Formatter;
use std::rc::{Rc, Weak};

use tracing::{debug, trace};
use uuid::Uuid;

use crate::bridge::cache::{IdentityCache, IdentityKey};
use crate::bridge::types::{BridgeRef, Frame};
use crate::engine::error::ScriptError;
use crate::engine::realm::Scope;
use crate::engine::value::ScriptValue;
use crate::host::value::HostValue;

struct ContextInner {
    id: Uuid,
    bridge: BridgeRef,
    cache: RefCell<IdentityCache>,
}

/// One script execution session and the wrapper cache scoped to it.
///
/// Cloning yields another handle to the same session. Dropping the last handle
/// discards the cache and every wrapper only it was keeping alive.
#[derive(Clone)]
pub struct Context {
    inner: Rc<ContextInner>,
}
impl Context {
    pub fn new(bridge: BridgeRef) -> Self {
        let id = Uuid::new_v4();
        debug!(context = %id, "execution context created");
        Context {
            inner: Rc::new(ContextInner {
                id,
                bridge,
                cache: RefCell::new(IdentityCache::new()),
            }),
        }
    }

    pub fn id(&self) -> Uuid {
        self.inner.id
    }

    pub fn bridge(&self) -> &BridgeRef {
        &self.inner.bridge
    }

    /// Memoized construction; see [`crate::bridge::cache::cache`].
    pub fn cache<T, F>(&self, key: IdentityKey, constructor: F) -> Rc<T>
    where
        T: Any,
        F: FnOnce() -> Rc<T>,
    {
        let hit = self.inner.cache.borrow().get(&key);
        if let Some(entry) = hit {
            if let Ok(wrapper) = entry.downcast::<T>() {
                trace!(context = %self.inner.id, key = %key, "identity cache hit");
                return wrapper;
            }
        }
        trace!(context = %self.inner.id, key = %key, "identity cache miss");
        let wrapper = constructor();
        self.inner
            .cache
            .borrow_mut()
            .insert(key, wrapper.clone() as Rc<dyn Any>);
        wrapper
    }

    pub fn cached_len(&self) -> usize {
        self.inner.cache.borrow().len()
    }

    /// Converts a host value for script code running in this context.
    pub fn wrap(&self, value: HostValue, scope: Option<&Scope>) -> Result<ScriptValue, ScriptError> {
        let frame = Frame::new(&self.inner.bridge, Some(self), scope);
        self.inner.bridge.converter().to_script(value, &frame)
    }

    pub fn downgrade(&self) -> WeakContext {
        WeakContext {
            inner: Rc::downgrade(&self.inner),
        }
    }

    pub fn ptr_eq(&self, other: &Context) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}
impl fmt::Debug for Context {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "Context({})", self.inner.id)
    }
}

/// Handle a wrapper keeps to the context that built it.
#[derive(Clone)]
pub struct WeakContext {
    inner: Weak<ContextInner>,
}
impl WeakContext {
    pub fn upgrade(&self) -> Option<Context> {
        self.inner.upgrade().map(|inner| Context { inner })
    }
}

/// Stack of running contexts for engines that nest sessions.
pub struct ContextStack {
    stack: Vec<Context>,
}
impl ContextStack {
    pub fn new() -> Self {
        ContextStack { stack: Vec::new() }
    }

    /// The running context, if any.
    pub fn current(&self) -> Option<&Context> {
        self.stack.last()
    }

    pub fn push_execution_ctx(&mut self, ctx: Context) {
        self.stack.push(ctx)
    }

    pub fn pop_running_execution_ctx(&mut self) -> Option<Context> {
        self.stack.pop()
    }

    pub fn depth(&self) -> usize {
        self.stack.len()
    }
}
impl Default for ContextStack {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bridge::types::Bridge;

    #[test]
    fn test_stack_tracks_running_context() {
        let bridge = Rc::new(Bridge::default());
        let mut stack = ContextStack::new();
        assert!(stack.current().is_none());
        let outer = Context::new(bridge.clone());
        let inner = Context::new(bridge);
        stack.push_execution_ctx(outer.clone());
        stack.push_execution_ctx(inner.clone());
        assert!(stack.current().unwrap().ptr_eq(&inner));
        assert!(stack.pop_running_execution_ctx().unwrap().ptr_eq(&inner));
        assert!(stack.current().unwrap().ptr_eq(&outer));
        assert_eq!(stack.depth(), 1);
    }

    #[test]
    fn test_weak_handle_dies_with_context() {
        let ctx = Context::new(Rc::new(Bridge::default()));
        let weak = ctx.downgrade();
        assert!(weak.upgrade().unwrap().ptr_eq(&ctx));
        drop(ctx);
        assert!(weak.upgrade().is_none());
    }

    #[test]
    fn test_contexts_have_distinct_ids() {
        let bridge = Rc::new(Bridge::default());
        assert_ne!(Context::new(bridge.clone()).id(), Context::new(bridge).id());
    }
}
