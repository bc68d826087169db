//! Accessor strategies: how property reads, writes and existence checks on a
//! wrapped host value map onto the host's members.
//!
//! Every operation receives a fallback that runs the engine's ordinary object
//! behavior on the wrapper itself. A strategy calls it whenever the host value
//! has nothing to say about the key.

use std::mem;
use std::sync::{Arc, PoisonError, RwLock};

use tracing::{debug, trace};

use crate::bridge::error::wrap_error;
use crate::bridge::function::FunctionWrapper;
use crate::bridge::types::Frame;
use crate::engine::error::ScriptError;
use crate::engine::object::{ScriptObjectRef, Scriptable};
use crate::engine::object_property::PropertyKey;
use crate::engine::value::ScriptValue;
use crate::host::callable::{Arity, BoundMethod, HostCallable};
use crate::host::value::HostValue;

pub type GetFallback<'f> = dyn FnMut() -> Result<Option<ScriptValue>, ScriptError> + 'f;
pub type HasFallback<'f> = dyn FnMut() -> Result<bool, ScriptError> + 'f;
pub type PutFallback<'f> = dyn FnMut(ScriptValue) -> Result<(), ScriptError> + 'f;

const INDEX_READER: &str = "[]";
const INDEX_WRITER: &str = "[]=";

/// Answers property operations for host values.
///
/// `receiver` is the wrapper the operation was issued against.
pub trait AccessorStrategy: Send + Sync {
    fn get(
        &self,
        host: &HostValue,
        key: &PropertyKey,
        receiver: &dyn Scriptable,
        frame: &Frame,
        fallback: &mut GetFallback,
    ) -> Result<Option<ScriptValue>, ScriptError>;

    fn has(
        &self,
        host: &HostValue,
        key: &PropertyKey,
        receiver: &dyn Scriptable,
        frame: &Frame,
        fallback: &mut HasFallback,
    ) -> Result<bool, ScriptError>;

    fn put(
        &self,
        host: &HostValue,
        key: &PropertyKey,
        value: ScriptValue,
        receiver: &dyn Scriptable,
        frame: &Frame,
        fallback: &mut PutFallback,
    ) -> Result<(), ScriptError>;

    /// Human-readable name for this strategy (for logging).
    fn name(&self) -> &str;
}

lazy_static! {
    static ref DEFAULT_ACCESS: RwLock<Arc<dyn AccessorStrategy>> = RwLock::new(Arc::new(DefaultAccess));
}

/// The strategy bridges are built with unless told otherwise.
pub fn default_access() -> Arc<dyn AccessorStrategy> {
    DEFAULT_ACCESS
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .clone()
}

/// Replaces the process-wide default and returns the previous one.
///
/// Bridges already built keep the strategy they were built with.
pub fn set_default_access(access: Arc<dyn AccessorStrategy>) -> Arc<dyn AccessorStrategy> {
    let mut slot = DEFAULT_ACCESS.write().unwrap_or_else(PoisonError::into_inner);
    debug!(previous = slot.name(), next = access.name(), "default accessor replaced");
    mem::replace(&mut *slot, access)
}

fn key_to_host(key: &PropertyKey) -> HostValue {
    match key {
        PropertyKey::Str(s) => HostValue::Str(s.to_string()),
        PropertyKey::Int(i) => HostValue::Int(*i as i64),
    }
}

fn method_with_arity(host: &HostValue, name: &str, arity: usize) -> Option<BoundMethod> {
    host.method(name).filter(|m| m.arity() == Arity::exactly(arity))
}

fn setter_name(name: &str) -> String {
    format!("{}=", name)
}

// Index access through `[]` and `[]=`, shared by both strategies. Internal
// `__name__` keys never reach the host.

fn index_get(
    host: &HostValue,
    key: &PropertyKey,
    frame: &Frame,
    fallback: &mut GetFallback,
) -> Result<Option<ScriptValue>, ScriptError> {
    if !key.is_internal() {
        if let Some(reader) = method_with_arity(host, INDEX_READER, 1) {
            let value = reader.call(vec![key_to_host(key)]).map_err(wrap_error)?;
            if !value.is_nil() {
                return frame.to_script(value).map(Some);
            }
        }
    }
    fallback()
}

fn index_has(host: &HostValue, key: &PropertyKey, fallback: &mut HasFallback) -> Result<bool, ScriptError> {
    if !key.is_internal() {
        if let Some(reader) = method_with_arity(host, INDEX_READER, 1) {
            let value = reader.call(vec![key_to_host(key)]).map_err(wrap_error)?;
            if !value.is_nil() {
                return Ok(true);
            }
        }
    }
    fallback()
}

fn index_put(
    host: &HostValue,
    key: &PropertyKey,
    value: ScriptValue,
    frame: &Frame,
    fallback: &mut PutFallback,
) -> Result<(), ScriptError> {
    if !key.is_internal() {
        if let Some(writer) = method_with_arity(host, INDEX_WRITER, 2) {
            let host_value = frame.to_host(&value)?;
            writer
                .call(vec![key_to_host(key), host_value])
                .map_err(wrap_error)?;
            return Ok(());
        }
    }
    fallback(value)
}

fn wrap_method(method: BoundMethod, receiver: &dyn Scriptable, frame: &Frame) -> ScriptValue {
    trace!(receiver = %receiver.class_name(), member = method.name(), "member read as function");
    let wrapper = FunctionWrapper::wrap(
        frame.bridge(),
        frame.context(),
        HostCallable::Unbound(method.unbind()),
        frame.scope(),
    );
    ScriptValue::Object(wrapper as ScriptObjectRef)
}

/// Named reads shared by both strategies; `as_property` decides which
/// zero-arity readers are invoked instead of being handed out as functions.
fn named_get<P>(
    host: &HostValue,
    key: &PropertyKey,
    receiver: &dyn Scriptable,
    frame: &Frame,
    fallback: &mut GetFallback,
    as_property: P,
) -> Result<Option<ScriptValue>, ScriptError>
where
    P: Fn(&HostValue, &str) -> bool,
{
    let name = match key {
        PropertyKey::Str(name) if !key.is_internal() => name,
        _ => return index_get(host, key, frame, fallback),
    };
    if let Some(method) = host.method(name) {
        if method.arity() == Arity::exactly(0) && as_property(host, name) {
            let value = method.call(vec![]).map_err(wrap_error)?;
            return frame.to_script(value).map(Some);
        }
        return Ok(Some(wrap_method(method, receiver, frame)));
    }
    if host.responds_to(&setter_name(name)) {
        // Write-only property.
        return Ok(Some(ScriptValue::Null));
    }
    index_get(host, key, frame, fallback)
}

fn named_has(host: &HostValue, key: &PropertyKey, fallback: &mut HasFallback) -> Result<bool, ScriptError> {
    if let PropertyKey::Str(name) = key {
        if !key.is_internal() && (host.responds_to(name) || host.responds_to(&setter_name(name))) {
            return Ok(true);
        }
    }
    index_has(host, key, fallback)
}

fn named_put(
    host: &HostValue,
    key: &PropertyKey,
    value: ScriptValue,
    frame: &Frame,
    fallback: &mut PutFallback,
) -> Result<(), ScriptError> {
    if let PropertyKey::Str(name) = key {
        if !key.is_internal() {
            if let Some(setter) = host.method(&setter_name(name)) {
                let host_value = frame.to_host(&value)?;
                setter.call(vec![host_value]).map_err(wrap_error)?;
                return Ok(());
            }
        }
    }
    index_put(host, key, value, frame, fallback)
}

/// Every zero-arity member reads as a property; other members read as
/// functions. Writes go to a `name=` writer when the host has one.
pub struct DefaultAccess;
impl AccessorStrategy for DefaultAccess {
    fn get(
        &self,
        host: &HostValue,
        key: &PropertyKey,
        receiver: &dyn Scriptable,
        frame: &Frame,
        fallback: &mut GetFallback,
    ) -> Result<Option<ScriptValue>, ScriptError> {
        named_get(host, key, receiver, frame, fallback, |_, _| true)
    }

    fn has(
        &self,
        host: &HostValue,
        key: &PropertyKey,
        _receiver: &dyn Scriptable,
        _frame: &Frame,
        fallback: &mut HasFallback,
    ) -> Result<bool, ScriptError> {
        named_has(host, key, fallback)
    }

    fn put(
        &self,
        host: &HostValue,
        key: &PropertyKey,
        value: ScriptValue,
        _receiver: &dyn Scriptable,
        frame: &Frame,
        fallback: &mut PutFallback,
    ) -> Result<(), ScriptError> {
        named_put(host, key, value, frame, fallback)
    }

    fn name(&self) -> &str {
        "default"
    }
}

/// Like [`DefaultAccess`], except a zero-arity member reads as a property only
/// when it looks like an attribute: it has a writer or is backed by a field.
/// Any other member reads as a function.
pub struct AttributeAccess;
impl AccessorStrategy for AttributeAccess {
    fn get(
        &self,
        host: &HostValue,
        key: &PropertyKey,
        receiver: &dyn Scriptable,
        frame: &Frame,
        fallback: &mut GetFallback,
    ) -> Result<Option<ScriptValue>, ScriptError> {
        named_get(host, key, receiver, frame, fallback, |host, name| {
            host.responds_to(&setter_name(name)) || host.has_field(name)
        })
    }

    fn has(
        &self,
        host: &HostValue,
        key: &PropertyKey,
        _receiver: &dyn Scriptable,
        _frame: &Frame,
        fallback: &mut HasFallback,
    ) -> Result<bool, ScriptError> {
        named_has(host, key, fallback)
    }

    fn put(
        &self,
        host: &HostValue,
        key: &PropertyKey,
        value: ScriptValue,
        _receiver: &dyn Scriptable,
        frame: &Frame,
        fallback: &mut PutFallback,
    ) -> Result<(), ScriptError> {
        named_put(host, key, value, frame, fallback)
    }

    fn name(&self) -> &str {
        "attribute"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_keys_reach_host_unchanged() {
        assert_eq!(key_to_host(&PropertyKey::Int(3)), HostValue::Int(3));
        assert_eq!(key_to_host(&"k".into()), HostValue::from("k"));
    }

    #[test]
    fn test_setter_name() {
        assert_eq!(setter_name("x"), "x=");
    }

    #[test]
    fn test_strategy_names() {
        assert_eq!(DefaultAccess.name(), "default");
        assert_eq!(AttributeAccess.name(), "attribute");
    }

    #[test]
    fn test_index_reader_needs_exact_arity() {
        let callable = HostValue::Callable(HostCallable::Free(crate::host::callable::HostFn::named(
            "noop",
            Arity::exactly(0),
            |_| Ok(HostValue::Nil),
        )));
        assert!(method_with_arity(&callable, "arity", 0).is_some());
        assert!(method_with_arity(&callable, "arity", 1).is_none());
        assert!(method_with_arity(&callable, INDEX_READER, 1).is_none());
    }
}
