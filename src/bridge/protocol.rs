//! Object-protocol behavior shared by every wrapper kind.

use std::sync::Arc;

use crate::bridge::access::{AccessorStrategy, GetFallback};
use crate::bridge::config::IdOrder;
use crate::bridge::execution_context::{Context, WeakContext};
use crate::bridge::types::{BridgeRef, Frame};
use crate::engine::error::ScriptError;
use crate::engine::object::{ObjectBase, ScriptObjectRef, Scriptable};
use crate::engine::object_property::PropertyKey;
use crate::engine::realm::Scope;
use crate::engine::value::ScriptValue;
use crate::host::value::HostValue;

/// Routes `get`/`has`/`put` for one wrapped host value through the accessor
/// strategy, with the wrapper's own ordinary-object storage as the fallback.
pub struct HostProtocol {
    host: HostValue,
    bridge: BridgeRef,
    access: Arc<dyn AccessorStrategy>,
    context: Option<WeakContext>,
    scope: Option<Scope>,
    native: ObjectBase,
}
impl HostProtocol {
    pub fn new(bridge: &BridgeRef, host: HostValue, context: Option<&Context>, scope: Option<&Scope>) -> Self {
        HostProtocol {
            host,
            bridge: bridge.clone(),
            access: bridge.access().clone(),
            context: context.map(Context::downgrade),
            scope: scope.cloned(),
            native: ObjectBase::new(),
        }
    }

    pub fn host(&self) -> &HostValue {
        &self.host
    }

    pub fn bridge(&self) -> &BridgeRef {
        &self.bridge
    }

    pub fn scope(&self) -> Option<&Scope> {
        self.scope.as_ref()
    }

    pub fn native(&self) -> &ObjectBase {
        &self.native
    }

    /// Runs `f` in the frame this wrapper was created in. Values produced by
    /// property reads are memoized in the creating context while it is alive.
    fn with_frame<R>(&self, f: impl FnOnce(&Frame) -> R) -> R {
        let context = self.context.as_ref().and_then(WeakContext::upgrade);
        let frame = Frame::new(&self.bridge, context.as_ref(), self.scope.as_ref());
        f(&frame)
    }

    pub fn get(
        &self,
        receiver: &dyn Scriptable,
        key: &PropertyKey,
        start: &ScriptValue,
    ) -> Result<Option<ScriptValue>, ScriptError> {
        self.get_with(receiver, key, &mut || self.native.get(key, start))
    }

    /// [`HostProtocol::get`] with a caller-supplied fallback, for wrappers that
    /// answer some keys natively before the ordinary lookup.
    pub fn get_with(
        &self,
        receiver: &dyn Scriptable,
        key: &PropertyKey,
        fallback: &mut GetFallback,
    ) -> Result<Option<ScriptValue>, ScriptError> {
        self.with_frame(|frame| self.access.get(&self.host, key, receiver, frame, fallback))
    }

    pub fn has(&self, receiver: &dyn Scriptable, key: &PropertyKey, start: &ScriptValue) -> Result<bool, ScriptError> {
        self.with_frame(|frame| {
            self.access
                .has(&self.host, key, receiver, frame, &mut || self.native.has(key, start))
        })
    }

    pub fn put(&self, receiver: &dyn Scriptable, key: PropertyKey, value: ScriptValue) -> Result<(), ScriptError> {
        self.with_frame(|frame| {
            self.access.put(&self.host, &key, value, receiver, frame, &mut |value| {
                self.native.put(key.clone(), value)
            })
        })
    }

    /// Host member names with writers folded into their readers, after the
    /// wrapper's own ids.
    pub fn get_ids(&self) -> Vec<PropertyKey> {
        let mut ids: Vec<PropertyKey> = Vec::new();
        for member in self.host.members() {
            let name = member.strip_suffix('=').unwrap_or(&member);
            let id = PropertyKey::from(name);
            if !ids.contains(&id) {
                ids.push(id);
            }
        }
        let own = self.native.own_property_keys();
        match self.bridge.config().id_order {
            IdOrder::Compat => {
                for id in own {
                    ids.insert(0, id);
                }
            }
            IdOrder::Source => {
                ids.splice(0..0, own);
            }
        }
        ids
    }

    pub fn get_prototype_of(&self) -> Option<ScriptObjectRef> {
        self.native.get_prototype_of()
    }

    pub fn set_prototype(&self, owner: &dyn Scriptable, prototype: Option<ScriptObjectRef>) -> bool {
        self.native.set_prototype(owner, prototype)
    }
}
