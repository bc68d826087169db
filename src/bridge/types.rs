//! Core types shared by the wrappers.

use std::rc::Rc;
use std::sync::Arc;

use crate::bridge::access::{default_access, AccessorStrategy, AttributeAccess};
use crate::bridge::config::{AccessKind, BridgeConfig};
use crate::bridge::convert::{DefaultConverter, ValueConverter};
use crate::bridge::execution_context::Context;
use crate::engine::error::ScriptError;
use crate::engine::realm::Scope;
use crate::engine::value::ScriptValue;
use crate::host::value::HostValue;

pub type BridgeRef = Rc<Bridge>;

/// The collaborators every wrapper is built with.
///
/// The accessor strategy is fixed when the bridge is built; later changes to
/// the process-wide default do not reach bridges that already exist.
pub struct Bridge {
    config: BridgeConfig,
    access: Arc<dyn AccessorStrategy>,
    converter: Rc<dyn ValueConverter>,
}

impl Bridge {
    pub fn new(config: BridgeConfig) -> Self {
        let access: Arc<dyn AccessorStrategy> = match config.access {
            AccessKind::Default => default_access(),
            AccessKind::Attribute => Arc::new(AttributeAccess),
        };
        Bridge {
            config,
            access,
            converter: Rc::new(DefaultConverter),
        }
    }

    pub fn from_config(config: &BridgeConfig) -> BridgeRef {
        Rc::new(Self::new(config.clone()))
    }

    /// Overrides the strategy chosen by the configuration.
    pub fn with_access(mut self, access: Arc<dyn AccessorStrategy>) -> Self {
        self.access = access;
        self
    }

    pub fn with_converter(mut self, converter: Rc<dyn ValueConverter>) -> Self {
        self.converter = converter;
        self
    }

    pub fn config(&self) -> &BridgeConfig {
        &self.config
    }

    pub fn access(&self) -> &Arc<dyn AccessorStrategy> {
        &self.access
    }

    pub fn converter(&self) -> &Rc<dyn ValueConverter> {
        &self.converter
    }
}

impl Default for Bridge {
    fn default() -> Self {
        Self::new(BridgeConfig::default())
    }
}

/// Where a conversion or property access happens: which bridge, which context
/// (for memoizing the wrappers it produces) and which scope new wrappers join.
#[derive(Clone, Copy)]
pub struct Frame<'a> {
    bridge: &'a BridgeRef,
    context: Option<&'a Context>,
    scope: Option<&'a Scope>,
}

impl<'a> Frame<'a> {
    pub fn new(bridge: &'a BridgeRef, context: Option<&'a Context>, scope: Option<&'a Scope>) -> Self {
        Frame {
            bridge,
            context,
            scope,
        }
    }

    pub fn bridge(&self) -> &'a BridgeRef {
        self.bridge
    }

    pub fn context(&self) -> Option<&'a Context> {
        self.context
    }

    pub fn scope(&self) -> Option<&'a Scope> {
        self.scope
    }

    pub fn to_script(&self, value: HostValue) -> Result<ScriptValue, ScriptError> {
        self.bridge.converter().to_script(value, self)
    }

    pub fn to_host(&self, value: &ScriptValue) -> Result<HostValue, ScriptError> {
        self.bridge.converter().to_host(value)
    }

    pub fn args_to_host(&self, args: &[ScriptValue]) -> Result<Vec<HostValue>, ScriptError> {
        self.bridge.converter().args_to_host(args)
    }
}
