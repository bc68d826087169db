//! # just-bridge - host objects inside an embedded script engine
//!
//! Exposes Rust values to script code as first-class engine objects:
//! - property reads and writes on host objects
//! - calls into host functions and methods, with argument-count reconciliation
//! - `new` and `instanceof` against host classes
//! - host errors that script `try/catch` can trap
//!
//! The script engine never sees a host type directly; it only talks to
//! wrappers implementing its object protocol.
//!
//! ## Quick Start
//!
//! ```
//! use std::any::Any;
//! use std::rc::Rc;
//! use just_bridge::bridge::{Bridge, Context};
//! use just_bridge::engine::operations::{call_method, get_value};
//! use just_bridge::engine::{Scope, ScriptValue};
//! use just_bridge::host::{Arity, HostObject, HostValue, UnboundMethod};
//!
//! struct Greeter {
//!     name: String,
//! }
//!
//! impl HostObject for Greeter {
//!     fn as_any(&self) -> &dyn Any {
//!         self
//!     }
//!
//!     fn members(&self) -> Vec<String> {
//!         vec!["name".to_string(), "greet".to_string()]
//!     }
//!
//!     fn method(&self, name: &str) -> Option<UnboundMethod> {
//!         match name {
//!             "name" => Some(UnboundMethod::new("Greeter", "name", Arity::exactly(0), |g: &Greeter, _| {
//!                 Ok(HostValue::from(g.name.clone()))
//!             })),
//!             "greet" => Some(UnboundMethod::new("Greeter", "greet", Arity::exactly(1), |g: &Greeter, args| {
//!                 let whom = match args.into_iter().next() {
//!                     Some(HostValue::Str(s)) => s,
//!                     _ => "stranger".to_string(),
//!                 };
//!                 Ok(HostValue::from(format!("{} greets {}", g.name, whom)))
//!             })),
//!             _ => None,
//!         }
//!     }
//! }
//!
//! let ctx = Context::new(Rc::new(Bridge::default()));
//! let scope = Scope::new();
//! let greeter = HostValue::object(Greeter { name: "Ada".to_string() });
//! let greeter = ctx.wrap(greeter, Some(&scope)).unwrap();
//!
//! // Zero-arity members read as properties.
//! assert_eq!(get_value(&greeter, &"name".into()).unwrap(), ScriptValue::from("Ada"));
//!
//! // Other members read as functions; `this` becomes the receiver.
//! let reply = call_method(&greeter, "greet", Some(&ctx), Some(&scope), vec![ScriptValue::from("Bob")]).unwrap();
//! assert_eq!(reply, ScriptValue::from("Ada greets Bob"));
//! ```
//!
//! ## Configuration
//!
//! ```
//! use just_bridge::bridge::{AccessKind, Bridge, BridgeConfig};
//!
//! let config = BridgeConfig::parse("[bridge]\ntag = \"host\"\naccess = \"attribute\"\n").unwrap();
//! assert_eq!(config.access, AccessKind::Attribute);
//! let bridge = Bridge::from_config(&config);
//! assert_eq!(bridge.access().name(), "attribute");
//! ```
//!
//! ## Architecture
//!
//! - **[`engine`]** - The slice of the script engine the bridge plugs into
//! - **[`host`]** - Host values, objects, callables, classes and errors
//! - **[`bridge`]** - Wrappers, accessor strategies, conversion, identity cache

#[macro_use]
extern crate lazy_static;

pub mod bridge;
pub mod engine;
pub mod host;
