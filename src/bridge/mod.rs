//! The adapter layer between host values and the script engine.
//!
//! ## Wrappers
//!
//! Host values reach script code as one of three wrapper objects, each of
//! which implements the engine's [`Scriptable`](crate::engine::Scriptable)
//! protocol:
//!
//! - **[`ObjectWrapper`]** for host objects,
//! - **[`FunctionWrapper`]** for free functions, bound and unbound methods,
//! - **[`ConstructorWrapper`]** for host classes (`new`, `instanceof`).
//!
//! Property operations on every wrapper go through [`HostProtocol`], which
//! asks the bridge's [`AccessorStrategy`] first and falls back to the
//! wrapper's own ordinary-object storage.
//!
//! ## Identity
//!
//! Wrappers are memoized per [`Context`]:
//!
//! ```text
//! wrap(value) in ctx A ─┬─ first time  → build, store under IdentityKey
//!                       └─ afterwards  → the stored wrapper (a === a)
//! wrap(value) in ctx B ─── a different wrapper
//! no context           ─── a fresh wrapper every time
//! ```
//!
//! ## Errors
//!
//! A host failure raised during a call or a member read is wrapped by
//! [`wrap_error`] into a [`WrappedError`] and thrown as a script exception,
//! which script `try/catch` traps like any other.

pub mod access;
pub mod cache;
pub mod config;
pub mod constructor;
pub mod convert;
pub mod error;
pub mod execution_context;
pub mod function;
pub mod object;
pub mod protocol;
pub mod types;

pub use access::{default_access, set_default_access, AccessorStrategy, AttributeAccess, DefaultAccess};
pub use cache::{IdentityCache, IdentityKey};
pub use config::{AccessKind, BridgeConfig, ConfigError, IdOrder};
pub use constructor::ConstructorWrapper;
pub use convert::{DefaultConverter, ValueConverter};
pub use error::{wrap_error, WrappedError};
pub use execution_context::{Context, ContextStack, WeakContext};
pub use function::{reconcile_args, FunctionWrapper};
pub use object::ObjectWrapper;
pub use protocol::HostProtocol;
pub use types::{Bridge, BridgeRef, Frame};
