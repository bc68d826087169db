//! The slice of the script engine the bridge plugs into.
//!
//! This is the object protocol ([`object::Scriptable`]) together with the pieces
//! a wrapper touches while serving it: values, property keys, the ordinary
//! object used as the default-protocol fallback, scopes and the operators that
//! drive the protocol. Parsing and evaluation live elsewhere.

pub mod error;
pub mod object;
pub mod object_property;
pub mod operations;
pub mod realm;
pub mod value;

pub use error::ScriptError;
pub use object::{NativeObject, ObjectBase, ScriptObjectRef, Scriptable};
pub use object_property::PropertyKey;
pub use realm::Scope;
pub use value::{ScriptNumber, ScriptValue};
