use thiserror::Error;

use crate::host::value::HostValue;

pub type HostResult = Result<HostValue, HostError>;

/// An exception raised on the host side of the bridge.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{class}: {message}")]
pub struct HostError {
    class: String,
    message: String,
}
impl HostError {
    pub fn new(class: impl Into<String>, message: impl Into<String>) -> Self {
        HostError {
            class: class.into(),
            message: message.into(),
        }
    }

    pub fn runtime(message: impl Into<String>) -> Self {
        Self::new("RuntimeError", message)
    }

    pub fn argument(message: impl Into<String>) -> Self {
        Self::new("ArgumentError", message)
    }

    pub fn type_error(message: impl Into<String>) -> Self {
        Self::new("TypeError", message)
    }

    pub fn class(&self) -> &str {
        &self.class
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}
