use thiserror::Error;

/// Errors raised while building host values.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelError {
    #[error("cannot create an instance of host type {type_name}: payload is {actual}, expected {expected}")]
    PayloadTypeMismatch {
        type_name: String,
        expected: &'static str,
        actual: &'static str,
    },
}

/// Errors raised while invoking a host method.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvocationError {
    #[error("{method}() expects {expected} argument(s), but was called with {actual}")]
    WrongArity {
        method: String,
        expected: usize,
        actual: usize,
    },
    #[error("{method}() was invoked on an instance of a different host type ({receiver})")]
    ReceiverMismatch { method: String, receiver: String },
    #[error("argument #{index} of {method}() must be {expected}")]
    InvalidArgument {
        method: String,
        index: usize,
        expected: &'static str,
    },
    #[error("{method}() failed: {message}")]
    Failed { method: String, message: String },
}

impl InvocationError {
    /// Failure raised from inside a method body.
    pub fn failed(method: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Failed {
            method: method.into(),
            message: message.into(),
        }
    }
}
