//! Bridge error types.

use thiserror::Error;

/// Errors produced while reaching a delegate in the embedded interpreter.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BridgeError {
    /// The interpreter could not be started or configured.
    #[error("interpreter initialization failed: {0}")]
    InitFailed(String),

    /// The interpreter was torn down by an explicit shutdown.
    #[error("interpreter has been shut down")]
    ShutDown,

    /// The delegated module could not be imported.
    #[error("cannot import module '{module}': {reason}")]
    ModuleImport { module: String, reason: String },

    /// The module has no attribute with the requested name.
    #[error("delegate '{delegate}' not found in module '{module}'")]
    DelegateNotFound { module: String, delegate: String },

    /// The attribute exists but is not callable.
    #[error("delegate '{delegate}' is not callable")]
    NotCallable { delegate: String },

    /// The delegate raised an exception.
    #[error("delegate '{delegate}' raised: {reason}")]
    CallFailed { delegate: String, reason: String },

    /// The return value could not be converted to a string or truth value.
    #[error("result of '{delegate}' could not be converted: {reason}")]
    NotStringifiable { delegate: String, reason: String },

    /// Delegates take one or two arguments.
    #[error("delegate '{delegate}' called with {count} arguments, expected 1 or 2")]
    InvalidArgumentCount { delegate: String, count: usize },
}

impl BridgeError {
    /// Whether the error means the interpreter itself is unavailable, as
    /// opposed to a single delegate call going wrong.
    pub fn is_init_failure(&self) -> bool {
        matches!(self, BridgeError::InitFailed(_) | BridgeError::ShutDown)
    }
}

/// Result type alias using BridgeError.
pub type BridgeResult<T> = Result<T, BridgeError>;
