//! Errors surfaced to SQL callers.

use interpreter_bridge::BridgeError;
use thiserror::Error;

/// Error type for the SQL function shims.
///
/// Only malformed calls and an unavailable interpreter become SQL errors.
/// Delegate failures are collapsed to NULL/0 before reaching this type.
#[derive(Error, Debug)]
pub enum ShimError {
    /// The function was called with the wrong number of arguments.
    #[error("{function}() requires exactly {}", arity_phrase(.expected))]
    WrongArgumentCount {
        function: &'static str,
        expected: usize,
    },

    /// The interpreter could not be started, or was shut down.
    #[error("Failed to initialize Python: {0}")]
    Init(BridgeError),
}

impl From<ShimError> for rusqlite::Error {
    fn from(err: ShimError) -> Self {
        rusqlite::Error::UserFunctionError(Box::new(err))
    }
}

fn arity_phrase(expected: &usize) -> String {
    match *expected {
        1 => "one argument".to_string(),
        2 => "two arguments".to_string(),
        n => format!("{n} arguments"),
    }
}
