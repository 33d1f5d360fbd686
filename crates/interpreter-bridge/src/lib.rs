//! Embedded Python interpreter bridge.
//!
//! This crate provides:
//! - Process-wide interpreter lifecycle (lazy start, explicit shutdown)
//! - Delegate calls into a named Python module with one or two string
//!   arguments, returning a string or a truth value
//! - A tagged error type so callers can tell "the delegate said no" apart
//!   from "the delegate could not be reached"
//!
//! # Architecture
//!
//! There is at most one interpreter per process, so the lifecycle lives in a
//! single static guarded by an `RwLock`. Calls hold the lock shared for
//! their whole duration and take the GIL through `Python::with_gil`;
//! shutdown takes it exclusively, so the interpreter is never finalized
//! under an in-flight call.
//!
//! ```ignore
//! let bridge = InterpreterBridge::new(&Config::new());
//! bridge.ensure_initialized()?;
//! let out = bridge.call_string("preNileTokensPerDay", &["1000"])?;
//! ```

mod bridge;
mod error;
mod lifecycle;

pub use bridge::InterpreterBridge;
pub use error::{BridgeError, BridgeResult};
pub use lifecycle::{is_running, shutdown, state, InterpreterState};
