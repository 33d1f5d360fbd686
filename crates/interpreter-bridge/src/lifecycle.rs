//! Process-wide interpreter lifecycle.

use crate::{BridgeError, BridgeResult};
use parking_lot::{const_rwlock, RwLock, RwLockReadGuard};
use pyo3::ffi;
use tracing::{debug, info, warn};

/// Lifecycle of the embedded interpreter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InterpreterState {
    /// No call has needed the interpreter yet.
    Uninitialized,
    /// The interpreter is available. `owned` is true when this process
    /// started it, false when the host had already done so.
    Running { owned: bool },
    /// Torn down by [`shutdown`]. Never restarted.
    ShutDown,
}

static STATE: RwLock<InterpreterState> = const_rwlock(InterpreterState::Uninitialized);

/// Start the interpreter if nobody has yet.
pub(crate) fn start() -> BridgeResult<()> {
    match *STATE.read() {
        InterpreterState::Running { .. } => return Ok(()),
        InterpreterState::ShutDown => return Err(BridgeError::ShutDown),
        InterpreterState::Uninitialized => {}
    }

    let mut state = STATE.write();
    match *state {
        InterpreterState::Running { .. } => Ok(()),
        InterpreterState::ShutDown => Err(BridgeError::ShutDown),
        InterpreterState::Uninitialized => {
            // SAFETY: Py_IsInitialized may be called at any time, even before
            // the interpreter exists.
            let owned = unsafe { ffi::Py_IsInitialized() } == 0;

            std::panic::catch_unwind(pyo3::prepare_freethreaded_python).map_err(|_| {
                BridgeError::InitFailed("Python interpreter failed to start".to_string())
            })?;

            *state = InterpreterState::Running { owned };
            info!(owned, "Python interpreter ready");
            Ok(())
        }
    }
}

/// Hold the lifecycle shared while a call is in flight.
///
/// The returned guard keeps [`shutdown`] from finalizing the interpreter
/// until it is dropped.
pub(crate) fn acquire_running() -> BridgeResult<RwLockReadGuard<'static, InterpreterState>> {
    let guard = STATE.read();
    match *guard {
        InterpreterState::Running { .. } => Ok(guard),
        InterpreterState::ShutDown => Err(BridgeError::ShutDown),
        InterpreterState::Uninitialized => Err(BridgeError::InitFailed(
            "interpreter has not been started".to_string(),
        )),
    }
}

/// Tear the interpreter down.
///
/// Returns true only for the call that performed the teardown. Calling it
/// again, or before the interpreter was ever started, does nothing. An
/// interpreter that the host started is left running; the bridge simply
/// stops using it.
pub fn shutdown() -> bool {
    let mut state = STATE.write();
    match *state {
        InterpreterState::Running { owned } => {
            if owned {
                // SAFETY: the exclusive lifecycle lock guarantees no call is
                // inside the interpreter, and the state is flipped below so
                // nothing will touch it again.
                let rc = unsafe {
                    ffi::PyGILState_Ensure();
                    ffi::Py_FinalizeEx()
                };
                if rc != 0 {
                    warn!(rc, "Python interpreter reported errors while finalizing");
                }
            }
            *state = InterpreterState::ShutDown;
            info!(owned, "Python interpreter shut down");
            true
        }
        other => {
            debug!(state = ?other, "shutdown requested with no running interpreter");
            false
        }
    }
}

/// Current lifecycle state.
pub fn state() -> InterpreterState {
    *STATE.read()
}

/// Whether the interpreter is available for calls.
pub fn is_running() -> bool {
    matches!(state(), InterpreterState::Running { .. })
}
