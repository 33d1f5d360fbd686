//! SQLite extension exposing token-reward calculations.
//!
//! The arithmetic lives in a Python module (`calculations` by default); this
//! crate only marshals SQL values into that module and back. Registered
//! functions:
//!
//! | SQL function | args | result |
//! |---|---|---|
//! | `pre_nile_tokens_per_day` | 1 | text |
//! | `amazon_staker_token_rewards` | 2 | text |
//! | `nile_staker_token_rewards` | 2 | text |
//! | `staker_token_rewards` | 2 | text |
//! | `amazon_operator_token_rewards` | 1 | text |
//! | `nile_operator_token_rewards` | 1 | text |
//! | `big_gt` | 2 | integer 0/1 |
//!
//! # Loading
//!
//! Build with `--no-default-features --features extension` and load
//! `libcalculations` from any SQLite host; the entry point is
//! `sqlite3_calculations_init`. Hosts that want the interpreter released
//! call `sqlite3_calculations_shutdown` before exiting.
//!
//! Rust callers with their own [`Connection`] use [`load`] or
//! [`register_functions`] directly.

mod error;
#[cfg(feature = "extension")]
mod extension;
mod registry;
mod shims;

pub use error::ShimError;
#[cfg(feature = "extension")]
pub use extension::sqlite3_calculations_init;
pub use registry::{Delegate, ResultKind};

use calculations_config_and_utils::{init_logging, Config};
use interpreter_bridge::InterpreterBridge;
use rusqlite::functions::FunctionFlags;
use rusqlite::Connection;
use std::sync::{Arc, OnceLock};
use tracing::{debug, error, warn};

static BRIDGE: OnceLock<Arc<InterpreterBridge>> = OnceLock::new();

/// Process-wide bridge, configured from the environment on first use.
pub fn global_bridge() -> Arc<InterpreterBridge> {
    bridge_for(&load_config())
}

fn bridge_for(config: &Config) -> Arc<InterpreterBridge> {
    Arc::clone(BRIDGE.get_or_init(|| Arc::new(InterpreterBridge::new(config))))
}

fn load_config() -> Config {
    Config::load().unwrap_or_else(|err| {
        warn!(error = %err, "invalid extension configuration, using defaults");
        Config::default()
    })
}

/// Initialize logging and register every function on `conn` using the
/// process-wide bridge.
pub fn load(conn: &Connection) -> rusqlite::Result<()> {
    let config = load_config();
    init_logging(&config.log_level);
    register_functions(conn, bridge_for(&config))
}

/// Register every function on `conn`, backed by `bridge`.
///
/// Stops at the first registration failure and returns SQLite's error.
pub fn register_functions(conn: &Connection, bridge: Arc<InterpreterBridge>) -> rusqlite::Result<()> {
    let flags = FunctionFlags::SQLITE_UTF8 | FunctionFlags::SQLITE_DETERMINISTIC;

    for delegate in Delegate::ALL {
        let bridge = Arc::clone(&bridge);
        // Variadic so the shim, not SQLite, reports arity errors.
        conn.create_scalar_function(delegate.sql_name(), -1, flags, move |ctx| {
            shims::invoke(&bridge, delegate, ctx)
        })
        .inspect_err(|err| {
            error!(function = delegate.sql_name(), error = %err, "Failed to create function");
        })?;
        debug!(
            function = delegate.sql_name(),
            delegate = delegate.delegate_name(),
            "registered function"
        );
    }
    Ok(())
}

/// Release the embedded interpreter. Safe to call more than once.
pub fn shutdown() -> bool {
    interpreter_bridge::shutdown()
}

/// C entry point for hosts that want to release the interpreter before exit.
#[no_mangle]
pub extern "C" fn sqlite3_calculations_shutdown() {
    shutdown();
}
