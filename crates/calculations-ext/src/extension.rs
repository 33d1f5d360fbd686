//! Loadable-extension entry point.
// https://www.sqlite.org/loadext.html

use rusqlite::{ffi, Connection};
use std::os::raw::{c_char, c_int};
use tracing::{error, info};

/// Called by SQLite when the extension is loaded.
#[allow(clippy::not_unsafe_ptr_arg_deref)]
#[no_mangle]
pub extern "C" fn sqlite3_calculations_init(
    db: *mut ffi::sqlite3,
    pz_err_msg: *mut *mut c_char,
    p_api: *mut ffi::sqlite3_api_routines,
) -> c_int {
    // SAFETY: SQLite passes valid handles for the duration of this call.
    unsafe { Connection::extension_init2(db, pz_err_msg, p_api, init) }
}

fn init(db: Connection) -> rusqlite::Result<bool> {
    match crate::load(&db) {
        Ok(()) => {
            info!("calculations extension initialized");
            Ok(false)
        }
        Err(err) => {
            error!(error = %err, "calculations extension failed to initialize");
            Err(err)
        }
    }
}
