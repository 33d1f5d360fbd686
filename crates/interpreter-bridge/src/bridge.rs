//! Delegate calls into the configured Python module.

use crate::{lifecycle, BridgeError, BridgeResult};
use calculations_config_and_utils::Config;
use pyo3::exceptions::PyAttributeError;
use pyo3::prelude::*;
use pyo3::types::{PyList, PyTuple};
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::{debug, warn};

/// Handle for calling functions of one Python module.
///
/// Cheap to create. The interpreter it talks to is shared by the whole
/// process.
#[derive(Debug)]
pub struct InterpreterBridge {
    module_name: String,
    search_paths: Vec<PathBuf>,
    paths_configured: AtomicBool,
}

impl InterpreterBridge {
    /// Create a bridge for the module and search paths in `config`.
    pub fn new(config: &Config) -> Self {
        Self {
            module_name: config.module_name.clone(),
            search_paths: config.search_paths.clone(),
            paths_configured: AtomicBool::new(false),
        }
    }

    /// Start the interpreter if needed and put the search paths on `sys.path`.
    ///
    /// Idempotent. Fails with [`BridgeError::ShutDown`] once the interpreter
    /// has been torn down.
    pub fn ensure_initialized(&self) -> BridgeResult<()> {
        lifecycle::start()?;
        if self.paths_configured.load(Ordering::Acquire) {
            return Ok(());
        }

        let _running = lifecycle::acquire_running()?;
        Python::with_gil(|py| self.extend_sys_path(py)).map_err(|err| {
            BridgeError::InitFailed(format!("cannot configure sys.path: {err}"))
        })?;
        self.paths_configured.store(true, Ordering::Release);
        debug!(paths = ?self.search_paths, "module search paths configured");
        Ok(())
    }

    /// Call `delegate` and return `str()` of its result.
    pub fn call_string(&self, delegate: &str, args: &[&str]) -> BridgeResult<String> {
        self.invoke(delegate, args, |value| value.str()?.extract::<String>())
    }

    /// Call `delegate` and return the truth value of its result.
    pub fn call_bool(&self, delegate: &str, args: &[&str]) -> BridgeResult<bool> {
        self.invoke(delegate, args, |value| value.is_truthy())
    }

    fn extend_sys_path(&self, py: Python<'_>) -> PyResult<()> {
        let sys_path = py
            .import("sys")?
            .getattr("path")?
            .downcast_into::<PyList>()?;

        // Reverse so the first configured path ends up first on sys.path.
        for dir in self.search_paths.iter().rev() {
            let dir = dir.to_string_lossy();
            if !sys_path.contains(&*dir)? {
                sys_path.insert(0, &*dir)?;
            }
        }
        Ok(())
    }

    fn invoke<T, F>(&self, delegate: &str, args: &[&str], convert: F) -> BridgeResult<T>
    where
        F: for<'py> FnOnce(&Bound<'py, PyAny>) -> PyResult<T>,
    {
        if !(1..=2).contains(&args.len()) {
            return Err(BridgeError::InvalidArgumentCount {
                delegate: delegate.to_string(),
                count: args.len(),
            });
        }

        self.ensure_initialized()?;
        let _running = lifecycle::acquire_running()?;

        Python::with_gil(|py| {
            // Imported on every call; sys.modules makes repeats cheap.
            let module = PyModule::import(py, self.module_name.as_str()).map_err(|err| {
                BridgeError::ModuleImport {
                    module: self.module_name.clone(),
                    reason: report(py, err),
                }
            })?;

            let func = module.getattr(delegate).map_err(|err| {
                if !err.is_instance_of::<PyAttributeError>(py) {
                    report(py, err);
                }
                BridgeError::DelegateNotFound {
                    module: self.module_name.clone(),
                    delegate: delegate.to_string(),
                }
            })?;

            if !func.is_callable() {
                return Err(BridgeError::NotCallable {
                    delegate: delegate.to_string(),
                });
            }

            debug!(delegate, ?args, "calling delegate");
            let value = PyTuple::new(py, args.iter().copied())
                .and_then(|args| func.call1(args))
                .map_err(|err| BridgeError::CallFailed {
                    delegate: delegate.to_string(),
                    reason: report(py, err),
                })?;

            convert(&value).map_err(|err| BridgeError::NotStringifiable {
                delegate: delegate.to_string(),
                reason: report(py, err),
            })
        })
    }
}

/// Print the Python traceback to stderr and return the error text.
fn report(py: Python<'_>, err: PyErr) -> String {
    let reason = err.to_string();
    warn!(error = %reason, "Python raised an exception");
    err.display(py);
    reason
}
