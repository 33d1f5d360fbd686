//! Configuration management for the extension.

use crate::{CoreError, CoreResult};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default name of the delegated Python module.
pub const DEFAULT_MODULE_NAME: &str = "calculations";

/// Default directory added to the interpreter's module search path.
pub const DEFAULT_SEARCH_PATH: &str = ".";

/// Default log level.
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Environment variable naming an optional JSON config file.
pub const CONFIG_PATH_ENV: &str = "CALCULATIONS_CONFIG";

const MODULE_ENV: &str = "CALCULATIONS_MODULE";
const PYTHONPATH_ENV: &str = "CALCULATIONS_PYTHONPATH";
const LOG_LEVEL_ENV: &str = "CALCULATIONS_LOG_LEVEL";

/// Extension configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Name of the Python module holding the delegate functions.
    #[serde(default = "default_module_name")]
    pub module_name: String,
    /// Directories prepended to `sys.path` before the module is imported.
    #[serde(default = "default_search_paths")]
    pub search_paths: Vec<PathBuf>,
    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_module_name() -> String {
    DEFAULT_MODULE_NAME.to_string()
}

fn default_search_paths() -> Vec<PathBuf> {
    vec![PathBuf::from(DEFAULT_SEARCH_PATH)]
}

fn default_log_level() -> String {
    DEFAULT_LOG_LEVEL.to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            module_name: default_module_name(),
            search_paths: default_search_paths(),
            log_level: default_log_level(),
        }
    }
}

impl Config {
    /// Create a new Config with default values, then override from environment.
    pub fn new() -> Self {
        let mut config = Self::default();
        config.load_from_env();
        config
    }

    /// Load configuration from the file named by `CALCULATIONS_CONFIG`,
    /// falling back to defaults, then apply environment overrides.
    pub fn load() -> CoreResult<Self> {
        let mut config = match std::env::var_os(CONFIG_PATH_ENV) {
            Some(path) if Path::new(&path).exists() => Self::load_from_file(Path::new(&path))?,
            _ => Self::default(),
        };
        config.load_from_env();
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a specific file.
    pub fn load_from_file(path: &Path) -> CoreResult<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a file.
    pub fn save(&self, path: &Path) -> CoreResult<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Reject configurations the bridge cannot work with.
    pub fn validate(&self) -> CoreResult<()> {
        if self.module_name.trim().is_empty() {
            return Err(CoreError::Config("module_name must not be empty".into()));
        }
        Ok(())
    }

    fn load_from_env(&mut self) {
        self.apply_overrides(|name| std::env::var(name).ok());
    }

    /// Apply overrides from a variable lookup. Blank values are ignored.
    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        let lookup = |name: &str| lookup(name).and_then(non_empty);

        if let Some(module_name) = lookup(MODULE_ENV) {
            self.module_name = module_name;
        }
        if let Some(raw) = lookup(PYTHONPATH_ENV) {
            self.search_paths = std::env::split_paths(&raw)
                .filter(|p| !p.as_os_str().is_empty())
                .collect();
        }
        if let Some(log_level) = lookup(LOG_LEVEL_ENV) {
            self.log_level = log_level;
        }
    }
}

fn non_empty(raw: String) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
