//! Core types, configuration, and utilities for the calculations extension.

mod config;
mod error;
mod logging;

pub use config::{
    Config, CONFIG_PATH_ENV, DEFAULT_LOG_LEVEL, DEFAULT_MODULE_NAME, DEFAULT_SEARCH_PATH,
};
pub use error::{CoreError, CoreResult};
pub use logging::{init_logging, parse_level};
