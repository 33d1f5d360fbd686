//! Logging initialization for the extension.
//!
//! The extension runs inside someone else's process, so logs go to stderr
//! (the host's diagnostic stream) and installation never panics when a
//! subscriber is already present.

use tracing_subscriber::EnvFilter;

/// Initialize the logging system.
///
/// This sets up tracing with:
/// - Compact output on stderr
/// - Log level from RUST_LOG env var or the provided default
///
/// Returns `false` if a global subscriber was already installed, which
/// happens when the host process set one up or the extension is loaded by
/// more than one connection.
///
/// # Example
///
/// ```ignore
/// init_logging("info");
/// tracing::info!("extension loaded");
/// ```
pub fn init_logging(level: &str) -> bool {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(level)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .compact()
        .try_init()
        .is_ok()
}

/// Filter directive used when `RUST_LOG` is not set.
fn default_directive(level: &str) -> String {
    parse_level(level).as_str().to_ascii_lowercase()
}

/// Parse a configured log level into a tracing Level.
///
/// Accepts the names `Config::log_level` documents plus `warning`, ignoring
/// case and surrounding whitespace. Anything else means
/// [`DEFAULT_LOG_LEVEL`](crate::DEFAULT_LOG_LEVEL).
pub fn parse_level(level: &str) -> tracing::Level {
    match level.trim().to_lowercase().as_str() {
        "trace" => tracing::Level::TRACE,
        "debug" => tracing::Level::DEBUG,
        "warn" | "warning" => tracing::Level::WARN,
        "error" => tracing::Level::ERROR,
        _ => tracing::Level::INFO,
    }
}
