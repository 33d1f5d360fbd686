//! Shared helpers for bridge integration tests.

#![allow(dead_code)]

use calculations_config_and_utils::Config;
use interpreter_bridge::InterpreterBridge;
use std::path::PathBuf;

fn manifest_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
}

/// Bridge pointed at the shipped `calculations` module.
pub fn calculations_bridge() -> InterpreterBridge {
    InterpreterBridge::new(&Config {
        search_paths: vec![manifest_dir().join("../../python")],
        ..Config::default()
    })
}

/// Bridge pointed at the test-only fixture module.
pub fn fixtures_bridge() -> InterpreterBridge {
    InterpreterBridge::new(&Config {
        module_name: "bridge_fixtures".to_string(),
        search_paths: vec![manifest_dir().join("tests/fixtures")],
        ..Config::default()
    })
}
