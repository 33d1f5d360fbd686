//! Shared helpers for SQL-level integration tests.

#![allow(dead_code)]

use calculations::register_functions;
use calculations_config_and_utils::Config;
use interpreter_bridge::InterpreterBridge;
use rusqlite::types::Value;
use rusqlite::Connection;
use std::path::PathBuf;
use std::sync::Arc;

fn manifest_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
}

/// Bridge pointed at the shipped `calculations` module.
pub fn calculations_bridge() -> Arc<InterpreterBridge> {
    Arc::new(InterpreterBridge::new(&Config {
        search_paths: vec![manifest_dir().join("../../python")],
        ..Config::default()
    }))
}

/// Bridge pointed at the call-counting fixture module.
pub fn counting_bridge() -> Arc<InterpreterBridge> {
    Arc::new(InterpreterBridge::new(&Config {
        module_name: "counting_calculations".to_string(),
        search_paths: vec![manifest_dir().join("tests/fixtures")],
        ..Config::default()
    }))
}

/// In-memory connection with every function registered.
pub fn connection_with(bridge: Arc<InterpreterBridge>) -> Connection {
    let conn = Connection::open_in_memory().unwrap();
    register_functions(&conn, bridge).unwrap();
    conn
}

/// Evaluate a single-value SELECT.
pub fn eval(conn: &Connection, sql: &str) -> rusqlite::Result<Value> {
    conn.query_row(sql, [], |row| row.get::<_, Value>(0))
}
