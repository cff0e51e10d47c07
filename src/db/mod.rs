// Database layer — SQLite persistence for the headline store and the
// run history log.
//
// rusqlite's "bundled" feature compiles SQLite in, so no system library is
// needed. One file (HIRSZEMLE_DB_PATH, default ./hirszemle.db) holds both
// the headline corpus and the append-only run history.

pub mod models;
pub mod queries;
pub mod schema;

use anyhow::{Context, Result};
use rusqlite::Connection;
use std::path::Path;

/// Create the database if needed and bring the schema up to date.
///
/// Called by `hirszemle init`; safe to call repeatedly.
pub fn initialize(db_path: &str) -> Result<Connection> {
    if let Some(parent) = Path::new(db_path).parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory for database: {db_path}"))?;
        }
    }

    let conn = open_connection(db_path)?;
    schema::create_tables(&conn)?;
    Ok(conn)
}

/// Open an existing database; fails with a hint when it doesn't exist yet.
pub fn open(db_path: &str) -> Result<Connection> {
    if !Path::new(db_path).exists() {
        anyhow::bail!(
            "Database not found at {}. Run `hirszemle init` first.",
            db_path
        );
    }
    open_connection(db_path)
}

fn open_connection(db_path: &str) -> Result<Connection> {
    let conn = Connection::open(db_path)
        .with_context(|| format!("Failed to open database at {db_path}"))?;

    // WAL keeps reads (report/history/status) from blocking the ingest writer
    conn.pragma_update(None, "journal_mode", "WAL")?;

    Ok(conn)
}
