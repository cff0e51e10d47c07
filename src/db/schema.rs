// Database schema — table creation.
//
// A `schema_version` table records which schema revisions have been applied,
// so future changes can ship as version-gated migrations.

use anyhow::{Context, Result};
use rusqlite::Connection;

/// Create all tables if they don't exist yet.
///
/// This is idempotent — safe to call on every startup.
pub fn create_tables(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        "
        -- Tracks schema version for future migrations
        CREATE TABLE IF NOT EXISTS schema_version (
            version INTEGER PRIMARY KEY,
            applied_at TEXT NOT NULL DEFAULT (datetime('now'))
        );

        -- Every headline ever collected, one row per (source, text) pair.
        -- Rows are never updated or deleted.
        CREATE TABLE IF NOT EXISTS headlines (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            source TEXT NOT NULL,              -- adapter id ('444', 'INDEX')
            query_time TEXT NOT NULL,          -- when the fetch batch ran
            insert_time TEXT NOT NULL,         -- when the row was stored
            text TEXT NOT NULL,
            UNIQUE(source, text)
        );

        -- One row per analysis run: corpus stats and model parameters
        CREATE TABLE IF NOT EXISTS run_info (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            run_time TEXT NOT NULL,
            document_count INTEGER NOT NULL,
            unique_tokens INTEGER NOT NULL,
            corpus_positions INTEGER NOT NULL,
            topic_count INTEGER NOT NULL,
            pass_count INTEGER NOT NULL,
            iteration_count INTEGER NOT NULL,
            training_time REAL NOT NULL        -- seconds spent in fit()
        );

        -- Per-topic results for a run; written in the same transaction
        -- as the run_info row so a run is never partially visible
        CREATE TABLE IF NOT EXISTS topic_analysis (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            run_id INTEGER NOT NULL,
            topic_id INTEGER NOT NULL,
            top_words TEXT NOT NULL,           -- JSON array, weight-descending
            avg_sentiment REAL NOT NULL,
            frequency INTEGER NOT NULL CHECK (frequency >= 0),
            FOREIGN KEY (run_id) REFERENCES run_info(id)
        );

        -- Index for pulling a run's topics back out
        CREATE INDEX IF NOT EXISTS idx_topics_run
            ON topic_analysis(run_id);

        -- Index for the recent-headlines listing
        CREATE INDEX IF NOT EXISTS idx_headlines_insert_time
            ON headlines(insert_time);
        ",
    )
    .context("Failed to create database tables")?;

    // Record initial schema version if not already set
    conn.execute(
        "INSERT OR IGNORE INTO schema_version (version) VALUES (?1)",
        [1],
    )?;

    Ok(())
}

/// Count the number of tables in the database (useful for init confirmation).
pub fn table_count(conn: &Connection) -> Result<i64> {
    let count: i64 = conn.query_row(
        "SELECT COUNT(*) FROM sqlite_master WHERE type='table' AND name NOT LIKE 'sqlite_%'",
        [],
        |row| row.get(0),
    )?;
    Ok(count)
}
