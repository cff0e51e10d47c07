// System status display — shows DB stats, per-source counts, last run age.

use anyhow::Result;
use rusqlite::Connection;
use std::path::Path;

use crate::db::queries;

/// Display system status to the terminal.
pub fn show(conn: &Connection, db_display_path: &str) -> Result<()> {
    // Database file size
    let file_size = std::fs::metadata(db_display_path)
        .map(|m| format_bytes(m.len()))
        .unwrap_or_else(|_| "unknown".to_string());
    println!("Database: {} ({})", db_display_path, file_size);

    // Headline store
    let total = queries::total_count(conn)?;
    if total == 0 {
        println!("Headlines: none collected yet");
        println!("  Run `hirszemle ingest` to start collecting");
    } else {
        println!("Headlines: {total} total");
        for (source, count) in queries::source_counts(conn)? {
            println!("  {source}: {count}");
        }
    }

    // Run history
    let runs = queries::run_count(conn)?;
    match queries::latest_run(conn)? {
        Some(record) => {
            println!(
                "Runs: {} recorded, latest at {} ({} docs, {} topics)",
                runs, record.run.run_time, record.run.document_count, record.run.topic_count
            );
        }
        None => {
            println!("Runs: none yet");
            println!("  Run `hirszemle analyze` to analyze the corpus");
        }
    }

    Ok(())
}

/// Quick existence check used before opening the database.
pub fn database_exists(db_path: &str) -> bool {
    Path::new(db_path).exists()
}

fn format_bytes(bytes: u64) -> String {
    if bytes < 1024 {
        format!("{bytes} B")
    } else if bytes < 1024 * 1024 {
        format!("{:.1} KB", bytes as f64 / 1024.0)
    } else {
        format!("{:.1} MB", bytes as f64 / (1024.0 * 1024.0))
    }
}
