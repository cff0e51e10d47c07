// Database queries — all SQL for the headline store and the run history log.
//
// Every database interaction goes through this module. This keeps SQL
// contained in one place and gives the rest of the app clean Rust interfaces.

use anyhow::{Context, Result};
use chrono::Local;
use rusqlite::{params, Connection, OptionalExtension};

use super::models::{AnalysisRun, Headline, RunRecord, TopicSummary};

/// Timestamp format used for headline query/insert times.
pub const TIME_FORMAT: &str = "%Y-%m-%d %H:%M";

// --- Headline store ---

/// Insert a batch of headlines for one source, skipping duplicates.
///
/// The (source, text) pair is the uniqueness key: a repeated headline from
/// the same source is silently skipped and not counted, while the same text
/// from a different source is a distinct row. Returns the number of rows
/// actually inserted.
///
/// The whole batch runs in one transaction — on any storage fault other
/// than the uniqueness skip, the entire batch rolls back.
pub fn insert_headlines(
    conn: &Connection,
    source: &str,
    query_time: &str,
    texts: &[String],
) -> Result<usize> {
    let tx = conn
        .unchecked_transaction()
        .context("Failed to start ingest transaction")?;

    let mut inserted = 0;
    {
        let mut stmt = tx.prepare(
            "INSERT OR IGNORE INTO headlines (source, query_time, insert_time, text)
             VALUES (?1, ?2, ?3, ?4)",
        )?;
        for text in texts {
            let insert_time = Local::now().format(TIME_FORMAT).to_string();
            inserted += stmt.execute(params![source, query_time, insert_time, text])?;
        }
    }

    tx.commit().context("Failed to commit ingest batch")?;
    Ok(inserted)
}

/// Every stored headline in insertion order — the analysis corpus.
pub fn all_headlines(conn: &Connection) -> Result<Vec<Headline>> {
    let mut stmt = conn.prepare(
        "SELECT id, source, query_time, insert_time, text FROM headlines ORDER BY id",
    )?;
    let rows = stmt.query_map([], |row| {
        Ok(Headline {
            id: row.get(0)?,
            source: row.get(1)?,
            query_time: row.get(2)?,
            insert_time: row.get(3)?,
            text: row.get(4)?,
        })
    })?;

    let mut headlines = Vec::new();
    for row in rows {
        headlines.push(row?);
    }
    Ok(headlines)
}

/// Total number of stored headlines.
pub fn total_count(conn: &Connection) -> Result<i64> {
    let count: i64 = conn.query_row("SELECT COUNT(*) FROM headlines", [], |row| row.get(0))?;
    Ok(count)
}

/// The most recently inserted headlines, newest first.
pub fn recent_headlines(conn: &Connection, limit: u32) -> Result<Vec<Headline>> {
    let mut stmt = conn.prepare(
        "SELECT id, source, query_time, insert_time, text FROM headlines
         ORDER BY insert_time DESC, id DESC LIMIT ?1",
    )?;
    let rows = stmt.query_map(params![limit], |row| {
        Ok(Headline {
            id: row.get(0)?,
            source: row.get(1)?,
            query_time: row.get(2)?,
            insert_time: row.get(3)?,
            text: row.get(4)?,
        })
    })?;

    let mut headlines = Vec::new();
    for row in rows {
        headlines.push(row?);
    }
    Ok(headlines)
}

/// Per-source headline counts, for the status display.
pub fn source_counts(conn: &Connection) -> Result<Vec<(String, i64)>> {
    let mut stmt =
        conn.prepare("SELECT source, COUNT(*) FROM headlines GROUP BY source ORDER BY source")?;
    let rows = stmt.query_map([], |row| Ok((row.get(0)?, row.get(1)?)))?;

    let mut counts = Vec::new();
    for row in rows {
        counts.push(row?);
    }
    Ok(counts)
}

// --- Run history log ---

/// Append a run and all of its topic rows, returning the new run id.
///
/// The run_info row and every topic_analysis row are written in a single
/// transaction — a fault anywhere leaves no trace of the run. The history
/// is append-only; nothing here updates or deletes.
pub fn record_run(conn: &Connection, run: &AnalysisRun) -> Result<i64> {
    let tx = conn
        .unchecked_transaction()
        .context("Failed to start run-record transaction")?;

    tx.execute(
        "INSERT INTO run_info
            (run_time, document_count, unique_tokens, corpus_positions,
             topic_count, pass_count, iteration_count, training_time)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
        params![
            run.run_time,
            run.document_count,
            run.unique_tokens,
            run.corpus_positions as i64,
            run.topic_count,
            run.pass_count,
            run.iteration_count,
            run.training_time,
        ],
    )?;
    let run_id = tx.last_insert_rowid();

    {
        let mut stmt = tx.prepare(
            "INSERT INTO topic_analysis (run_id, topic_id, top_words, avg_sentiment, frequency)
             VALUES (?1, ?2, ?3, ?4, ?5)",
        )?;
        for topic in &run.topics {
            let top_words_json = serde_json::to_string(&topic.top_words)?;
            stmt.execute(params![
                run_id,
                topic.topic_id as i64,
                top_words_json,
                topic.avg_sentiment,
                topic.frequency,
            ])?;
        }
    }

    tx.commit().context("Failed to commit run record")?;
    Ok(run_id)
}

/// Number of recorded runs.
pub fn run_count(conn: &Connection) -> Result<i64> {
    let count: i64 = conn.query_row("SELECT COUNT(*) FROM run_info", [], |row| row.get(0))?;
    Ok(count)
}

/// The most recent run with its topics, or None when no run exists yet.
pub fn latest_run(conn: &Connection) -> Result<Option<RunRecord>> {
    let mut stmt = conn.prepare(
        "SELECT id, run_time, document_count, unique_tokens, corpus_positions,
                topic_count, pass_count, iteration_count, training_time
         FROM run_info ORDER BY id DESC LIMIT 1",
    )?;
    let info = stmt
        .query_row([], |row| {
            Ok((
                row.get::<_, i64>(0)?,
                AnalysisRun {
                    run_time: row.get(1)?,
                    document_count: row.get(2)?,
                    unique_tokens: row.get(3)?,
                    corpus_positions: row.get::<_, i64>(4)? as u64,
                    topic_count: row.get(5)?,
                    pass_count: row.get(6)?,
                    iteration_count: row.get(7)?,
                    training_time: row.get(8)?,
                    topics: Vec::new(),
                },
            ))
        })
        .optional()?;

    match info {
        Some((id, mut run)) => {
            run.topics = topics_for_run(conn, id)?;
            Ok(Some(RunRecord { id, run }))
        }
        None => Ok(None),
    }
}

/// All recorded runs with their topics, descending by run time.
pub fn all_runs(conn: &Connection) -> Result<Vec<RunRecord>> {
    let mut stmt = conn.prepare(
        "SELECT id, run_time, document_count, unique_tokens, corpus_positions,
                topic_count, pass_count, iteration_count, training_time
         FROM run_info ORDER BY run_time DESC, id DESC",
    )?;
    let rows = stmt.query_map([], |row| {
        Ok((
            row.get::<_, i64>(0)?,
            AnalysisRun {
                run_time: row.get(1)?,
                document_count: row.get(2)?,
                unique_tokens: row.get(3)?,
                corpus_positions: row.get::<_, i64>(4)? as u64,
                topic_count: row.get(5)?,
                pass_count: row.get(6)?,
                iteration_count: row.get(7)?,
                training_time: row.get(8)?,
                topics: Vec::new(),
            },
        ))
    })?;

    let mut records = Vec::new();
    for row in rows {
        let (id, mut run) = row?;
        run.topics = topics_for_run(conn, id)?;
        records.push(RunRecord { id, run });
    }
    Ok(records)
}

/// Load a run's topic rows, ascending by topic id.
fn topics_for_run(conn: &Connection, run_id: i64) -> Result<Vec<TopicSummary>> {
    let mut stmt = conn.prepare(
        "SELECT topic_id, top_words, avg_sentiment, frequency
         FROM topic_analysis WHERE run_id = ?1 ORDER BY topic_id",
    )?;
    let rows = stmt.query_map(params![run_id], |row| {
        let top_words_json: String = row.get(1)?;
        Ok((
            row.get::<_, i64>(0)? as usize,
            top_words_json,
            row.get::<_, f64>(2)?,
            row.get::<_, u32>(3)?,
        ))
    })?;

    let mut topics = Vec::new();
    for row in rows {
        let (topic_id, top_words_json, avg_sentiment, frequency) = row?;
        let top_words: Vec<String> = serde_json::from_str(&top_words_json)
            .with_context(|| format!("Corrupt top_words for run {run_id} topic {topic_id}"))?;
        topics.push(TopicSummary {
            topic_id,
            top_words,
            avg_sentiment,
            frequency,
        });
    }
    Ok(topics)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::schema::create_tables;

    fn test_conn() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        create_tables(&conn).unwrap();
        conn
    }

    #[test]
    fn test_ingest_counts_only_new_rows() {
        let conn = test_conn();
        let titles = vec!["Első cím".to_string(), "Második cím".to_string()];

        let first = insert_headlines(&conn, "444", "t0", &titles).unwrap();
        assert_eq!(first, 2);

        // Same batch again: all duplicates, none counted
        let second = insert_headlines(&conn, "444", "t1", &titles).unwrap();
        assert_eq!(second, 0);
        assert_eq!(total_count(&conn).unwrap(), 2);
    }

    #[test]
    fn test_same_text_from_different_sources_is_distinct() {
        let conn = test_conn();
        let titles = vec!["Közös cím".to_string()];

        assert_eq!(insert_headlines(&conn, "444", "t0", &titles).unwrap(), 1);
        assert_eq!(insert_headlines(&conn, "INDEX", "t0", &titles).unwrap(), 1);
        assert_eq!(total_count(&conn).unwrap(), 2);
    }

    #[test]
    fn test_all_headlines_preserves_insertion_order() {
        let conn = test_conn();
        insert_headlines(&conn, "444", "t0", &["b".to_string()]).unwrap();
        insert_headlines(&conn, "444", "t1", &["a".to_string()]).unwrap();

        let all = all_headlines(&conn).unwrap();
        let texts: Vec<&str> = all.iter().map(|h| h.text.as_str()).collect();
        assert_eq!(texts, vec!["b", "a"]);
    }

    #[test]
    fn test_record_and_read_back_run() {
        let conn = test_conn();
        let run = AnalysisRun {
            run_time: "2026-01-01T00:00:00+00:00".to_string(),
            document_count: 3,
            unique_tokens: 9,
            corpus_positions: 11,
            topic_count: 2,
            pass_count: 2,
            iteration_count: 50,
            training_time: 0.01,
            topics: vec![
                TopicSummary {
                    topic_id: 0,
                    top_words: vec!["kormány".to_string(), "döntés".to_string()],
                    avg_sentiment: -0.25,
                    frequency: 2,
                },
                TopicSummary {
                    topic_id: 1,
                    top_words: vec!["sportesemény".to_string()],
                    avg_sentiment: 0.0,
                    frequency: 1,
                },
            ],
        };

        let run_id = record_run(&conn, &run).unwrap();
        let latest = latest_run(&conn).unwrap().unwrap();
        assert_eq!(latest.id, run_id);
        assert_eq!(latest.run.document_count, 3);
        assert_eq!(latest.run.topics.len(), 2);
        assert_eq!(latest.run.topics[0].top_words[0], "kormány");
        assert_eq!(latest.run.topics[1].frequency, 1);
    }

    #[test]
    fn test_latest_run_none_when_empty() {
        let conn = test_conn();
        assert!(latest_run(&conn).unwrap().is_none());
    }

    #[test]
    fn test_all_runs_descending_by_time() {
        let conn = test_conn();
        for (i, t) in ["2026-01-01T00:00:00+00:00", "2026-01-02T00:00:00+00:00"]
            .iter()
            .enumerate()
        {
            let run = AnalysisRun {
                run_time: t.to_string(),
                document_count: i as u32,
                unique_tokens: 0,
                corpus_positions: 0,
                topic_count: 1,
                pass_count: 1,
                iteration_count: 1,
                training_time: 0.0,
                topics: vec![],
            };
            record_run(&conn, &run).unwrap();
        }

        let runs = all_runs(&conn).unwrap();
        assert_eq!(runs.len(), 2);
        assert_eq!(runs[0].run.run_time, "2026-01-02T00:00:00+00:00");
        assert_eq!(runs[1].run.run_time, "2026-01-01T00:00:00+00:00");
    }

    #[test]
    fn test_record_run_is_atomic() {
        let conn = test_conn();
        let run = AnalysisRun {
            run_time: "2026-01-01T00:00:00+00:00".to_string(),
            document_count: 1,
            unique_tokens: 1,
            corpus_positions: 1,
            topic_count: 1,
            pass_count: 1,
            iteration_count: 1,
            training_time: 0.0,
            topics: vec![TopicSummary {
                topic_id: 0,
                top_words: vec![],
                avg_sentiment: 0.0,
                frequency: 1,
            }],
        };
        // Simulate a fault between the run_info write and the topic writes:
        // the topic insert fails, and the run_info row must roll back too.
        conn.execute_batch("DROP TABLE topic_analysis;").unwrap();
        assert!(record_run(&conn, &run).is_err());

        // Restore the table and confirm nothing was persisted
        create_tables(&conn).unwrap();
        assert!(latest_run(&conn).unwrap().is_none());
    }
}
