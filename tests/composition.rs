// Composition tests — the full store -> normalize -> model -> aggregate ->
// history chain against an in-memory SQLite database, without any network
// access.

use rusqlite::Connection;

use hirszemle::db::queries;
use hirszemle::db::schema::create_tables;
use hirszemle::pipeline::analyze::{self, RunSettings};
use hirszemle::sentiment::SentimentScorer;
use hirszemle::text::Normalizer;
use hirszemle::topics::lda::{LdaBuilder, LdaParams};

fn test_conn() -> Connection {
    let conn = Connection::open_in_memory().unwrap();
    create_tables(&conn).unwrap();
    conn
}

fn settings(num_topics: usize) -> RunSettings {
    RunSettings {
        num_topics,
        passes: 1,
        iterations: 50,
        top_words: 5,
    }
}

fn builder(num_topics: usize) -> LdaBuilder {
    LdaBuilder {
        params: LdaParams {
            num_topics,
            iterations: 50,
            passes: 1,
            seed: 42,
        },
    }
}

fn analyze_store(conn: &Connection, num_topics: usize) -> hirszemle::db::models::AnalysisRun {
    let headlines = queries::all_headlines(conn).unwrap();
    analyze::run(
        &headlines,
        &Normalizer::hungarian(),
        &SentimentScorer::new(),
        &builder(num_topics),
        &settings(num_topics),
    )
    .unwrap()
}

// ============================================================
// End-to-end scenario from the store to a recorded run
// ============================================================

#[test]
fn three_headlines_two_topics_end_to_end() {
    let conn = test_conn();
    let titles = vec![
        "Kormány bejelentést tett".to_string(),
        "Kormány új döntést hozott".to_string(),
        "Sportesemény történt ma".to_string(),
    ];
    assert_eq!(
        queries::insert_headlines(&conn, "444", "t0", &titles).unwrap(),
        3
    );

    let run = analyze_store(&conn, 2);

    assert_eq!(run.document_count, 3);
    assert_eq!(run.topics.len(), 2);
    assert_eq!(run.topics[0].topic_id, 0);
    assert_eq!(run.topics[1].topic_id, 1);

    let total_frequency: u32 = run.topics.iter().map(|t| t.frequency).sum();
    assert_eq!(total_frequency, 3);

    for topic in &run.topics {
        if topic.frequency >= 1 {
            assert!(
                !topic.top_words.is_empty(),
                "topic {} has members but no top words",
                topic.topic_id
            );
        }
    }

    // Record and read back
    let run_id = queries::record_run(&conn, &run).unwrap();
    let latest = queries::latest_run(&conn).unwrap().unwrap();
    assert_eq!(latest.id, run_id);
    assert_eq!(latest.run.document_count, 3);
    assert_eq!(latest.run.topics.len(), 2);
}

#[test]
fn cross_source_duplicates_are_distinct_documents() {
    let conn = test_conn();
    let shared = vec!["Közös hír mindkét oldalon".to_string()];
    queries::insert_headlines(&conn, "444", "t0", &shared).unwrap();
    queries::insert_headlines(&conn, "INDEX", "t0", &shared).unwrap();

    let run = analyze_store(&conn, 2);
    assert_eq!(run.document_count, 2);
}

#[test]
fn ingesting_twice_does_not_grow_the_corpus() {
    let conn = test_conn();
    let titles = vec!["Egyszer tárolt cím".to_string()];
    queries::insert_headlines(&conn, "444", "t0", &titles).unwrap();
    queries::insert_headlines(&conn, "444", "t1", &titles).unwrap();

    let run = analyze_store(&conn, 2);
    assert_eq!(run.document_count, 1);
}

// ============================================================
// Empty corpus still yields a well-formed, recordable run
// ============================================================

#[test]
fn empty_store_run_is_recordable() {
    let conn = test_conn();

    let run = analyze_store(&conn, 3);
    assert_eq!(run.document_count, 0);
    assert_eq!(run.unique_tokens, 0);
    assert_eq!(run.corpus_positions, 0);
    assert_eq!(run.topics.len(), 3);
    for topic in &run.topics {
        assert_eq!(topic.frequency, 0);
        assert_eq!(topic.avg_sentiment, 0.0);
        assert!(topic.top_words.is_empty());
    }

    queries::record_run(&conn, &run).unwrap();
    let latest = queries::latest_run(&conn).unwrap().unwrap();
    assert_eq!(latest.run.topics.len(), 3);
}

// ============================================================
// History is append-only and ordered
// ============================================================

#[test]
fn repeated_analysis_appends_to_history() {
    let conn = test_conn();
    queries::insert_headlines(&conn, "444", "t0", &["Első hír ma".to_string()]).unwrap();

    let first = analyze_store(&conn, 2);
    queries::record_run(&conn, &first).unwrap();

    queries::insert_headlines(&conn, "444", "t1", &["Második hír este".to_string()]).unwrap();
    let second = analyze_store(&conn, 2);
    queries::record_run(&conn, &second).unwrap();

    let runs = queries::all_runs(&conn).unwrap();
    assert_eq!(runs.len(), 2);
    // Newest first; the second run saw the larger corpus
    assert!(runs[0].run.run_time >= runs[1].run.run_time);
    assert_eq!(runs[0].run.document_count, 2);
    assert_eq!(runs[1].run.document_count, 1);
}
