// Data models — Rust structs that map to database rows.
//
// These are the types that flow through the application. They're separate
// from the database queries so other modules can use them without depending
// on rusqlite directly.

use serde::{Deserialize, Serialize};

/// One collected headline. Created during an ingestion batch, never
/// mutated, never deleted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Headline {
    pub id: i64,
    /// Adapter id of the originating site ('444', 'INDEX')
    pub source: String,
    /// Timestamp of the fetch batch this headline arrived in
    pub query_time: String,
    /// Timestamp of persistence
    pub insert_time: String,
    pub text: String,
}

/// Per-topic results within one analysis run.
///
/// Topic ids are only meaningful inside their run — topic 2 of run N has
/// no relation to topic 2 of run N+1.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TopicSummary {
    pub topic_id: usize,
    /// Representative words, descending by topic-word weight
    /// (stored as a JSON array in the DB)
    pub top_words: Vec<String>,
    /// Arithmetic mean of member-headline sentiments; 0.0 when the topic
    /// has no members
    pub avg_sentiment: f64,
    /// Number of headlines whose dominant topic is this one
    pub frequency: u32,
}

/// A completed analysis run, ready to be recorded.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisRun {
    pub run_time: String,
    pub document_count: u32,
    /// Vocabulary size after normalization
    pub unique_tokens: u32,
    /// Total retained token positions across the corpus
    pub corpus_positions: u64,
    pub topic_count: u32,
    pub pass_count: u32,
    pub iteration_count: u32,
    /// Seconds spent training the topic model
    pub training_time: f64,
    /// One entry per topic id, ascending, always exactly topic_count long
    pub topics: Vec<TopicSummary>,
}

/// An analysis run as read back from the history log.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunRecord {
    pub id: i64,
    pub run: AnalysisRun,
}
