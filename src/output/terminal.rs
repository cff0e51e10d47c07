// Colored terminal output for analysis runs and headline listings.
//
// This module handles all terminal-specific formatting: colors, tables,
// summaries. The main.rs display paths delegate here. Everything in this
// module is a one-way progress/report sink — nothing is ever read back.

use colored::Colorize;

use crate::db::models::{Headline, RunRecord};
use crate::output::truncate_chars;

/// Display one analysis run with its full topic table.
pub fn display_run(record: &RunRecord) {
    let run = &record.run;

    println!(
        "\n{}",
        format!("=== Run #{} ({}) ===", record.id, run.run_time).bold()
    );
    println!(
        "  Corpus: {} headlines, {} unique tokens, {} positions",
        run.document_count, run.unique_tokens, run.corpus_positions
    );
    println!(
        "  Model: {} topics, {} passes x {} iterations, trained in {:.3}s",
        run.topic_count, run.pass_count, run.iteration_count, run.training_time
    );
    println!();

    // Header
    println!(
        "  {:>5}  {:>5}  {:>9}  {}",
        "Topic".dimmed(),
        "Freq".dimmed(),
        "Sentiment".dimmed(),
        "Top words".dimmed(),
    );
    println!("  {}", "-".repeat(70).dimmed());

    for topic in &run.topics {
        let sentiment = colorize_sentiment(topic.avg_sentiment);
        let words = if topic.top_words.is_empty() {
            "(none)".dimmed().to_string()
        } else {
            topic.top_words.join(", ")
        };
        println!(
            "  {:>5}  {:>5}  {:>9}  {}",
            topic.topic_id, topic.frequency, sentiment, words
        );
    }
    println!();
}

/// Display a compact history list, newest run first.
pub fn display_history(records: &[RunRecord]) {
    if records.is_empty() {
        println!("No runs recorded yet. Run `hirszemle analyze` first.");
        return;
    }

    println!(
        "\n{}",
        format!("=== Run history ({} runs) ===", records.len()).bold()
    );
    println!();
    println!(
        "  {:>4}  {:<26} {:>6}  {:>6}  {:>7}",
        "Id".dimmed(),
        "Run time".dimmed(),
        "Docs".dimmed(),
        "Vocab".dimmed(),
        "Topics".dimmed(),
    );
    println!("  {}", "-".repeat(60).dimmed());

    for record in records {
        println!(
            "  {:>4}  {:<26} {:>6}  {:>6}  {:>7}",
            record.id,
            truncate_chars(&record.run.run_time, 25),
            record.run.document_count,
            record.run.unique_tokens,
            record.run.topic_count,
        );
    }
    println!();
}

/// Display recently inserted headlines, newest first.
pub fn display_recent(headlines: &[Headline]) {
    if headlines.is_empty() {
        println!("No headlines stored yet. Run `hirszemle ingest` first.");
        return;
    }

    println!(
        "\n{}",
        format!("=== Latest {} headlines ===", headlines.len()).bold()
    );
    println!();
    for h in headlines {
        println!(
            "  {:<6} {}  {}",
            h.source.cyan(),
            h.insert_time.dimmed(),
            truncate_chars(&h.text, 90)
        );
    }
    println!();
}

/// Color a sentiment value: green positive, red negative, plain near zero.
fn colorize_sentiment(value: f64) -> String {
    let formatted = format!("{value:+.3}");
    if value >= 0.1 {
        formatted.green().to_string()
    } else if value <= -0.1 {
        formatted.red().to_string()
    } else {
        formatted
    }
}
