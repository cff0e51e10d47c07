// Ingestion pipeline: fetch each enabled source's front page, extract
// headlines, and store them with (source, text) deduplication.
//
// A fetch or extraction failure for one source is logged and skipped so the
// remaining sources still run; a storage fault aborts the batch and
// propagates.

use anyhow::Result;
use chrono::Local;
use rusqlite::Connection;
use tracing::{info, warn};

use crate::config::SourceConfig;
use crate::db::queries;
use crate::sources::fetch;

/// What one source contributed to an ingestion batch.
#[derive(Debug)]
pub struct IngestOutcome {
    pub source: &'static str,
    /// Headlines extracted from the page (including already-known ones)
    pub extracted: usize,
    /// Headlines actually inserted (duplicates skipped)
    pub new_headlines: usize,
}

/// Run one ingestion batch over the given sources.
///
/// All headlines in the batch share one query_time; insert_time is set
/// per row at persistence.
pub async fn run(
    conn: &Connection,
    client: &reqwest::Client,
    sources: &[&SourceConfig],
) -> Result<Vec<IngestOutcome>> {
    let query_time = Local::now().format(queries::TIME_FORMAT).to_string();
    let mut outcomes = Vec::new();

    for source_config in sources {
        let source = source_config.source;
        let html = match fetch::fetch_page(client, &source_config.url).await {
            Ok(html) => html,
            Err(e) => {
                warn!(source = %source, error = %e, "Fetch failed, skipping source");
                continue;
            }
        };

        let titles = source.extract(&html);
        if titles.is_empty() {
            warn!(
                source = %source,
                "No headlines extracted — the site layout may have changed"
            );
        }

        let new_headlines = queries::insert_headlines(conn, source.id(), &query_time, &titles)?;
        info!(
            source = %source,
            extracted = titles.len(),
            new = new_headlines,
            "Source updated"
        );

        outcomes.push(IngestOutcome {
            source: source.id(),
            extracted: titles.len(),
            new_headlines,
        });
    }

    let total = queries::total_count(conn)?;
    info!(total = total, "Headlines in store");

    Ok(outcomes)
}
