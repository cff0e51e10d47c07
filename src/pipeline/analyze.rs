// Analysis pipeline: one topic/sentiment run over a corpus snapshot.
//
// The run is read-only with respect to the headline store — it takes the
// snapshot as a slice and produces an AnalysisRun value. Persisting the
// result is the caller's job, so a failed stage never leaves a partial run
// behind.

use std::time::Instant;

use anyhow::Result;
use chrono::Local;
use tracing::info;

use crate::db::models::{AnalysisRun, Headline, TopicSummary};
use crate::sentiment::SentimentScorer;
use crate::text::Normalizer;
use crate::topics::traits::TopicModelBuilder;

/// Run-scoped analysis parameters, recorded in the run snapshot.
#[derive(Debug, Clone, Copy)]
pub struct RunSettings {
    pub num_topics: usize,
    pub passes: usize,
    pub iterations: usize,
    /// Representative words kept per topic
    pub top_words: usize,
}

/// Execute one analysis run over the corpus snapshot.
///
/// Normalizes every headline, fits the topic model over the full corpus,
/// assigns each headline its dominant topic and sentiment, and aggregates
/// per-topic frequency and mean sentiment. The returned topic list always
/// has exactly `num_topics` entries in ascending id order — topics with no
/// members appear with frequency 0 and neutral sentiment.
pub fn run(
    headlines: &[Headline],
    normalizer: &Normalizer,
    scorer: &SentimentScorer,
    builder: &dyn TopicModelBuilder,
    settings: &RunSettings,
) -> Result<AnalysisRun> {
    let docs: Vec<Vec<String>> = headlines
        .iter()
        .map(|h| normalizer.normalize(&h.text))
        .collect();
    let corpus_positions: u64 = docs.iter().map(|d| d.len() as u64).sum();

    info!(
        documents = headlines.len(),
        positions = corpus_positions,
        topics = settings.num_topics,
        "Training topic model"
    );

    let started = Instant::now();
    let model = builder.fit(&docs)?;
    let training_time = started.elapsed().as_secs_f64();

    let num_topics = model.num_topics();
    let mut sentiment_sums = vec![0.0f64; num_topics];
    let mut frequencies = vec![0u32; num_topics];

    for (headline, tokens) in headlines.iter().zip(&docs) {
        let topic = model.dominant_topic(tokens);
        anyhow::ensure!(
            topic < num_topics,
            "Model assigned out-of-range topic {topic}"
        );
        sentiment_sums[topic] += scorer.score(&headline.text);
        frequencies[topic] += 1;
    }

    let topics = (0..num_topics)
        .map(|topic_id| {
            let frequency = frequencies[topic_id];
            let avg_sentiment = if frequency > 0 {
                sentiment_sums[topic_id] / frequency as f64
            } else {
                0.0
            };
            TopicSummary {
                topic_id,
                top_words: model.top_words(topic_id, settings.top_words),
                avg_sentiment,
                frequency,
            }
        })
        .collect();

    Ok(AnalysisRun {
        run_time: Local::now().to_rfc3339(),
        document_count: headlines.len() as u32,
        unique_tokens: model.vocab_size() as u32,
        corpus_positions,
        topic_count: num_topics as u32,
        pass_count: settings.passes as u32,
        iteration_count: settings.iterations as u32,
        training_time,
        topics,
    })
}
