// Topic model traits — swap-ready abstraction.
//
// The pipeline only needs "fit a model, ask each document for its dominant
// topic, list a topic's representative words". Keeping that behind traits
// lets tests substitute a stub assignment and leaves room for a different
// modeling algorithm later.

use anyhow::Result;

/// A trained topic model over one corpus snapshot.
pub trait TopicModel {
    /// The fixed number of latent topics, valid ids are 0..num_topics.
    fn num_topics(&self) -> usize;

    /// Unique tokens in the training corpus.
    fn vocab_size(&self) -> usize;

    /// The topic with the highest probability for this token sequence.
    ///
    /// Ties break to the lowest topic id, so assignment is deterministic
    /// even for empty or fully out-of-vocabulary input.
    fn dominant_topic(&self, tokens: &[String]) -> usize;

    /// Up to `n` representative tokens for a topic, descending by
    /// topic-word weight. Empty when the vocabulary is empty.
    fn top_words(&self, topic_id: usize, n: usize) -> Vec<String>;
}

/// Trait for fitting a topic model over a normalized corpus.
pub trait TopicModelBuilder {
    fn fit(&self, docs: &[Vec<String>]) -> Result<Box<dyn TopicModel>>;
}
