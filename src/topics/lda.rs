// Latent Dirichlet Allocation via collapsed Gibbs sampling.
//
// Headlines are short documents, so a plain Gibbs sampler over the
// document-topic and topic-word count matrices is fast enough and keeps the
// whole model in-crate. The sampler runs from a fixed seed, so `fit` is
// fully deterministic for a given corpus and parameter set — retraining the
// same snapshot reproduces the same topics.

use std::collections::HashMap;

use anyhow::Result;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

use super::traits::{TopicModel, TopicModelBuilder};

/// Symmetric Dirichlet prior on topic-word distributions.
const BETA: f64 = 0.01;

/// Model configuration for one training run.
#[derive(Debug, Clone, Copy)]
pub struct LdaParams {
    /// Number of latent topics; must be positive
    pub num_topics: usize,
    /// Full sweeps over the corpus per pass
    pub iterations: usize,
    /// Number of passes (total sweeps = passes * iterations)
    pub passes: usize,
    /// RNG seed for the sampler
    pub seed: u64,
}

/// The training vocabulary: unique tokens in first-seen corpus order.
pub struct Vocabulary {
    tokens: Vec<String>,
    index: HashMap<String, usize>,
}

impl Vocabulary {
    /// Collect unique tokens across the corpus, in first-seen order so the
    /// id assignment is deterministic.
    pub fn build(docs: &[Vec<String>]) -> Self {
        let mut tokens = Vec::new();
        let mut index = HashMap::new();
        for doc in docs {
            for token in doc {
                if !index.contains_key(token) {
                    index.insert(token.clone(), tokens.len());
                    tokens.push(token.clone());
                }
            }
        }
        Self { tokens, index }
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Map a token sequence to vocabulary ids, dropping unknown tokens.
    pub fn ids(&self, tokens: &[String]) -> Vec<usize> {
        tokens
            .iter()
            .filter_map(|t| self.index.get(t).copied())
            .collect()
    }
}

/// Fits an [`LdaModel`] with fixed parameters.
pub struct LdaBuilder {
    pub params: LdaParams,
}

impl TopicModelBuilder for LdaBuilder {
    fn fit(&self, docs: &[Vec<String>]) -> Result<Box<dyn TopicModel>> {
        Ok(Box::new(LdaModel::fit(docs, &self.params)?))
    }
}

/// A trained LDA model: the vocabulary plus topic-word counts.
pub struct LdaModel {
    num_topics: usize,
    vocab: Vocabulary,
    /// topic_word[t][w] — positions of word w assigned to topic t
    topic_word: Vec<Vec<u32>>,
    /// topic_totals[t] — total positions assigned to topic t
    topic_totals: Vec<u32>,
    /// Total positions in the training corpus
    corpus_positions: u64,
    /// Symmetric document-topic prior
    alpha: f64,
}

impl LdaModel {
    /// Train a model over the normalized corpus.
    ///
    /// An empty corpus (or one whose combined vocabulary is empty) yields a
    /// valid zero-count model rather than an error — every topic simply has
    /// no weight anywhere.
    pub fn fit(docs: &[Vec<String>], params: &LdaParams) -> Result<LdaModel> {
        if params.num_topics == 0 {
            anyhow::bail!("num_topics must be positive");
        }

        let k = params.num_topics;
        let vocab = Vocabulary::build(docs);
        let v = vocab.len();
        // Symmetric 1/k prior keeps short documents from smearing across
        // all topics
        let alpha = 1.0 / k as f64;

        let mut model = LdaModel {
            num_topics: k,
            topic_word: vec![vec![0u32; v]; k],
            topic_totals: vec![0u32; k],
            corpus_positions: 0,
            vocab,
            alpha,
        };

        let doc_ids: Vec<Vec<usize>> = docs.iter().map(|d| model.vocab.ids(d)).collect();
        model.corpus_positions = doc_ids.iter().map(|d| d.len() as u64).sum();

        if v == 0 || model.corpus_positions == 0 {
            debug!("Empty vocabulary — skipping sampling");
            return Ok(model);
        }

        let mut rng = StdRng::seed_from_u64(params.seed);
        let mut doc_topic = vec![vec![0u32; k]; docs.len()];
        // Random initial assignment per token position
        let mut assignments: Vec<Vec<usize>> = doc_ids
            .iter()
            .enumerate()
            .map(|(d, ids)| {
                ids.iter()
                    .map(|&w| {
                        let t = rng.random_range(0..k);
                        doc_topic[d][t] += 1;
                        model.topic_word[t][w] += 1;
                        model.topic_totals[t] += 1;
                        t
                    })
                    .collect()
            })
            .collect();

        let sweeps = (params.passes * params.iterations).max(1);
        let mut weights = vec![0.0f64; k];

        for _ in 0..sweeps {
            for (d, ids) in doc_ids.iter().enumerate() {
                for (pos, &w) in ids.iter().enumerate() {
                    // Remove the current assignment from the counts
                    let old = assignments[d][pos];
                    doc_topic[d][old] -= 1;
                    model.topic_word[old][w] -= 1;
                    model.topic_totals[old] -= 1;

                    // Full conditional p(t | everything else)
                    for (t, weight) in weights.iter_mut().enumerate() {
                        let phi = (model.topic_word[t][w] as f64 + BETA)
                            / (model.topic_totals[t] as f64 + BETA * v as f64);
                        let theta = doc_topic[d][t] as f64 + alpha;
                        *weight = phi * theta;
                    }

                    let new = sample_index(&weights, &mut rng);
                    assignments[d][pos] = new;
                    doc_topic[d][new] += 1;
                    model.topic_word[new][w] += 1;
                    model.topic_totals[new] += 1;
                }
            }
        }

        debug!(
            topics = k,
            vocab = v,
            positions = model.corpus_positions,
            sweeps = sweeps,
            "LDA training complete"
        );

        Ok(model)
    }

    /// Smoothed topic-word probability.
    fn phi(&self, topic: usize, word: usize) -> f64 {
        (self.topic_word[topic][word] as f64 + BETA)
            / (self.topic_totals[topic] as f64 + BETA * self.vocab.len() as f64)
    }
}

impl TopicModel for LdaModel {
    fn num_topics(&self) -> usize {
        self.num_topics
    }

    fn vocab_size(&self) -> usize {
        self.vocab.len()
    }

    /// Highest log-likelihood topic for the token sequence, using the
    /// corpus-wide topic prevalence as the document-topic prior. Only the
    /// relative ordering of the scores matters; ties (including empty and
    /// fully out-of-vocabulary input) resolve to the lowest topic id because
    /// a later topic must score strictly higher to win.
    fn dominant_topic(&self, tokens: &[String]) -> usize {
        let ids = self.vocab.ids(tokens);
        let prior_total = self.corpus_positions as f64 + self.num_topics as f64 * self.alpha;

        let mut best = 0usize;
        let mut best_score = f64::NEG_INFINITY;
        for t in 0..self.num_topics {
            let mut score = ((self.topic_totals[t] as f64 + self.alpha) / prior_total).ln();
            for &w in &ids {
                score += self.phi(t, w).ln();
            }
            if score > best_score {
                best_score = score;
                best = t;
            }
        }
        best
    }

    /// Up to `n` vocabulary tokens, descending by this topic's word weight
    /// with id-ascending tie-break. Empty corpus means empty lists.
    fn top_words(&self, topic_id: usize, n: usize) -> Vec<String> {
        if self.vocab.is_empty() || topic_id >= self.num_topics {
            return Vec::new();
        }

        let mut word_ids: Vec<usize> = (0..self.vocab.len()).collect();
        word_ids.sort_by(|&a, &b| {
            self.topic_word[topic_id][b]
                .cmp(&self.topic_word[topic_id][a])
                .then(a.cmp(&b))
        });

        word_ids
            .into_iter()
            .take(n)
            .map(|w| self.vocab.tokens[w].clone())
            .collect()
    }
}

/// Draw an index proportionally to `weights` (all non-negative).
fn sample_index(weights: &[f64], rng: &mut StdRng) -> usize {
    let total: f64 = weights.iter().sum();
    let mut target = rng.random::<f64>() * total;
    for (i, w) in weights.iter().enumerate() {
        target -= w;
        if target <= 0.0 {
            return i;
        }
    }
    weights.len() - 1
}
