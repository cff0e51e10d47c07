// Lexicon-based sentiment scoring for headline text.
//
// A small Hungarian valence lexicon (word -> integer in [-3, 3]) is embedded
// at compile time. The score of a headline is the mean valence of its
// matched words, sign-flipped under a nearby negator, normalized to
// [-1.0, 1.0]. Headlines with no lexicon hits are neutral (0.0).

use std::collections::HashMap;

use once_cell::sync::Lazy;

static LEXICON: Lazy<HashMap<String, i32>> = Lazy::new(|| {
    let raw = include_str!("../sentiment_lexicon.json");
    serde_json::from_str::<HashMap<String, i32>>(raw).expect("valid sentiment lexicon")
});

/// Maximum absolute word valence in the lexicon, used for normalization.
const MAX_VALENCE: f64 = 3.0;

/// Stateless polarity scorer over raw headline text.
#[derive(Debug, Clone, Default)]
pub struct SentimentScorer;

impl SentimentScorer {
    pub fn new() -> Self {
        Self
    }

    /// Score a headline in [-1.0, 1.0]; 0.0 is neutral.
    ///
    /// Pure function: tokenizes to lowercase alphanumeric words, sums
    /// lexicon valences (inverted when a negator appears within the three
    /// preceding tokens), and divides by the number of matched words times
    /// the lexicon's maximum valence.
    pub fn score(&self, text: &str) -> f64 {
        let tokens: Vec<String> = tokenize(text).collect();
        let mut sum: i32 = 0;
        let mut matched: usize = 0;

        for i in 0..tokens.len() {
            let base = *LEXICON.get(tokens[i].as_str()).unwrap_or(&0);
            if base == 0 {
                continue;
            }

            let negated = (1..=3).any(|k| i >= k && is_negator(tokens[i - k].as_str()));
            sum += if negated { -base } else { base };
            matched += 1;
        }

        if matched == 0 {
            return 0.0;
        }
        sum as f64 / (MAX_VALENCE * matched as f64)
    }
}

/// Alphanumeric tokens, lower-cased.
fn tokenize(s: &str) -> impl Iterator<Item = String> + '_ {
    s.split(|c: char| !c.is_alphanumeric())
        .filter(|t| !t.is_empty())
        .map(|t| t.to_lowercase())
}

/// Hungarian negators that flip the valence of a following word.
fn is_negator(tok: &str) -> bool {
    matches!(
        tok,
        "nem" | "ne" | "soha" | "sem" | "semmi" | "nincs" | "nincsen" | "nélkül"
    )
}
