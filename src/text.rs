// Headline text normalization — shared by topic modeling and matching.

use std::collections::HashSet;

use stop_words::{get, LANGUAGE};

/// Function words the generic list misses but that dominate Hungarian
/// headline text (verb prefixes, common conjunctions).
const EXTRA_STOP_WORDS: &[&str] = &[
    "a", "az", "és", "hogy", "nem", "ez", "van", "volt", "egy", "de", "is", "aki", "ami", "amely",
    "meg", "fel", "ki", "be", "le", "el", "át", "rá", "te", "mi", "ti", "ők", "én", "ő", "olyan",
    "ilyen", "csak", "így", "úgy", "vagy", "illetve", "azaz", "tehát", "mint", "akkor", "ha",
    "mert", "pedig", "után", "szerint", "között", "alatt",
];

/// Turns raw headline text into the token sequence the model consumes.
///
/// Construction loads the stop-word set once; `normalize` itself is a pure
/// function of its input.
pub struct Normalizer {
    stop_words: HashSet<String>,
}

impl Normalizer {
    /// Build a normalizer with the Hungarian stop-word set.
    pub fn hungarian() -> Self {
        let mut stop_words: HashSet<String> = get(LANGUAGE::Hungarian).into_iter().collect();
        stop_words.extend(EXTRA_STOP_WORDS.iter().map(|w| w.to_string()));
        Self { stop_words }
    }

    /// Lower-case, split on whitespace, keep purely alphanumeric tokens,
    /// drop stop words. Empty or fully-stopword input yields an empty
    /// sequence, never an error. Reapplying to already-normalized text is
    /// a fixed point.
    pub fn normalize(&self, text: &str) -> Vec<String> {
        text.to_lowercase()
            .split_whitespace()
            .filter(|word| !word.is_empty() && word.chars().all(char::is_alphanumeric))
            .filter(|word| !self.stop_words.contains(*word))
            .map(|word| word.to_string())
            .collect()
    }
}
