use std::env;

use anyhow::Result;

use crate::sources::NewsSource;

/// Central configuration loaded from environment variables.
///
/// Everything is read once at process start via dotenvy and treated as
/// immutable for the lifetime of the process — components receive the
/// values they need through their constructors, never through globals.
#[derive(Debug, Clone)]
pub struct Config {
    /// Path to the SQLite database file
    pub db_path: String,
    /// Number of latent topics to fit per analysis run
    pub num_topics: usize,
    /// Full training passes over the corpus
    pub lda_passes: usize,
    /// Gibbs sweeps per pass
    pub lda_iterations: usize,
    /// RNG seed for the sampler — fixed so runs are reproducible
    pub lda_seed: u64,
    /// How many representative words to keep per topic
    pub top_words: usize,
    /// Polling interval for the `watch` command, in seconds
    pub poll_interval_secs: u64,
    /// How many headlines the `recent` command shows
    pub recent_limit: u32,
    /// Per-source configuration (enable flag + front page URL)
    pub sources: Vec<SourceConfig>,
}

/// One configured news source.
#[derive(Debug, Clone)]
pub struct SourceConfig {
    pub source: NewsSource,
    pub enabled: bool,
    pub url: String,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Every key has a default, so `init` and `status` work on a fresh
    /// checkout without a .env file.
    pub fn load() -> Result<Self> {
        let num_topics = parse_env("HIRSZEMLE_NUM_TOPICS", 5usize)?;
        if num_topics == 0 {
            anyhow::bail!("HIRSZEMLE_NUM_TOPICS must be a positive integer");
        }

        let sources = NewsSource::all()
            .iter()
            .map(|&source| {
                let key = source.env_key();
                Ok(SourceConfig {
                    source,
                    enabled: parse_env(&format!("HIRSZEMLE_SOURCE_{key}_ENABLED"), true)?,
                    url: env::var(format!("HIRSZEMLE_SOURCE_{key}_URL"))
                        .unwrap_or_else(|_| source.default_url().to_string()),
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            db_path: env::var("HIRSZEMLE_DB_PATH").unwrap_or_else(|_| "./hirszemle.db".to_string()),
            num_topics,
            lda_passes: parse_env("HIRSZEMLE_LDA_PASSES", 2usize)?,
            lda_iterations: parse_env("HIRSZEMLE_LDA_ITERATIONS", 50usize)?,
            lda_seed: parse_env("HIRSZEMLE_LDA_SEED", 42u64)?,
            top_words: parse_env("HIRSZEMLE_TOP_WORDS", 5usize)?,
            poll_interval_secs: parse_env("HIRSZEMLE_POLL_INTERVAL_SECS", 600u64)?,
            recent_limit: parse_env("HIRSZEMLE_RECENT_LIMIT", 10u32)?,
            sources,
        })
    }

    /// The sources that are currently enabled.
    pub fn enabled_sources(&self) -> Vec<&SourceConfig> {
        self.sources.iter().filter(|s| s.enabled).collect()
    }
}

/// Read an env var and parse it, falling back to `default` when unset.
/// A set-but-unparsable value is an error rather than a silent fallback.
fn parse_env<T: std::str::FromStr>(key: &str, default: T) -> Result<T> {
    match env::var(key) {
        Ok(raw) => raw
            .parse::<T>()
            .map_err(|_| anyhow::anyhow!("{key} has an invalid value: {raw}")),
        Err(_) => Ok(default),
    }
}
