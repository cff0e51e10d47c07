// News source adapters — fetch a front page and extract headline strings.
//
// Each supported site is one variant of a closed enum, selected explicitly
// by the caller. The rest of the pipeline only ever sees the adapter's
// output: an ordered list of raw headline strings per fetch.

pub mod extract;
pub mod fetch;

/// A supported news site.
///
/// Adding a site means adding a variant here plus its selector logic in
/// `extract` — there is no runtime string-keyed dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NewsSource {
    /// 444.hu
    NegyNegyNegy,
    /// index.hu
    Index,
}

impl NewsSource {
    /// All known sources, in the order they're polled.
    pub fn all() -> &'static [NewsSource] {
        &[NewsSource::NegyNegyNegy, NewsSource::Index]
    }

    /// Stable identifier stored in the `source` column of the headline table.
    pub fn id(&self) -> &'static str {
        match self {
            NewsSource::NegyNegyNegy => "444",
            NewsSource::Index => "INDEX",
        }
    }

    /// Suffix used in the per-source env var names
    /// (HIRSZEMLE_SOURCE_<KEY>_ENABLED / _URL).
    pub fn env_key(&self) -> &'static str {
        match self {
            NewsSource::NegyNegyNegy => "444",
            NewsSource::Index => "INDEX",
        }
    }

    /// Front page URL used when no override is configured.
    pub fn default_url(&self) -> &'static str {
        match self {
            NewsSource::NegyNegyNegy => "https://444.hu",
            NewsSource::Index => "https://index.hu",
        }
    }

    /// Extract headline strings from fetched front page markup.
    pub fn extract(&self, html: &str) -> Vec<String> {
        match self {
            NewsSource::NegyNegyNegy => extract::extract_444(html),
            NewsSource::Index => extract::extract_index(html),
        }
    }
}

impl std::fmt::Display for NewsSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.id())
    }
}
