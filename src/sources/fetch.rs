// HTTP fetching for front pages — a thin reqwest wrapper.

use anyhow::{Context, Result};
use tracing::debug;

/// Build the shared HTTP client used for all front page fetches.
pub fn build_client() -> Result<reqwest::Client> {
    reqwest::Client::builder()
        .user_agent("hirszemle/0.1 (headline collector)")
        .build()
        .context("Failed to build HTTP client")
}

/// Fetch a front page and return its body as text.
///
/// Non-2xx responses are errors — the caller decides whether a failed
/// source aborts the batch or is skipped.
pub async fn fetch_page(client: &reqwest::Client, url: &str) -> Result<String> {
    debug!(url = url, "Fetching front page");

    let response = client
        .get(url)
        .send()
        .await
        .with_context(|| format!("Request failed: {url}"))?;

    if !response.status().is_success() {
        anyhow::bail!("{url} returned {}", response.status());
    }

    response
        .text()
        .await
        .with_context(|| format!("Failed to read response body from {url}"))
}
