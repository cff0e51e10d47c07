// Per-site headline extraction from raw HTML.
//
// The selectors track each site's current front page layout and will need
// updating when the sites redesign — extraction failures show up as a
// zero-headline warning during ingest, not as an error.

use scraper::{Html, Selector};

/// Extract headlines from the 444.hu front page.
///
/// Headlines live in `h1`/`header` elements carrying the `_1tm224b4` or
/// `item__title` class, each wrapping an anchor with the title text.
pub fn extract_444(html: &str) -> Vec<String> {
    let selector = Selector::parse("h1._1tm224b4 a, header.item__title a")
        .expect("static selector is valid");
    collect_anchor_texts(html, &selector)
}

/// Extract headlines from the index.hu front page (`h2.cikkcim a`).
pub fn extract_index(html: &str) -> Vec<String> {
    let selector = Selector::parse("h2.cikkcim a").expect("static selector is valid");
    collect_anchor_texts(html, &selector)
}

/// Collect the trimmed text content of every element matching `selector`,
/// skipping empties.
fn collect_anchor_texts(html: &str, selector: &Selector) -> Vec<String> {
    let document = Html::parse_document(html);
    document
        .select(selector)
        .map(|element| element.text().collect::<String>().trim().to_string())
        .filter(|title| !title.is_empty())
        .collect()
}
