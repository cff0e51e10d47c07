// Output formatting — terminal display for runs, history, and headlines.

pub mod terminal;

/// Truncate to at most `max_chars` characters, appending "..." if cut.
///
/// Counts characters rather than slicing bytes — Hungarian headlines are
/// full of multi-byte accented letters and a byte slice could panic
/// mid-character.
pub fn truncate_chars(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let kept: String = text.chars().take(max_chars).collect();
    format!("{kept}...")
}
