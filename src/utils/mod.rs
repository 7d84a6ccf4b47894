//! Project-specific utilities live here.

/// Truncate `text` to at most `limit` characters, appending an ellipsis
/// when anything was cut. Safe on multi-byte input.
pub fn truncate_blurb(text: &str, limit: usize) -> String {
    if text.chars().count() <= limit {
        return text.to_string();
    }
    let mut cut: String = text.chars().take(limit).collect();
    cut.push_str("...");
    cut
}
