/// Normalize recognized text: newlines become spaces, whitespace runs collapse
/// to a single space, the ends are trimmed and everything is lowercased.
pub fn clean(raw: &str) -> String {
    raw.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}
