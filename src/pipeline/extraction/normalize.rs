/// Character used by the document converter to mark bold/italic runs.
pub const EMPHASIS_MARKER: char = '*';

/// Normalize a raw cell or captured value before it lands in a record.
/// Drops emphasis markers, collapses whitespace runs (newlines included)
/// to a single space, and trims both ends.
pub fn normalize_value(raw: &str) -> String {
    strip_emphasis(raw)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Remove emphasis markers only, leaving spacing untouched.
pub fn strip_emphasis(raw: &str) -> String {
    raw.chars().filter(|c| *c != EMPHASIS_MARKER).collect()
}
