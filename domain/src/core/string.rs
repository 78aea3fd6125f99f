//! String utilities for the domain layer.

/// Marker appended when [`truncate_chars`] cuts content.
pub const TRUNCATION_MARKER: &str = "\n... (content truncated, the rest of the file was omitted)";

/// Truncate a string to a maximum length with ellipsis (UTF-8 safe)
///
/// Uses byte length for max_len but ensures truncation occurs at valid
/// UTF-8 character boundaries.
pub fn truncate(s: &str, max_len: usize) -> String {
    if s.len() <= max_len {
        s.to_string()
    } else {
        let target = max_len.saturating_sub(3);
        let mut end = target.min(s.len());
        while end > 0 && !s.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}...", &s[..end])
    }
}

/// Keep the first `max_chars` characters and append [`TRUNCATION_MARKER`].
///
/// Returns the (possibly shortened) text and whether it was cut.
pub fn truncate_chars(s: &str, max_chars: usize) -> (String, bool) {
    match s.char_indices().nth(max_chars) {
        Some((end, _)) => (format!("{}{}", &s[..end], TRUNCATION_MARKER), true),
        None => (s.to_string(), false),
    }
}
