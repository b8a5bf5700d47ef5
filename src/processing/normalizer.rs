//! Text normalization ahead of matching

/// Case-fold extracted text for matching.
///
/// Whitespace and punctuation are left untouched so that multi-word terms keep
/// their exact spacing and terms like "c++" keep their symbols.
pub fn normalize(text: &str) -> String {
    text.to_lowercase()
}

/// Leading slice of `text` bounded to `max_chars` characters.
///
/// Counts `char`s rather than bytes, so the slice never splits a UTF-8 sequence.
pub fn preview(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => text[..byte_idx].to_string(),
        None => text.to_string(),
    }
}

/// Whether `c` counts as part of a word for boundary checks.
pub(crate) fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}
