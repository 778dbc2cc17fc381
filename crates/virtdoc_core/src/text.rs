//! Char-offset text helpers.
//!
//! Cursor offsets count Unicode scalar values, not bytes, so every slice of
//! node content goes through these helpers.

/// Number of chars in `text`.
pub fn char_len(text: &str) -> usize {
    text.chars().count()
}

/// Byte index of the char at `char_offset`, clamped to the end of `text`.
pub fn byte_index_for_char(text: &str, char_offset: usize) -> usize {
    text.char_indices()
        .nth(char_offset)
        .map(|(byte, _)| byte)
        .unwrap_or(text.len())
}

/// Split `text` at a char offset.
///
/// Offsets past the end clamp to the end, so the second half is empty.
pub fn split_at_char(text: &str, char_offset: usize) -> (&str, &str) {
    text.split_at(byte_index_for_char(text, char_offset))
}

/// Leading `max_chars` chars of `text`.
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    &text[..byte_index_for_char(text, max_chars)]
}
