//! Monospace caret geometry for text nodes.

use unicode_width::UnicodeWidthChar;

/// Display columns occupied by `c` (wide CJK/emoji take two).
fn char_columns(c: char) -> usize {
    UnicodeWidthChar::width(c).unwrap_or(1)
}

/// Caret x-coordinates derived from per-column character advance.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TextMetrics {
    char_width: f32,
}

impl TextMetrics {
    pub fn new(char_width: f32) -> Self {
        let char_width = if char_width.is_finite() {
            char_width.max(1.0)
        } else {
            1.0
        };
        Self { char_width }
    }

    pub fn char_width(&self) -> f32 {
        self.char_width
    }

    /// Caret x for `offset` chars into `content`, relative to the text origin.
    ///
    /// Offsets past the end clamp to the end.
    pub fn caret_x(&self, content: &str, offset: usize) -> f32 {
        let columns: usize = content.chars().take(offset).map(char_columns).sum();
        columns as f32 * self.char_width
    }

    /// Char offset whose caret is closest to `x`.
    ///
    /// Scans every offset `0..=len`; on an exact tie the earlier offset wins.
    pub fn nearest_offset(&self, content: &str, x: f32) -> usize {
        let target = if x.is_finite() { x } else { 0.0 };
        let mut best_offset = 0usize;
        let mut best_distance = target.abs();
        let mut columns = 0usize;
        for (idx, c) in content.chars().enumerate() {
            columns += char_columns(c);
            let distance = (columns as f32 * self.char_width - target).abs();
            if distance < best_distance {
                best_distance = distance;
                best_offset = idx + 1;
            }
        }
        best_offset
    }
}
