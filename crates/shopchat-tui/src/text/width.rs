//! Text width utilities.
//!
//! Provides unicode-aware text width calculation and padding.

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Get the visual width of a string in terminal cells.
///
/// Accounts for wide characters (CJK, emoji) that take 2 cells.
pub fn visual_width(s: &str) -> usize {
    UnicodeWidthStr::width(s)
}

/// Pad a string with trailing spaces up to `width` cells.
///
/// Strings already at least `width` wide are returned unchanged.
pub fn pad_to_width(s: &str, width: usize) -> String {
    let current = visual_width(s);
    let mut result = s.to_string();
    result.push_str(&" ".repeat(width.saturating_sub(current)));
    result
}

/// Keep the longest suffix of `s` that fits in `max_width` cells.
///
/// Used for single-line inputs that scroll horizontally with the cursor.
pub fn tail_to_width(s: &str, max_width: usize) -> &str {
    let mut width = 0;
    let mut start = s.len();

    for (idx, ch) in s.char_indices().rev() {
        let ch_width = UnicodeWidthChar::width(ch).unwrap_or(0);
        if width + ch_width > max_width {
            break;
        }
        width += ch_width;
        start = idx;
    }

    &s[start..]
}
