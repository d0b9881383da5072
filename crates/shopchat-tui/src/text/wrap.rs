//! Text wrapping utilities.

/// Wrap a plain text string to the specified width.
///
/// Embedded newlines start a new line. Always returns at least one line.
pub fn wrap_text(text: &str, width: usize) -> Vec<String> {
    if width == 0 {
        return vec![text.to_string()];
    }
    textwrap::wrap(text, width)
        .into_iter()
        .map(std::borrow::Cow::into_owned)
        .collect()
}
