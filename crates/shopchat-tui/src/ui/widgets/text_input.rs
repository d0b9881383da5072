//! Single-line draft input widget.

use crate::text::{tail_to_width, visual_width};
use crate::ui::theme::Styles;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Paragraph, Widget},
};

/// Draft input widget.
#[derive(Debug, Clone)]
pub struct TextInput<'a> {
    /// The text content.
    content: &'a str,
    /// Cursor position (character index).
    cursor: usize,
    /// Optional block for borders/title.
    block: Option<Block<'a>>,
    /// Placeholder text.
    placeholder: Option<&'a str>,
    /// Prompt prefix (e.g., "> ").
    prompt: &'a str,
}

impl<'a> TextInput<'a> {
    /// Create a new text input.
    pub fn new(content: &'a str, cursor: usize) -> Self {
        Self {
            content,
            cursor,
            block: None,
            placeholder: None,
            prompt: "> ",
        }
    }

    /// Set the block for the text input.
    #[must_use]
    pub fn block(mut self, block: Block<'a>) -> Self {
        self.block = Some(block);
        self
    }

    /// Set placeholder text.
    #[must_use]
    pub fn placeholder(mut self, placeholder: Option<&'a str>) -> Self {
        self.placeholder = placeholder;
        self
    }
}

impl Widget for TextInput<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let inner = if let Some(block) = &self.block {
            let inner = block.inner(area);
            block.clone().render(area, buf);
            inner
        } else {
            area
        };

        if inner.height < 1 || inner.width < 1 {
            return;
        }

        let mut spans = vec![Span::styled(self.prompt, Styles::active())];

        // Show placeholder if empty
        if self.content.is_empty() {
            spans.push(Span::styled("_", Styles::active()));
            if let Some(placeholder) = self.placeholder {
                spans.push(Span::styled(placeholder, Styles::dim()));
            }
            Paragraph::new(Line::from(spans)).render(inner, buf);
            return;
        }

        // Keep the text up to the cursor visible; anything past it may be clipped.
        let split = self
            .content
            .char_indices()
            .nth(self.cursor)
            .map_or(self.content.len(), |(idx, _)| idx);
        let (before, after) = self.content.split_at(split);

        let available = (inner.width as usize)
            .saturating_sub(visual_width(self.prompt))
            .saturating_sub(1);
        let before = tail_to_width(before, available);

        spans.push(Span::styled(before.to_string(), Styles::default()));
        let marker = if after.is_empty() { "_" } else { "|" };
        spans.push(Span::styled(marker, Styles::active()));
        spans.push(Span::styled(after.to_string(), Styles::default()));

        Paragraph::new(Line::from(spans))
            .style(Styles::default())
            .render(inner, buf);
    }
}

/// Editing state for the draft: content plus a cursor.
///
/// The cursor is a character index, so multi-byte input edits cleanly.
#[derive(Debug, Clone, Default)]
pub struct TextInputState {
    content: String,
    cursor: usize,
}

impl TextInputState {
    /// Create a new empty text input state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the current content.
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Cursor position in characters.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Check if the content is empty.
    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    /// Clear the content.
    pub fn clear(&mut self) {
        self.content.clear();
        self.cursor = 0;
    }

    fn char_count(&self) -> usize {
        self.content.chars().count()
    }

    fn byte_index(&self, char_index: usize) -> usize {
        self.content
            .char_indices()
            .nth(char_index)
            .map_or(self.content.len(), |(idx, _)| idx)
    }

    /// Insert a character at the cursor position.
    pub fn insert(&mut self, ch: char) {
        let idx = self.byte_index(self.cursor);
        self.content.insert(idx, ch);
        self.cursor += 1;
    }

    /// Insert a string at the cursor position.
    pub fn insert_str(&mut self, s: &str) {
        let idx = self.byte_index(self.cursor);
        self.content.insert_str(idx, s);
        self.cursor += s.chars().count();
    }

    /// Delete the character before the cursor (backspace).
    pub fn backspace(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
            let idx = self.byte_index(self.cursor);
            self.content.remove(idx);
        }
    }

    /// Delete the character at the cursor (delete).
    pub fn delete(&mut self) {
        if self.cursor < self.char_count() {
            let idx = self.byte_index(self.cursor);
            self.content.remove(idx);
        }
    }

    /// Move cursor left.
    pub fn move_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    /// Move cursor right.
    pub fn move_right(&mut self) {
        if self.cursor < self.char_count() {
            self.cursor += 1;
        }
    }

    /// Move cursor to start.
    pub fn move_home(&mut self) {
        self.cursor = 0;
    }

    /// Move cursor to end.
    pub fn move_end(&mut self) {
        self.cursor = self.char_count();
    }

    /// Create a widget from this state.
    pub fn widget(&self) -> TextInput<'_> {
        TextInput::new(&self.content, self.cursor)
    }
}
