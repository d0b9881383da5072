//! The chat screen: message bubbles, draft input, send control, status bar.

use crate::app::App;
use crate::text::{pad_to_width, visual_width, wrap_text};
use crate::ui::layout::{chat_layout, ChatLayout};
use crate::ui::theme::{spinner, Styles};
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};
use shopchat_engine::{Align, ChatView};

/// Bubbles never shrink below this many columns, space permitting.
const MIN_BUBBLE_WIDTH: usize = 12;

/// Keys listed on the left of the status line.
const KEY_HINTS: [(&str, &str); 3] = [("Enter", "Send"), ("Up/Down", "Scroll"), ("Esc", "Quit")];

/// Lay out every bubble of the view as terminal lines for a list `width` columns wide.
///
/// Bubbles take at most three quarters of the width. User bubbles hug the right
/// edge, bot bubbles the left; consecutive bubbles are separated by a blank line.
pub fn bubble_lines(view: &ChatView, width: u16) -> Vec<Line<'static>> {
    let width = usize::from(width);
    let max_bubble = (width * 3 / 4).max(MIN_BUBBLE_WIDTH).min(width);
    let text_width = max_bubble.saturating_sub(2).max(1);

    let mut lines = Vec::new();
    for (i, bubble) in view.bubbles.iter().enumerate() {
        if i > 0 {
            lines.push(Line::default());
        }

        let wrapped = wrap_text(&bubble.text, text_width);
        let inner = wrapped.iter().map(|l| visual_width(l)).max().unwrap_or(0);
        let indent = match bubble.align {
            Align::Left => 0,
            Align::Right => width.saturating_sub(inner + 2),
        };
        let style = Styles::bubble(bubble.tone);

        for line in wrapped {
            lines.push(Line::from(vec![
                Span::raw(" ".repeat(indent)),
                Span::styled(format!(" {} ", pad_to_width(&line, inner)), style),
            ]));
        }
    }
    lines
}

fn messages_block(title: &str) -> Block<'static> {
    Block::default()
        .title(format!(" {title} "))
        .title_style(Styles::title())
        .borders(Borders::ALL)
        .border_style(Styles::border())
        .style(Styles::default())
}

/// How far the message list can scroll up when drawn into `area`.
pub fn max_scroll(view: &ChatView, area: Rect) -> usize {
    let layout = chat_layout(area, label_width(&view.submit_label));
    let inner = messages_block(&view.title).inner(layout.messages);
    bubble_lines(view, inner.width)
        .len()
        .saturating_sub(usize::from(inner.height))
}

fn label_width(label: &str) -> u16 {
    u16::try_from(visual_width(label)).unwrap_or(u16::MAX)
}

/// Right-hand status text: a spinner while replies are outstanding, otherwise
/// a marker when the list is not following the newest message.
fn status_indicator(view: &ChatView, scroll: usize, tick: usize) -> Option<String> {
    if view.awaiting {
        Some(format!("{} waiting for reply", spinner(tick)))
    } else if scroll > 0 {
        Some("scrolled".to_string())
    } else {
        None
    }
}

fn render_status(indicator: Option<&str>, area: Rect, buf: &mut Buffer) {
    buf.set_style(area, Styles::status_bar());

    let indicator_width = indicator.map_or(0, |text| label_width(text).saturating_add(1));
    let [hints_area, indicator_area] =
        Layout::horizontal([Constraint::Min(0), Constraint::Length(indicator_width)]).areas(area);

    let hints: Vec<Span> = KEY_HINTS
        .iter()
        .flat_map(|(key, label)| {
            [
                Span::styled(format!(" {key} "), Styles::key_hint()),
                Span::styled(format!(" {label} "), Styles::key_label()),
            ]
        })
        .collect();
    Paragraph::new(Line::from(hints)).render(hints_area, buf);

    if let Some(text) = indicator {
        Paragraph::new(format!("{text} "))
            .style(Styles::status_bar())
            .alignment(Alignment::Right)
            .render(indicator_area, buf);
    }
}

/// Screen regions for the given view, used for mouse hit-testing.
pub fn screen_layout(view: &ChatView, area: Rect) -> ChatLayout {
    chat_layout(area, label_width(&view.submit_label))
}

/// Widget drawing the whole chat screen for an [`App`].
pub struct ChatScreen<'a> {
    app: &'a App,
}

impl<'a> ChatScreen<'a> {
    pub fn new(app: &'a App) -> Self {
        Self { app }
    }
}

impl Widget for ChatScreen<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let view = self.app.view();
        let layout = screen_layout(&view, area);

        // Messages, pinned to the bottom unless scrolled
        let block = messages_block(&view.title);
        let inner = block.inner(layout.messages);
        block.render(layout.messages, buf);

        let lines = bubble_lines(&view, inner.width);
        let max = lines.len().saturating_sub(usize::from(inner.height));
        let top = max - self.app.scroll.min(max);
        Paragraph::new(lines)
            .scroll((u16::try_from(top).unwrap_or(u16::MAX), 0))
            .render(inner, buf);

        // Draft input
        let input_block = Block::default()
            .borders(Borders::ALL)
            .border_style(Styles::border_active())
            .style(Styles::default());
        self.app
            .input
            .widget()
            .placeholder(view.input.placeholder.as_deref())
            .block(input_block)
            .render(layout.input, buf);

        // Send control
        Paragraph::new(Line::from(Span::styled(
            format!(" {} ", view.submit_label),
            Styles::button(),
        )))
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Styles::border())
                .style(Styles::default()),
        )
        .render(layout.send, buf);

        let indicator = status_indicator(&view, self.app.scroll, self.app.tick);
        render_status(indicator.as_deref(), layout.status, buf);
    }
}
