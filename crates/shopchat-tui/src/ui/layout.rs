//! Layout helpers for the shopchat TUI.

use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Height of the input row, borders included.
pub const INPUT_HEIGHT: u16 = 3;

/// Regions of the chat screen.
///
/// ```text
/// ┌─ Shop Assistant ───────────────────────┐
/// │ Hello! How many pages?                 │  messages
/// │                          20 pages pls  │
/// └────────────────────────────────────────┘
/// ┌────────────────────────────┐┌─────────┐
/// │ > _                        ││  Send   │  input / send
/// └────────────────────────────┘└─────────┘
///  Enter  Send  Esc  Quit   / waiting for reply  status
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChatLayout {
    pub messages: Rect,
    pub input: Rect,
    pub send: Rect,
    pub status: Rect,
}

/// Split the screen into the chat regions.
pub fn chat_layout(area: Rect, submit_label_width: u16) -> ChatLayout {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(3),
            Constraint::Length(INPUT_HEIGHT),
            Constraint::Length(1),
        ])
        .split(area);

    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Min(10),
            Constraint::Length(submit_label_width.saturating_add(6)),
        ])
        .split(rows[1]);

    ChatLayout {
        messages: rows[0],
        input: cols[0],
        send: cols[1],
        status: rows[2],
    }
}
