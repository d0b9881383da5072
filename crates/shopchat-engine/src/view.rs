//! Toolkit-neutral view tree.
//!
//! [`render`] turns the log and the draft into a [`ChatView`] that a frontend
//! draws. It reads nothing else, so the same state always renders the same way.

use crate::config::Config;
use crate::message::{MessageLog, Sender};

/// Horizontal placement of a bubble.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Right,
}

/// Colour family of a bubble.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    /// Distinct colour used for the user's own messages.
    Accent,
    /// Neutral colour used for bot messages.
    Neutral,
}

/// One message as it should be drawn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bubble {
    pub align: Align,
    pub tone: Tone,
    pub text: String,
}

/// The input box bound to the draft.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputView {
    pub text: String,
    /// Shown only while `text` is empty.
    pub placeholder: Option<String>,
}

/// Everything a frontend needs to draw the widget.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatView {
    pub title: String,
    pub bubbles: Vec<Bubble>,
    pub input: InputView,
    pub submit_label: String,
    /// Whether a reply is outstanding.
    pub awaiting: bool,
}

/// Static labels used when rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewOptions {
    pub title: String,
    pub placeholder: String,
    pub submit_label: String,
}

impl Default for ViewOptions {
    fn default() -> Self {
        Self::from(&Config::default())
    }
}

impl From<&Config> for ViewOptions {
    fn from(config: &Config) -> Self {
        Self {
            title: config.title.clone(),
            placeholder: config.placeholder.clone(),
            submit_label: "Send".into(),
        }
    }
}

/// Map a sender to its bubble placement and colour.
pub fn bubble_style(sender: Sender) -> (Align, Tone) {
    match sender {
        Sender::User => (Align::Right, Tone::Accent),
        Sender::Bot => (Align::Left, Tone::Neutral),
    }
}

/// Render the log and draft into a view tree.
pub fn render(log: &MessageLog, draft: &str, options: &ViewOptions) -> ChatView {
    let bubbles = log
        .iter()
        .map(|message| {
            let (align, tone) = bubble_style(message.sender());
            Bubble {
                align,
                tone,
                text: message.text().to_string(),
            }
        })
        .collect();

    let placeholder = (draft.is_empty() && !options.placeholder.is_empty())
        .then(|| options.placeholder.clone());

    ChatView {
        title: options.title.clone(),
        bubbles,
        input: InputView {
            text: draft.to_string(),
            placeholder,
        },
        submit_label: options.submit_label.clone(),
        awaiting: false,
    }
}
