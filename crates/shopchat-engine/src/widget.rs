//! The chat widget state machine.
//!
//! [`ChatWidget`] owns the message log and the draft. It never talks to the
//! network itself: [`ChatWidget::submit`] hands back a [`Submission`] that the
//! caller sends to a [`ChatService`], and the outcome comes back through
//! [`ChatWidget::complete`]. [`ChatWidget::send`] chains the three steps for
//! callers that have nothing else to do while waiting.
//!
//! Every submission gets a [`Ticket`]. Each outcome is applied once, as soon
//! as it arrives, so a slow request never holds back the replies to later
//! ones. Outcomes for tickets that are unknown or already resolved are dropped.

use crate::message::{Message, MessageLog};
use crate::service::{ChatService, ServiceError};
use crate::view::{self, ChatView, ViewOptions};
use std::collections::BTreeSet;
use tracing::{debug, warn};

/// Bot message appended whenever the chat service fails, whatever the cause.
pub const FALLBACK_REPLY: &str = "Sorry, I am having trouble connecting to the shop server.";

/// Identifies one submission. Tickets increase monotonically per widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Ticket(u64);

impl Ticket {
    pub fn value(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for Ticket {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A message that has been committed to the log and must now be sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    pub ticket: Ticket,
    /// The draft exactly as typed, surrounding whitespace included.
    pub text: String,
}

/// A key press, as far as the widget cares.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyPress {
    Enter,
    Char(char),
    Other,
}

/// Whether the widget is waiting on the chat service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WidgetState {
    Idle,
    /// `in_flight` submissions have not had their bot message appended yet.
    AwaitingResponse { in_flight: usize },
}

/// What [`ChatWidget::complete`] did with an outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    /// The service reply was accepted.
    Replied,
    /// The service failed and the fallback message was accepted.
    Fallback,
    /// The ticket was unknown or already resolved.
    Ignored,
}

/// Conversation history plus the in-progress draft.
#[derive(Debug, Clone, Default)]
pub struct ChatWidget {
    log: MessageLog,
    draft: String,
    next_ticket: u64,
    outstanding: BTreeSet<Ticket>,
}

impl ChatWidget {
    /// Create a widget with an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a widget whose log opens with a bot greeting.
    pub fn with_greeting(greeting: &str) -> Self {
        Self {
            log: MessageLog::with_greeting(greeting),
            ..Self::default()
        }
    }

    pub fn log(&self) -> &MessageLog {
        &self.log
    }

    pub fn draft(&self) -> &str {
        &self.draft
    }

    pub fn state(&self) -> WidgetState {
        match self.outstanding.len() {
            0 => WidgetState::Idle,
            in_flight => WidgetState::AwaitingResponse { in_flight },
        }
    }

    /// Replace the draft. No validation.
    pub fn on_draft_change(&mut self, text: impl Into<String>) {
        self.draft = text.into();
    }

    /// Commit the draft.
    ///
    /// Appends the user message, clears the draft and returns the submission
    /// to send. Does nothing and returns `None` if the draft is blank.
    pub fn submit(&mut self) -> Option<Submission> {
        if self.draft.trim().is_empty() {
            return None;
        }

        let text = std::mem::take(&mut self.draft);
        self.log.push(Message::user(text.clone()));

        let ticket = Ticket(self.next_ticket);
        self.next_ticket += 1;
        self.outstanding.insert(ticket);
        debug!(%ticket, chars = text.chars().count(), "message submitted");

        Some(Submission { ticket, text })
    }

    /// Enter submits; every other key is ignored.
    pub fn on_key_press(&mut self, key: KeyPress) -> Option<Submission> {
        match key {
            KeyPress::Enter => self.submit(),
            KeyPress::Char(_) | KeyPress::Other => None,
        }
    }

    /// Record the chat service outcome for a submission.
    ///
    /// Failures are logged and replaced with [`FALLBACK_REPLY`]; they never
    /// reach the caller.
    pub fn complete(
        &mut self,
        ticket: Ticket,
        outcome: Result<String, ServiceError>,
    ) -> Resolution {
        if !self.outstanding.remove(&ticket) {
            debug!(%ticket, "ignoring outcome for unknown or resolved ticket");
            return Resolution::Ignored;
        }

        let (message, resolution) = match outcome {
            Ok(reply) => (Message::bot(reply), Resolution::Replied),
            Err(e) => {
                warn!(%ticket, error = %e, "chat service request failed");
                (Message::bot(FALLBACK_REPLY), Resolution::Fallback)
            }
        };

        self.log.push(message);
        if self.outstanding.first().is_some_and(|earliest| *earliest < ticket) {
            debug!(%ticket, outstanding = self.outstanding.len(), "reply overtook earlier submissions");
        }

        resolution
    }

    /// Submit the draft and wait for the service to answer.
    ///
    /// Returns `None` if the draft was blank and nothing was sent.
    pub async fn send(&mut self, service: &dyn ChatService) -> Option<Resolution> {
        let submission = self.submit()?;
        let outcome = service.send(&submission.text).await;
        Some(self.complete(submission.ticket, outcome))
    }

    /// Build the view tree for the current state.
    pub fn render(&self, options: &ViewOptions) -> ChatView {
        let mut view = view::render(&self.log, &self.draft, options);
        view.awaiting = self.state() != WidgetState::Idle;
        view
    }
}
