//! shopchat-engine: Headless core for the shop assistant chat widget
//!
//! This crate provides everything that does not touch a terminal:
//! - Messages and the append-only message log
//! - The chat widget state machine (draft, submit, outcomes)
//! - The chat service trait and its HTTP client
//! - A toolkit-neutral view tree
//! - Configuration

pub mod config;
pub mod message;
pub mod service;
pub mod view;
pub mod widget;

// Re-export commonly used types
pub use config::{Config, ConfigError, DEFAULT_GREETING};
pub use message::{Message, MessageLog, Sender};
pub use service::{ChatReply, ChatRequest, ChatService, HttpChatService, ServiceError};
pub use view::{render, Align, Bubble, ChatView, InputView, Tone, ViewOptions};
pub use widget::{
    ChatWidget, KeyPress, Resolution, Submission, Ticket, WidgetState, FALLBACK_REPLY,
};

/// Returns the engine version.
pub fn engine_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
