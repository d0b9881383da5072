//! UI module for the shopchat TUI.

pub mod chat;
pub mod layout;
pub mod theme;
pub mod widgets;

pub use chat::ChatScreen;
