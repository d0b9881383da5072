//! Reusable widgets for the shopchat TUI.

pub mod text_input;

pub use text_input::TextInputState;
