//! Text layout utilities.
//!
//! - [`wrap_text`] - Word-wrap plain text to a column width
//! - [`visual_width`], [`pad_to_width`], [`tail_to_width`] - Unicode-aware width helpers

mod width;
mod wrap;

pub use width::{pad_to_width, tail_to_width, visual_width};
pub use wrap::wrap_text;
