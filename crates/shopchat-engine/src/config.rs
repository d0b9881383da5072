//! Configuration types for the shopchat engine.
//!
//! The configuration is a small JSON file. Every field has a default, so a
//! missing file or a partial file both work.

use serde::{Deserialize, Serialize};
use std::path::Path;

/// Opening bot message shown before the user types anything.
pub const DEFAULT_GREETING: &str =
    "Hello! Welcome to My Xerox Shop. How many pages do you need to print?";

/// Main configuration for shopchat.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Base URL of the chat service.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Path of the chat endpoint, relative to `base_url`.
    #[serde(default = "default_chat_path")]
    pub chat_path: String,

    /// Greeting the log opens with. Empty disables it.
    #[serde(default = "default_greeting")]
    pub greeting: String,

    /// Title shown above the conversation.
    #[serde(default = "default_title")]
    pub title: String,

    /// Placeholder shown in the empty input.
    #[serde(default = "default_placeholder")]
    pub placeholder: String,

    /// Request timeout in seconds. Unset means the transport default.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_timeout_secs: Option<u64>,
}

fn default_base_url() -> String {
    "http://localhost:8000".into()
}

fn default_chat_path() -> String {
    "/chat".into()
}

fn default_greeting() -> String {
    DEFAULT_GREETING.into()
}

fn default_title() -> String {
    "Shop Assistant".into()
}

fn default_placeholder() -> String {
    "Ask about printing prices...".into()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            chat_path: default_chat_path(),
            greeting: default_greeting(),
            title: default_title(),
            placeholder: default_placeholder(),
            request_timeout_secs: None,
        }
    }
}

impl Config {
    /// Load configuration from a file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::Io)?;
        serde_json::from_str(&content).map_err(ConfigError::Parse)
    }

    /// Load configuration from a file, falling back to defaults if it does not exist.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        Self::load(path)
    }

    /// Save configuration to a file.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let content = serde_json::to_string_pretty(self).map_err(ConfigError::Serialize)?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(ConfigError::Io)?;
        }
        std::fs::write(path, content).map_err(ConfigError::Io)
    }

    /// Return a copy pointing at a different chat service.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

/// Errors that can occur when working with configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// I/O error reading or writing config.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Error parsing config JSON.
    #[error("Parse error: {0}")]
    Parse(#[source] serde_json::Error),

    /// Error serializing config to JSON.
    #[error("Serialize error: {0}")]
    Serialize(#[source] serde_json::Error),
}
