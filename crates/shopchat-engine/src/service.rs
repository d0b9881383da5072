//! Chat service client.
//!
//! The chat service is an external HTTP endpoint that turns a message into a
//! reply. The widget only depends on the [`ChatService`] trait; the HTTP
//! implementation lives here as [`HttpChatService`].

use crate::config::Config;
use async_trait::async_trait;
use reqwest::{Client, Url};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Something that produces a reply for a message.
#[async_trait]
pub trait ChatService: Send + Sync {
    /// Send one message and wait for the reply text.
    async fn send(&self, message: &str) -> Result<String, ServiceError>;
}

/// Request body for `POST /chat`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChatRequest {
    pub message: String,
}

/// Successful response body for `POST /chat`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChatReply {
    pub reply: String,
}

/// HTTP implementation of [`ChatService`].
#[derive(Debug, Clone)]
pub struct HttpChatService {
    client: Client,
    endpoint: Url,
}

impl HttpChatService {
    /// Create a client posting to `base_url` joined with `chat_path`.
    ///
    /// With `timeout` unset the transport defaults apply.
    pub fn new(
        base_url: &str,
        chat_path: &str,
        timeout: Option<Duration>,
    ) -> Result<Self, ServiceError> {
        let endpoint = join_endpoint(base_url, chat_path)?;

        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(ServiceError::Transport)?;

        Ok(Self { client, endpoint })
    }

    /// Create a client from the engine configuration.
    pub fn from_config(config: &Config) -> Result<Self, ServiceError> {
        Self::new(
            &config.base_url,
            &config.chat_path,
            config.request_timeout_secs.map(Duration::from_secs),
        )
    }

    /// The full URL requests are posted to.
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[async_trait]
impl ChatService for HttpChatService {
    async fn send(&self, message: &str) -> Result<String, ServiceError> {
        let body = ChatRequest {
            message: message.to_string(),
        };

        let response = self
            .client
            .post(self.endpoint.clone())
            .json(&body)
            .send()
            .await
            .map_err(ServiceError::Transport)?;

        let status = response.status();
        let text = response.text().await.map_err(ServiceError::Transport)?;

        if !status.is_success() {
            return Err(ServiceError::Status {
                status: status.as_u16(),
                body: text,
            });
        }

        let reply: ChatReply = serde_json::from_str(&text).map_err(ServiceError::Decode)?;
        Ok(reply.reply)
    }
}

/// Join a base URL and a path, tolerating stray slashes on either side.
fn join_endpoint(base_url: &str, chat_path: &str) -> Result<Url, ServiceError> {
    let joined = format!(
        "{}/{}",
        base_url.trim_end_matches('/'),
        chat_path.trim_start_matches('/')
    );
    Url::parse(&joined).map_err(|e| ServiceError::InvalidUrl {
        url: joined,
        reason: e.to_string(),
    })
}

/// Errors that can occur when talking to the chat service.
///
/// The widget shows every variant to the user the same way; the variants only
/// matter for the diagnostic log.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    /// Connection, DNS, timeout, or body read failure.
    #[error("transport error: {0}")]
    Transport(#[source] reqwest::Error),

    /// The service answered with a non-2xx status.
    #[error("service returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    /// The body was not JSON or had no string `reply` field.
    #[error("malformed response: {0}")]
    Decode(#[source] serde_json::Error),

    /// The configured endpoint is not a valid URL.
    #[error("invalid endpoint URL {url}: {reason}")]
    InvalidUrl { url: String, reason: String },

    /// Any other failure reported by a custom service.
    #[error("{0}")]
    Other(String),
}
