use serde_json::{json, Value};
use thiserror::Error;

/// Errors constructing a [`Client`](super::Client).
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("Invalid API URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("Failed to build HTTP client: {0}")]
    Build(#[source] reqwest::Error),
}

/// An API request that failed.
///
/// `response` is `{ status, method, url, body }` when a response arrived and
/// `null` when the request never got one (connection, timeout, encoding).
#[derive(Debug, Error)]
#[error("{message}")]
pub struct ApiError {
    pub message: String,
    pub response: Value,
    #[source]
    source: Option<reqwest::Error>,
}

impl ApiError {
    pub fn new(message: impl Into<String>, response: Value) -> Self {
        Self {
            message: message.into(),
            response,
            source: None,
        }
    }

    /// The server answered with a non-success response.
    pub fn from_response(method: &str, url: &str, status: u16, body: Value) -> Self {
        Self {
            message: format!("{} {} responded with {}", method, url, status),
            response: json!({
                "status": status,
                "method": method,
                "url": url,
                "body": body,
            }),
            source: None,
        }
    }

    /// The request failed before a response was received.
    pub fn transport(method: &str, url: &str, source: reqwest::Error) -> Self {
        Self {
            message: format!("{} {} failed: {}", method, url, source),
            response: Value::Null,
            source: Some(source),
        }
    }

    /// Structural view used by the error classifier.
    pub fn fields(&self) -> Value {
        json!({
            "message": self.message,
            "response": self.response,
        })
    }

    pub fn status(&self) -> Option<u16> {
        self.response
            .get("status")
            .and_then(Value::as_u64)
            .and_then(|s| u16::try_from(s).ok())
    }
}
