//! Error classification, reporting and exit codes.
//!
//! A command error is a remote API error when some cause in its chain exposes
//! a `response` field holding a JSON object. An empty `{}` response counts;
//! a `null` one does not.

use serde_json::{json, Value};
use thiserror::Error;

use crate::client::{is_api_response_error, ApiError, ClientError};
use crate::config::ConfigError;

/// Exit code constants.
pub mod codes {
    /// Command completed.
    pub const SUCCESS: i32 = 0;

    /// Command failed, or config/client setup failed.
    pub const FAILURE: i32 = 1;

    /// Internal defect (e.g., no default command registered).
    pub const SOFTWARE: i32 = 70;
}

/// Fatal orchestrator failures. Nothing from a command ends up here.
#[derive(Debug, Error)]
pub enum RunError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Client error: {0}")]
    Client(#[from] ClientError),

    #[error("Missing default command '{name}'")]
    MissingDefaultCommand { name: String },
}

impl RunError {
    pub fn exit_code(&self) -> i32 {
        match self {
            RunError::Config(_) | RunError::Client(_) => codes::FAILURE,
            RunError::MissingDefaultCommand { .. } => codes::SOFTWARE,
        }
    }
}

/// A command error after classification.
#[derive(Debug)]
pub enum ClassifiedError {
    Generic(anyhow::Error),
    RemoteApi {
        error: anyhow::Error,
        response: Value,
    },
}

/// `value[field]` exists and is a JSON object (possibly empty).
pub fn has_non_null_object_field(value: &Value, field: &str) -> bool {
    matches!(value.get(field), Some(Value::Object(_)))
}

/// JSON field view of an error cause, for causes that can carry a response.
///
/// Covers the client's own [`ApiError`] and errors raised directly by
/// `reqwest` (e.g. from `error_for_status`), whose response is `{status, url}`
/// when a status was received.
pub fn response_fields(cause: &(dyn std::error::Error + 'static)) -> Option<Value> {
    if let Some(api) = cause.downcast_ref::<ApiError>() {
        return Some(api.fields());
    }

    let http = cause.downcast_ref::<reqwest::Error>()?;
    let response = match http.status() {
        Some(status) => json!({
            "status": status.as_u16(),
            "url": http.url().map(|u| u.to_string()),
        }),
        None => Value::Null,
    };
    Some(json!({
        "message": http.to_string(),
        "response": response,
    }))
}

/// Pick the formatting path for a command error.
pub fn classify(error: anyhow::Error) -> ClassifiedError {
    let response = error
        .chain()
        .filter_map(response_fields)
        .find(|fields| has_non_null_object_field(fields, "response"))
        .and_then(|mut fields| fields.get_mut("response").map(Value::take));

    match response {
        Some(response) => ClassifiedError::RemoteApi { error, response },
        None => ClassifiedError::Generic(error),
    }
}

impl ClassifiedError {
    pub fn is_remote_api(&self) -> bool {
        matches!(self, ClassifiedError::RemoteApi { .. })
    }

    pub fn error(&self) -> &anyhow::Error {
        match self {
            ClassifiedError::Generic(error) | ClassifiedError::RemoteApi { error, .. } => error,
        }
    }

    pub fn response(&self) -> Option<&Value> {
        match self {
            ClassifiedError::RemoteApi { response, .. } => Some(response),
            ClassifiedError::Generic(_) => None,
        }
    }

    /// Human-readable report for the error stream.
    pub fn format(&self) -> String {
        match self {
            ClassifiedError::Generic(error) => format!("Error: {:#}", error),
            ClassifiedError::RemoteApi { response, .. } => format_api_error(response),
        }
    }

    /// Write the report to stderr.
    pub fn report(&self) {
        eprintln!("{}", self.format());
    }
}

impl std::fmt::Display for ClassifiedError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.format())
    }
}

/// `HTTP Error <status>: <METHOD> <url>`, then the API error summary when the
/// body is an error envelope, then the body itself.
pub fn format_api_error(response: &Value) -> String {
    let status = response
        .get("status")
        .map(|s| match s {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        })
        .unwrap_or_else(|| "?".to_string());
    let url = response.get("url").and_then(Value::as_str).unwrap_or("?");

    let mut out = match response.get("method").and_then(Value::as_str) {
        Some(method) => format!("HTTP Error {}: {} {}", status, method, url),
        None => format!("HTTP Error {}: {}", status, url),
    };

    let Some(body) = response.get("body").filter(|b| !b.is_null()) else {
        return out;
    };

    if is_api_response_error(body) {
        let kind = body["error"]["type"].as_str().unwrap_or_default();
        match body["error"]["message"].as_str() {
            Some(message) => out.push_str(&format!("\n\n{}: {}", kind, message)),
            None => out.push_str(&format!("\n\n{}", kind)),
        }
    }

    let rendered = match body {
        Value::String(text) => text.clone(),
        other => serde_json::to_string_pretty(other).unwrap_or_else(|_| other.to_string()),
    };
    if !rendered.is_empty() {
        out.push_str("\n\n");
        out.push_str(&rendered);
    }
    out
}
