//! API response envelopes.
//!
//! Every API response is either `{ meta, data }` or `{ meta, error }`. The
//! guards below check the shape structurally so they work on any decoded JSON.

use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiMeta {
    pub status: u16,
    #[serde(default)]
    pub version: String,
    #[serde(default)]
    pub request_id: String,
}

/// Successful envelope.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiResponseSuccess {
    pub meta: ApiMeta,
    pub data: Value,
}

/// Error body inside an error envelope.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiErrorBody {
    #[serde(rename = "type")]
    pub error_type: String,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub link: Option<String>,
}

/// Error envelope.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiResponseError {
    pub meta: ApiMeta,
    pub error: ApiErrorBody,
}

fn has_meta(value: &Value) -> bool {
    value
        .get("meta")
        .and_then(|m| m.get("status"))
        .map(Value::is_u64)
        .unwrap_or(false)
}

/// `{ meta: { status }, data }`.
pub fn is_api_response_success(value: &Value) -> bool {
    has_meta(value) && value.get("data").is_some()
}

/// `{ meta: { status }, error: { type } }`.
pub fn is_api_response_error(value: &Value) -> bool {
    has_meta(value)
        && value
            .get("error")
            .and_then(|e| e.get("type"))
            .map(Value::is_string)
            .unwrap_or(false)
}
