//! HTTP client for the API.
//!
//! Built once per invocation from the loaded config's `urls.api`.

mod error;
mod response;

use reqwest::{Method, RequestBuilder};
use serde_json::Value;

pub use error::{ApiError, ClientError};
pub use response::{
    is_api_response_error, is_api_response_success, ApiErrorBody, ApiMeta, ApiResponseError,
    ApiResponseSuccess,
};

const USER_AGENT: &str = concat!("ionic/", env!("CARGO_PKG_VERSION"));

/// API client bound to one host.
#[derive(Debug, Clone)]
pub struct Client {
    http: reqwest::Client,
    host: String,
}

impl Client {
    pub fn new(host: &str) -> Result<Self, ClientError> {
        let parsed = reqwest::Url::parse(host).map_err(|e| ClientError::InvalidUrl {
            url: host.to_string(),
            reason: e.to_string(),
        })?;

        let http = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .map_err(ClientError::Build)?;

        Ok(Self {
            http,
            host: parsed.as_str().trim_end_matches('/').to_string(),
        })
    }

    /// Base URL, without a trailing slash.
    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.host, path.trim_start_matches('/'))
    }

    /// Start a JSON request against `path`.
    pub fn make(&self, method: Method, path: &str) -> RequestBuilder {
        self.http
            .request(method, self.url(path))
            .header(reqwest::header::ACCEPT, "application/json")
    }

    /// Send a request and decode the success envelope.
    ///
    /// Non-2xx statuses and error envelopes become an [`ApiError`] carrying the
    /// response; transport failures carry none.
    pub async fn send(&self, request: RequestBuilder) -> Result<ApiResponseSuccess, ApiError> {
        let request = request
            .build()
            .map_err(|e| ApiError::transport("?", &self.host, e))?;
        let method = request.method().to_string();
        let url = request.url().to_string();

        tracing::debug!(%method, %url, "API request");

        let response = self
            .http
            .execute(request)
            .await
            .map_err(|e| ApiError::transport(&method, &url, e))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| ApiError::transport(&method, &url, e))?;
        let body: Value = serde_json::from_str(&text).unwrap_or(Value::String(text));

        if !status.is_success() || !is_api_response_success(&body) {
            return Err(ApiError::from_response(&method, &url, status.as_u16(), body));
        }

        serde_json::from_value(body.clone())
            .map_err(|_| ApiError::from_response(&method, &url, status.as_u16(), body))
    }
}
