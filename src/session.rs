//! User session backed by the config's token store.

use reqwest::Method;
use serde_json::json;
use thiserror::Error;

use crate::client::{ApiError, Client};
use crate::config::ConfigStore;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Not logged in. Run `ionic login` first")]
    NotLoggedIn,

    #[error("Login request failed")]
    Api(#[from] ApiError),

    #[error("Unexpected login response: missing token")]
    MissingToken,
}

/// Session handle shared with commands.
#[derive(Debug, Clone)]
pub struct Session {
    config: ConfigStore,
    client: Client,
}

impl Session {
    pub fn new(config: ConfigStore, client: Client) -> Self {
        Self { config, client }
    }

    /// Authenticate and store the session token in config.
    pub async fn login(&self, email: &str, password: &str) -> Result<(), SessionError> {
        let request = self
            .client
            .make(Method::POST, "/login")
            .json(&json!({ "email": email, "password": password }));

        let response = self.client.send(request).await?;
        let token = response
            .data
            .get("token")
            .and_then(|t| t.as_str())
            .ok_or(SessionError::MissingToken)?
            .to_string();

        self.config.update(|c| c.tokens.user = Some(token));
        tracing::info!(%email, "Logged in");
        Ok(())
    }

    /// Forget the stored token.
    pub fn logout(&self) {
        self.config.update(|c| c.tokens.user = None);
    }

    pub fn is_logged_in(&self) -> bool {
        self.config.get().tokens.user.is_some()
    }

    pub fn user_token(&self) -> Result<String, SessionError> {
        self.config
            .get()
            .tokens
            .user
            .ok_or(SessionError::NotLoggedIn)
    }
}
