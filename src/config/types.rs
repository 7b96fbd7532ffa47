use serde::{Deserialize, Serialize};

/// Root configuration container.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub urls: Urls,
    #[serde(default)]
    pub tokens: Tokens,
}

/// Service endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Urls {
    /// Base URL of the API the network client talks to.
    #[serde(default = "default_api_url")]
    pub api: String,
    /// Base URL of the web dashboard.
    #[serde(default = "default_dash_url")]
    pub dash: String,
}

/// Credentials persisted between invocations.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Tokens {
    /// Session token of the logged-in user.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,
}

fn default_api_url() -> String {
    "https://api.ionic.io".to_string()
}

fn default_dash_url() -> String {
    "https://apps.ionic.io".to_string()
}

impl Default for Urls {
    fn default() -> Self {
        Self {
            api: default_api_url(),
            dash: default_dash_url(),
        }
    }
}
