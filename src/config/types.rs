use serde::{Deserialize, Serialize};

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub auth: AuthConfig,
    #[serde(default)]
    pub client: ClientConfig,
    #[serde(default)]
    pub defaults: DefaultsConfig,
}

/// Stored credentials
#[derive(Clone, Serialize, Deserialize, Default)]
pub struct AuthConfig {
    /// Personal access token for the Content Management API
    #[serde(skip_serializing_if = "Option::is_none")]
    pub access_token: Option<String>,
    /// Email of the user the token belongs to, filled in on login
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_email: Option<String>,
}

impl std::fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthConfig")
            .field("access_token", &self.access_token.as_ref().map(|_| "****"))
            .field("user_email", &self.user_email)
            .finish()
    }
}

/// HTTP client settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default)]
    pub insecure: bool,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_retry_on_error")]
    pub retry_on_error: bool,
    #[serde(default = "default_retry_limit")]
    pub retry_limit: u32,
    /// Application name appended to the user agent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub application: Option<String>,
}

/// Ids used when a command does not name them explicitly
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct DefaultsConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub organization_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub space_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub environment_id: Option<String>,
}

fn default_host() -> String {
    crate::api::client::DEFAULT_HOST.to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_retry_on_error() -> bool {
    true
}

fn default_retry_limit() -> u32 {
    5
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            insecure: false,
            timeout_secs: default_timeout_secs(),
            retry_on_error: default_retry_on_error(),
            retry_limit: default_retry_limit(),
            application: None,
        }
    }
}
