//! Client configuration: base endpoint, basic-auth credentials and transport knobs.
//!
//! A [`Config`] is immutable once built. The top-level clients share a single instance
//! with every resource they create.

use std::env;
use std::time::Duration;
use url::Url;

/// Default transport timeout (env-overridable through `<PREFIX>_HTTP_TIMEOUT_SECS`).
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Endpoint and credentials the NLU service ships with out of the box.
pub const NLU_DEFAULT_ENDPOINT: &str = "http://127.0.0.1:8000";
pub const NLU_DEFAULT_USERNAME: &str = "user";
pub const NLU_DEFAULT_PASSWORD: &str = "bestpassword";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing configuration value: {0}")]
    Missing(&'static str),

    #[error("Invalid base endpoint '{endpoint}': {reason}")]
    InvalidEndpoint { endpoint: String, reason: String },

    #[error("Invalid value '{value}' for {key}")]
    InvalidValue { key: String, value: String },
}

/// Immutable per-client configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    base_endpoint: String,
    auth_username: String,
    auth_password: String,
    timeout: Option<Duration>,
    user_agent: String,
}

impl Config {
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::new()
    }

    /// Shorthand for the common case: endpoint plus basic-auth credentials.
    pub fn new(
        base_endpoint: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Result<Self, ConfigError> {
        Self::builder()
            .base_endpoint(base_endpoint)
            .credentials(username, password)
            .build()
    }

    /// Local NLU service with its stock credentials.
    pub fn nlu_default() -> Result<Self, ConfigError> {
        Self::new(NLU_DEFAULT_ENDPOINT, NLU_DEFAULT_USERNAME, NLU_DEFAULT_PASSWORD)
    }

    /// Read configuration from `<PREFIX>_BASE_ENDPOINT`, `<PREFIX>_USERNAME`,
    /// `<PREFIX>_PASSWORD` and the optional `<PREFIX>_HTTP_TIMEOUT_SECS`.
    pub fn from_env_prefix(prefix: &str) -> Result<Self, ConfigError> {
        let lookup = |suffix: &str| env::var(format!("{}_{}", prefix, suffix)).ok();
        let mut builder = Self::builder();
        if let Some(endpoint) = lookup("BASE_ENDPOINT") {
            builder = builder.base_endpoint(endpoint);
        }
        if let Some(user) = lookup("USERNAME") {
            builder = builder.username(user);
        }
        if let Some(pass) = lookup("PASSWORD") {
            builder = builder.password(pass);
        }
        if let Some(raw) = lookup("HTTP_TIMEOUT_SECS") {
            let secs = raw.parse::<u64>().map_err(|_| ConfigError::InvalidValue {
                key: format!("{}_HTTP_TIMEOUT_SECS", prefix),
                value: raw.clone(),
            })?;
            builder = builder.timeout(Duration::from_secs(secs));
        }
        builder.build()
    }

    pub fn base_endpoint(&self) -> &str {
        &self.base_endpoint
    }

    pub fn auth_username(&self) -> &str {
        &self.auth_username
    }

    pub fn auth_password(&self) -> &str {
        &self.auth_password
    }

    /// `None` disables the transport timeout entirely.
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }

    /// Join a request path onto the base endpoint.
    pub fn url_for(&self, path: &str) -> String {
        if path.is_empty() || path.starts_with('/') {
            format!("{}{}", self.base_endpoint, path)
        } else {
            format!("{}/{}", self.base_endpoint, path)
        }
    }
}

pub struct ConfigBuilder {
    base_endpoint: Option<String>,
    username: Option<String>,
    password: Option<String>,
    timeout: Option<Duration>,
    user_agent: Option<String>,
}

impl ConfigBuilder {
    pub fn new() -> Self {
        Self {
            base_endpoint: None,
            username: None,
            password: None,
            timeout: Some(Duration::from_secs(DEFAULT_TIMEOUT_SECS)),
            user_agent: None,
        }
    }

    pub fn base_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.base_endpoint = Some(endpoint.into());
        self
    }

    pub fn credentials(self, username: impl Into<String>, password: impl Into<String>) -> Self {
        self.username(username).password(password)
    }

    pub fn username(mut self, username: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self
    }

    pub fn password(mut self, password: impl Into<String>) -> Self {
        self.password = Some(password.into());
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn no_timeout(mut self) -> Self {
        self.timeout = None;
        self
    }

    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    pub fn build(self) -> Result<Config, ConfigError> {
        let raw = self
            .base_endpoint
            .ok_or(ConfigError::Missing("base_endpoint"))?;
        let base_endpoint = normalize_endpoint(&raw)?;
        let auth_username = self.username.ok_or(ConfigError::Missing("username"))?;
        let auth_password = self.password.ok_or(ConfigError::Missing("password"))?;
        let user_agent = self
            .user_agent
            .unwrap_or_else(|| format!("robo-sdk-rust/{}", env!("CARGO_PKG_VERSION")));

        Ok(Config {
            base_endpoint,
            auth_username,
            auth_password,
            timeout: self.timeout,
            user_agent,
        })
    }
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

fn normalize_endpoint(raw: &str) -> Result<String, ConfigError> {
    let parsed = Url::parse(raw).map_err(|e| ConfigError::InvalidEndpoint {
        endpoint: raw.to_string(),
        reason: e.to_string(),
    })?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(ConfigError::InvalidEndpoint {
            endpoint: raw.to_string(),
            reason: format!("unsupported scheme '{}'", parsed.scheme()),
        });
    }
    // Keep the caller's spelling (Url would add a trailing slash to bare hosts).
    Ok(raw.trim_end_matches('/').to_string())
}
