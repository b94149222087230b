//! Errors of the assistant management API.

use crate::config::ConfigError;
use crate::transport::{ErrorMapper, RawResponse, TransportError};

#[derive(Debug, thiserror::Error)]
pub enum RoboAiError {
    #[error("Invalid credentials{}", format_detail(.detail))]
    InvalidCredentials { detail: Option<String> },

    #[error("Invalid token{}", format_detail(.detail))]
    InvalidToken { detail: Option<String> },

    #[error("Not authorized{}", format_detail(.detail))]
    NotAuthorized { detail: Option<String> },

    #[error("Resource not found{}", format_detail(.detail))]
    NotFound { detail: Option<String> },

    #[error("API error: HTTP {status}{}", format_detail(.detail))]
    Api { status: u16, detail: Option<String> },

    #[error("Network transport error: {0}")]
    Transport(#[from] TransportError),

    #[error("Failed to decode response body: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

fn format_detail(detail: &Option<String>) -> String {
    detail
        .as_ref()
        .map(|d| format!(": {}", d))
        .unwrap_or_default()
}

impl RoboAiError {
    /// Server-provided message, for the status-derived variants.
    pub fn detail(&self) -> Option<&str> {
        match self {
            Self::InvalidCredentials { detail }
            | Self::InvalidToken { detail }
            | Self::NotAuthorized { detail }
            | Self::NotFound { detail }
            | Self::Api { detail, .. } => detail.as_deref(),
            _ => None,
        }
    }
}

/// Which kind of call produced the response. A 401 means different things depending on
/// whether the request was issuing a token, introspecting one, or using one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallContext {
    Authenticate,
    TokenInfo,
    Resource,
}

impl ErrorMapper for CallContext {
    type Error = RoboAiError;

    fn map_status(&self, response: &RawResponse) -> RoboAiError {
        let detail = response.detail();
        match (self, response.status()) {
            (CallContext::Authenticate, 401) => RoboAiError::InvalidCredentials { detail },
            (CallContext::TokenInfo, 401) => RoboAiError::InvalidToken { detail },
            (CallContext::Resource, 401) | (CallContext::Resource, 403) => {
                RoboAiError::NotAuthorized { detail }
            }
            (CallContext::Resource, 404) => RoboAiError::NotFound { detail },
            (_, status) => RoboAiError::Api { status, detail },
        }
    }
}
