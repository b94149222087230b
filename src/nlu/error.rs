//! Errors of the NLU service client.

use crate::config::ConfigError;
use crate::transport::{ErrorMapper, RawResponse, TransportError};

#[derive(Debug, thiserror::Error)]
pub enum NluError {
    #[error("Not authorized{}", format_detail(.detail))]
    NotAuthorized { detail: Option<String> },

    #[error("Not found{}", format_detail(.detail))]
    NotFound { detail: Option<String> },

    #[error("Not acceptable{}", format_detail(.detail))]
    NotAcceptable { detail: Option<String> },

    #[error("Unprocessable entity{}", format_detail(.detail))]
    UnprocessableEntity { detail: Option<String> },

    #[error("API error: HTTP {status}{}", format_detail(.detail))]
    Api { status: u16, detail: Option<String> },

    #[error("No model is bound to this handle; create one or pass a model uuid")]
    ModelNotBound,

    #[error("Handle is already bound to model {model_uuid}; cannot create another")]
    ModelAlreadyBound { model_uuid: String },

    #[error("Invalid training data in entry '{entry}': {reason}")]
    InvalidTrainingData { entry: String, reason: String },

    #[error("Failed to read training file {path}: {source}")]
    TrainingFile {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("YAML syntax error: {0}")]
    Yaml(#[from] serde_yaml::Error),

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

impl NluError {
    pub fn detail(&self) -> Option<&str> {
        match self {
            Self::NotAuthorized { detail }
            | Self::NotFound { detail }
            | Self::NotAcceptable { detail }
            | Self::UnprocessableEntity { detail }
            | Self::Api { detail, .. } => detail.as_deref(),
            _ => None,
        }
    }
}

/// Status mapping shared by every NLU endpoint.
#[derive(Debug, Clone, Copy, Default)]
pub struct NluStatusMapper;

impl ErrorMapper for NluStatusMapper {
    type Error = NluError;

    fn map_status(&self, response: &RawResponse) -> NluError {
        let detail = response.detail();
        match response.status() {
            401 => NluError::NotAuthorized { detail },
            404 => NluError::NotFound { detail },
            406 => NluError::NotAcceptable { detail },
            422 => NluError::UnprocessableEntity { detail },
            status => NluError::Api { status, detail },
        }
    }
}
