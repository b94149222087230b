//! Response shapes of the assistant management API.

use serde::{Deserialize, Serialize};

/// Result of a successful token request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessToken {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: u64,
    pub scope: String,
}

/// Token introspection result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessInfo {
    pub active: bool,
    pub exp: i64,
    pub authorities: Vec<String>,
    pub client_id: String,
    pub scope: String,
}

/// Single-item envelope.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub content: T,
}

/// Paginated envelope.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    #[serde(default = "Vec::new")]
    pub content: Vec<T>,
    #[serde(default)]
    pub size: Option<u64>,
    #[serde(default)]
    pub page: Option<u64>,
    #[serde(default)]
    pub page_elements: Option<u64>,
    #[serde(default)]
    pub total_elements: Option<u64>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Assistant {
    #[serde(default)]
    pub uuid: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub created: Option<String>,
    #[serde(default)]
    pub updated: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub assistant_service: Option<String>,
    #[serde(default)]
    pub params: Vec<AssistantParam>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssistantParam {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub value: Option<String>,
    #[serde(default)]
    pub mandatory: bool,
    #[serde(default, alias = "defaultValue")]
    pub default_value: Option<String>,
    #[serde(default)]
    pub created: Option<String>,
    #[serde(default)]
    pub updated: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RuntimeStatus {
    Updating,
    Creating,
    Created,
    Stopping,
    Stopped,
    Starting,
    Running,
    Removing,
    Removed,
    Dead,
    #[serde(other)]
    Unknown,
}

impl RuntimeStatus {
    /// Transitional states the server will move out of on its own.
    pub fn is_transitional(&self) -> bool {
        matches!(
            self,
            Self::Updating | Self::Creating | Self::Stopping | Self::Starting | Self::Removing
        )
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssistantRuntime {
    #[serde(default)]
    pub assistant_uuid: Option<String>,
    #[serde(default)]
    pub status: Option<RuntimeStatus>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub engine: Option<String>,
    #[serde(default)]
    pub provider: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssistantRuntimeLogs {
    #[serde(default)]
    pub assistant_uuid: Option<String>,
    #[serde(default)]
    pub lines: Vec<String>,
}

pub type AssistantListResponse = Page<Assistant>;
pub type AssistantResponse = ApiResponse<Assistant>;
pub type AssistantRuntimeResponse = ApiResponse<AssistantRuntime>;
pub type AssistantRuntimeLogsResponse = ApiResponse<AssistantRuntimeLogs>;
