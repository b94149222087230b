use super::TransportError;
use bytes::Bytes;
use serde::de::DeserializeOwned;

/// Status and body of a completed exchange, before any interpretation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    status: u16,
    body: Bytes,
}

impl RawResponse {
    pub fn new(status: u16, body: impl Into<Bytes>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn status(&self) -> u16 {
        self.status
    }

    /// All 2xx codes count as success.
    pub fn is_success(&self) -> bool {
        self.status / 100 == 2
    }

    pub fn body(&self) -> &Bytes {
        &self.body
    }

    pub fn into_body(self) -> Bytes {
        self.body
    }

    pub fn json<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_slice(&self.body)
    }

    /// Server-provided error message, if the body carries one.
    ///
    /// Looks at `detail`, then `message`, then `error`. Non-string values (validation
    /// error lists, for instance) are rendered as compact JSON.
    pub fn detail(&self) -> Option<String> {
        let json: serde_json::Value = serde_json::from_slice(&self.body).ok()?;
        ["detail", "message", "error"]
            .iter()
            .filter_map(|key| json.get(*key))
            .find(|v| !v.is_null())
            .map(|v| match v.as_str() {
                Some(s) => s.to_string(),
                None => v.to_string(),
            })
    }
}

/// Turns a non-2xx response into the error type of one calling context.
///
/// Each service (and, for OAuth, each endpoint) maps the same status codes differently,
/// so the executor leaves the decision to the caller.
pub trait ErrorMapper {
    type Error: From<TransportError> + From<serde_json::Error>;

    fn map_status(&self, response: &RawResponse) -> Self::Error;
}
