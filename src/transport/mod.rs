//! 传输层：请求构造、单次发送与状态码映射钩子
//!
//! Request execution shared by both service clients.
//!
//! [`HttpExecutor`] composes a request (query, JSON or form body, multipart file parts,
//! auth header), dispatches it once, and either hands back the raw response or decodes a
//! 2xx body into a typed value. Status-code interpretation is delegated to an
//! [`ErrorMapper`] supplied by the calling context.

mod http;
mod multipart;
mod response;

pub use http::{Auth, HttpExecutor, RequestMethod, RequestOptions};
pub use multipart::{
    FilePart, FormData, FormValue, ProgressCallback, ProgressReader, DEFAULT_FILE_MIME,
};
pub use response::{ErrorMapper, RawResponse};

#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Failed to read upload file {path}: {source}")]
    File {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid header: {0}")]
    InvalidHeader(String),

    #[error("Failed to encode request body: {0}")]
    Encode(#[source] serde_json::Error),

    #[error("A request cannot carry both a JSON body and form data")]
    ConflictingBody,
}

impl TransportError {
    pub fn is_timeout(&self) -> bool {
        matches!(self, TransportError::Http(e) if e.is_timeout())
    }
}
