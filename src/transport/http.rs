use super::multipart::{FilePart, FormData, ProgressCallback};
use super::response::{ErrorMapper, RawResponse};
use super::TransportError;
use crate::config::Config;
use crate::session::Session;
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use bytes::Bytes;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt;
use std::rc::Rc;
use tracing::{debug, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RequestMethod {
    Get,
    Post,
    Put,
    Delete,
}

impl RequestMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
        }
    }

    fn to_reqwest(self) -> reqwest::Method {
        match self {
            Self::Get => reqwest::Method::GET,
            Self::Post => reqwest::Method::POST,
            Self::Put => reqwest::Method::PUT,
            Self::Delete => reqwest::Method::DELETE,
        }
    }
}

impl fmt::Display for RequestMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which credentials go into the `Authorization` header.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Auth {
    /// `bearer <token>` when the session holds a token, nothing otherwise.
    #[default]
    Bearer,
    /// Static username/password from the config.
    Basic,
    None,
}

/// Everything about a request besides method and path.
#[derive(Default)]
pub struct RequestOptions {
    params: Vec<(String, String)>,
    json_body: Option<serde_json::Value>,
    form: Option<FormData>,
    files: Vec<(String, FilePart)>,
    headers: Vec<(String, String)>,
    auth: Auth,
    on_progress: Option<ProgressCallback>,
}

impl RequestOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn param(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.params.push((key.into(), value.to_string()));
        self
    }

    pub fn json<T: Serialize + ?Sized>(mut self, body: &T) -> Result<Self, TransportError> {
        self.json_body = Some(serde_json::to_value(body).map_err(TransportError::Encode)?);
        Ok(self)
    }

    pub fn json_value(mut self, body: serde_json::Value) -> Self {
        self.json_body = Some(body);
        self
    }

    pub fn form(mut self, form: FormData) -> Self {
        self.form = Some(form);
        self
    }

    pub fn file(mut self, name: impl Into<String>, part: FilePart) -> Self {
        self.files.push((name.into(), part));
        self
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    pub fn auth(mut self, auth: Auth) -> Self {
        self.auth = auth;
        self
    }

    /// `false` is the same as `auth(Auth::None)`.
    pub fn use_auth_headers(self, enabled: bool) -> Self {
        self.auth(if enabled { Auth::Bearer } else { Auth::None })
    }

    pub fn on_progress(mut self, callback: ProgressCallback) -> Self {
        self.on_progress = Some(callback);
        self
    }

    pub fn on_progress_opt(mut self, callback: Option<ProgressCallback>) -> Self {
        self.on_progress = callback;
        self
    }
}

impl fmt::Debug for RequestOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RequestOptions")
            .field("params", &self.params)
            .field("json_body", &self.json_body)
            .field("form", &self.form)
            .field("files", &self.files)
            .field("headers", &self.headers)
            .field("auth", &self.auth)
            .field("on_progress", &self.on_progress.is_some())
            .finish()
    }
}

/// Blocking request executor bound to one client's config and session.
///
/// Cloning is cheap: clones share the HTTP connection pool, the config and the session.
#[derive(Clone)]
pub struct HttpExecutor {
    client: reqwest::blocking::Client,
    config: Rc<Config>,
    session: Session,
}

impl HttpExecutor {
    pub fn new(config: Rc<Config>, session: Session) -> Result<Self, TransportError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(config.timeout())
            .user_agent(config.user_agent())
            .build()?;
        Ok(Self {
            client,
            config,
            session,
        })
    }

    pub fn config(&self) -> &Rc<Config> {
        &self.config
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Dispatch exactly one request and return the response uninterpreted.
    pub fn send(
        &self,
        method: RequestMethod,
        path: &str,
        options: RequestOptions,
    ) -> Result<RawResponse, TransportError> {
        let url = self.config.url_for(path);
        let RequestOptions {
            params,
            json_body,
            form,
            files,
            headers,
            auth,
            on_progress,
        } = options;

        if json_body.is_some() && (form.is_some() || !files.is_empty()) {
            return Err(TransportError::ConflictingBody);
        }

        let mut request = self.client.request(method.to_reqwest(), &url);
        if !params.is_empty() {
            request = request.query(&params);
        }
        request = request.headers(self.build_headers(&headers, auth)?);

        if let Some(body) = &json_body {
            request = request.json(body);
        } else if form.is_some() || !files.is_empty() {
            let mut form = form.unwrap_or_default();
            form.extend_files(files);
            if form.has_binary_parts() {
                let (multipart, file_bytes) = form.into_multipart(on_progress)?;
                debug!(file_bytes, "encoding multipart body");
                request = request.multipart(multipart);
            } else {
                request = request.form(&form.text_pairs());
            }
        }

        debug!(method = %method, url = %url, "dispatching request");
        let response = request.send()?;
        let status = response.status().as_u16();
        let body: Bytes = response.bytes()?;
        debug!(method = %method, url = %url, status, bytes = body.len(), "response received");

        Ok(RawResponse::new(status, body))
    }

    /// Dispatch and decode a 2xx JSON body into `T`; non-2xx goes through `mapper`.
    pub fn execute<T, M>(
        &self,
        method: RequestMethod,
        path: &str,
        options: RequestOptions,
        mapper: &M,
    ) -> Result<T, M::Error>
    where
        T: DeserializeOwned,
        M: ErrorMapper,
    {
        let response = self.checked(method, path, options, mapper)?;
        Ok(response.json()?)
    }

    /// Like [`execute`](Self::execute) but returns the raw body of a 2xx response.
    pub fn execute_raw<M: ErrorMapper>(
        &self,
        method: RequestMethod,
        path: &str,
        options: RequestOptions,
        mapper: &M,
    ) -> Result<Bytes, M::Error> {
        Ok(self.checked(method, path, options, mapper)?.into_body())
    }

    fn checked<M: ErrorMapper>(
        &self,
        method: RequestMethod,
        path: &str,
        options: RequestOptions,
        mapper: &M,
    ) -> Result<RawResponse, M::Error> {
        let response = self.send(method, path, options)?;
        if response.is_success() {
            Ok(response)
        } else {
            warn!(
                method = %method,
                path,
                status = response.status(),
                "request failed"
            );
            Err(mapper.map_status(&response))
        }
    }

    fn build_headers(
        &self,
        extra: &[(String, String)],
        auth: Auth,
    ) -> Result<HeaderMap, TransportError> {
        let mut headers = HeaderMap::new();
        for (name, value) in extra {
            let key = HeaderName::from_bytes(name.as_bytes())
                .map_err(|_| TransportError::InvalidHeader(name.clone()))?;
            let val = HeaderValue::from_str(value)
                .map_err(|_| TransportError::InvalidHeader(name.clone()))?;
            headers.insert(key, val);
        }
        // The body encoder owns the content type.
        headers.remove(CONTENT_TYPE);

        if let Some(value) = self.authorization_value(auth) {
            let mut value = HeaderValue::from_str(&value)
                .map_err(|_| TransportError::InvalidHeader(AUTHORIZATION.to_string()))?;
            value.set_sensitive(true);
            headers.insert(AUTHORIZATION, value);
        }
        Ok(headers)
    }

    fn authorization_value(&self, auth: Auth) -> Option<String> {
        match auth {
            Auth::Bearer => self
                .session
                .access_token()
                .map(|token| format!("bearer {}", token)),
            Auth::Basic => {
                let raw = format!(
                    "{}:{}",
                    self.config.auth_username(),
                    self.config.auth_password()
                );
                Some(format!("Basic {}", STANDARD.encode(raw)))
            }
            Auth::None => None,
        }
    }
}

impl fmt::Debug for HttpExecutor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpExecutor")
            .field("base_endpoint", &self.config.base_endpoint())
            .field("authenticated", &self.session.is_authenticated())
            .finish()
    }
}
