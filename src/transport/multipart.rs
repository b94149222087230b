//! Form bodies and upload progress tracking.

use super::TransportError;
use reqwest::blocking::multipart::{Form, Part};
use std::fs::File;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

/// Receives the cumulative number of file bytes read so far.
pub type ProgressCallback = Box<dyn FnMut(u64) + Send + 'static>;

pub const DEFAULT_FILE_MIME: &str = "application/zip";

/// A local file to be streamed as one multipart field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilePart {
    path: PathBuf,
    file_name: Option<String>,
    mime: String,
}

impl FilePart {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            file_name: None,
            mime: DEFAULT_FILE_MIME.to_string(),
        }
    }

    pub fn file_name(mut self, name: impl Into<String>) -> Self {
        self.file_name = Some(name.into());
        self
    }

    pub fn mime(mut self, mime: impl Into<String>) -> Self {
        self.mime = mime.into();
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Explicit name, else the basename of the path.
    pub fn resolved_file_name(&self) -> String {
        self.file_name.clone().unwrap_or_else(|| {
            self.path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| "file".to_string())
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormValue {
    Text(String),
    File(FilePart),
}

/// Ordered form fields. Text-only forms go out url-encoded, anything with a file as multipart.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormData {
    fields: Vec<(String, FormValue)>,
}

impl FormData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.push((name.into(), FormValue::Text(value.into())));
        self
    }

    pub fn file(mut self, name: impl Into<String>, part: FilePart) -> Self {
        self.fields.push((name.into(), FormValue::File(part)));
        self
    }

    pub fn fields(&self) -> &[(String, FormValue)] {
        &self.fields
    }

    pub fn has_binary_parts(&self) -> bool {
        self.fields
            .iter()
            .any(|(_, v)| matches!(v, FormValue::File(_)))
    }

    pub(crate) fn text_pairs(&self) -> Vec<(String, String)> {
        self.fields
            .iter()
            .filter_map(|(k, v)| match v {
                FormValue::Text(t) => Some((k.clone(), t.clone())),
                FormValue::File(_) => None,
            })
            .collect()
    }

    pub(crate) fn extend_files(&mut self, files: Vec<(String, FilePart)>) {
        self.fields
            .extend(files.into_iter().map(|(k, f)| (k, FormValue::File(f))));
    }

    /// Open every file part and assemble the multipart body. Files stay open only as long
    /// as the returned form (and thus the request) lives.
    pub(crate) fn into_multipart(
        self,
        progress: Option<ProgressCallback>,
    ) -> Result<(Form, u64), TransportError> {
        let tracker = progress.map(|cb| Arc::new(Mutex::new(ProgressTracker::new(cb))));
        let mut form = Form::new();
        let mut total = 0u64;

        for (name, value) in self.fields {
            form = match value {
                FormValue::Text(text) => form.text(name, text),
                FormValue::File(part) => {
                    let file = File::open(&part.path).map_err(|source| TransportError::File {
                        path: part.path.display().to_string(),
                        source,
                    })?;
                    let len = file
                        .metadata()
                        .map_err(|source| TransportError::File {
                            path: part.path.display().to_string(),
                            source,
                        })?
                        .len();
                    total += len;

                    let file_name = part.resolved_file_name();
                    let body = match &tracker {
                        Some(t) => Part::reader_with_length(ProgressReader::new(file, t.clone()), len),
                        None => Part::reader_with_length(file, len),
                    };
                    form.part(name, body.file_name(file_name).mime_str(&part.mime)?)
                }
            };
        }
        Ok((form, total))
    }
}

struct ProgressTracker {
    read: u64,
    callback: ProgressCallback,
}

impl ProgressTracker {
    fn new(callback: ProgressCallback) -> Self {
        Self { read: 0, callback }
    }

    fn advance(&mut self, n: usize) {
        self.read += n as u64;
        (self.callback)(self.read);
    }
}

/// Reader adapter that reports cumulative bytes to a shared tracker.
///
/// Every read is reported, including the terminal zero-length read, so an empty file still
/// produces one callback with `0`.
pub struct ProgressReader<R> {
    inner: R,
    tracker: Arc<Mutex<ProgressTracker>>,
}

impl<R: Read> ProgressReader<R> {
    fn new(inner: R, tracker: Arc<Mutex<ProgressTracker>>) -> Self {
        Self { inner, tracker }
    }

    /// Standalone reader with its own counter.
    pub fn with_callback(inner: R, callback: ProgressCallback) -> Self {
        Self::new(inner, Arc::new(Mutex::new(ProgressTracker::new(callback))))
    }
}

impl<R: Read> Read for ProgressReader<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let n = self.inner.read(buf)?;
        match self.tracker.lock() {
            Ok(mut t) => t.advance(n),
            Err(poisoned) => poisoned.into_inner().advance(n),
        }
        Ok(n)
    }
}
