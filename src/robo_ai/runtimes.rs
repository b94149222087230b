//! Bot runtime lifecycle: deploy, start, stop, remove, logs.

use super::error::{CallContext, RoboAiError};
use super::types::{AssistantRuntimeLogsResponse, AssistantRuntimeResponse};
use crate::registry::{Resource, ResourceContext};
use crate::transport::{FilePart, FormData, ProgressCallback, RequestMethod, RequestOptions};
use std::path::Path;
use tracing::info;

#[derive(Debug)]
pub struct RuntimesResource {
    ctx: ResourceContext,
}

impl Resource for RuntimesResource {
    fn from_context(ctx: &ResourceContext) -> Self {
        Self { ctx: ctx.clone() }
    }

    fn context(&self) -> &ResourceContext {
        &self.ctx
    }
}

pub(crate) fn runtime_path(assistant_uuid: &str) -> String {
    format!("/api/assistants/{}/runtime", assistant_uuid)
}

impl RuntimesResource {
    /// Deploy a new runtime from a package file.
    ///
    /// `base_runtime` names the framework and version the bot was built with so the server
    /// can prepare a matching environment. `progress` receives cumulative bytes uploaded.
    pub fn create(
        &self,
        assistant_uuid: &str,
        package_path: impl AsRef<Path>,
        base_runtime: &str,
        progress: Option<ProgressCallback>,
    ) -> Result<AssistantRuntimeResponse, RoboAiError> {
        self.deploy(
            RequestMethod::Post,
            assistant_uuid,
            package_path.as_ref(),
            base_runtime,
            progress,
        )
    }

    /// Replace the package of an existing runtime.
    pub fn update(
        &self,
        assistant_uuid: &str,
        package_path: impl AsRef<Path>,
        base_runtime: &str,
        progress: Option<ProgressCallback>,
    ) -> Result<AssistantRuntimeResponse, RoboAiError> {
        self.deploy(
            RequestMethod::Put,
            assistant_uuid,
            package_path.as_ref(),
            base_runtime,
            progress,
        )
    }

    pub fn get(&self, assistant_uuid: &str) -> Result<AssistantRuntimeResponse, RoboAiError> {
        self.call(RequestMethod::Get, &runtime_path(assistant_uuid))
    }

    pub fn start(&self, assistant_uuid: &str) -> Result<AssistantRuntimeResponse, RoboAiError> {
        self.call(
            RequestMethod::Post,
            &format!("{}/start", runtime_path(assistant_uuid)),
        )
    }

    pub fn stop(&self, assistant_uuid: &str) -> Result<AssistantRuntimeResponse, RoboAiError> {
        self.call(
            RequestMethod::Post,
            &format!("{}/stop", runtime_path(assistant_uuid)),
        )
    }

    pub fn remove(&self, assistant_uuid: &str) -> Result<(), RoboAiError> {
        self.ctx.executor().execute_raw(
            RequestMethod::Delete,
            &runtime_path(assistant_uuid),
            RequestOptions::new(),
            &CallContext::Resource,
        )?;
        Ok(())
    }

    /// Most recent log lines of a runtime.
    pub fn get_logs(
        &self,
        assistant_uuid: &str,
    ) -> Result<AssistantRuntimeLogsResponse, RoboAiError> {
        self.call(
            RequestMethod::Get,
            &format!("{}/logs", runtime_path(assistant_uuid)),
        )
    }

    fn call<T: serde::de::DeserializeOwned>(
        &self,
        method: RequestMethod,
        path: &str,
    ) -> Result<T, RoboAiError> {
        self.ctx
            .executor()
            .execute(method, path, RequestOptions::new(), &CallContext::Resource)
    }

    fn deploy(
        &self,
        method: RequestMethod,
        assistant_uuid: &str,
        package_path: &Path,
        base_runtime: &str,
        progress: Option<ProgressCallback>,
    ) -> Result<AssistantRuntimeResponse, RoboAiError> {
        info!(
            method = %method,
            assistant_uuid,
            package = %package_path.display(),
            base_runtime,
            "deploying runtime package"
        );
        let form = FormData::new()
            .text("runtimeBase", base_runtime)
            .file("file", FilePart::new(package_path));
        self.ctx.executor().execute(
            method,
            &runtime_path(assistant_uuid),
            RequestOptions::new().form(form).on_progress_opt(progress),
            &CallContext::Resource,
        )
    }
}
