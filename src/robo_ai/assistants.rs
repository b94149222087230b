//! Assistant listing and lookup.

use super::error::{CallContext, RoboAiError};
use super::runtimes::RuntimesResource;
use super::types::{AssistantListResponse, AssistantResponse};
use crate::registry::{Resource, ResourceContext, ResourceRegistry};
use crate::transport::{RequestMethod, RequestOptions};

pub const ASSISTANTS_PATH: &str = "/api/assistants";

#[derive(Debug)]
pub struct AssistantsResource {
    ctx: ResourceContext,
    children: ResourceRegistry,
}

impl Resource for AssistantsResource {
    fn from_context(ctx: &ResourceContext) -> Self {
        let mut children = ResourceRegistry::new(ctx);
        children.add::<RuntimesResource>("runtimes");
        Self {
            ctx: ctx.clone(),
            children,
        }
    }

    fn context(&self) -> &ResourceContext {
        &self.ctx
    }
}

impl AssistantsResource {
    /// One page of the assistants visible to the current token. Pages start at 1.
    pub fn get_list(&self, page: u32) -> Result<AssistantListResponse, RoboAiError> {
        self.ctx.executor().execute(
            RequestMethod::Get,
            ASSISTANTS_PATH,
            RequestOptions::new().param("page", page),
            &CallContext::Resource,
        )
    }

    pub fn get_first_page(&self) -> Result<AssistantListResponse, RoboAiError> {
        self.get_list(1)
    }

    pub fn get_assistant(&self, uuid: &str) -> Result<AssistantResponse, RoboAiError> {
        self.ctx.executor().execute(
            RequestMethod::Get,
            &format!("{}/uuid/{}", ASSISTANTS_PATH, uuid),
            RequestOptions::new(),
            &CallContext::Resource,
        )
    }

    /// Runtime management for the assistants of this client.
    pub fn runtimes(&self) -> &RuntimesResource {
        self.children.get("runtimes")
    }
}
