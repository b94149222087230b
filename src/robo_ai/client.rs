use super::assistants::AssistantsResource;
use super::error::RoboAiError;
use super::oauth::OauthResource;
use crate::config::Config;
use crate::registry::{ResourceContext, ResourceRegistry};
use crate::session::Session;
use std::rc::Rc;
use tracing::info;

/// Environment prefix read by [`RoboAi::from_env`].
pub const ENV_PREFIX: &str = "ROBO_AI";

/// Entry point of the assistant management API.
///
/// Owns one config and one session; every resource reached from here shares both.
#[derive(Debug)]
pub struct RoboAi {
    ctx: ResourceContext,
    resources: ResourceRegistry,
}

impl RoboAi {
    pub fn new(config: Config) -> Result<Self, RoboAiError> {
        Self::with_session(config, Session::new())
    }

    /// Build a client around an existing session handle.
    pub fn with_session(config: Config, session: Session) -> Result<Self, RoboAiError> {
        info!(base_endpoint = config.base_endpoint(), "creating ROBO.AI client");
        let ctx = ResourceContext::new(Rc::new(config), session)?;
        let mut resources = ResourceRegistry::new(&ctx);
        resources
            .add::<AssistantsResource>("assistants")
            .add::<OauthResource>("oauth");
        Ok(Self { ctx, resources })
    }

    /// Configuration from `ROBO_AI_BASE_ENDPOINT`, `ROBO_AI_USERNAME`, `ROBO_AI_PASSWORD`.
    pub fn from_env() -> Result<Self, RoboAiError> {
        Self::new(Config::from_env_prefix(ENV_PREFIX)?)
    }

    pub fn config(&self) -> &Config {
        self.ctx.config()
    }

    pub fn session(&self) -> &Session {
        self.ctx.session()
    }

    /// Use `access_token` for every subsequent bearer-authenticated call.
    pub fn set_session_token(&self, access_token: impl Into<String>) {
        self.ctx.session().set_access_token(access_token);
    }

    pub fn clear_session_token(&self) {
        self.ctx.session().clear();
    }

    pub fn oauth(&self) -> &OauthResource {
        self.resources.get("oauth")
    }

    pub fn assistants(&self) -> &AssistantsResource {
        self.resources.get("assistants")
    }
}
