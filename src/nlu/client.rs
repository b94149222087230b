use super::error::NluError;
use super::model::NluModel;
use crate::config::Config;
use crate::registry::{Resource, ResourceContext};
use crate::session::Session;
use std::rc::Rc;
use tracing::info;

/// Environment prefix read by [`RoboNlu::from_env`].
pub const ENV_PREFIX: &str = "ROBO_NLU";

/// Entry point of the NLU service. Every call authenticates with the config's basic-auth
/// credentials.
#[derive(Debug)]
pub struct RoboNlu {
    ctx: ResourceContext,
}

impl RoboNlu {
    pub fn new(config: Config) -> Result<Self, NluError> {
        info!(base_endpoint = config.base_endpoint(), "creating NLU client");
        let ctx = ResourceContext::new(Rc::new(config), Session::new())?;
        Ok(Self { ctx })
    }

    /// Local service with stock credentials.
    pub fn local() -> Result<Self, NluError> {
        Self::new(Config::nlu_default()?)
    }

    /// Configuration from `ROBO_NLU_BASE_ENDPOINT`, `ROBO_NLU_USERNAME`, `ROBO_NLU_PASSWORD`.
    pub fn from_env() -> Result<Self, NluError> {
        Self::new(Config::from_env_prefix(ENV_PREFIX)?)
    }

    pub fn config(&self) -> &Config {
        self.ctx.config()
    }

    /// Handle on an existing model, or an unbound one ready to create a model.
    pub fn model(&self, model_uuid: Option<&str>) -> NluModel {
        match model_uuid {
            Some(uuid) => NluModel::bound(&self.ctx, uuid),
            None => NluModel::from_context(&self.ctx),
        }
    }
}
