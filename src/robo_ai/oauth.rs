//! Token bootstrap and introspection.
//!
//! Both endpoints authenticate with the static basic-auth credentials from the config and
//! never touch the session; storing a token is the caller's decision.

use super::error::{CallContext, RoboAiError};
use super::types::{AccessInfo, AccessToken};
use crate::registry::{Resource, ResourceContext};
use crate::transport::{Auth, FormData, RequestMethod, RequestOptions};
use tracing::debug;

pub const TOKEN_PATH: &str = "/oauth/token";
pub const CHECK_TOKEN_PATH: &str = "/oauth/check_token/";

#[derive(Debug)]
pub struct OauthResource {
    ctx: ResourceContext,
}

impl Resource for OauthResource {
    fn from_context(ctx: &ResourceContext) -> Self {
        Self { ctx: ctx.clone() }
    }

    fn context(&self) -> &ResourceContext {
        &self.ctx
    }
}

impl OauthResource {
    /// Exchange an API key for an access token (client credentials grant).
    ///
    /// Fails with [`RoboAiError::InvalidCredentials`] on 401.
    pub fn authenticate(&self, api_key: &str) -> Result<AccessToken, RoboAiError> {
        let form = FormData::new()
            .text("grant_type", "client_credentials")
            .text("apiKey", api_key);
        let token: AccessToken = self.ctx.executor().execute(
            RequestMethod::Post,
            TOKEN_PATH,
            RequestOptions::new().auth(Auth::Basic).form(form),
            &CallContext::Authenticate,
        )?;
        debug!(token_type = %token.token_type, expires_in = token.expires_in, "access token issued");
        Ok(token)
    }

    /// Introspect a token. Fails with [`RoboAiError::InvalidToken`] on 401.
    pub fn get_token_info(&self, token: &str) -> Result<AccessInfo, RoboAiError> {
        let form = FormData::new().text("token", token);
        self.ctx.executor().execute(
            RequestMethod::Post,
            CHECK_TOKEN_PATH,
            RequestOptions::new().auth(Auth::Basic).form(form),
            &CallContext::TokenInfo,
        )
    }
}
