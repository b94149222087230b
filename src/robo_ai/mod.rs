//! 助手管理 API：OAuth 令牌、助手与机器人运行时。
//!
//! ROBO.AI assistant management API: OAuth, assistants and bot runtimes.

mod assistants;
mod client;
pub mod error;
mod oauth;
mod runtimes;
pub mod types;

pub use assistants::{AssistantsResource, ASSISTANTS_PATH};
pub use client::{RoboAi, ENV_PREFIX};
pub use error::{CallContext, RoboAiError};
pub use oauth::{OauthResource, CHECK_TOKEN_PATH, TOKEN_PATH};
pub use runtimes::RuntimesResource;
pub use types::*;
