//! # robo-sdk
//!
//! ROBO.AI 助手管理 API 与 NLU 服务 API 的 Rust 客户端 SDK。
//!
//! Client SDK for two ROBO.AI services:
//!
//! - the **assistant management API** ([`RoboAi`]): OAuth token bootstrap, assistants and
//!   bot-runtime lifecycle (deploy, start, stop, remove, logs);
//! - the **NLU service API** ([`RoboNlu`]): model creation, training, evaluation metrics
//!   and prediction.
//!
//! ## Overview
//!
//! Both clients are thin trees of typed resources over one shared request executor
//! ([`transport::HttpExecutor`]). A client owns a single [`Config`] and a single
//! [`Session`]; every resource in its tree shares them, so storing a token once makes it
//! visible everywhere.
//!
//! Calls are blocking: each resource method issues exactly one HTTP request and returns
//! once the response arrives. There is no retry, no background work, and the client tree
//! is `!Send` (use one client per thread).
//!
//! ## Errors
//!
//! The two services give overlapping status codes different meanings, so each has its own
//! error enum: [`RoboAiError`] and [`NluError`]. For the assistant API a 401 is reported as
//! invalid credentials while issuing a token, as an invalid token while introspecting one,
//! and as not-authorized everywhere else.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use robo_sdk::{Config, RoboAi};
//!
//! fn main() -> Result<(), robo_sdk::RoboAiError> {
//!     let config = Config::new("https://api.robo-ai.com", "client-id", "client-secret")?;
//!     let client = RoboAi::new(config)?;
//!
//!     let token = client.oauth().authenticate("my-api-key")?;
//!     client.set_session_token(token.access_token);
//!
//!     let page = client.assistants().get_list(1)?;
//!     for assistant in &page.content {
//!         println!("{:?}", assistant.name);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Module Organization
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`config`] | Endpoint, credentials and transport settings |
//! | [`session`] | Shared bearer-token holder |
//! | [`transport`] | Request composition, dispatch and status mapping hooks |
//! | [`registry`] | Resource tree plumbing |
//! | [`robo_ai`] | Assistant management API |
//! | [`nlu`] | NLU service API |

pub mod config;
pub mod nlu;
pub mod registry;
pub mod robo_ai;
pub mod session;
pub mod transport;

pub use config::{Config, ConfigBuilder, ConfigError};
pub use nlu::{NluError, NluModel, RoboNlu};
pub use robo_ai::{RoboAi, RoboAiError};
pub use session::Session;
pub use transport::{ProgressCallback, TransportError};
