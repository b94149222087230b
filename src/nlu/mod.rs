//! NLU 服务：模型创建、训练、评估与预测。
//!
//! NLU service API: model creation, training, evaluation and prediction.

mod client;
pub mod error;
mod model;
pub mod training;
pub mod types;

pub use client::{RoboNlu, ENV_PREFIX};
pub use error::{NluError, NluStatusMapper};
pub use model::NluModel;
pub use training::{load_training_yaml, parse_training_yaml, validate_training_data};
pub use types::*;
