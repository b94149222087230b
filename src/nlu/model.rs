//! Handle on one NLU model.

use super::error::{NluError, NluStatusMapper};
use super::training::{load_training_yaml, validate_training_data};
use super::types::{
    CreateResponse, DeleteContent, DeleteResponse, MetricsResponse, PredictRequest,
    PredictResponse, StatusResponse, TrainOptions, TrainResponse, TrainingData,
};
use crate::registry::{Resource, ResourceContext};
use crate::transport::{Auth, RequestMethod, RequestOptions};
use serde::de::DeserializeOwned;
use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::{debug, info};

/// Endpoints scoped to a single model.
///
/// A handle is either bound to a model uuid or unbound. Unbound handles can only
/// [`create`](Self::create) a model, which binds them.
#[derive(Debug)]
pub struct NluModel {
    ctx: ResourceContext,
    model_uuid: Option<String>,
}

impl Resource for NluModel {
    fn from_context(ctx: &ResourceContext) -> Self {
        Self {
            ctx: ctx.clone(),
            model_uuid: None,
        }
    }

    fn context(&self) -> &ResourceContext {
        &self.ctx
    }
}

impl NluModel {
    pub(crate) fn bound(ctx: &ResourceContext, model_uuid: impl Into<String>) -> Self {
        Self {
            ctx: ctx.clone(),
            model_uuid: Some(model_uuid.into()),
        }
    }

    pub fn model_uuid(&self) -> Option<&str> {
        self.model_uuid.as_deref()
    }

    /// Create a model for `language` (two-letter code) and bind this handle to it.
    pub fn create(&mut self, language: &str) -> Result<CreateResponse, NluError> {
        if let Some(model_uuid) = &self.model_uuid {
            return Err(NluError::ModelAlreadyBound {
                model_uuid: model_uuid.clone(),
            });
        }
        let response: CreateResponse = self.call(
            RequestMethod::Post,
            &format!("/create/{}", language),
            RequestOptions::new(),
        )?;
        info!(model_uuid = %response.content.model_uuid, language, "NLU model created");
        self.model_uuid = Some(response.content.model_uuid.clone());
        Ok(response)
    }

    pub fn train(
        &self,
        data: &TrainingData,
        options: TrainOptions,
    ) -> Result<TrainResponse, NluError> {
        let uuid = self.require_uuid()?;
        validate_training_data(data)?;
        debug!(model_uuid = uuid, entries = data.nlu.len(), "submitting training data");
        let request = RequestOptions::new()
            .param("model_eval", options.model_eval)
            .param("max_allowed_error_number", options.max_allowed_error_number)
            .param("min_word_length", options.min_word_length)
            .json(data)?;
        self.call(RequestMethod::Post, &format!("/train/{}", uuid), request)
    }

    /// Train from a Rasa v3 NLU YAML file.
    pub fn train_from_yaml(
        &self,
        path: impl AsRef<Path>,
        options: TrainOptions,
    ) -> Result<TrainResponse, NluError> {
        self.require_uuid()?;
        let data = load_training_yaml(path)?;
        self.train(&data, options)
    }

    pub fn status(&self) -> Result<StatusResponse, NluError> {
        let uuid = self.require_uuid()?;
        self.call(RequestMethod::Get, &format!("/status/{}", uuid), RequestOptions::new())
    }

    pub fn metrics(&self) -> Result<MetricsResponse, NluError> {
        let uuid = self.require_uuid()?;
        self.call(RequestMethod::Get, &format!("/metrics/{}", uuid), RequestOptions::new())
    }

    pub fn predict(&self, request: &PredictRequest) -> Result<PredictResponse, NluError> {
        let uuid = self.require_uuid()?;
        self.call(
            RequestMethod::Post,
            &format!("/predict/{}", uuid),
            RequestOptions::new().json(request)?,
        )
    }

    /// Delete the model on the service. The handle stays bound to the (now gone) uuid.
    ///
    /// Any 2xx counts as deleted whatever the body holds. The result names this handle's
    /// uuid and carries the server timestamp when the body is a regular envelope, else the
    /// local time in seconds since the Unix epoch.
    pub fn delete(&self) -> Result<DeleteResponse, NluError> {
        let uuid = self.require_uuid()?;
        let body = self.ctx.executor().execute_raw(
            RequestMethod::Delete,
            &format!("/delete/{}", uuid),
            RequestOptions::new().auth(Auth::Basic),
            &NluStatusMapper,
        )?;
        info!(model_uuid = uuid, "NLU model deleted");

        let timestamp = match serde_json::from_slice::<DeleteResponse>(&body) {
            Ok(envelope) => envelope.timestamp,
            Err(_) => unix_timestamp(),
        };
        Ok(DeleteResponse {
            timestamp,
            content: DeleteContent {
                model_uuid: uuid.to_string(),
            },
        })
    }

    fn require_uuid(&self) -> Result<&str, NluError> {
        self.model_uuid.as_deref().ok_or(NluError::ModelNotBound)
    }

    fn call<T: DeserializeOwned>(
        &self,
        method: RequestMethod,
        path: &str,
        options: RequestOptions,
    ) -> Result<T, NluError> {
        self.ctx
            .executor()
            .execute(method, path, options.auth(Auth::Basic), &NluStatusMapper)
    }
}

fn unix_timestamp() -> String {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or_default()
        .to_string()
}
