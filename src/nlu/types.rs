//! Request and response shapes of the NLU service.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

// ---------------------------------------------------------------------------
// Requests
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntentEntry {
    pub intent: String,
    pub examples: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LookupEntry {
    pub lookup: String,
    pub examples: Vec<String>,
}

/// Named set of regular expressions; every example must be a valid pattern.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegexEntry {
    pub regex: String,
    pub examples: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TrainingEntry {
    Intent(IntentEntry),
    Lookup(LookupEntry),
    Regex(RegexEntry),
}

impl TrainingEntry {
    pub fn intent(name: impl Into<String>, examples: &[&str]) -> Self {
        Self::Intent(IntentEntry {
            intent: name.into(),
            examples: examples.iter().map(|s| s.to_string()).collect(),
        })
    }

    pub fn lookup(name: impl Into<String>, examples: &[&str]) -> Self {
        Self::Lookup(LookupEntry {
            lookup: name.into(),
            examples: examples.iter().map(|s| s.to_string()).collect(),
        })
    }

    pub fn regex(name: impl Into<String>, patterns: &[&str]) -> Self {
        Self::Regex(RegexEntry {
            regex: name.into(),
            examples: patterns.iter().map(|s| s.to_string()).collect(),
        })
    }

    pub fn name(&self) -> &str {
        match self {
            Self::Intent(e) => &e.intent,
            Self::Lookup(e) => &e.lookup,
            Self::Regex(e) => &e.regex,
        }
    }

    pub fn examples(&self) -> &[String] {
        match self {
            Self::Intent(e) => &e.examples,
            Self::Lookup(e) => &e.examples,
            Self::Regex(e) => &e.examples,
        }
    }
}

/// Body of the train call.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrainingData {
    pub nlu: Vec<TrainingEntry>,
}

impl TrainingData {
    pub fn new(nlu: Vec<TrainingEntry>) -> Self {
        Self { nlu }
    }
}

/// Query knobs of the train call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrainOptions {
    /// Evaluate the model before training on the data.
    pub model_eval: bool,
    /// Allowed errors when fuzzy-matching lookup entities.
    pub max_allowed_error_number: u32,
    /// Minimum word length for fuzzy matching to apply.
    pub min_word_length: u32,
}

impl Default for TrainOptions {
    fn default() -> Self {
        Self {
            model_eval: false,
            max_allowed_error_number: 3,
            min_word_length: 3,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PredictRequest {
    pub text: String,
}

impl PredictRequest {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

// ---------------------------------------------------------------------------
// Responses
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum JobStatus {
    New,
    ToTrain,
    Ready,
    Training,
    Failed,
}

/// Every NLU response: a server timestamp plus an endpoint-specific payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NluResponse<T> {
    pub timestamp: String,
    pub content: T,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateContent {
    pub model_uuid: String,
    pub job_status: JobStatus,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobStatusContent {
    pub job_status: JobStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportEntry {
    pub precision: f64,
    pub recall: f64,
    #[serde(rename = "f1-score")]
    pub f1_score: f64,
    pub support: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confused_with: Option<HashMap<String, u64>>,
}

/// Per-intent and averaged entries are objects; `accuracy` is a bare number.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ReportValue {
    Entry(ReportEntry),
    Score(f64),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfusionListEntry {
    pub intent: String,
    pub confused_with: String,
    pub count: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricsContent {
    pub report: HashMap<String, ReportValue>,
    pub confusion_list: Vec<ConfusionListEntry>,
    pub confusion_matrix: HashMap<String, HashMap<String, u64>>,
}

impl MetricsContent {
    pub fn accuracy(&self) -> Option<f64> {
        match self.report.get("accuracy") {
            Some(ReportValue::Score(v)) => Some(*v),
            _ => None,
        }
    }

    pub fn entry(&self, name: &str) -> Option<&ReportEntry> {
        match self.report.get(name) {
            Some(ReportValue::Entry(e)) => Some(e),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntentPrediction {
    pub name: String,
    pub confidence: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityPrediction {
    pub entity: String,
    pub start: u64,
    pub end: u64,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictContent {
    pub intents: Vec<IntentPrediction>,
    #[serde(default)]
    pub entities: Option<Vec<EntityPrediction>>,
}

impl PredictContent {
    /// Highest-confidence intent, if any.
    pub fn top_intent(&self) -> Option<&IntentPrediction> {
        self.intents
            .iter()
            .max_by(|a, b| a.confidence.total_cmp(&b.confidence))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteContent {
    pub model_uuid: String,
}

pub type CreateResponse = NluResponse<CreateContent>;
pub type TrainResponse = NluResponse<JobStatusContent>;
pub type StatusResponse = NluResponse<JobStatusContent>;
pub type MetricsResponse = NluResponse<MetricsContent>;
pub type PredictResponse = NluResponse<PredictContent>;
pub type DeleteResponse = NluResponse<DeleteContent>;
