//! Training data loading and validation.
//!
//! Rasa v3 NLU files keep the examples of each entry in a block string of `- ` prefixed
//! lines:
//!
//! ```yaml
//! version: "3.0"
//! nlu:
//! - intent: Greeting
//!   examples: |
//!     - Hi
//!     - Hello
//! ```
//!
//! [`load_training_yaml`] turns such a file into [`TrainingData`] with one string per line.

use super::error::NluError;
use super::types::{IntentEntry, LookupEntry, RegexEntry, TrainingData, TrainingEntry};
use regex::Regex;
use serde::Deserialize;
use std::path::Path;
use tracing::warn;

#[derive(Debug, Deserialize)]
struct RawTrainingFile {
    #[serde(default)]
    nlu: Vec<serde_yaml::Mapping>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawExamples {
    Block(String),
    List(Vec<String>),
}

impl RawExamples {
    fn into_lines(self) -> Vec<String> {
        match self {
            RawExamples::Block(block) => block.lines().filter_map(clean_example).collect(),
            // Flow-list items are already scalars; a leading '-' belongs to the value.
            RawExamples::List(items) => items
                .into_iter()
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect(),
        }
    }
}

/// Drop surrounding whitespace and the leading list marker of a block line; empty lines
/// vanish.
fn clean_example(line: &str) -> Option<String> {
    let trimmed = line.trim();
    let trimmed = trimmed.strip_prefix('-').unwrap_or(trimmed).trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

pub fn load_training_yaml(path: impl AsRef<Path>) -> Result<TrainingData, NluError> {
    let path = path.as_ref();
    let raw = std::fs::read_to_string(path).map_err(|source| NluError::TrainingFile {
        path: path.display().to_string(),
        source,
    })?;
    parse_training_yaml(&raw)
}

pub fn parse_training_yaml(raw: &str) -> Result<TrainingData, NluError> {
    let file: RawTrainingFile = serde_yaml::from_str(raw)?;
    let mut nlu = Vec::with_capacity(file.nlu.len());

    for mut item in file.nlu {
        let examples = match item.remove("examples") {
            Some(v) => serde_yaml::from_value::<RawExamples>(v)?.into_lines(),
            None => Vec::new(),
        };
        let key_of = |k: &str| item.get(k).and_then(|v| v.as_str()).map(String::from);

        let entry = if let Some(intent) = key_of("intent") {
            TrainingEntry::Intent(IntentEntry { intent, examples })
        } else if let Some(lookup) = key_of("lookup") {
            TrainingEntry::Lookup(LookupEntry { lookup, examples })
        } else if let Some(regex) = key_of("regex") {
            TrainingEntry::Regex(RegexEntry { regex, examples })
        } else {
            let keys: Vec<String> = item
                .keys()
                .filter_map(|k| k.as_str().map(String::from))
                .collect();
            warn!(?keys, "skipping unsupported training entry");
            continue;
        };
        nlu.push(entry);
    }
    Ok(TrainingData { nlu })
}

/// Reject data the service would choke on: unnamed entries and regex entries whose
/// examples are not valid patterns.
pub fn validate_training_data(data: &TrainingData) -> Result<(), NluError> {
    for entry in &data.nlu {
        if entry.name().trim().is_empty() {
            return Err(NluError::InvalidTrainingData {
                entry: String::new(),
                reason: "entry name is empty".to_string(),
            });
        }
        if let TrainingEntry::Regex(re) = entry {
            for pattern in &re.examples {
                Regex::new(pattern).map_err(|e| NluError::InvalidTrainingData {
                    entry: re.regex.clone(),
                    reason: format!("invalid pattern '{}': {}", pattern, e),
                })?;
            }
        }
    }
    Ok(())
}
