use std::fs;
use std::path::Path;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use peopleops_core::PolicyId;

/// One policy document from the static dataset.
///
/// Immutable after load; the matcher indexes title, category, audience,
/// content and tags together.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PolicyDocument {
    pub policy_id: PolicyId,
    pub title: String,
    pub category: String,
    pub audience: String,
    pub content: String,
    #[serde(default)]
    pub tags: Vec<String>,
    pub effective_date: NaiveDate,
    pub last_updated: NaiveDate,
}

#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("policy dataset not readable at {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("policy dataset is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Read the policy corpus from a JSON array file. Called once at startup.
pub fn load_dataset(path: impl AsRef<Path>) -> Result<Vec<PolicyDocument>, DatasetError> {
    let path = path.as_ref();
    let raw = fs::read_to_string(path).map_err(|source| DatasetError::Io {
        path: path.display().to_string(),
        source,
    })?;
    Ok(serde_json::from_str(&raw)?)
}
