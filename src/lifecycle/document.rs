use crate::error::{ExportError, ImportError};
use crate::step::{Example, Step};
use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize};
use std::fs;

/// The full lifecycle aggregate in its exchange shape.
///
/// `generated_examples` always serializes as an object; a document without
/// the field, or with `null` in it, reads back with an empty map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Lifecycle {
    pub steps: Vec<Step>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_step_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_input: Option<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub generated_examples: IndexMap<String, Example>,
    pub total_steps: usize,
    pub completed_steps: usize,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<IndexMap<String, Example>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<IndexMap<String, Example>>::deserialize(deserializer)?.unwrap_or_default())
}

impl Lifecycle {
    /// Serializes the lifecycle as pretty-printed JSON.
    pub fn to_json(&self) -> Result<String, ExportError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parses a lifecycle document. Malformed JSON is a hard failure.
    pub fn from_json(json: &str) -> Result<Self, ImportError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Writes the lifecycle document to `path`.
    pub fn save(&self, path: &str) -> Result<(), ExportError> {
        let json = self.to_json()?;
        fs::write(path, json).map_err(|source| ExportError::Io {
            path: path.to_string(),
            source,
        })
    }

    /// Reads a lifecycle document from `path`.
    pub fn from_file(path: &str) -> Result<Self, ImportError> {
        let json = fs::read_to_string(path).map_err(|source| ImportError::Io {
            path: path.to_string(),
            source,
        })?;
        Self::from_json(&json)
    }
}

pub fn export_to_json(lifecycle: &Lifecycle) -> Result<String, ExportError> {
    lifecycle.to_json()
}

pub fn import_from_json(json: &str) -> Result<Lifecycle, ImportError> {
    Lifecycle::from_json(json)
}
