use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::fs;

pub const DEFAULT_USER_INPUT: &str = "Hello, how are you?";

pub const MAX_EMBEDDING_DIMENSION: usize = 1_024;
pub const MAX_SEQUENCE_LENGTH: usize = 512;
pub const MAX_VOCABULARY_SIZE: u32 = 1_000_000;
pub const MAX_LOGITS_VOCABULARY: usize = 1_024;

/// Tunables for the example generator. Every field has a default, so a
/// config file only needs to name what it changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GeneratorConfig {
    /// Input used when the caller supplies none.
    pub default_input: String,
    /// Fixes the illustrative randomness. `None` draws a fresh seed per example.
    pub seed: Option<u64>,
    pub embedding_dimension: usize,
    /// Upper bound on the simulated attention window.
    pub max_sequence_length: usize,
    pub vocabulary_size: u32,
    /// Number of logits produced by the logits stage.
    pub logits_vocabulary: usize,
    pub top_k: usize,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            default_input: DEFAULT_USER_INPUT.to_string(),
            seed: None,
            embedding_dimension: 8,
            max_sequence_length: 8,
            vocabulary_size: 50_000,
            logits_vocabulary: 10,
            top_k: 3,
        }
    }
}

impl GeneratorConfig {
    /// Loads a JSON config file.
    pub fn from_file(path: &str) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_string(),
            source,
        })?;
        Self::from_json(&content)
    }

    /// Parses a JSON config and checks every size against its bounds.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Rejects sizes outside the ranges the stage generators can handle.
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_range(
            "embeddingDimension",
            self.embedding_dimension as u64,
            1,
            MAX_EMBEDDING_DIMENSION as u64,
        )?;
        check_range(
            "maxSequenceLength",
            self.max_sequence_length as u64,
            1,
            MAX_SEQUENCE_LENGTH as u64,
        )?;
        check_range(
            "vocabularySize",
            u64::from(self.vocabulary_size),
            4,
            u64::from(MAX_VOCABULARY_SIZE),
        )?;
        check_range(
            "logitsVocabulary",
            self.logits_vocabulary as u64,
            1,
            MAX_LOGITS_VOCABULARY as u64,
        )?;
        check_range(
            "topK",
            self.top_k as u64,
            1,
            MAX_LOGITS_VOCABULARY as u64,
        )
    }

    /// A copy with every size clamped into its valid range.
    pub fn clamped(mut self) -> Self {
        self.embedding_dimension = self.embedding_dimension.clamp(1, MAX_EMBEDDING_DIMENSION);
        self.max_sequence_length = self.max_sequence_length.clamp(1, MAX_SEQUENCE_LENGTH);
        self.vocabulary_size = self.vocabulary_size.clamp(4, MAX_VOCABULARY_SIZE);
        self.logits_vocabulary = self.logits_vocabulary.clamp(1, MAX_LOGITS_VOCABULARY);
        self.top_k = self.top_k.clamp(1, MAX_LOGITS_VOCABULARY);
        self
    }
}

fn check_range(field: &'static str, value: u64, min: u64, max: u64) -> Result<(), ConfigError> {
    if (min..=max).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::OutOfRange {
            field,
            value,
            min,
            max,
        })
    }
}
