use crate::error::GenerationError;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// What kind of data an `Example` illustrates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataType {
    Tokens,
    Embeddings,
    Attention,
    Probabilities,
    Text,
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DataType::Tokens => "tokens",
            DataType::Embeddings => "embeddings",
            DataType::Attention => "attention",
            DataType::Probabilities => "probabilities",
            DataType::Text => "text",
        };
        f.write_str(name)
    }
}

/// Synthetic input/output data for one pipeline stage, made for display.
///
/// The record shapes depend on the stage that produced them; `data_type`
/// tells a renderer how to read them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Example {
    pub input_data: Map<String, Value>,
    pub output_data: Map<String, Value>,
    pub explanation: String,
    pub data_type: DataType,
}

impl Example {
    pub fn output(&self, key: &str) -> Option<&Value> {
        self.output_data.get(key)
    }

    pub fn input(&self, key: &str) -> Option<&Value> {
        self.input_data.get(key)
    }
}

/// A request for a single example, as received from a caller outside the crate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExampleGenerationRequest {
    pub step_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_input: Option<String>,
}

/// The outcome of an example request in its wire shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExampleGenerationResult {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub example: Option<Example>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl From<Result<Example, GenerationError>> for ExampleGenerationResult {
    fn from(result: Result<Example, GenerationError>) -> Self {
        match result {
            Ok(example) => Self {
                success: true,
                example: Some(example),
                error: None,
            },
            Err(e) => Self {
                success: false,
                example: None,
                error: Some(e.to_string()),
            },
        }
    }
}
