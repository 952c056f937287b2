use thiserror::Error;

/// Errors returned by cursor movement on a `LifecycleManager`.
///
/// These are recoverable: the cursor is left where it was.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NavigationError {
    #[error("Step with id '{0}' not found")]
    StepNotFound(String),

    #[error("Current step not found")]
    CurrentStepNotFound,

    #[error("Already at the last step")]
    AtLastStep,

    #[error("Already at the first step")]
    AtFirstStep,
}

/// Errors that can occur while synthesizing an example for a pipeline stage.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GenerationError {
    #[error("No example generator found for step: {0}")]
    NoGenerator(String),

    #[error("No current step to generate an example for")]
    NoCurrentStep,
}

/// A stage id that does not name one of the built-in pipeline stages.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown pipeline stage '{0}'")]
pub struct UnknownStage(pub String);

impl From<UnknownStage> for GenerationError {
    fn from(err: UnknownStage) -> Self {
        GenerationError::NoGenerator(err.0)
    }
}

/// Errors raised when reading a lifecycle document back in.
#[derive(Error, Debug)]
pub enum ImportError {
    #[error("Failed to parse lifecycle JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Could not read lifecycle file '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Errors raised when writing a lifecycle document out.
#[derive(Error, Debug)]
pub enum ExportError {
    #[error("Failed to serialize lifecycle: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Could not write lifecycle file '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Errors raised while loading a generator configuration file.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Could not read config file '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Config field '{field}' is {value}, expected a value between {min} and {max}")]
    OutOfRange {
        field: &'static str,
        value: u64,
        min: u64,
        max: u64,
    },
}
