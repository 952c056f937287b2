//! Prelude module for convenient imports
//!
//! This module re-exports the most commonly used types and functions from the
//! crate, so a single glob import covers building, walking, illustrating and
//! persisting a lifecycle.
//!
//! # Example
//!
//! ```rust,no_run
//! use llm_lifecycle::prelude::*;
//!
//! # fn run_example() -> Result<()> {
//! let lifecycle = Lifecycle::from_file("path/to/lifecycle.json")?;
//! let report = validate_lifecycle_structure(&lifecycle);
//! if !report.is_valid {
//!     for error in &report.errors {
//!         eprintln!("{}", error);
//!     }
//! }
//!
//! let manager = LifecycleManager::from_lifecycle(lifecycle);
//! println!("Progress: {}%", manager.progress().percentage);
//! # Ok(())
//! # }
//! ```

// Stateful model
pub use crate::lifecycle::{
    Lifecycle, LifecycleManager, Progress, StepView, create_default_lifecycle, default_steps,
    export_to_json, import_from_json,
};

// Step data
pub use crate::step::{
    DataType, Example, ExampleGenerationRequest, ExampleGenerationResult, Step, StepStatus,
    Visualization, VisualizationOverride, VisualizationType,
};

// Example generation
pub use crate::config::GeneratorConfig;
pub use crate::generator::{
    ExampleGenerator, StageId, generate_example_for_request, softmax, top_k,
};

// Tree utilities
pub use crate::tree::{
    ValidationReport, create_step_summary, flatten_steps, search_steps,
    validate_lifecycle_structure, validate_step_structure,
};

// Error types
pub use crate::error::{GenerationError, ImportError, NavigationError};

// Result type alias for convenience
pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;
