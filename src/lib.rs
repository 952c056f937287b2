//! # LLM Lifecycle - A Walkable Model of an LLM Request
//!
//! **llm-lifecycle** models the conceptual stages of a large-language-model
//! request/response cycle as a navigable, stateful tree, and pairs it with a
//! generator that synthesizes illustrative data for each stage from a single
//! user-supplied string. It is a teaching aid: nothing here tokenizes,
//! runs a transformer or samples for real, and no external service is called.
//!
//! ## Core Workflow
//!
//! 1.  **Build a Tree**: Use [`lifecycle::default_steps`] for the built-in five-stage
//!     pipeline, or assemble your own `Vec<Step>`.
//! 2.  **Wrap It**: Hand the tree to a [`LifecycleManager`], which owns it and tracks the
//!     cursor, per-step status, completion counter and a cache of generated examples.
//! 3.  **Walk and Mark**: Navigate by id or in pre-order with `navigate_to_next` /
//!     `navigate_to_previous`, and mark steps active or completed.
//! 4.  **Illustrate**: Ask an [`ExampleGenerator`] for the active stage's example and cache it.
//! 5.  **Persist**: Export the aggregate to JSON and read it back later.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use llm_lifecycle::prelude::*;
//!
//! fn main() -> Result<()> {
//!     let mut manager = create_default_lifecycle(Some("Explain attention".to_string()));
//!
//!     manager.navigate_to_step("tokenization")?;
//!     let next = manager.navigate_to_next()?;
//!     println!("Now at: {}", next.title());
//!
//!     let generator = ExampleGenerator::new("Explain attention").with_seed(7);
//!     let example = manager.generate_example_for_current(&generator)?;
//!     println!("Example type: {}", example.data_type);
//!
//!     manager.mark_step_completed("input-processing");
//!     let progress = manager.progress();
//!     println!("{}/{} ({}%)", progress.completed, progress.total, progress.percentage);
//!
//!     let json = export_to_json(&manager.lifecycle())?;
//!     let restored = LifecycleManager::from_lifecycle(import_from_json(&json)?);
//!     assert_eq!(restored.total_steps(), 21);
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod generator;
pub mod lifecycle;
pub mod prelude;
pub mod step;
pub mod tree;

pub use config::GeneratorConfig;
pub use generator::{ExampleGenerator, StageId, generate_example_for_request};
pub use lifecycle::{Lifecycle, LifecycleManager, StepView};
pub use step::{DataType, Example, Step, StepStatus};
