//! The stateful side of the model: the lifecycle aggregate, its manager and
//! the built-in pipeline.

mod arena;
pub mod defaults;
pub mod document;
pub mod manager;

pub use arena::StepView;
pub use defaults::*;
pub use document::*;
pub use manager::*;
