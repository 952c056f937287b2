//! Pure functions over step forests: traversal, lookup, statistics and validation.
//!
//! None of these mutate their input. Lookups that can miss return `Option`,
//! and multi-result queries return borrowed steps in pre-order.

pub mod query;
pub mod summary;
pub mod validation;

pub use query::*;
pub use summary::*;
pub use validation::*;
