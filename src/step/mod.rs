pub mod definition;
pub mod example;

pub use definition::*;
pub use example::*;
