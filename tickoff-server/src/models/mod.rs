//! Domain models with validation at construction
//!
//! User-supplied titles are validated when building a `Title`.
//! Invalid input returns ValidationError, not panic.

pub mod title;
pub mod todo;
pub mod validation;

pub use title::Title;
pub use todo::{partition_by_done, Todo, TodoList};
pub use validation::ValidationError;
