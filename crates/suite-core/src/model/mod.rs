//! Modelo de datos del motor: receta, cursor y desenlaces.

pub mod cursor;
pub mod outcome;
pub mod recipe;

pub use cursor::ExecutionCursor;
pub use outcome::{FailedStep, PipelineOutcome};
pub use recipe::{Recipe, RecipeStep};
