//! suite-core: motor de pipelines de transformación.
//!
//! - `model`: receta, cursor de ejecución y desenlaces.
//! - `event`: eventos append-only del motor y su store.
//! - `engine`: el ejecutor (bake completo y paso a paso).
//! - `invert`: derivación best-effort de la receta inversa.
//! - `file`: persistencia JSON de recetas.
//! - `session`: estado interactivo con una tarea en vuelo como máximo.

pub mod engine;
pub mod errors;
pub mod event;
pub mod file;
pub mod invert;
pub mod model;
pub mod session;

pub use engine::PipelineEngine;
pub use errors::PipelineError;
pub use event::{EventStore, InMemoryEventStore, PipelineEvent, PipelineEventKind};
pub use file::{load_inverted_recipe, load_recipe, save_recipe};
pub use invert::{invert_recipe, Inversion, InversionWarning};
pub use model::{ExecutionCursor, FailedStep, PipelineOutcome, Recipe, RecipeStep};
pub use session::{step_args, PipelineSession};
