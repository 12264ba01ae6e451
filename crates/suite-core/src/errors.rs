//! Errores del motor de pipelines.

use thiserror::Error;

use suite_ops::OpError;

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("the input field is empty")] EmptyInput,
    #[error("the recipe has no steps")] EmptyRecipe,
    #[error("unknown operation: {0}")] UnknownOperation(String),
    #[error("a task is already running")] Busy,
    #[error(transparent)] Op(#[from] OpError),
    #[error("recipe file error: {0}")] Io(#[from] std::io::Error),
    #[error("recipe format error: {0}")] Json(#[from] serde_json::Error),
}
