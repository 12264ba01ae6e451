//! Derivación de la receta inversa.
//!
//! Recorre los pasos fuente en orden inverso y sustituye cada operación por
//! su inversa, llevando los argumentos tal cual. Es best-effort: un paso sin
//! inversa (hashes, RSA) o cuyos argumentos no validan contra el esquema de
//! la operación inversa se salta con un aviso en lugar de abortar.

use std::fmt;

use serde::{Deserialize, Serialize};

use suite_ops::OpId;

use crate::model::{Recipe, RecipeStep};

/// Aviso por paso saltado; `index` es el índice en la receta *fuente*.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InversionWarning {
    pub index: usize,
    pub operation: OpId,
    pub reason: String,
}

impl fmt::Display for InversionWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "step {} ({}) skipped: {}", self.index + 1, self.operation, self.reason)
    }
}

/// Resultado de invertir: la receta derivada más los pasos saltados.
#[derive(Debug, Clone, Default)]
pub struct Inversion {
    pub recipe: Recipe,
    pub warnings: Vec<InversionWarning>,
}

/// Invierte una receta paso a paso, en orden inverso al fuente.
pub fn invert_recipe(source: &Recipe) -> Inversion {
    let mut inversion = Inversion::default();
    for (index, step) in source.steps().iter().enumerate().rev() {
        match step.operation.inverse() {
            Some(inverse) => {
                // los argumentos viajan tal cual; se re-validan contra el
                // esquema de la operación inversa
                if let Err(error) = inverse.validate_args(&step.args) {
                    inversion.warnings.push(InversionWarning { index,
                                                               operation: step.operation,
                                                               reason: format!("arguments not valid for {inverse}: {error}") });
                    continue;
                }
                inversion.recipe.push(RecipeStep::with_args(inverse, step.args.clone()));
            }
            None => {
                inversion.warnings.push(InversionWarning { index,
                                                           operation: step.operation,
                                                           reason: "operation has no inverse".to_string() });
            }
        }
    }
    inversion
}
