//! Receta: lista ordenada y mutable de pasos.
//!
//! El orden del `Vec` ES el orden de ejecución. La validación de argumentos
//! se difiere a la ejecución: una receta puede contener pasos con argumentos
//! todavía incompletos mientras el usuario la edita.

use serde::{Deserialize, Serialize};

use suite_ops::{OpId, StepArgs};

/// Un paso: operación del registro más sus argumentos como strings crudos.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecipeStep {
    pub operation: OpId,
    #[serde(default)]
    pub args: StepArgs,
}

impl RecipeStep {
    pub fn new(operation: OpId) -> Self {
        Self { operation, args: StepArgs::new() }
    }

    pub fn with_args(operation: OpId, args: StepArgs) -> Self {
        Self { operation, args }
    }
}

/// Lista ordenada de pasos. Puede estar vacía; hornear una receta vacía es
/// un error de precondición, nunca un pánico.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Recipe {
    steps: Vec<RecipeStep>,
}

impl Recipe {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_steps(steps: Vec<RecipeStep>) -> Self {
        Self { steps }
    }

    pub fn push(&mut self, step: RecipeStep) {
        self.steps.push(step);
    }

    /// Quita el paso en `index`; `None` si está fuera de rango.
    pub fn remove(&mut self, index: usize) -> Option<RecipeStep> {
        if index < self.steps.len() {
            Some(self.steps.remove(index))
        } else {
            None
        }
    }

    pub fn clear(&mut self) {
        self.steps.clear();
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn steps(&self) -> &[RecipeStep] {
        &self.steps
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_remove_clear() {
        let mut recipe = Recipe::new();
        assert!(recipe.is_empty());
        recipe.push(RecipeStep::new(OpId::ToBase64));
        recipe.push(RecipeStep::new(OpId::ToHex));
        assert_eq!(recipe.len(), 2);

        let removed = recipe.remove(0).unwrap();
        assert_eq!(removed.operation, OpId::ToBase64);
        assert_eq!(recipe.remove(5), None);

        recipe.clear();
        assert!(recipe.is_empty());
    }

    #[test]
    fn serializes_as_a_plain_array() {
        let mut recipe = Recipe::new();
        recipe.push(RecipeStep::new(OpId::Md5));
        let json = serde_json::to_string(&recipe).unwrap();
        assert_eq!(json, r#"[{"operation":"MD5","args":{}}]"#);
    }
}
