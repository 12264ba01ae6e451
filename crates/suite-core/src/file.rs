//! Persistencia de recetas en JSON.
//!
//! Formato: array de `{ "operation": <nombre>, "args": { ... } }`; el orden
//! del array es el orden de ejecución. En la carga directa un nombre fuera
//! del registro es un error duro; en la carga invertida cada paso
//! problemático (nombre desconocido, sin inversa, argumentos inválidos para
//! la inversa) se salta con un aviso.

use std::fs;
use std::path::Path;

use serde::Deserialize;

use suite_ops::{OpId, StepArgs};

use crate::errors::PipelineError;
use crate::invert::invert_recipe;
use crate::model::{Recipe, RecipeStep};

/// Paso crudo tal como vive en el archivo: el nombre todavía sin resolver.
#[derive(Debug, Deserialize)]
struct RawStep {
    operation: String,
    #[serde(default)]
    args: StepArgs,
}

/// Escribe la receta como JSON con indentación.
pub fn save_recipe(path: &Path, recipe: &Recipe) -> Result<(), PipelineError> {
    let json = serde_json::to_string_pretty(recipe)?;
    fs::write(path, json)?;
    Ok(())
}

/// Carga una receta; cualquier nombre fuera del registro aborta la carga.
pub fn load_recipe(path: &Path) -> Result<Recipe, PipelineError> {
    let raw = read_raw(path)?;
    let mut recipe = Recipe::new();
    for step in raw {
        let op = OpId::from_name(&step.operation).ok_or(PipelineError::UnknownOperation(step.operation))?;
        recipe.push(RecipeStep::with_args(op, step.args));
    }
    Ok(recipe)
}

/// Carga una receta y deriva su inversa en un solo paso: orden inverso,
/// sustitución por la operación inversa, argumentos tal cual. Los pasos
/// problemáticos se saltan; cada salto produce un aviso legible.
pub fn load_inverted_recipe(path: &Path) -> Result<(Recipe, Vec<String>), PipelineError> {
    let raw = read_raw(path)?;
    let mut source = Recipe::new();
    let mut warnings = Vec::new();
    for (index, step) in raw.into_iter().enumerate() {
        match OpId::from_name(&step.operation) {
            Some(op) => source.push(RecipeStep::with_args(op, step.args)),
            None => warnings.push(format!("step {} ({}) skipped: unknown operation", index + 1, step.operation)),
        }
    }
    let inversion = invert_recipe(&source);
    warnings.extend(inversion.warnings.iter().map(|w| w.to_string()));
    Ok((inversion.recipe, warnings))
}

fn read_raw(path: &Path) -> Result<Vec<RawStep>, PipelineError> {
    let text = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&text)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use uuid::Uuid;

    fn temp_path() -> PathBuf {
        std::env::temp_dir().join(format!("suite-recipe-{}.json", Uuid::new_v4()))
    }

    #[test]
    fn save_then_load_round_trip() {
        let mut args = StepArgs::new();
        args.insert("shift".to_string(), "5".to_string());
        let recipe = Recipe::from_steps(vec![RecipeStep::with_args(OpId::CaesarEncrypt, args),
                                             RecipeStep::new(OpId::ToBase64)]);

        let path = temp_path();
        save_recipe(&path, &recipe).unwrap();
        let loaded = load_recipe(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(loaded, recipe);
    }

    #[test]
    fn unknown_operation_is_a_hard_error_on_direct_load() {
        let path = temp_path();
        std::fs::write(&path, r#"[{"operation": "Quantum Encrypt", "args": {}}]"#).unwrap();
        let result = load_recipe(&path);
        std::fs::remove_file(&path).ok();

        match result {
            Err(PipelineError::UnknownOperation(name)) => assert_eq!(name, "Quantum Encrypt"),
            other => panic!("expected UnknownOperation, got {other:?}"),
        }
    }

    #[test]
    fn inverted_load_skips_problem_steps_with_warnings() {
        let path = temp_path();
        std::fs::write(&path,
                       r#"[
                           {"operation": "To Base64", "args": {}},
                           {"operation": "Quantum Encrypt", "args": {}},
                           {"operation": "MD5", "args": {}},
                           {"operation": "To Hex", "args": {}}
                       ]"#).unwrap();
        let (recipe, warnings) = load_inverted_recipe(&path).unwrap();
        std::fs::remove_file(&path).ok();

        let steps = recipe.steps();
        assert_eq!(steps.len(), 2);
        assert_eq!(steps[0].operation, OpId::FromHex);
        assert_eq!(steps[1].operation, OpId::FromBase64);
        assert_eq!(warnings.len(), 2);
        assert!(warnings[0].contains("Quantum Encrypt"));
        assert!(warnings[1].contains("MD5"));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let path = temp_path();
        assert!(matches!(load_recipe(&path), Err(PipelineError::Io(_))));
    }

    #[test]
    fn malformed_json_is_a_format_error() {
        let path = temp_path();
        std::fs::write(&path, "{ not json").unwrap();
        let result = load_recipe(&path);
        std::fs::remove_file(&path).ok();
        assert!(matches!(result, Err(PipelineError::Json(_))));
    }
}
