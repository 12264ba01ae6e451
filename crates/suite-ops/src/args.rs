//! Argumentos de paso y su esquema declarado.
//!
//! Cada operación declara un `ArgSpec`; los valores llegan como strings (tal
//! como se persisten en el archivo de receta) y se validan al momento de
//! ejecutar, nunca al construir la receta (validación diferida).

use std::collections::BTreeMap;

use crate::errors::OpError;

/// Bolsa de argumentos de un paso: nombre -> valor, siempre strings.
pub type StepArgs = BTreeMap<String, String>;

pub const ARG_SHIFT: &str = "shift";
pub const ARG_KEY: &str = "key";

/// Esquema de argumentos declarado por cada operación.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArgSpec {
    /// Sin argumentos.
    None,
    /// `shift`: entero en [1, 25].
    Shift,
    /// `key`: string de una línea (clave simétrica o de sustitución).
    Key,
    /// `key`: string multilínea (bloque PEM).
    MultilineKey,
}

/// Extrae y valida el argumento `shift`.
pub fn shift(args: &StepArgs) -> Result<i32, OpError> {
    let raw = args.get(ARG_SHIFT)
                  .ok_or_else(|| OpError::Validation("missing shift value".into()))?;
    let value: i32 = raw.trim()
                        .parse()
                        .map_err(|_| OpError::Validation("invalid shift value; must be an integer".into()))?;
    if !(1..=25).contains(&value) {
        return Err(OpError::Validation("shift must be between 1 and 25".into()));
    }
    Ok(value)
}

/// Extrae el argumento `key`, exigiendo que no esté vacío.
pub fn key(args: &StepArgs) -> Result<&str, OpError> {
    let raw = args.get(ARG_KEY)
                  .map(String::as_str)
                  .unwrap_or("");
    if raw.is_empty() {
        return Err(OpError::Validation("key cannot be empty".into()));
    }
    Ok(raw)
}
