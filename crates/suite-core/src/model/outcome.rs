//! Resultado observable de una invocación del ejecutor.

use std::fmt;

use serde::{Deserialize, Serialize};

use suite_ops::OpId;

/// Paso que falló, con su índice 0-based y la operación.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FailedStep {
    pub index: usize,
    pub operation: OpId,
}

impl FailedStep {
    /// Posición 1-based, para mensajes al usuario ("step 2 (Caesar Encrypt)").
    pub fn position(&self) -> usize {
        self.index + 1
    }
}

impl fmt::Display for FailedStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "step {} ({})", self.position(), self.operation)
    }
}

/// Desenlace de un bake o de un run_step.
///
/// `EndOfRecipe` es el aviso de wrap del modo paso a paso: el cursor quedó
/// más allá del último paso y volvió a 0 sin ejecutar nada. Es una variante
/// propia y no un error disfrazado, para que la capa de presentación pueda
/// anunciarlo sin tratarlo como fallo.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum PipelineOutcome {
    Success { output: String },
    EndOfRecipe,
    Failure { step: Option<FailedStep>, message: String },
}

impl PipelineOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, PipelineOutcome::Success { .. })
    }

    /// El output si hubo éxito.
    pub fn output(&self) -> Option<&str> {
        match self {
            PipelineOutcome::Success { output } => Some(output),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failed_step_position_is_one_based() {
        let failed = FailedStep { index: 0, operation: OpId::FromHex };
        assert_eq!(failed.position(), 1);
        assert_eq!(failed.to_string(), "step 1 (From Hex)");
    }

    #[test]
    fn outcome_accessors() {
        let ok = PipelineOutcome::Success { output: "x".into() };
        assert!(ok.is_success());
        assert_eq!(ok.output(), Some("x"));
        assert_eq!(PipelineOutcome::EndOfRecipe.output(), None);
    }
}
