//! Ejecutor del pipeline: bake completo y modo paso a paso.

use uuid::Uuid;

use suite_ops::{OpError, OpId, StepArgs};

use crate::event::{EventStore, PipelineEventKind};
use crate::model::{ExecutionCursor, FailedStep, PipelineOutcome, Recipe};

/// Motor de ejecución de recetas.
///
/// Recorre los pasos en orden estricto, el output de cada uno alimenta el
/// input del siguiente, y el primer fallo aborta la cadena (stop-on-failure).
/// Cada invocación emite eventos al `EventStore` bajo el `session_id` del
/// motor.
#[derive(Debug)]
pub struct PipelineEngine<E>
    where E: EventStore
{
    event_store: E,
    session_id:  Uuid,
}

impl Default for PipelineEngine<crate::event::InMemoryEventStore> {
    fn default() -> Self {
        Self::new()
    }
}

impl PipelineEngine<crate::event::InMemoryEventStore> {
    /// Crea un motor con un event store en memoria.
    pub fn new() -> Self {
        Self::new_with_store(crate::event::InMemoryEventStore::default())
    }
}

impl<E> PipelineEngine<E>
    where E: EventStore
{
    /// Crea un motor con el store proporcionado y un `session_id` fresco.
    pub fn new_with_store(event_store: E) -> Self {
        Self { event_store, session_id: Uuid::new_v4() }
    }

    pub fn session_id(&self) -> Uuid {
        self.session_id
    }

    pub fn event_store(&self) -> &E {
        &self.event_store
    }

    pub fn event_store_mut(&mut self) -> &mut E {
        &mut self.event_store
    }

    /// Ejecuta la receta completa sobre `input`.
    ///
    /// Precondiciones (fallan antes de ejecutar operación alguna, sin paso
    /// asociado): input no vacío, receta no vacía.
    pub fn bake(&mut self, recipe: &Recipe, input: &str) -> PipelineOutcome {
        if input.is_empty() {
            return PipelineOutcome::Failure { step:    None,
                                              message: crate::PipelineError::EmptyInput.to_string(), };
        }
        if recipe.is_empty() {
            return PipelineOutcome::Failure { step:    None,
                                              message: crate::PipelineError::EmptyRecipe.to_string(), };
        }

        match self.execute_range(recipe, 0..recipe.len(), input) {
            Ok(output) => {
                self.event_store
                    .append_kind(self.session_id, PipelineEventKind::BakeCompleted { step_count: recipe.len() });
                PipelineOutcome::Success { output }
            }
            Err(failure) => failure,
        }
    }

    /// Ejecuta el paso apuntado por el cursor, re-ejecutando el prefijo
    /// `0..=cursor` desde el input *original* (nunca hay caché incremental).
    ///
    /// - Cursor más allá del final: vuelve a 0, emite `CursorWrapped` y
    ///   devuelve `EndOfRecipe` sin ejecutar nada.
    /// - Éxito: avanza el cursor en uno y devuelve el output acumulado.
    /// - Fallo: resetea el cursor y devuelve el paso culpable.
    pub fn run_step(&mut self, recipe: &Recipe, cursor: &mut ExecutionCursor, input: &str) -> PipelineOutcome {
        if input.is_empty() {
            return PipelineOutcome::Failure { step:    None,
                                              message: crate::PipelineError::EmptyInput.to_string(), };
        }
        if recipe.is_empty() {
            return PipelineOutcome::Failure { step:    None,
                                              message: crate::PipelineError::EmptyRecipe.to_string(), };
        }
        if cursor.past_end(recipe.len()) {
            cursor.reset();
            self.event_store.append_kind(self.session_id, PipelineEventKind::CursorWrapped);
            return PipelineOutcome::EndOfRecipe;
        }

        match self.execute_range(recipe, 0..cursor.step_index() + 1, input) {
            Ok(output) => {
                cursor.advance();
                PipelineOutcome::Success { output }
            }
            Err(failure) => {
                cursor.reset();
                failure
            }
        }
    }

    /// Pliega los pasos `range` de la receta sobre `input`, emitiendo los
    /// eventos de cada paso. `Err` es siempre `Failure` con el paso culpable.
    fn execute_range(&mut self,
                     recipe: &Recipe,
                     range: std::ops::Range<usize>,
                     input: &str)
                     -> Result<String, PipelineOutcome> {
        let mut current = input.to_string();
        for index in range {
            let step = &recipe.steps()[index];
            current = self.run_one(index, step.operation, &step.args, &current)
                          .map_err(|error| {
                              PipelineOutcome::Failure { step:    Some(FailedStep { index,
                                                                                    operation: step.operation, }),
                                                         message: error.to_string(), }
                          })?;
        }
        Ok(current)
    }

    fn run_one(&mut self, index: usize, op: OpId, args: &StepArgs, input: &str) -> Result<String, OpError> {
        self.event_store.append_kind(self.session_id,
                                     PipelineEventKind::StepStarted { step_index: index,
                                                                      operation:  op.name().to_string(), });
        match op.validate_args(args).and_then(|_| op.run(input, args)) {
            Ok(output) => {
                self.event_store.append_kind(self.session_id,
                                             PipelineEventKind::StepFinished { step_index: index,
                                                                               operation:  op.name().to_string(), });
                Ok(output)
            }
            Err(error) => {
                self.event_store.append_kind(self.session_id,
                                             PipelineEventKind::StepFailed { step_index: index,
                                                                             operation:  op.name().to_string(),
                                                                             error:      error.to_string(), });
                Err(error)
            }
        }
    }
}
