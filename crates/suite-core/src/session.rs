//! Sesión interactiva: estado de edición más una tarea en vuelo como máximo.
//!
//! La sesión es dueña de la receta, el cursor, el input y el event store.
//! `request_bake` / `request_step` lanzan un hilo trabajador de vida corta
//! que manda exactamente una respuesta por un canal mpsc; mientras esa
//! respuesta no se consuma (`poll` / `wait`), cualquier otra petición o
//! mutación se rechaza con `Busy`. Consumir la respuesta aplica la
//! actualización del cursor, vuelca los eventos del trabajador al store de
//! la sesión y rehabilita la mutación. Sin cancelación ni timeout.

use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread::{self, JoinHandle};

use uuid::Uuid;

use suite_ops::StepArgs;

use crate::engine::PipelineEngine;
use crate::errors::PipelineError;
use crate::event::{EventStore, InMemoryEventStore, PipelineEvent, PipelineEventKind};
use crate::invert::{invert_recipe, Inversion};
use crate::model::{ExecutionCursor, PipelineOutcome, Recipe, RecipeStep};

struct WorkerReply {
    outcome: PipelineOutcome,
    cursor:  ExecutionCursor,
    events:  Vec<PipelineEvent>,
}

struct PendingTask {
    rx:     Receiver<WorkerReply>,
    handle: JoinHandle<()>,
}

#[derive(Debug, Clone, Copy)]
enum TaskKind {
    Bake,
    Step,
}

pub struct PipelineSession {
    session_id: Uuid,
    recipe:     Recipe,
    cursor:     ExecutionCursor,
    input:      String,
    store:      InMemoryEventStore,
    pending:    Option<PendingTask>,
}

impl Default for PipelineSession {
    fn default() -> Self {
        Self::new()
    }
}

impl PipelineSession {
    pub fn new() -> Self {
        Self { session_id: Uuid::new_v4(),
               recipe:     Recipe::new(),
               cursor:     ExecutionCursor::new(),
               input:      String::new(),
               store:      InMemoryEventStore::default(),
               pending:    None, }
    }

    pub fn session_id(&self) -> Uuid {
        self.session_id
    }

    pub fn recipe(&self) -> &Recipe {
        &self.recipe
    }

    pub fn cursor(&self) -> ExecutionCursor {
        self.cursor
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    /// Eventos acumulados de la sesión (orden append).
    pub fn events(&self) -> Vec<PipelineEvent> {
        self.store.list(self.session_id)
    }

    pub fn is_busy(&self) -> bool {
        self.pending.is_some()
    }

    fn ensure_idle(&self) -> Result<(), PipelineError> {
        if self.pending.is_some() {
            Err(PipelineError::Busy)
        } else {
            Ok(())
        }
    }

    /// Reemplaza la receta completa; resetea el cursor.
    pub fn load_recipe(&mut self, recipe: Recipe) -> Result<(), PipelineError> {
        self.ensure_idle()?;
        self.cursor.reset();
        self.store.append_kind(self.session_id,
                               PipelineEventKind::RecipeLoaded { step_count: recipe.len() });
        self.recipe = recipe;
        Ok(())
    }

    pub fn add_step(&mut self, step: RecipeStep) -> Result<(), PipelineError> {
        self.ensure_idle()?;
        self.cursor.reset();
        self.recipe.push(step);
        Ok(())
    }

    pub fn remove_step(&mut self, index: usize) -> Result<Option<RecipeStep>, PipelineError> {
        self.ensure_idle()?;
        self.cursor.reset();
        Ok(self.recipe.remove(index))
    }

    pub fn clear_steps(&mut self) -> Result<(), PipelineError> {
        self.ensure_idle()?;
        self.cursor.reset();
        self.recipe.clear();
        Ok(())
    }

    pub fn set_input(&mut self, input: impl Into<String>) -> Result<(), PipelineError> {
        self.ensure_idle()?;
        self.cursor.reset();
        self.input = input.into();
        Ok(())
    }

    /// Lanza un bake completo en un hilo trabajador.
    pub fn request_bake(&mut self) -> Result<(), PipelineError> {
        self.spawn(TaskKind::Bake)
    }

    /// Lanza la ejecución de un solo paso (con su prefijo) en un trabajador.
    pub fn request_step(&mut self) -> Result<(), PipelineError> {
        self.spawn(TaskKind::Step)
    }

    fn spawn(&mut self, kind: TaskKind) -> Result<(), PipelineError> {
        self.ensure_idle()?;
        let recipe = self.recipe.clone();
        let input = self.input.clone();
        let mut cursor = self.cursor;
        let (tx, rx) = mpsc::channel();

        let handle = thread::spawn(move || {
            let mut engine = PipelineEngine::new();
            let outcome = match kind {
                TaskKind::Bake => {
                    cursor.reset();
                    engine.bake(&recipe, &input)
                }
                TaskKind::Step => engine.run_step(&recipe, &mut cursor, &input),
            };
            let events = engine.event_store().list(engine.session_id());
            // el receptor puede haberse ido; no hay nada que hacer entonces
            let _ = tx.send(WorkerReply { outcome, cursor, events });
        });

        self.pending = Some(PendingTask { rx, handle });
        Ok(())
    }

    /// Consulta no bloqueante: `None` mientras el trabajador siga corriendo.
    pub fn poll(&mut self) -> Option<PipelineOutcome> {
        let pending = self.pending.take()?;
        match pending.rx.try_recv() {
            Ok(reply) => {
                pending.handle.join().ok();
                Some(self.apply(reply))
            }
            Err(TryRecvError::Empty) => {
                self.pending = Some(pending);
                None
            }
            Err(TryRecvError::Disconnected) => {
                pending.handle.join().ok();
                Some(self.interrupted())
            }
        }
    }

    /// Espera bloqueante por la respuesta del trabajador en vuelo; `None` si
    /// no hay tarea en vuelo.
    pub fn wait(&mut self) -> Option<PipelineOutcome> {
        let pending = self.pending.take()?;
        let outcome = match pending.rx.recv() {
            Ok(reply) => self.apply(reply),
            Err(_) => self.interrupted(),
        };
        pending.handle.join().ok();
        Some(outcome)
    }

    fn apply(&mut self, reply: WorkerReply) -> PipelineOutcome {
        self.cursor = reply.cursor;
        for event in reply.events {
            self.store.append_kind(self.session_id, event.kind);
        }
        reply.outcome
    }

    fn interrupted(&mut self) -> PipelineOutcome {
        self.cursor.reset();
        PipelineOutcome::Failure { step: None, message: "the task was interrupted".to_string() }
    }

    /// Deriva la receta inversa de la receta actual, registrando un evento
    /// por cada paso saltado.
    pub fn invert(&mut self) -> Inversion {
        let inversion = invert_recipe(&self.recipe);
        for warning in &inversion.warnings {
            self.store.append_kind(self.session_id,
                                   PipelineEventKind::InversionStepSkipped { step_index: warning.index,
                                                                             operation:
                                                                                 warning.operation
                                                                                        .name()
                                                                                        .to_string(),
                                                                             reason: warning.reason.clone(), });
        }
        inversion
    }
}

/// Ayudante para construir los argumentos de un paso.
pub fn step_args(pairs: &[(&str, &str)]) -> StepArgs {
    pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
}
