//! Tipos de evento del pipeline y estructura `PipelineEvent`.
//!
//! Rol en el motor:
//! - Cada invocación del ejecutor emite eventos a un `EventStore` append-only.
//! - Los eventos son la cola de estado que consume la capa de presentación
//!   (progreso, avisos de wrap, pasos saltados al invertir).
//! - El enum `PipelineEventKind` define el contrato observable del motor.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum PipelineEventKind {
    /// Una receta quedó cargada (desde archivo o programáticamente).
    RecipeLoaded { step_count: usize },
    /// Un paso comenzó su ejecución. No implica éxito.
    StepStarted { step_index: usize, operation: String },
    /// Un paso terminó correctamente.
    StepFinished { step_index: usize, operation: String },
    /// Un paso terminó con error terminal (stop-on-failure).
    StepFailed {
        step_index: usize,
        operation:  String,
        error:      String,
    },
    /// El cursor del modo paso a paso quedó más allá del final y volvió a 0.
    CursorWrapped,
    /// Un bake completo terminó con éxito.
    BakeCompleted { step_count: usize },
    /// Al invertir, un paso sin inversa (o con argumentos inválidos para la
    /// inversa) fue saltado.
    InversionStepSkipped { step_index: usize, operation: String, reason: String },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineEvent {
    pub seq: u64, // asignado por el EventStore (orden append)
    pub session_id: Uuid,
    pub kind: PipelineEventKind,
    pub ts: DateTime<Utc>, // metadato, nunca semántico
}
