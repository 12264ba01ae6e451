//! Eventos del motor y su almacenamiento append-only.

pub mod store;
pub mod types;

pub use store::{EventStore, InMemoryEventStore};
pub use types::{PipelineEvent, PipelineEventKind};
