use std::collections::HashMap;

use chrono::Utc;
use uuid::Uuid;

use super::{PipelineEvent, PipelineEventKind};

/// Almacenamiento de eventos append-only.
pub trait EventStore {
    /// Agrega un evento a partir de su kind y devuelve el evento completo
    /// (con seq y ts).
    fn append_kind(&mut self, session_id: Uuid, kind: PipelineEventKind) -> PipelineEvent;
    /// Lista los eventos de una sesión (orden ascendente por seq).
    fn list(&self, session_id: Uuid) -> Vec<PipelineEvent>;
}

impl<E: EventStore + ?Sized> EventStore for &mut E {
    fn append_kind(&mut self, session_id: Uuid, kind: PipelineEventKind) -> PipelineEvent {
        (**self).append_kind(session_id, kind)
    }

    fn list(&self, session_id: Uuid) -> Vec<PipelineEvent> {
        (**self).list(session_id)
    }
}

#[derive(Debug, Default)]
pub struct InMemoryEventStore {
    pub inner: HashMap<Uuid, Vec<PipelineEvent>>,
}

impl EventStore for InMemoryEventStore {
    fn append_kind(&mut self, session_id: Uuid, kind: PipelineEventKind) -> PipelineEvent {
        let vec = self.inner.entry(session_id).or_default();
        let seq = vec.len() as u64;
        let ev = PipelineEvent { seq, session_id, kind, ts: Utc::now() };
        vec.push(ev.clone());
        ev
    }

    fn list(&self, session_id: Uuid) -> Vec<PipelineEvent> {
        self.inner.get(&session_id).cloned().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn append_assigns_sequential_seq_per_session() {
        let mut store = InMemoryEventStore::default();
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();

        store.append_kind(a, PipelineEventKind::RecipeLoaded { step_count: 1 });
        store.append_kind(a, PipelineEventKind::CursorWrapped);
        store.append_kind(b, PipelineEventKind::RecipeLoaded { step_count: 2 });

        let events = store.list(a);
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].seq, 0);
        assert_eq!(events[1].seq, 1);
        assert_eq!(store.list(b).len(), 1);
        assert!(store.list(Uuid::new_v4()).is_empty());
    }
}
