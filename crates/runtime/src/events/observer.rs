//! Ready-made observers.

use std::io::Write;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use combat_core::CombatEvent;

use super::EventObserver;

/// Writes each event as one JSON object per line.
///
/// Write failures are logged and the event is dropped; presentation output
/// never interrupts a combat.
pub struct JsonLineObserver<W> {
    writer: W,
}

impl<W: Write + Send> JsonLineObserver<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write + Send> EventObserver for JsonLineObserver<W> {
    fn on_event(&mut self, event: &CombatEvent) {
        let written = serde_json::to_writer(&mut self.writer, event)
            .map_err(std::io::Error::from)
            .and_then(|()| self.writer.write_all(b"\n"));
        if let Err(err) = written {
            tracing::warn!(event = event.name(), "failed to write event: {err}");
        }
    }
}

/// Shared in-memory record of published events.
///
/// Clones share the same buffer, so one clone can be handed to the bus while
/// another is kept for inspection.
#[derive(Clone, Default)]
pub struct EventLog {
    events: Arc<Mutex<Vec<CombatEvent>>>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Removes and returns everything recorded so far.
    pub fn take(&self) -> Vec<CombatEvent> {
        std::mem::take(&mut *self.lock())
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.lock().iter().map(CombatEvent::name).collect()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<CombatEvent>> {
        self.events.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl EventObserver for EventLog {
    fn on_event(&mut self, event: &CombatEvent) {
        self.lock().push(event.clone());
    }
}
