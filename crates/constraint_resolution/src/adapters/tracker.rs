use std::sync::{Arc, Mutex, PoisonError};

use crate::domain::{ResolutionError, UnknownStructureEvent};
use crate::ports::UnknownStructureTracker;

/// Keeps events in memory; clones share the same buffer.
#[derive(Clone, Default, Debug)]
pub struct MemoryTracker {
    events: Arc<Mutex<Vec<UnknownStructureEvent>>>,
}

impl MemoryTracker {
    /// Drains the buffer. Events recorded before a panicking holder are kept.
    pub fn take(&self) -> Vec<UnknownStructureEvent> {
        let mut guard = self.events.lock().unwrap_or_else(PoisonError::into_inner);
        std::mem::take(&mut *guard)
    }
}

impl UnknownStructureTracker for MemoryTracker {
    fn record(&self, event: &UnknownStructureEvent) -> Result<(), ResolutionError> {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(event.clone());
        Ok(())
    }
}

/// Writes each event to the `log` facade and keeps nothing.
#[derive(Clone, Copy, Debug, Default)]
pub struct LogTracker;

impl UnknownStructureTracker for LogTracker {
    fn record(&self, event: &UnknownStructureEvent) -> Result<(), ResolutionError> {
        log::warn!(
            "unknown structure in problem {}: {:?} classified as {}",
            event.problem_id,
            event.description,
            event.structure_type
        );
        Ok(())
    }
}
