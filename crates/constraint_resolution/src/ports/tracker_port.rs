use crate::domain::{ResolutionError, UnknownStructureEvent};

pub trait UnknownStructureTracker: Send + Sync {
    fn record(&self, event: &UnknownStructureEvent) -> Result<(), ResolutionError>;
}
