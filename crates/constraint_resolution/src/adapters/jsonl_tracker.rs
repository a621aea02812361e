use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::domain::{ResolutionError, UnknownStructureEvent};
use crate::ports::UnknownStructureTracker;

/// Appends one JSON object per line.
#[derive(Clone, Debug)]
pub struct JsonlTracker {
    path: PathBuf,
}

impl JsonlTracker {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl UnknownStructureTracker for JsonlTracker {
    fn record(&self, event: &UnknownStructureEvent) -> Result<(), ResolutionError> {
        let line = serde_json::to_string(event)
            .map_err(|e| ResolutionError::PortError(format!("failed to encode event: {e}")))?;
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|e| ResolutionError::PortError(format!("failed to open tracker log: {e}")))?;
        writeln!(file, "{line}").map_err(|e| {
            ResolutionError::PortError(format!("failed to append tracker event: {e}"))
        })?;
        Ok(())
    }
}
