use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

const UNKNOWN_PROBLEM: &str = "unknown";

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnknownStructureEvent {
    pub problem_id: String,
    pub description: String,
    pub structure_type: String,
    pub timestamp_ms: u64,
    pub detection_attempted: bool,
    pub structures_found: usize,
    /// Set when recognition faulted rather than finding nothing.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fault: Option<String>,
}

impl UnknownStructureEvent {
    pub fn new(
        problem_id: &str,
        description: &str,
        structure_type: &str,
        fault: Option<String>,
    ) -> Self {
        let problem_id = if problem_id.is_empty() {
            UNKNOWN_PROBLEM.to_string()
        } else {
            problem_id.to_string()
        };
        let timestamp_ms = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or_default();
        Self {
            problem_id,
            description: description.to_string(),
            structure_type: structure_type.to_string(),
            timestamp_ms,
            detection_attempted: true,
            structures_found: 0,
            fault,
        }
    }
}
