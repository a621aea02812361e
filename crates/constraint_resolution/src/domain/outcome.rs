use grid_types::Grid;
use serde::{Deserialize, Serialize};
use structure_identification::{StructureType, SubstitutionRule};
use structure_recognition::RecognizedStructure;

/// Result of the recognition stage. `Empty` and `Faulted` degrade the same way
/// but stay apart so logs and events can tell them apart.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RecognitionOutcome {
    Recognized(Vec<RecognizedStructure>),
    Empty,
    Faulted(String),
}

impl RecognitionOutcome {
    pub fn from_instances(instances: Vec<RecognizedStructure>) -> Self {
        if instances.is_empty() {
            Self::Empty
        } else {
            Self::Recognized(instances)
        }
    }

    pub fn instance_count(&self) -> usize {
        match self {
            Self::Recognized(instances) => instances.len(),
            Self::Empty | Self::Faulted(_) => 0,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    Classify,
    ShortcutCheck,
    Recognize,
    Apply,
    LegacyFallback,
    Unrecognized,
    Done,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "reason", content = "detail")]
pub enum UnrecognizedReason {
    NoStructures,
    Faulted(String),
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum ResolutionOutcome {
    Applied {
        operator: String,
        instances: usize,
        rewritten: usize,
    },
    Shortcut,
    LegacyFallback {
        matches: usize,
    },
    Unrecognized {
        reason: UnrecognizedReason,
    },
}

impl ResolutionOutcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, Self::Applied { .. })
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Resolution {
    pub grid: Grid,
    pub structure_type: StructureType,
    pub rule: SubstitutionRule,
    pub outcome: ResolutionOutcome,
    /// Stages visited, in order; always ends with [`Stage::Done`].
    pub trace: Vec<Stage>,
}
