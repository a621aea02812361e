use std::collections::BTreeSet;

use grid_types::CellValue;
use serde::{Deserialize, Serialize};

/// Operator names understood by the default substitution registry.
pub mod operators {
    pub const RECOLOR: &str = "recolor";
    pub const PRESERVE: &str = "preserve";
    pub const EXTRACT_BY_BOUNDARY: &str = "extractByBoundary";
    pub const FILL_BOUNDING_BOX: &str = "fillBoundingBox";
    pub const ERASE: &str = "erase";
    pub const SHIFT: &str = "shift";
    /// Never registered; applying it leaves instances untouched.
    pub const GENERIC: &str = "generic";
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleTag {
    StructureIntegrity,
    Position,
    Emphasis,
    Topology,
    Color,
    Shape,
    Presence,
}

impl RuleTag {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::StructureIntegrity => "structure_integrity",
            Self::Position => "position",
            Self::Emphasis => "emphasis",
            Self::Topology => "topology",
            Self::Color => "color",
            Self::Shape => "shape",
            Self::Presence => "presence",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// (row, col) delta of a single step.
    pub fn delta(self) -> (isize, isize) {
        match self {
            Self::Up => (-1, 0),
            Self::Down => (1, 0),
            Self::Left => (0, -1),
            Self::Right => (0, 1),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperatorParams {
    pub value: Option<CellValue>,
    pub direction: Option<Direction>,
    pub steps: Option<usize>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubstitutionRule {
    pub operator: String,
    pub preserves: BTreeSet<RuleTag>,
    pub changes: BTreeSet<RuleTag>,
    #[serde(default)]
    pub params: OperatorParams,
}

impl SubstitutionRule {
    pub fn new(
        operator: impl Into<String>,
        preserves: impl IntoIterator<Item = RuleTag>,
        changes: impl IntoIterator<Item = RuleTag>,
    ) -> Self {
        Self {
            operator: operator.into(),
            preserves: preserves.into_iter().collect(),
            changes: changes.into_iter().collect(),
            params: OperatorParams::default(),
        }
    }

    pub fn generic() -> Self {
        Self::new(operators::GENERIC, [], [])
    }

    pub fn with_params(mut self, params: OperatorParams) -> Self {
        self.params = params;
        self
    }

    pub fn is_generic(&self) -> bool {
        self.operator == operators::GENERIC
    }

    pub fn preserves(&self, tag: RuleTag) -> bool {
        self.preserves.contains(&tag)
    }

    pub fn changes(&self, tag: RuleTag) -> bool {
        self.changes.contains(&tag)
    }
}
