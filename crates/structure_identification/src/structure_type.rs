use std::fmt::{Display, Formatter};

use grid_types::{CellValue, Connectivity};
use serde::{Deserialize, Serialize};
use structure_recognition::LandmarkSet;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum StructureVariant {
    Value,
    ValueWithAdjacency,
    ConnectedRegions,
    Boundary,
    ColumnPattern,
    RowPattern,
    RectangularPattern,
}

impl StructureVariant {
    pub fn name(self) -> &'static str {
        match self {
            Self::Value => "value",
            Self::ValueWithAdjacency => "valueWithAdjacency",
            Self::ConnectedRegions => "connectedRegions",
            Self::Boundary => "boundary",
            Self::ColumnPattern => "columnPattern",
            Self::RowPattern => "rowPattern",
            Self::RectangularPattern => "rectangularPattern",
        }
    }

    pub fn is_pattern(self) -> bool {
        matches!(
            self,
            Self::ColumnPattern | Self::RowPattern | Self::RectangularPattern
        )
    }
}

impl Display for StructureVariant {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PatternType {
    Column,
    Row,
    Both,
}

impl PatternType {
    pub fn includes_columns(self) -> bool {
        matches!(self, Self::Column | Self::Both)
    }

    pub fn includes_rows(self) -> bool {
        matches!(self, Self::Row | Self::Both)
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StructureParams {
    pub target_value: Option<CellValue>,
    pub adjacent_to: Option<LandmarkSet>,
    pub path_to_landmarks: Option<LandmarkSet>,
    pub requires_path_connectivity: bool,
    pub connectivity: Option<Connectivity>,
    pub max_path_length: Option<usize>,
    pub pattern_type: Option<PatternType>,
    pub column_count: Option<usize>,
    pub row_count: Option<usize>,
}

impl StructureParams {
    pub fn has_relation(&self) -> bool {
        self.adjacent_to.is_some()
            || self.path_to_landmarks.is_some()
            || self.requires_path_connectivity
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StructureType {
    #[serde(rename = "type")]
    pub variant: StructureVariant,
    pub confidence: f64,
    pub params: StructureParams,
}

impl StructureType {
    pub fn new(variant: StructureVariant, confidence: f64, params: StructureParams) -> Self {
        Self {
            variant,
            confidence: confidence.clamp(0.0, 1.0),
            params,
        }
    }

    /// Fallback classification: 4-connected regions with no target and no confidence.
    pub fn unclassified() -> Self {
        Self::new(
            StructureVariant::ConnectedRegions,
            0.0,
            StructureParams {
                connectivity: Some(Connectivity::Four),
                ..StructureParams::default()
            },
        )
    }

    pub fn name(&self) -> &'static str {
        self.variant.name()
    }
}
