use grid_types::Grid;
use structure_identification::{StructureType, SubstitutionRule};

use crate::domain::{ResolutionError, ResolutionParams};

/// Learned (structure type, rule) compositions that can answer without recognition.
pub trait ShortcutStore: Send + Sync {
    /// Must be side-effect free on a miss. A hit must have the input's shape.
    fn lookup(
        &self,
        structure_type: &StructureType,
        rule: &SubstitutionRule,
        grid: &Grid,
        params: &ResolutionParams,
    ) -> Result<Option<Grid>, ResolutionError>;
}
