use grid_types::{CellValue, Coord, Grid};
use structure_identification::OperatorParams;
use structure_recognition::RecognizedStructure;

/// Ordered cell writes for one instance. Later writes to the same cell win.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RewritePlan {
    pub writes: Vec<(Coord, CellValue)>,
}

impl RewritePlan {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn write(&mut self, at: Coord, value: CellValue) {
        self.writes.push((at, value));
    }

    pub fn is_empty(&self) -> bool {
        self.writes.is_empty()
    }

    pub fn len(&self) -> usize {
        self.writes.len()
    }
}

pub trait SubstitutionOperator: Send + Sync {
    fn name(&self) -> &str;

    /// Plans the rewrite of `instance`. `source` is the untouched input grid.
    fn plan(
        &self,
        source: &Grid,
        instance: &RecognizedStructure,
        params: &OperatorParams,
    ) -> RewritePlan;
}
