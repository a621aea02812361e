use grid_types::{BoundingBox, CellValue, Coord};
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum StructureKind {
    Cell,
    Region,
    ColumnRun,
    RowRun,
    Block,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecognizedStructure {
    pub kind: StructureKind,
    pub value: CellValue,
    /// Sorted row-major; never empty.
    pub cells: Vec<Coord>,
    pub bounds: BoundingBox,
    pub landmark_distance: Option<usize>,
}

impl RecognizedStructure {
    pub fn new(kind: StructureKind, value: CellValue, mut cells: Vec<Coord>) -> Option<Self> {
        cells.sort_unstable();
        cells.dedup();
        let bounds = BoundingBox::from_coords(&cells)?;
        Some(Self {
            kind,
            value,
            cells,
            bounds,
            landmark_distance: None,
        })
    }

    pub fn with_landmark_distance(mut self, distance: usize) -> Self {
        self.landmark_distance = Some(distance);
        self
    }

    pub fn anchor(&self) -> Coord {
        self.cells[0]
    }

    pub fn size(&self) -> usize {
        self.cells.len()
    }

    pub fn contains(&self, at: Coord) -> bool {
        self.cells.binary_search(&at).is_ok()
    }

    pub fn is_solid_rectangle(&self) -> bool {
        self.cells.len() == self.bounds.area()
    }
}

pub(crate) fn sort_by_anchor(instances: &mut [RecognizedStructure]) {
    instances.sort_by_key(RecognizedStructure::anchor);
}

#[cfg(test)]
mod tests {
    use grid_types::Coord;

    use super::{RecognizedStructure, StructureKind};

    #[test]
    fn new_sorts_and_dedups_cells() {
        let s = RecognizedStructure::new(
            StructureKind::Region,
            3,
            vec![Coord::new(1, 1), Coord::new(0, 2), Coord::new(1, 1)],
        )
        .expect("non-empty");
        assert_eq!(s.cells, vec![Coord::new(0, 2), Coord::new(1, 1)]);
        assert_eq!(s.anchor(), Coord::new(0, 2));
        assert!(s.contains(Coord::new(1, 1)));
        assert!(!s.contains(Coord::new(1, 2)));
        assert!(!s.is_solid_rectangle());
    }

    #[test]
    fn empty_cell_set_is_not_a_structure() {
        assert!(RecognizedStructure::new(StructureKind::Cell, 1, Vec::new()).is_none());
    }
}
