use std::collections::VecDeque;

use grid_types::{CellValue, Connectivity, Coord, Grid};
use serde::{Deserialize, Serialize};

use crate::error::RecognitionError;
use crate::landmarks::{LandmarkSet, landmark_distances};
use crate::structure::{RecognizedStructure, StructureKind};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Relation {
    AdjacentTo(LandmarkSet),
    PathTo {
        landmarks: LandmarkSet,
        max_path_length: Option<usize>,
    },
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValueCondition {
    pub relation: Option<Relation>,
    pub connectivity: Connectivity,
    /// Group matching cells into connected components instead of treating
    /// every cell as its own instance.
    pub connected: bool,
}

impl ValueCondition {
    pub fn all_cells() -> Self {
        Self::default()
    }

    pub fn adjacent_to(landmarks: LandmarkSet, connectivity: Connectivity) -> Self {
        Self {
            relation: Some(Relation::AdjacentTo(landmarks)),
            connectivity,
            connected: true,
        }
    }

    pub fn path_to(
        landmarks: LandmarkSet,
        connectivity: Connectivity,
        max_path_length: Option<usize>,
    ) -> Self {
        Self {
            relation: Some(Relation::PathTo {
                landmarks,
                max_path_length,
            }),
            connectivity,
            connected: true,
        }
    }
}

/// Maximal connected components of `target`, each one instance.
pub fn recognize_connected_regions(
    grid: &Grid,
    target: CellValue,
    connectivity: Connectivity,
) -> Vec<RecognizedStructure> {
    let regions: Vec<RecognizedStructure> = connected_components(grid, target, connectivity)
        .into_iter()
        .filter_map(|cells| RecognizedStructure::new(StructureKind::Region, target, cells))
        .collect();
    log::debug!(
        "connected regions of {target} ({}-connectivity): {}",
        connectivity.degree(),
        regions.len()
    );
    regions
}

/// Cells or components of `target` that satisfy `condition`.
pub fn recognize_value_regions(
    grid: &Grid,
    target: CellValue,
    condition: &ValueCondition,
) -> Result<Vec<RecognizedStructure>, RecognitionError> {
    if let Some(relation) = &condition.relation {
        validate_relation(grid, relation)?;
    }

    let (kind, components) = if condition.connected {
        (
            StructureKind::Region,
            connected_components(grid, target, condition.connectivity),
        )
    } else {
        (
            StructureKind::Cell,
            grid.coords()
                .filter(|c| grid.is_value(*c, target))
                .map(|c| vec![c])
                .collect(),
        )
    };

    let distances: Vec<Option<usize>> = match &condition.relation {
        None => vec![None; components.len()],
        Some(Relation::AdjacentTo(landmarks)) => components
            .iter()
            .map(|cells| {
                touches_landmark(grid, cells, landmarks, condition.connectivity).then_some(1)
            })
            .collect(),
        Some(Relation::PathTo {
            landmarks,
            max_path_length,
        }) => landmark_distances(
            grid,
            &components,
            target,
            landmarks,
            condition.connectivity,
            *max_path_length,
            None,
        ),
    };

    let total = components.len();
    let instances: Vec<RecognizedStructure> = components
        .into_iter()
        .zip(distances)
        .filter(|(_, distance)| condition.relation.is_none() || distance.is_some())
        .filter_map(|(cells, distance)| {
            let instance = RecognizedStructure::new(kind, target, cells)?;
            Some(match distance {
                Some(d) => instance.with_landmark_distance(d),
                None => instance,
            })
        })
        .collect();

    log::debug!(
        "value regions of {target}: {} of {total} candidates satisfy {:?}",
        instances.len(),
        condition.relation
    );
    Ok(instances)
}

fn validate_relation(grid: &Grid, relation: &Relation) -> Result<(), RecognitionError> {
    match relation {
        Relation::AdjacentTo(landmarks) => landmarks.validate(grid),
        Relation::PathTo {
            landmarks,
            max_path_length,
        } => {
            if *max_path_length == Some(0) {
                return Err(RecognitionError::InvalidThreshold {
                    kind: "max path length",
                });
            }
            landmarks.validate(grid)
        }
    }
}

fn touches_landmark(
    grid: &Grid,
    cells: &[Coord],
    landmarks: &LandmarkSet,
    connectivity: Connectivity,
) -> bool {
    cells.iter().any(|cell| {
        grid.neighbors(*cell, connectivity).any(|n| {
            cells.binary_search(&n).is_err() && landmarks.is_landmark(grid, n)
        })
    })
}

/// Flood fill in row-major discovery order, so each component's first cell is
/// its anchor. Cells inside each component come back sorted.
pub(crate) fn connected_components(
    grid: &Grid,
    target: CellValue,
    connectivity: Connectivity,
) -> Vec<Vec<Coord>> {
    let mut seen = vec![false; grid.rows() * grid.cols()];
    let slot = |c: Coord| c.row * grid.cols() + c.col;
    let mut components = Vec::new();

    for start in grid.coords() {
        if seen[slot(start)] || !grid.is_value(start, target) {
            continue;
        }
        seen[slot(start)] = true;
        let mut cells = vec![start];
        let mut queue = VecDeque::from([start]);
        while let Some(at) = queue.pop_front() {
            for next in grid.neighbors(at, connectivity) {
                if seen[slot(next)] || !grid.is_value(next, target) {
                    continue;
                }
                seen[slot(next)] = true;
                cells.push(next);
                queue.push_back(next);
            }
        }
        cells.sort_unstable();
        components.push(cells);
    }
    components
}
