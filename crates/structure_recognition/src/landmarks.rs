use std::collections::{BTreeSet, VecDeque};

use grid_types::{CellValue, Connectivity, Coord, Grid};
use serde::{Deserialize, Serialize};

use crate::error::RecognitionError;

const BACKGROUND: CellValue = 0;

/// Reference cells for adjacency and path conditions, given by value or by position.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LandmarkSet {
    pub values: BTreeSet<CellValue>,
    pub cells: BTreeSet<Coord>,
}

impl LandmarkSet {
    pub fn from_values<I: IntoIterator<Item = CellValue>>(values: I) -> Self {
        Self {
            values: values.into_iter().collect(),
            cells: BTreeSet::new(),
        }
    }

    pub fn from_cells<I: IntoIterator<Item = Coord>>(cells: I) -> Self {
        Self {
            values: BTreeSet::new(),
            cells: cells.into_iter().collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty() && self.cells.is_empty()
    }

    pub fn validate(&self, grid: &Grid) -> Result<(), RecognitionError> {
        if self.is_empty() {
            return Err(RecognitionError::EmptyLandmarks);
        }
        match self.cells.iter().find(|c| !grid.contains(**c)) {
            Some(outside) => Err(RecognitionError::LandmarkOutOfBounds(*outside)),
            None => Ok(()),
        }
    }

    pub fn is_landmark(&self, grid: &Grid, at: Coord) -> bool {
        if self.cells.contains(&at) {
            return grid.contains(at);
        }
        grid.get(at).is_some_and(|v| self.values.contains(&v))
    }

    pub fn locate(&self, grid: &Grid) -> Vec<Coord> {
        grid.coords().filter(|c| self.is_landmark(grid, *c)).collect()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DistanceStrategy {
    /// One search seeded from every landmark cell at once.
    FromLandmarks,
    /// One search per component, stopping at the first landmark reached.
    FromComponents,
}

impl DistanceStrategy {
    fn choose(landmark_cells: &[Coord], components: &[Vec<Coord>], owned: &Ownership) -> Self {
        if owned.claims_any(landmark_cells) {
            // a component's own cells must not count as its landmarks
            return Self::FromComponents;
        }
        let component_cells: usize = components.iter().map(Vec::len).sum();
        if components.len() > 1 || landmark_cells.len() <= component_cells {
            Self::FromLandmarks
        } else {
            Self::FromComponents
        }
    }
}

/// Shortest path length from each component to a landmark cell.
///
/// Paths move through cells holding `target` or background; the landmark cell
/// ends the path and counts as one step. Distances above `limit` come back as
/// `None`. Component cells outside the grid are ignored. Passing no strategy
/// picks the cheaper search side.
pub fn landmark_distances(
    grid: &Grid,
    components: &[Vec<Coord>],
    target: CellValue,
    landmarks: &LandmarkSet,
    connectivity: Connectivity,
    limit: Option<usize>,
    strategy: Option<DistanceStrategy>,
) -> Vec<Option<usize>> {
    let owned = Ownership::new(grid, components);
    let landmark_cells = landmarks.locate(grid);
    if landmark_cells.is_empty() {
        return vec![None; components.len()];
    }

    let strategy =
        strategy.unwrap_or_else(|| DistanceStrategy::choose(&landmark_cells, components, &owned));
    let strategy = match strategy {
        DistanceStrategy::FromLandmarks if owned.claims_any(&landmark_cells) => {
            DistanceStrategy::FromComponents
        }
        other => other,
    };
    log::trace!(
        "landmark search: {} landmark cells, {} components, {strategy:?}",
        landmark_cells.len(),
        components.len()
    );

    match strategy {
        DistanceStrategy::FromLandmarks => {
            let field = distance_field(grid, &landmark_cells, target, connectivity, limit);
            components
                .iter()
                .map(|cells| {
                    cells
                        .iter()
                        .filter(|c| grid.contains(**c))
                        .filter_map(|c| field[index(grid, *c)])
                        .min()
                })
                .collect()
        }
        DistanceStrategy::FromComponents => {
            let search = ComponentSearch {
                grid,
                owned: &owned,
                target,
                landmarks,
                connectivity,
                limit,
            };
            components
                .iter()
                .enumerate()
                .map(|(id, cells)| search.distance(id, cells))
                .collect()
        }
    }
}

fn distance_field(
    grid: &Grid,
    sources: &[Coord],
    target: CellValue,
    connectivity: Connectivity,
    limit: Option<usize>,
) -> Vec<Option<usize>> {
    let mut dist: Vec<Option<usize>> = vec![None; grid.rows() * grid.cols()];
    let mut queue = VecDeque::new();
    for source in sources {
        dist[index(grid, *source)] = Some(0);
        queue.push_back((*source, 0usize));
    }

    while let Some((at, d)) = queue.pop_front() {
        if limit.is_some_and(|max| d + 1 > max) {
            continue;
        }
        for next in grid.neighbors(at, connectivity) {
            let slot = index(grid, next);
            if dist[slot].is_some() || !traversable(grid, next, target) {
                continue;
            }
            dist[slot] = Some(d + 1);
            queue.push_back((next, d + 1));
        }
    }
    dist
}

/// Per-component search state shared across components.
struct ComponentSearch<'a> {
    grid: &'a Grid,
    owned: &'a Ownership,
    target: CellValue,
    landmarks: &'a LandmarkSet,
    connectivity: Connectivity,
    limit: Option<usize>,
}

impl ComponentSearch<'_> {
    fn distance(&self, id: usize, cells: &[Coord]) -> Option<usize> {
        let grid = self.grid;
        let mut visited = vec![false; grid.rows() * grid.cols()];
        let mut queue = VecDeque::new();
        for cell in cells.iter().filter(|c| grid.contains(**c)) {
            visited[index(grid, *cell)] = true;
            queue.push_back((*cell, 0usize));
        }

        while let Some((at, d)) = queue.pop_front() {
            if self.limit.is_some_and(|max| d + 1 > max) {
                continue;
            }
            for next in grid.neighbors(at, self.connectivity) {
                let slot = index(grid, next);
                if visited[slot] {
                    continue;
                }
                visited[slot] = true;
                if self.owned.owner(next) != Some(id) && self.landmarks.is_landmark(grid, next) {
                    return Some(d + 1);
                }
                if traversable(grid, next, self.target) {
                    queue.push_back((next, d + 1));
                }
            }
        }
        None
    }
}

fn traversable(grid: &Grid, at: Coord, target: CellValue) -> bool {
    grid.get(at).is_some_and(|v| v == target || v == BACKGROUND)
}

fn index(grid: &Grid, at: Coord) -> usize {
    at.row * grid.cols() + at.col
}

/// Which component, if any, claims each cell.
struct Ownership {
    cols: usize,
    owner: Vec<Option<usize>>,
}

impl Ownership {
    fn new(grid: &Grid, components: &[Vec<Coord>]) -> Self {
        let mut owner = vec![None; grid.rows() * grid.cols()];
        for (id, cells) in components.iter().enumerate() {
            for cell in cells.iter().filter(|c| grid.contains(**c)) {
                owner[index(grid, *cell)] = Some(id);
            }
        }
        Self {
            cols: grid.cols(),
            owner,
        }
    }

    fn owner(&self, at: Coord) -> Option<usize> {
        self.owner
            .get(at.row * self.cols + at.col)
            .copied()
            .flatten()
    }

    fn claims_any(&self, cells: &[Coord]) -> bool {
        cells.iter().any(|c| self.owner(*c).is_some())
    }
}
