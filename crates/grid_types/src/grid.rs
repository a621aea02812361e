use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::geometry::{Connectivity, Coord};

pub type CellValue = u32;

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum GridError {
    #[error("grid must have at least one row and one column")]
    Empty,
    #[error("row {row} has {found} cells, expected {expected}")]
    Ragged {
        row: usize,
        expected: usize,
        found: usize,
    },
}

/// Rectangular board of cell values, stored row-major.
///
/// Always at least 1x1 with uniform rows. Serializes as an array of rows.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Vec<Vec<CellValue>>", into = "Vec<Vec<CellValue>>")]
pub struct Grid {
    rows: usize,
    cols: usize,
    cells: Vec<CellValue>,
}

impl Grid {
    pub fn new(rows: Vec<Vec<CellValue>>) -> Result<Self, GridError> {
        let expected = rows.first().map(Vec::len).ok_or(GridError::Empty)?;
        if expected == 0 {
            return Err(GridError::Empty);
        }
        let mut cells = Vec::with_capacity(rows.len() * expected);
        for (row, values) in rows.iter().enumerate() {
            if values.len() != expected {
                return Err(GridError::Ragged {
                    row,
                    expected,
                    found: values.len(),
                });
            }
            cells.extend_from_slice(values);
        }
        Ok(Self {
            rows: rows.len(),
            cols: expected,
            cells,
        })
    }

    pub fn filled(rows: usize, cols: usize, value: CellValue) -> Result<Self, GridError> {
        if rows == 0 || cols == 0 {
            return Err(GridError::Empty);
        }
        Ok(Self {
            rows,
            cols,
            cells: vec![value; rows * cols],
        })
    }

    /// All-zero grid with the same shape as `self`.
    pub fn zeros_like(&self) -> Self {
        Self {
            rows: self.rows,
            cols: self.cols,
            cells: vec![0; self.cells.len()],
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn dims(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    pub fn same_shape(&self, other: &Grid) -> bool {
        self.dims() == other.dims()
    }

    pub fn contains(&self, at: Coord) -> bool {
        at.row < self.rows && at.col < self.cols
    }

    pub fn get(&self, at: Coord) -> Option<CellValue> {
        if self.contains(at) {
            Some(self.cells[at.row * self.cols + at.col])
        } else {
            None
        }
    }

    /// Writes `value` at `at`; returns false when `at` lies outside the grid.
    pub fn set(&mut self, at: Coord, value: CellValue) -> bool {
        if !self.contains(at) {
            return false;
        }
        self.cells[at.row * self.cols + at.col] = value;
        true
    }

    pub fn is_value(&self, at: Coord, value: CellValue) -> bool {
        self.get(at) == Some(value)
    }

    /// Every coordinate in row-major order.
    pub fn coords(&self) -> impl Iterator<Item = Coord> + '_ {
        (0..self.rows).flat_map(move |row| (0..self.cols).map(move |col| Coord::new(row, col)))
    }

    pub fn neighbors(
        &self,
        at: Coord,
        connectivity: Connectivity,
    ) -> impl Iterator<Item = Coord> + '_ {
        connectivity
            .offsets()
            .filter_map(move |(dr, dc)| at.offset(dr, dc))
            .filter(move |c| self.contains(*c))
    }

    pub fn to_rows(&self) -> Vec<Vec<CellValue>> {
        self.cells.chunks(self.cols).map(<[CellValue]>::to_vec).collect()
    }

    pub fn count_value(&self, value: CellValue) -> usize {
        self.cells.iter().filter(|v| **v == value).count()
    }
}

impl TryFrom<Vec<Vec<CellValue>>> for Grid {
    type Error = GridError;

    fn try_from(rows: Vec<Vec<CellValue>>) -> Result<Self, Self::Error> {
        Self::new(rows)
    }
}

impl From<Grid> for Vec<Vec<CellValue>> {
    fn from(grid: Grid) -> Self {
        grid.to_rows()
    }
}

impl Display for Grid {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        for (idx, row) in self.cells.chunks(self.cols).enumerate() {
            if idx > 0 {
                writeln!(f)?;
            }
            let line = row
                .iter()
                .map(|v| v.to_string())
                .collect::<Vec<_>>()
                .join(" ");
            write!(f, "{line}")?;
        }
        Ok(())
    }
}
