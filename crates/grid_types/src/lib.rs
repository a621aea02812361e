mod geometry;
mod grid;

pub use geometry::{BoundingBox, Connectivity, Coord};
pub use grid::{CellValue, Grid, GridError};
