//! The one hard-coded rewrite: a ring of 1s around an empty centre becomes a
//! cross of 2s. Only consulted after the generic pipeline recognized nothing.

use std::collections::BTreeSet;

use grid_types::{CellValue, Connectivity, Coord, Grid};

const RING: CellValue = 1;
const CENTER: CellValue = 0;
const CROSS: CellValue = 2;

/// True when the input text names a 3x3 block or plus and the output text names a cross.
///
/// Matching is case-sensitive substring search and is not meant to be extended.
pub fn describes_plus_to_cross(input: &str, output: &str) -> bool {
    let block = (input.contains('3') && input.contains("block"))
        || (input.contains('3') && input.contains("1s"))
        || input.contains("plus")
        || input.contains("cardinal");
    let cross = output.contains("cross")
        || (output.contains('2') && (output.contains("cardinal") || output.contains("center")));
    block && cross
}

fn is_plus_center(grid: &Grid, at: Coord) -> bool {
    grid.get(at) == Some(CENTER)
        && grid.neighbors(at, Connectivity::Eight).count() == 8
        && grid
            .neighbors(at, Connectivity::Eight)
            .all(|n| grid.get(n) == Some(RING))
}

fn block_around(at: Coord) -> impl Iterator<Item = Coord> {
    (-1isize..=1)
        .flat_map(move |dr| (-1isize..=1).map(move |dc| (dr, dc)))
        .filter_map(move |(dr, dc)| at.offset(dr, dc))
}

/// Rewrites every plus centre found in `source` into `out`; returns the match count.
///
/// Centres are scanned row-major over interior cells. A match consumes its whole
/// 3x3 block so later centres inside it are skipped.
pub fn replace_plus_with_cross(source: &Grid, out: &mut Grid) -> usize {
    let (rows, cols) = source.dims();
    let mut consumed = BTreeSet::new();
    let mut matches = 0;
    for row in 1..rows.saturating_sub(1) {
        for col in 1..cols.saturating_sub(1) {
            let at = Coord::new(row, col);
            if consumed.contains(&at) || !is_plus_center(source, at) {
                continue;
            }
            for cell in block_around(at) {
                out.set(cell, CENTER);
                consumed.insert(cell);
            }
            out.set(at, CROSS);
            for cell in source.neighbors(at, Connectivity::Four) {
                out.set(cell, CROSS);
            }
            matches += 1;
        }
    }
    log::debug!("legacy plus-to-cross rewrote {matches} block(s)");
    matches
}
