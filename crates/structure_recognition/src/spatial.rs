use grid_types::{CellValue, Connectivity, Coord, Grid};
use serde::{Deserialize, Serialize};

use crate::error::RecognitionError;
use crate::regions::connected_components;
use crate::structure::{RecognizedStructure, StructureKind, sort_by_anchor};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunPattern {
    pub target: CellValue,
    pub min_length: usize,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockPattern {
    pub target: CellValue,
    pub min_height: usize,
    pub min_width: usize,
}

/// Which configuration kinds to scan for. Kinds are reported column runs
/// first, then row runs, then blocks, with no deduplication across kinds.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpatialConfig {
    pub column: Option<RunPattern>,
    pub row: Option<RunPattern>,
    pub block: Option<BlockPattern>,
}

impl SpatialConfig {
    pub fn is_empty(&self) -> bool {
        self.column.is_none() && self.row.is_none() && self.block.is_none()
    }

    /// Instances from different kinds may share cells.
    pub fn allows_overlap(&self) -> bool {
        [self.column.is_some(), self.row.is_some(), self.block.is_some()]
            .iter()
            .filter(|on| **on)
            .count()
            > 1
    }

    fn validate(&self) -> Result<(), RecognitionError> {
        if self.column.is_some_and(|p| p.min_length == 0) {
            return Err(RecognitionError::InvalidThreshold {
                kind: "column run",
            });
        }
        if self.row.is_some_and(|p| p.min_length == 0) {
            return Err(RecognitionError::InvalidThreshold { kind: "row run" });
        }
        if self
            .block
            .is_some_and(|p| p.min_height == 0 || p.min_width == 0)
        {
            return Err(RecognitionError::InvalidThreshold { kind: "block" });
        }
        Ok(())
    }
}

pub fn recognize_spatial_configurations(
    grid: &Grid,
    config: &SpatialConfig,
) -> Result<Vec<RecognizedStructure>, RecognitionError> {
    config.validate()?;
    let mut out = Vec::new();
    if config.is_empty() {
        log::debug!("no spatial configuration requested");
        return Ok(out);
    }

    if let Some(pattern) = config.column {
        let mut runs = runs(grid, pattern, StructureKind::ColumnRun);
        sort_by_anchor(&mut runs);
        log::debug!("column runs of {}: {}", pattern.target, runs.len());
        out.extend(runs);
    }
    if let Some(pattern) = config.row {
        let mut runs = runs(grid, pattern, StructureKind::RowRun);
        sort_by_anchor(&mut runs);
        log::debug!("row runs of {}: {}", pattern.target, runs.len());
        out.extend(runs);
    }
    if let Some(pattern) = config.block {
        let blocks = blocks(grid, pattern);
        log::debug!("solid blocks of {}: {}", pattern.target, blocks.len());
        out.extend(blocks);
    }
    Ok(out)
}

fn runs(grid: &Grid, pattern: RunPattern, kind: StructureKind) -> Vec<RecognizedStructure> {
    let (lines, span) = match kind {
        StructureKind::ColumnRun => (grid.cols(), grid.rows()),
        _ => (grid.rows(), grid.cols()),
    };
    let at = |line: usize, pos: usize| match kind {
        StructureKind::ColumnRun => Coord::new(pos, line),
        _ => Coord::new(line, pos),
    };

    let mut out = Vec::new();
    for line in 0..lines {
        let mut run: Vec<Coord> = Vec::new();
        for pos in 0..=span {
            let cell = at(line, pos);
            if pos < span && grid.is_value(cell, pattern.target) {
                run.push(cell);
                continue;
            }
            if run.len() >= pattern.min_length {
                out.extend(RecognizedStructure::new(
                    kind,
                    pattern.target,
                    std::mem::take(&mut run),
                ));
            }
            run.clear();
        }
    }
    out
}

fn blocks(grid: &Grid, pattern: BlockPattern) -> Vec<RecognizedStructure> {
    connected_components(grid, pattern.target, Connectivity::Four)
        .into_iter()
        .filter_map(|cells| RecognizedStructure::new(StructureKind::Block, pattern.target, cells))
        .filter(|block| {
            block.is_solid_rectangle()
                && block.bounds.height() >= pattern.min_height
                && block.bounds.width() >= pattern.min_width
        })
        .collect()
}
