use grid_types::{CellValue, Connectivity, Coord, Grid};
use structure_identification::{Direction, OperatorParams, operators};
use structure_recognition::RecognizedStructure;

use crate::operator::{RewritePlan, SubstitutionOperator};

const BACKGROUND: CellValue = 0;

/// Paints every instance cell with the rule value, or the instance value when none was named.
pub struct Recolor;

impl SubstitutionOperator for Recolor {
    fn name(&self) -> &str {
        operators::RECOLOR
    }

    fn plan(
        &self,
        _: &Grid,
        instance: &RecognizedStructure,
        params: &OperatorParams,
    ) -> RewritePlan {
        let value = params.value.unwrap_or(instance.value);
        let mut plan = RewritePlan::new();
        for cell in &instance.cells {
            plan.write(*cell, value);
        }
        plan
    }
}

/// Copies the instance through unchanged. Matters when non-matching cells are cleared.
pub struct Preserve;

impl SubstitutionOperator for Preserve {
    fn name(&self) -> &str {
        operators::PRESERVE
    }

    fn plan(
        &self,
        source: &Grid,
        instance: &RecognizedStructure,
        _: &OperatorParams,
    ) -> RewritePlan {
        let mut plan = RewritePlan::new();
        for cell in &instance.cells {
            plan.write(*cell, source.get(*cell).unwrap_or(instance.value));
        }
        plan
    }
}

/// Keeps the outline of an instance and clears its interior.
///
/// A cell is on the outline when fewer than four of its orthogonal neighbors
/// belong to the instance; cells on the grid edge always are. The outline is
/// recoloured when the rule names a value.
pub struct ExtractByBoundary;

impl ExtractByBoundary {
    fn is_boundary(source: &Grid, instance: &RecognizedStructure, at: Coord) -> bool {
        source
            .neighbors(at, Connectivity::Four)
            .filter(|n| instance.contains(*n))
            .count()
            < 4
    }
}

impl SubstitutionOperator for ExtractByBoundary {
    fn name(&self) -> &str {
        operators::EXTRACT_BY_BOUNDARY
    }

    fn plan(
        &self,
        source: &Grid,
        instance: &RecognizedStructure,
        params: &OperatorParams,
    ) -> RewritePlan {
        let mut plan = RewritePlan::new();
        for cell in &instance.cells {
            let value = if Self::is_boundary(source, instance, *cell) {
                params
                    .value
                    .unwrap_or_else(|| source.get(*cell).unwrap_or(instance.value))
            } else {
                BACKGROUND
            };
            plan.write(*cell, value);
        }
        plan
    }
}

/// Covers the instance's whole bounding box.
pub struct FillBoundingBox;

impl SubstitutionOperator for FillBoundingBox {
    fn name(&self) -> &str {
        operators::FILL_BOUNDING_BOX
    }

    fn plan(
        &self,
        _: &Grid,
        instance: &RecognizedStructure,
        params: &OperatorParams,
    ) -> RewritePlan {
        let value = params.value.unwrap_or(instance.value);
        let mut plan = RewritePlan::new();
        for cell in instance.bounds.coords() {
            plan.write(cell, value);
        }
        plan
    }
}

pub struct Erase;

impl SubstitutionOperator for Erase {
    fn name(&self) -> &str {
        operators::ERASE
    }

    fn plan(&self, _: &Grid, instance: &RecognizedStructure, _: &OperatorParams) -> RewritePlan {
        let mut plan = RewritePlan::new();
        for cell in &instance.cells {
            plan.write(*cell, BACKGROUND);
        }
        plan
    }
}

/// Translates an instance in one direction, defaulting to down.
///
/// The instance slides `steps` cells, or as far as it can when no count was
/// given. A move is blocked by the grid edge or by a non-background source
/// cell outside the instance.
pub struct Shift;

impl Shift {
    fn distance(
        source: &Grid,
        instance: &RecognizedStructure,
        direction: Direction,
        limit: Option<usize>,
    ) -> usize {
        let (dr, dc) = direction.delta();
        let max = limit.unwrap_or(source.rows().max(source.cols()));
        let mut moved = 0;
        while moved < max {
            let next = moved as isize + 1;
            let clear = instance.cells.iter().all(|cell| {
                match cell.offset(dr * next, dc * next) {
                    Some(to) if instance.contains(to) => true,
                    Some(to) => source.get(to) == Some(BACKGROUND),
                    None => false,
                }
            });
            if !clear {
                break;
            }
            moved += 1;
        }
        moved
    }
}

impl SubstitutionOperator for Shift {
    fn name(&self) -> &str {
        operators::SHIFT
    }

    fn plan(
        &self,
        source: &Grid,
        instance: &RecognizedStructure,
        params: &OperatorParams,
    ) -> RewritePlan {
        let direction = params.direction.unwrap_or(Direction::Down);
        let distance = Self::distance(source, instance, direction, params.steps);
        let mut plan = RewritePlan::new();
        if distance == 0 {
            log::debug!("shift of instance at {} is blocked", instance.anchor());
            return plan;
        }
        let (dr, dc) = direction.delta();
        let d = distance as isize;
        for cell in &instance.cells {
            plan.write(*cell, BACKGROUND);
        }
        for cell in &instance.cells {
            if let Some(to) = cell.offset(dr * d, dc * d) {
                plan.write(to, source.get(*cell).unwrap_or(instance.value));
            }
        }
        plan
    }
}

#[cfg(test)]
mod tests {
    use grid_types::{Connectivity, Coord, Grid};
    use structure_identification::{Direction, OperatorParams};
    use structure_recognition::{RecognizedStructure, recognize_connected_regions};

    use super::{Erase, ExtractByBoundary, FillBoundingBox, Preserve, Recolor, Shift};
    use crate::operator::{RewritePlan, SubstitutionOperator};

    fn grid(rows: &[&[u32]]) -> Grid {
        Grid::new(rows.iter().map(|r| r.to_vec()).collect()).expect("valid grid")
    }

    fn first_region(g: &Grid, value: u32) -> RecognizedStructure {
        recognize_connected_regions(g, value, Connectivity::Four)
            .into_iter()
            .next()
            .expect("region present")
    }

    fn commit(g: &Grid, plan: &RewritePlan) -> Grid {
        let mut out = g.clone();
        for (at, v) in &plan.writes {
            out.set(*at, *v);
        }
        out
    }

    #[test]
    fn recolor_defaults_to_instance_value() {
        let g = grid(&[&[3, 0], &[3, 0]]);
        let region = first_region(&g, 3);
        let same = Recolor.plan(&g, &region, &OperatorParams::default());
        assert_eq!(commit(&g, &same), g);
        let params = OperatorParams {
            value: Some(7),
            ..OperatorParams::default()
        };
        assert_eq!(commit(&g, &Recolor.plan(&g, &region, &params)), grid(&[&[7, 0], &[7, 0]]));
    }

    #[test]
    fn preserve_writes_original_values() {
        let g = grid(&[&[4, 4], &[0, 1]]);
        let region = first_region(&g, 4);
        let plan = Preserve.plan(&g, &region, &OperatorParams::default());
        assert_eq!(plan.writes, vec![(Coord::new(0, 0), 4), (Coord::new(0, 1), 4)]);
    }

    #[test]
    fn extract_clears_interior() {
        let g = grid(&[
            &[0, 0, 0, 0, 0],
            &[0, 5, 5, 5, 0],
            &[0, 5, 5, 5, 0],
            &[0, 5, 5, 5, 0],
            &[0, 0, 0, 0, 0],
        ]);
        let region = first_region(&g, 5);
        let params = OperatorParams {
            value: Some(2),
            ..OperatorParams::default()
        };
        let out = commit(&g, &ExtractByBoundary.plan(&g, &region, &params));
        assert_eq!(
            out,
            grid(&[
                &[0, 0, 0, 0, 0],
                &[0, 2, 2, 2, 0],
                &[0, 2, 0, 2, 0],
                &[0, 2, 2, 2, 0],
                &[0, 0, 0, 0, 0],
            ])
        );
    }

    #[test]
    fn fill_covers_bounding_box() {
        let g = grid(&[&[6, 0, 0], &[6, 6, 6]]);
        let region = first_region(&g, 6);
        let plan = FillBoundingBox.plan(&g, &region, &OperatorParams::default());
        assert_eq!(plan.len(), 6);
        assert_eq!(commit(&g, &plan), grid(&[&[6, 6, 6], &[6, 6, 6]]));
    }

    #[test]
    fn erase_zeroes_cells() {
        let g = grid(&[&[1, 2]]);
        let region = first_region(&g, 2);
        assert_eq!(
            commit(&g, &Erase.plan(&g, &region, &OperatorParams::default())),
            grid(&[&[1, 0]])
        );
    }

    #[test]
    fn shift_falls_until_blocked() {
        let g = grid(&[&[3, 0], &[0, 0], &[0, 0], &[9, 0]]);
        let region = first_region(&g, 3);
        let out = commit(&g, &Shift.plan(&g, &region, &OperatorParams::default()));
        assert_eq!(out, grid(&[&[0, 0], &[0, 0], &[3, 0], &[9, 0]]));
    }

    #[test]
    fn shift_respects_step_count_and_direction() {
        let g = grid(&[&[0, 0, 0, 8, 8]]);
        let region = first_region(&g, 8);
        let params = OperatorParams {
            direction: Some(Direction::Left),
            steps: Some(2),
            ..OperatorParams::default()
        };
        let out = commit(&g, &Shift.plan(&g, &region, &params));
        assert_eq!(out, grid(&[&[0, 8, 8, 0, 0]]));
    }

    #[test]
    fn blocked_shift_plans_nothing() {
        let g = grid(&[&[1], &[2]]);
        let region = first_region(&g, 1);
        assert!(Shift.plan(&g, &region, &OperatorParams::default()).is_empty());
    }
}
