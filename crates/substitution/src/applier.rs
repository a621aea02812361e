use std::collections::BTreeSet;

use grid_types::{Coord, Grid};
use structure_identification::SubstitutionRule;
use structure_recognition::RecognizedStructure;

use crate::registry::OperatorRegistry;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ApplyOptions {
    /// Cells outside every rewrite keep their input value; otherwise they become 0.
    pub preserve_non_matching: bool,
}

impl Default for ApplyOptions {
    fn default() -> Self {
        Self {
            preserve_non_matching: true,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SubstitutionReport {
    pub grid: Grid,
    /// Instances whose plan wrote at least one cell.
    pub rewritten: usize,
    /// Instances left as the baseline: unknown operator or empty plan.
    pub skipped: usize,
    /// Every cell written by some plan.
    pub covered: BTreeSet<Coord>,
}

pub fn apply_substitution(
    grid: &Grid,
    instances: &[RecognizedStructure],
    rule: &SubstitutionRule,
    options: ApplyOptions,
) -> Grid {
    apply_with_registry(&OperatorRegistry::with_defaults(), grid, instances, rule, options).grid
}

pub fn apply_with_registry(
    registry: &OperatorRegistry,
    grid: &Grid,
    instances: &[RecognizedStructure],
    rule: &SubstitutionRule,
    options: ApplyOptions,
) -> SubstitutionReport {
    let mut out = if options.preserve_non_matching {
        grid.clone()
    } else {
        grid.zeros_like()
    };
    let Some(operator) = registry.get(&rule.operator) else {
        log::warn!(
            "operator '{}' is not registered; {} instance(s) left unrewritten",
            rule.operator,
            instances.len()
        );
        return SubstitutionReport {
            grid: out,
            rewritten: 0,
            skipped: instances.len(),
            covered: BTreeSet::new(),
        };
    };

    let mut rewritten = 0;
    let mut skipped = 0;
    let mut covered = BTreeSet::new();
    for instance in instances {
        let plan = operator.plan(grid, instance, &rule.params);
        let mut wrote = false;
        for (at, value) in plan.writes {
            if out.set(at, value) {
                covered.insert(at);
                wrote = true;
            }
        }
        if wrote {
            rewritten += 1;
        } else {
            skipped += 1;
        }
    }

    log::debug!(
        "{}: rewrote {rewritten} instance(s), skipped {skipped}, covered {} cell(s)",
        rule.operator,
        covered.len()
    );
    SubstitutionReport {
        grid: out,
        rewritten,
        skipped,
        covered,
    }
}
