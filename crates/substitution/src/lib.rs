//! Rewrites recognized structure instances according to a substitution rule.
//!
//! Operators only plan writes; [`apply_substitution`] owns the output grid and
//! commits each plan in recognition order, so overlapping plans resolve
//! last-write-wins.

mod applier;
mod operator;
mod operators;
mod registry;

pub use applier::{ApplyOptions, SubstitutionReport, apply_substitution, apply_with_registry};
pub use operator::{RewritePlan, SubstitutionOperator};
pub use operators::{Erase, ExtractByBoundary, FillBoundingBox, Preserve, Recolor, Shift};
pub use registry::OperatorRegistry;
