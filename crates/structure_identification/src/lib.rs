//! Classifies free-form structure descriptions.
//!
//! Both classifiers are ordered rule tables: the first rule whose precondition
//! holds wins and a catch-all rule closes each table, so classification never
//! fails. Ambiguous text resolves to a low-confidence result instead of an error.

mod keywords;
mod operator_rules;
mod signals;
mod structure_type;
mod substitution_rule;
mod type_rules;

pub use operator_rules::{OperatorRule, OperatorRuleTable, identify_substitution_rule};
pub use signals::DescriptionSignals;
pub use structure_type::{PatternType, StructureParams, StructureType, StructureVariant};
pub use substitution_rule::{Direction, OperatorParams, RuleTag, SubstitutionRule, operators};
pub use type_rules::{StructureRule, StructureRuleTable, identify_structure_type};
