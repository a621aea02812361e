use crate::keywords;
use crate::signals::DescriptionSignals;
use crate::structure_type::{StructureType, StructureVariant};
use crate::substitution_rule::{Direction, OperatorParams, RuleTag, SubstitutionRule, operators};

pub type OperatorPrecondition = fn(&DescriptionSignals, &StructureType) -> bool;

#[derive(Clone, Debug)]
pub struct OperatorRule {
    pub operator: &'static str,
    pub precondition: OperatorPrecondition,
    pub preserves: &'static [RuleTag],
    pub changes: &'static [RuleTag],
}

impl OperatorRule {
    fn to_rule(&self, signals: &DescriptionSignals) -> SubstitutionRule {
        SubstitutionRule::new(
            self.operator,
            self.preserves.iter().copied(),
            self.changes.iter().copied(),
        )
        .with_params(operator_params(signals))
    }
}

#[derive(Clone, Debug)]
pub struct OperatorRuleTable {
    pub rules: Vec<OperatorRule>,
}

impl Default for OperatorRuleTable {
    fn default() -> Self {
        Self::with_default_rules()
    }
}

impl OperatorRuleTable {
    pub fn new(rules: Vec<OperatorRule>) -> Self {
        Self { rules }
    }

    pub fn with_default_rules() -> Self {
        Self {
            rules: default_rules(),
        }
    }

    pub fn applicable_rules(
        &self,
        signals: &DescriptionSignals,
        input: &StructureType,
    ) -> Vec<&OperatorRule> {
        self.rules
            .iter()
            .filter(|rule| (rule.precondition)(signals, input))
            .collect()
    }

    /// First matching rule wins; an empty table or no match yields the generic rule.
    pub fn identify(&self, output_description: &str, input: &StructureType) -> SubstitutionRule {
        let signals = DescriptionSignals::parse(output_description);
        let candidates = self.applicable_rules(&signals, input);
        log::trace!(
            "operator candidates: {:?}",
            candidates.iter().map(|r| r.operator).collect::<Vec<_>>()
        );
        let rule = candidates
            .first()
            .map(|rule| rule.to_rule(&signals))
            .unwrap_or_else(SubstitutionRule::generic);
        log::debug!(
            "operator for {} -> {} (output {output_description:?})",
            input.name(),
            rule.operator
        );
        rule
    }
}

pub fn identify_substitution_rule(
    output_description: &str,
    input: &StructureType,
) -> SubstitutionRule {
    OperatorRuleTable::with_default_rules().identify(output_description, input)
}

fn default_rules() -> Vec<OperatorRule> {
    use RuleTag::*;
    vec![
        OperatorRule {
            operator: operators::EXTRACT_BY_BOUNDARY,
            precondition: |s, input| {
                s.has_any(keywords::EXTRACT)
                    || (input.variant == StructureVariant::Boundary
                        && s.has_any(keywords::EMPHASIS))
            },
            preserves: &[Topology, Position],
            changes: &[Emphasis],
        },
        OperatorRule {
            operator: operators::SHIFT,
            precondition: |s, _| s.has_any(keywords::MOVE),
            preserves: &[StructureIntegrity, Color],
            changes: &[Position],
        },
        OperatorRule {
            operator: operators::FILL_BOUNDING_BOX,
            precondition: |s, _| s.has_any(keywords::FILL),
            preserves: &[Position],
            changes: &[Shape, Topology],
        },
        OperatorRule {
            operator: operators::ERASE,
            precondition: |s, _| s.has_any(keywords::ERASE),
            preserves: &[Position],
            changes: &[Presence],
        },
        OperatorRule {
            operator: operators::RECOLOR,
            precondition: |s, input| match s.target_value() {
                Some(v) => s.has_any(keywords::RECOLOR) || input.params.target_value != Some(v),
                None => false,
            },
            preserves: &[StructureIntegrity, Position, Topology],
            changes: &[Color],
        },
        OperatorRule {
            operator: operators::PRESERVE,
            precondition: |s, input| {
                s.has_any(keywords::PRESERVE)
                    || (s.target_value().is_some() && s.target_value() == input.params.target_value)
            },
            preserves: &[StructureIntegrity, Position, Color],
            changes: &[],
        },
        OperatorRule {
            operator: operators::GENERIC,
            precondition: |_, _| true,
            preserves: &[],
            changes: &[],
        },
    ]
}

fn operator_params(s: &DescriptionSignals) -> OperatorParams {
    OperatorParams {
        value: s.target_value(),
        direction: direction(s),
        steps: s.step_count,
    }
}

fn direction(s: &DescriptionSignals) -> Option<Direction> {
    let families = [
        (keywords::UP, Direction::Up),
        (keywords::DOWN, Direction::Down),
        (keywords::LEFT, Direction::Left),
        (keywords::RIGHT, Direction::Right),
    ];
    s.tokens.iter().find_map(|token| {
        families
            .iter()
            .find(|(family, _)| family.contains(&token.as_str()))
            .map(|(_, dir)| *dir)
    })
}

#[cfg(test)]
mod tests {
    use super::{OperatorRuleTable, identify_substitution_rule};
    use crate::signals::DescriptionSignals;
    use crate::{Direction, RuleTag, identify_structure_type, operators};

    #[test]
    fn cross_wording_extracts_by_boundary() {
        let input = identify_structure_type("3x3 block of 1s in a plus");
        let rule = identify_substitution_rule("cross of 2 with cardinal center", &input);
        assert_eq!(rule.operator, operators::EXTRACT_BY_BOUNDARY);
        assert!(rule.preserves(RuleTag::Topology));
        assert!(rule.changes(RuleTag::Emphasis));
        assert_eq!(rule.params.value, Some(2));
    }

    #[test]
    fn emphasis_only_extracts_for_boundary_inputs() {
        let boundary = identify_structure_type("border of 4");
        let region = identify_structure_type("regions of 4");
        assert_eq!(
            identify_substitution_rule("highlighted", &boundary).operator,
            operators::EXTRACT_BY_BOUNDARY
        );
        assert_eq!(
            identify_substitution_rule("highlighted", &region).operator,
            operators::GENERIC
        );
    }

    #[test]
    fn movement_picks_shift_with_direction_and_steps() {
        let input = identify_structure_type("objects of 3");
        let rule = identify_substitution_rule("moved left 2 steps", &input);
        assert_eq!(rule.operator, operators::SHIFT);
        assert_eq!(rule.params.direction, Some(Direction::Left));
        assert_eq!(rule.params.steps, Some(2));
        assert!(rule.preserves(RuleTag::StructureIntegrity));
        assert!(rule.changes(RuleTag::Position));
    }

    #[test]
    fn new_value_recolors_same_value_preserves() {
        let input = identify_structure_type("regions of 3 adjacent to 5");
        let recolor = identify_substitution_rule("same shapes in 4", &input);
        assert_eq!(recolor.operator, operators::RECOLOR);
        assert!(recolor.preserves(RuleTag::StructureIntegrity));
        assert_eq!(recolor.params.value, Some(4));

        let keep = identify_substitution_rule("regions of 3", &input);
        assert_eq!(keep.operator, operators::PRESERVE);
        assert!(keep.changes.is_empty());
    }

    #[test]
    fn fill_and_erase() {
        let input = identify_structure_type("objects of 6");
        assert_eq!(
            identify_substitution_rule("filled with 6", &input).operator,
            operators::FILL_BOUNDING_BOX
        );
        assert_eq!(
            identify_substitution_rule("removed", &input).operator,
            operators::ERASE
        );
    }

    #[test]
    fn unrecognized_output_is_generic() {
        let input = identify_structure_type("objects of 6");
        let rule = identify_substitution_rule("something else entirely", &input);
        assert!(rule.is_generic());
        assert!(rule.preserves.is_empty() && rule.changes.is_empty());
    }

    #[test]
    fn candidates_keep_table_order() {
        let table = OperatorRuleTable::with_default_rules();
        let input = identify_structure_type("objects of 6");
        let signals = DescriptionSignals::parse("removed and filled with 6");
        let names: Vec<_> = table
            .applicable_rules(&signals, &input)
            .iter()
            .map(|rule| rule.operator)
            .collect();
        let first = table.identify("removed and filled with 6", &input).operator;
        assert!(names.len() >= 2);
        assert_eq!(names[0], first);
        let positions: Vec<_> = names
            .iter()
            .map(|name| table.rules.iter().position(|r| r.operator == *name))
            .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn empty_table_still_answers() {
        let table = OperatorRuleTable::new(Vec::new());
        let input = identify_structure_type("");
        assert!(table.identify("recolor to 2", &input).is_generic());
    }
}
