use crate::keywords;
use crate::signals::DescriptionSignals;
use crate::structure_type::{PatternType, StructureParams, StructureType, StructureVariant};

pub type Precondition = fn(&DescriptionSignals) -> bool;
pub type ParamBuilder = fn(&DescriptionSignals) -> StructureParams;
pub type Corroboration = fn(&DescriptionSignals) -> usize;

#[derive(Clone, Debug)]
pub struct StructureRule {
    pub name: &'static str,
    pub variant: StructureVariant,
    pub precondition: Precondition,
    pub build: ParamBuilder,
    /// Independent signals backing this rule; drives confidence.
    pub corroboration: Corroboration,
}

impl StructureRule {
    fn classify(&self, signals: &DescriptionSignals) -> StructureType {
        let hits = (self.corroboration)(signals) as f64;
        StructureType::new(self.variant, hits / (hits + 1.0), (self.build)(signals))
    }
}

#[derive(Clone, Debug)]
pub struct StructureRuleTable {
    pub rules: Vec<StructureRule>,
}

impl Default for StructureRuleTable {
    fn default() -> Self {
        Self::with_default_rules()
    }
}

impl StructureRuleTable {
    pub fn new(rules: Vec<StructureRule>) -> Self {
        Self { rules }
    }

    pub fn with_default_rules() -> Self {
        Self {
            rules: default_rules(),
        }
    }

    pub fn first_match(&self, signals: &DescriptionSignals) -> Option<&StructureRule> {
        self.rules.iter().find(|rule| (rule.precondition)(signals))
    }

    /// Never fails: no matching rule yields [`StructureType::unclassified`].
    pub fn identify(&self, description: &str) -> StructureType {
        let signals = DescriptionSignals::parse(description);
        match self.first_match(&signals) {
            Some(rule) => {
                let ty = rule.classify(&signals);
                log::debug!(
                    "structure rule '{}' -> {} (confidence {:.2})",
                    rule.name,
                    ty.name(),
                    ty.confidence
                );
                ty
            }
            None => {
                log::debug!("no structure rule matched {description:?}");
                StructureType::unclassified()
            }
        }
    }
}

pub fn identify_structure_type(description: &str) -> StructureType {
    StructureRuleTable::with_default_rules().identify(description)
}

fn default_rules() -> Vec<StructureRule> {
    vec![
        StructureRule {
            name: "boundary",
            variant: StructureVariant::Boundary,
            precondition: |s| s.has_any(keywords::BOUNDARY),
            build: pattern_params,
            corroboration: |s| {
                s.hits(keywords::BOUNDARY)
                    + usize::from(s.target_value().is_some())
                    + usize::from(pattern_type(s).is_some())
            },
        },
        StructureRule {
            name: "rectangular",
            variant: StructureVariant::RectangularPattern,
            precondition: |s| {
                s.has_any(keywords::BLOCK)
                    || (s.has_any(keywords::COLUMN) && s.has_any(keywords::ROW))
            },
            build: pattern_params,
            corroboration: |s| {
                s.hits(keywords::BLOCK)
                    + usize::from(pattern_type(s) == Some(PatternType::Both))
                    + usize::from(s.block_dims.is_some())
                    + usize::from(s.target_value().is_some())
            },
        },
        StructureRule {
            name: "column",
            variant: StructureVariant::ColumnPattern,
            precondition: |s| s.has_any(keywords::COLUMN),
            build: pattern_params,
            corroboration: |s| {
                s.hits(keywords::COLUMN)
                    + usize::from(s.target_value().is_some())
                    + usize::from(s.column_count.or(s.run_length).is_some())
            },
        },
        StructureRule {
            name: "row",
            variant: StructureVariant::RowPattern,
            precondition: |s| s.has_any(keywords::ROW),
            build: pattern_params,
            corroboration: |s| {
                s.hits(keywords::ROW)
                    + usize::from(s.target_value().is_some())
                    + usize::from(s.row_count.or(s.run_length).is_some())
            },
        },
        StructureRule {
            name: "path-region",
            variant: StructureVariant::ConnectedRegions,
            precondition: |s| {
                s.has_path_phrase()
                    && s.has_any(keywords::REGION)
                    && s.target_value().is_some()
                    && s.has_landmarks()
            },
            build: path_params,
            corroboration: path_corroboration,
        },
        StructureRule {
            name: "path-value",
            variant: StructureVariant::ValueWithAdjacency,
            precondition: |s| {
                s.has_path_phrase() && s.target_value().is_some() && s.has_landmarks()
            },
            build: path_params,
            corroboration: path_corroboration,
        },
        StructureRule {
            name: "adjacency",
            variant: StructureVariant::ValueWithAdjacency,
            precondition: |s| {
                s.has_any(keywords::ADJACENCY) && s.target_value().is_some() && s.has_landmarks()
            },
            build: |s| StructureParams {
                target_value: s.target_value(),
                adjacent_to: Some(s.landmarks()),
                connectivity: s.connectivity,
                ..StructureParams::default()
            },
            corroboration: |s| {
                s.hits(keywords::ADJACENCY)
                    + 2
                    + usize::from(s.connectivity.is_some())
            },
        },
        StructureRule {
            name: "region",
            variant: StructureVariant::ConnectedRegions,
            precondition: |s| s.has_any(keywords::REGION) && s.target_value().is_some(),
            build: |s| StructureParams {
                target_value: s.target_value(),
                connectivity: s.connectivity,
                ..StructureParams::default()
            },
            corroboration: |s| {
                s.hits(keywords::REGION) + 1 + usize::from(s.connectivity.is_some())
            },
        },
        StructureRule {
            name: "value",
            variant: StructureVariant::Value,
            precondition: |s| s.target_value().is_some(),
            build: |s| StructureParams {
                target_value: s.target_value(),
                ..StructureParams::default()
            },
            corroboration: |s| 1 + s.hits(keywords::VALUE),
        },
    ]
}

fn pattern_type(s: &DescriptionSignals) -> Option<PatternType> {
    match (s.has_any(keywords::COLUMN), s.has_any(keywords::ROW)) {
        (true, true) => Some(PatternType::Both),
        (true, false) => Some(PatternType::Column),
        (false, true) => Some(PatternType::Row),
        (false, false) => None,
    }
}

fn pattern_params(s: &DescriptionSignals) -> StructureParams {
    StructureParams {
        target_value: s.target_value(),
        connectivity: s.connectivity,
        pattern_type: pattern_type(s),
        column_count: s.column_count.or(s.run_length),
        row_count: s.row_count.or(s.run_length),
        ..StructureParams::default()
    }
}

fn path_params(s: &DescriptionSignals) -> StructureParams {
    StructureParams {
        target_value: s.target_value(),
        path_to_landmarks: Some(s.landmarks()),
        requires_path_connectivity: true,
        connectivity: s.connectivity,
        max_path_length: s.step_count,
        ..StructureParams::default()
    }
}

fn path_corroboration(s: &DescriptionSignals) -> usize {
    s.hits(keywords::PATH)
        + 2
        + usize::from(s.step_count.is_some())
        + usize::from(s.connectivity.is_some())
}

#[cfg(test)]
mod tests {
    use grid_types::{Connectivity, Coord};

    use super::{StructureRuleTable, identify_structure_type};
    use crate::{PatternType, StructureVariant};

    #[test]
    fn path_phrasing_outranks_adjacency() {
        let t =
            identify_structure_type("regions of 3 adjacent to and connected to 5 within 2 steps");
        assert_eq!(t.variant, StructureVariant::ConnectedRegions);
        assert_eq!(t.params.target_value, Some(3));
        assert!(t.params.requires_path_connectivity);
        assert_eq!(t.params.max_path_length, Some(2));
        let landmarks = t.params.path_to_landmarks.expect("path landmarks");
        assert!(landmarks.values.contains(&5));
    }

    #[test]
    fn adjacency_without_region_words() {
        let t = identify_structure_type("cells of 2 touching 8");
        assert_eq!(t.variant, StructureVariant::ValueWithAdjacency);
        assert_eq!(t.params.target_value, Some(2));
        assert!(t.params.adjacent_to.is_some());
        assert!(t.params.path_to_landmarks.is_none());
    }

    #[test]
    fn coordinate_landmarks_feed_path_rule() {
        let t = identify_structure_type("value 4 with a path to (0, 3)");
        assert_eq!(t.variant, StructureVariant::ValueWithAdjacency);
        let landmarks = t.params.path_to_landmarks.expect("landmarks");
        assert!(landmarks.cells.contains(&Coord::new(0, 3)));
    }

    #[test]
    fn row_and_column_words_choose_patterns() {
        let col = identify_structure_type("vertical lines of 5 at least 4 long");
        assert_eq!(col.variant, StructureVariant::ColumnPattern);
        assert_eq!(col.params.pattern_type, Some(PatternType::Column));
        assert_eq!(col.params.column_count, Some(4));

        let both = identify_structure_type("rows and columns of 1");
        assert_eq!(both.variant, StructureVariant::RectangularPattern);
        assert_eq!(both.params.pattern_type, Some(PatternType::Both));
    }

    #[test]
    fn boundary_words_win_first() {
        let t = identify_structure_type("3x3 block of 1s with a plus of cardinal cells");
        assert_eq!(t.variant, StructureVariant::Boundary);
        assert_eq!(t.params.target_value, Some(1));
    }

    #[test]
    fn plain_regions_and_values() {
        let r = identify_structure_type("8-connected objects of color 6");
        assert_eq!(r.variant, StructureVariant::ConnectedRegions);
        assert_eq!(r.params.connectivity, Some(Connectivity::Eight));
        assert_eq!(r.params.target_value, Some(6));

        let v = identify_structure_type("every 9");
        assert_eq!(v.variant, StructureVariant::Value);
    }

    #[test]
    fn empty_description_defaults_to_four_connected_regions() {
        let t = identify_structure_type("");
        assert_eq!(t.variant, StructureVariant::ConnectedRegions);
        assert_eq!(t.params.connectivity, Some(Connectivity::Four));
        assert_eq!(t.confidence, 0.0);
        assert!(t.params.target_value.is_none());
    }

    #[test]
    fn more_signals_raise_confidence() {
        let weak = identify_structure_type("objects of 3");
        let strong = identify_structure_type("connected regions of 3, 4-connected blobs");
        assert!(strong.confidence > weak.confidence);
        assert!(weak.confidence > 0.0 && strong.confidence < 1.0);
    }

    #[test]
    fn rules_are_evaluated_in_order() {
        let table = StructureRuleTable::with_default_rules();
        let names: Vec<&str> = table.rules.iter().map(|r| r.name).collect();
        assert_eq!(names.first(), Some(&"boundary"));
        assert_eq!(names.last(), Some(&"value"));
    }
}
