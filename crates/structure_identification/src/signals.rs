use std::collections::BTreeSet;
use std::sync::OnceLock;

use grid_types::{CellValue, Connectivity, Coord};
use regex::Regex;
use structure_recognition::LandmarkSet;

use crate::keywords;

/// Everything the rule tables read from one description.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DescriptionSignals {
    pub tokens: Vec<String>,
    pub words: BTreeSet<String>,
    /// Values named before the first adjacency/path phrase.
    pub subject_values: Vec<CellValue>,
    /// Values named after it.
    pub landmark_values: Vec<CellValue>,
    pub landmark_cells: Vec<Coord>,
    pub connectivity: Option<Connectivity>,
    pub step_count: Option<usize>,
    pub column_count: Option<usize>,
    pub row_count: Option<usize>,
    pub run_length: Option<usize>,
    pub block_dims: Option<(usize, usize)>,
}

fn coordinate_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"\(\s*(\d+)\s*,\s*(\d+)\s*\)").expect("coordinate pattern is valid")
    })
}

fn dims_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^(\d+)x(\d+)$").expect("dims pattern is valid"))
}

impl DescriptionSignals {
    pub fn parse(text: &str) -> Self {
        let lowered = text.to_lowercase();
        let mut signals = Self::default();

        for caps in coordinate_pattern().captures_iter(&lowered) {
            if let (Ok(row), Ok(col)) = (caps[1].parse(), caps[2].parse()) {
                signals.landmark_cells.push(Coord::new(row, col));
            }
        }
        let stripped = coordinate_pattern().replace_all(&lowered, " ");

        signals.tokens = tokenize(&stripped);
        signals.words = signals.tokens.iter().cloned().collect();
        let relation_at = signals.relation_index().unwrap_or(signals.tokens.len());

        for (idx, token) in signals.tokens.iter().enumerate() {
            let next = signals.tokens.get(idx + 1).map(String::as_str);
            let after_next = signals.tokens.get(idx + 2).map(String::as_str);

            if let Some(caps) = dims_pattern().captures(token) {
                if let (Ok(h), Ok(w)) = (caps[1].parse(), caps[2].parse()) {
                    signals.block_dims.get_or_insert((h, w));
                }
                continue;
            }

            let value = if let Ok(n) = token.parse::<usize>() {
                match next {
                    Some(w) if keywords::STEP.contains(&w) => {
                        signals.step_count.get_or_insert(n);
                        None
                    }
                    // "4 connected to ..." names a value, "4 connected regions" a neighborhood
                    Some(w)
                        if keywords::CONNECTIVITY.contains(&w)
                            && (n == 4 || n == 8)
                            && after_next != Some("to") =>
                    {
                        signals
                            .connectivity
                            .get_or_insert(if n == 8 {
                                Connectivity::Eight
                            } else {
                                Connectivity::Four
                            });
                        None
                    }
                    Some(w) if keywords::COLUMN.contains(&w) => {
                        signals.column_count.get_or_insert(n);
                        None
                    }
                    Some(w) if keywords::ROW.contains(&w) => {
                        signals.row_count.get_or_insert(n);
                        None
                    }
                    Some(w) if keywords::LENGTH.contains(&w) => {
                        signals.run_length.get_or_insert(n);
                        None
                    }
                    _ => CellValue::try_from(n).ok(),
                }
            } else {
                plural_value(token).or_else(|| color_value(token))
            };

            if let Some(v) = value {
                if idx < relation_at {
                    signals.subject_values.push(v);
                } else {
                    signals.landmark_values.push(v);
                }
            }
        }

        if signals.connectivity.is_none() {
            if signals.has_any(keywords::DIAGONAL) {
                signals.connectivity = Some(Connectivity::Eight);
            } else if signals.has_any(keywords::ORTHOGONAL) {
                signals.connectivity = Some(Connectivity::Four);
            }
        }
        signals
    }

    pub fn has_any(&self, family: &[&str]) -> bool {
        family.iter().any(|w| self.words.contains(*w))
    }

    pub fn hits(&self, family: &[&str]) -> usize {
        family.iter().filter(|w| self.words.contains(**w)).count()
    }

    pub fn has_path_phrase(&self) -> bool {
        self.has_any(keywords::PATH) || self.path_pair_index().is_some()
    }

    /// First value named in the description; the subject of the structure.
    pub fn target_value(&self) -> Option<CellValue> {
        self.subject_values
            .first()
            .or_else(|| self.landmark_values.first())
            .copied()
    }

    pub fn landmarks(&self) -> LandmarkSet {
        let target = self.target_value();
        let mut set = LandmarkSet::from_values(
            self.landmark_values
                .iter()
                .copied()
                .filter(|v| self.subject_values.is_empty() || Some(*v) != target),
        );
        set.cells.extend(self.landmark_cells.iter().copied());
        set
    }

    pub fn has_landmarks(&self) -> bool {
        !self.landmarks().is_empty()
    }

    fn relation_index(&self) -> Option<usize> {
        let single = self.tokens.iter().position(|t| {
            keywords::ADJACENCY.contains(&t.as_str()) || keywords::PATH.contains(&t.as_str())
        });
        match (single, self.path_pair_index()) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    fn path_pair_index(&self) -> Option<usize> {
        self.tokens.windows(2).position(|pair| {
            keywords::PATH_PAIRS
                .iter()
                .any(|(first, second)| pair[0] == *first && pair[1] == *second)
        })
    }
}

fn tokenize(text: &str) -> Vec<String> {
    text.split(|ch: char| !ch.is_alphanumeric())
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

fn plural_value(token: &str) -> Option<CellValue> {
    let digits = token.strip_suffix('s')?;
    if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}

fn color_value(token: &str) -> Option<CellValue> {
    let bare = token.strip_suffix('s').filter(|b| keywords::COLORS.iter().any(|(n, _)| n == b));
    let name = bare.unwrap_or(token);
    keywords::COLORS
        .iter()
        .find(|(n, _)| *n == name)
        .map(|(_, v)| *v)
}

#[cfg(test)]
mod tests {
    use grid_types::{Connectivity, Coord};

    use super::DescriptionSignals;

    #[test]
    fn values_split_around_relation_phrase() {
        let s = DescriptionSignals::parse("regions of 3 adjacent to 5 or 6");
        assert_eq!(s.subject_values, vec![3]);
        assert_eq!(s.landmark_values, vec![5, 6]);
        assert_eq!(s.target_value(), Some(3));
        assert_eq!(
            s.landmarks().values.into_iter().collect::<Vec<_>>(),
            vec![5, 6]
        );
    }

    #[test]
    fn counts_and_steps_are_not_values() {
        let s = DescriptionSignals::parse("8-connected 2s within 3 steps of 4, runs 5 long");
        assert_eq!(s.connectivity, Some(Connectivity::Eight));
        assert_eq!(s.step_count, Some(3));
        assert_eq!(s.run_length, Some(5));
        assert_eq!(s.subject_values, vec![2, 4]);
    }

    #[test]
    fn plurals_colors_and_dims() {
        let s = DescriptionSignals::parse("3x3 block of 1s next to red cells");
        assert_eq!(s.block_dims, Some((3, 3)));
        assert_eq!(s.subject_values, vec![1]);
        assert_eq!(s.landmark_values, vec![2]);
    }

    #[test]
    fn coordinates_become_landmark_cells() {
        let s = DescriptionSignals::parse("cells of 4 connected to (0, 5)");
        assert_eq!(s.landmark_cells, vec![Coord::new(0, 5)]);
        assert_eq!(s.subject_values, vec![4]);
        assert!(s.landmark_values.is_empty());
        assert!(s.has_path_phrase());
        assert!(s.has_landmarks());
    }

    #[test]
    fn diagonal_wording_sets_eight_connectivity() {
        let s = DescriptionSignals::parse("diagonally touching groups of 7");
        assert_eq!(s.connectivity, Some(Connectivity::Eight));
    }
}
