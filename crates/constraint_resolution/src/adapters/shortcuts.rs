use grid_types::Grid;
use structure_identification::{
    RuleTag, StructureType, StructureVariant, SubstitutionRule, operators,
};

use crate::domain::{ResolutionError, ResolutionParams};
use crate::ports::ShortcutStore;

#[derive(Clone, Copy, Debug, Default)]
pub struct NoShortcut;

impl ShortcutStore for NoShortcut {
    fn lookup(
        &self,
        _: &StructureType,
        _: &SubstitutionRule,
        _: &Grid,
        _: &ResolutionParams,
    ) -> Result<Option<Grid>, ResolutionError> {
        Ok(None)
    }
}

/// A (structure type, rule) pairing seen often enough to deserve its own shortcut.
#[derive(Clone, Debug)]
pub struct Composition {
    pub name: &'static str,
    pub matches: fn(&StructureType, &SubstitutionRule) -> bool,
}

/// Recognizes the frequent compositions but has no learned rewrite for them
/// yet, so every lookup misses.
#[derive(Clone, Debug)]
pub struct LearnedCompositions {
    compositions: Vec<Composition>,
}

impl Default for LearnedCompositions {
    fn default() -> Self {
        Self {
            compositions: vec![
                Composition {
                    name: "compact connected regions",
                    matches: |ty, rule| {
                        ty.variant == StructureVariant::ConnectedRegions
                            && rule.changes(RuleTag::Position)
                            && rule.preserves(RuleTag::StructureIntegrity)
                    },
                },
                Composition {
                    name: "boundary extraction",
                    matches: |ty, rule| {
                        ty.variant == StructureVariant::Boundary
                            && rule.operator == operators::EXTRACT_BY_BOUNDARY
                    },
                },
            ],
        }
    }
}

impl LearnedCompositions {
    pub fn candidate(&self, ty: &StructureType, rule: &SubstitutionRule) -> Option<&'static str> {
        self.compositions
            .iter()
            .find(|c| (c.matches)(ty, rule))
            .map(|c| c.name)
    }
}

impl ShortcutStore for LearnedCompositions {
    fn lookup(
        &self,
        ty: &StructureType,
        rule: &SubstitutionRule,
        _: &Grid,
        params: &ResolutionParams,
    ) -> Result<Option<Grid>, ResolutionError> {
        if let Some(name) = self.candidate(ty, rule) {
            log::info!(
                "composition '{name}' matches problem {:?}; no learned rewrite yet",
                params.problem_id
            );
        }
        Ok(None)
    }
}
