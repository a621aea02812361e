use std::any::Any;
use std::panic::{AssertUnwindSafe, catch_unwind};

use grid_types::Grid;
use structure_identification::{
    OperatorRuleTable, StructureRuleTable, StructureType, SubstitutionRule,
};
use substitution::{ApplyOptions, OperatorRegistry, apply_with_registry};

use crate::adapters::{LearnedCompositions, LogTracker};
use crate::config::ResolverConfig;
use crate::domain::{
    RecognitionOutcome, Resolution, ResolutionError, ResolutionOutcome, ResolutionParams, Stage,
    UnknownStructureEvent, UnrecognizedReason,
};
use crate::legacy;
use crate::ports::{ShortcutStore, UnknownStructureTracker};
use crate::runtime::dispatch::recognize;

pub struct ConstraintResolver {
    shortcuts: Box<dyn ShortcutStore>,
    tracker: Box<dyn UnknownStructureTracker>,
    registry: OperatorRegistry,
    structure_rules: StructureRuleTable,
    operator_rules: OperatorRuleTable,
    config: ResolverConfig,
}

impl Default for ConstraintResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl ConstraintResolver {
    pub fn new() -> Self {
        Self {
            shortcuts: Box::new(LearnedCompositions::default()),
            tracker: Box::new(LogTracker),
            registry: OperatorRegistry::with_defaults(),
            structure_rules: StructureRuleTable::with_default_rules(),
            operator_rules: OperatorRuleTable::with_default_rules(),
            config: ResolverConfig::default(),
        }
    }

    pub fn with_shortcuts(mut self, shortcuts: Box<dyn ShortcutStore>) -> Self {
        self.shortcuts = shortcuts;
        self
    }

    pub fn with_tracker(mut self, tracker: Box<dyn UnknownStructureTracker>) -> Self {
        self.tracker = tracker;
        self
    }

    pub fn with_registry(mut self, registry: OperatorRegistry) -> Self {
        self.registry = registry;
        self
    }

    pub fn with_config(mut self, config: ResolverConfig) -> Self {
        self.config = config;
        self
    }

    pub fn classify(&self, input: &str, output: &str) -> (StructureType, SubstitutionRule) {
        let structure_type = self.structure_rules.identify(input);
        let rule = self.operator_rules.identify(output, &structure_type);
        (structure_type, rule)
    }

    /// Never fails: every path ends in a grid of the input's shape.
    pub fn resolve(&self, grid: &Grid, params: &ResolutionParams) -> Resolution {
        let mut trace = vec![Stage::Classify];
        let (structure_type, rule) =
            self.classify(&params.input_structure, &params.output_structure);
        log::info!(
            "problem {:?}: {} ({:.2}) -> {}",
            params.problem_id,
            structure_type.name(),
            structure_type.confidence,
            rule.operator
        );

        trace.push(Stage::ShortcutCheck);
        if let Some(hit) = self.check_shortcut(&structure_type, &rule, grid, params) {
            log::info!("using learned composition shortcut");
            trace.push(Stage::Done);
            return Resolution {
                grid: hit,
                structure_type,
                rule,
                outcome: ResolutionOutcome::Shortcut,
                trace,
            };
        }

        trace.push(Stage::Recognize);
        let recognition = isolate(|| Ok(recognize(grid, &structure_type, &self.config)))
            .unwrap_or_else(|err| RecognitionOutcome::Faulted(err.to_string()));

        let (out, outcome) = match recognition {
            RecognitionOutcome::Recognized(instances) => {
                trace.push(Stage::Apply);
                let options = ApplyOptions {
                    preserve_non_matching: params.preserve_non_matching,
                };
                match isolate(|| {
                    Ok(apply_with_registry(&self.registry, grid, &instances, &rule, options))
                }) {
                    Ok(report) => (
                        report.grid,
                        ResolutionOutcome::Applied {
                            operator: rule.operator.clone(),
                            instances: instances.len(),
                            rewritten: report.rewritten,
                        },
                    ),
                    Err(err) => {
                        log::error!("substitution '{}' failed: {err}", rule.operator);
                        let fault = Some(err.to_string());
                        self.unrecognized(grid, params, &structure_type, fault, &mut trace)
                    }
                }
            }
            RecognitionOutcome::Empty => self.degrade(grid, params, &structure_type, &mut trace),
            // a fault never reaches the legacy rewrite
            RecognitionOutcome::Faulted(reason) => {
                self.unrecognized(grid, params, &structure_type, Some(reason), &mut trace)
            }
        };

        trace.push(Stage::Done);
        Resolution {
            grid: out,
            structure_type,
            rule,
            outcome,
            trace,
        }
    }

    fn check_shortcut(
        &self,
        structure_type: &StructureType,
        rule: &SubstitutionRule,
        grid: &Grid,
        params: &ResolutionParams,
    ) -> Option<Grid> {
        match isolate(|| self.shortcuts.lookup(structure_type, rule, grid, params)) {
            Ok(Some(hit)) if hit.same_shape(grid) => Some(hit),
            Ok(Some(hit)) => {
                log::warn!(
                    "discarding shortcut grid of shape {:?}; input is {:?}",
                    hit.dims(),
                    grid.dims()
                );
                None
            }
            Ok(None) => None,
            Err(err) => {
                log::error!("shortcut store failed: {err}");
                None
            }
        }
    }

    /// Nothing recognized: try the legacy rewrite, else report the structure as unknown.
    fn degrade(
        &self,
        grid: &Grid,
        params: &ResolutionParams,
        structure_type: &StructureType,
        trace: &mut Vec<Stage>,
    ) -> (Grid, ResolutionOutcome) {
        if self.config.legacy_fallback
            && legacy::describes_plus_to_cross(&params.input_structure, &params.output_structure)
        {
            trace.push(Stage::LegacyFallback);
            let mut out = if params.preserve_non_matching {
                grid.clone()
            } else {
                grid.zeros_like()
            };
            let matches = legacy::replace_plus_with_cross(grid, &mut out);
            log::info!("legacy plus-to-cross fallback matched {matches} block(s)");
            return (out, ResolutionOutcome::LegacyFallback { matches });
        }
        self.unrecognized(grid, params, structure_type, None, trace)
    }

    fn unrecognized(
        &self,
        grid: &Grid,
        params: &ResolutionParams,
        structure_type: &StructureType,
        fault: Option<String>,
        trace: &mut Vec<Stage>,
    ) -> (Grid, ResolutionOutcome) {
        trace.push(Stage::Unrecognized);
        let event = UnknownStructureEvent::new(
            &params.problem_id,
            &params.input_structure,
            structure_type.name(),
            fault.clone(),
        );
        if let Err(err) = isolate(|| self.tracker.record(&event)) {
            log::error!("unknown-structure tracker failed: {err}");
        }
        log::warn!("no structures recognized; returning the grid unchanged");
        let reason = match fault {
            Some(detail) => UnrecognizedReason::Faulted(detail),
            None => UnrecognizedReason::NoStructures,
        };
        (grid.clone(), ResolutionOutcome::Unrecognized { reason })
    }
}

/// Runs a collaborator call, turning a panic into [`ResolutionError::Panicked`].
fn isolate<T>(call: impl FnOnce() -> Result<T, ResolutionError>) -> Result<T, ResolutionError> {
    match catch_unwind(AssertUnwindSafe(call)) {
        Ok(result) => result,
        Err(payload) => Err(ResolutionError::Panicked(panic_message(&*payload))),
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(msg) = payload.downcast_ref::<&str>() {
        (*msg).to_string()
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        msg.clone()
    } else {
        "unknown panic payload".to_string()
    }
}
