//! Resolves a grid against an input/output structure description pair.
//!
//! [`ConstraintResolver::resolve`] classifies both descriptions, consults the
//! shortcut store, recognizes instances and applies the substitution. Every
//! failure degrades to a grid: the legacy plus-to-cross rewrite when the
//! descriptions ask for it, otherwise an unchanged copy plus one
//! unknown-structure event.

pub mod adapters;
pub mod config;
pub mod domain;
pub mod legacy;
pub mod ports;
pub mod runtime;

pub use adapters::{JsonlTracker, LearnedCompositions, LogTracker, MemoryTracker, NoShortcut};
pub use config::{ConfigError, ResolverConfig};
pub use domain::{
    RecognitionOutcome, Resolution, ResolutionError, ResolutionOutcome, ResolutionParams, Stage,
    UnknownStructureEvent, UnrecognizedReason,
};
pub use ports::{ShortcutStore, UnknownStructureTracker};
pub use runtime::{ConstraintResolver, recognize};
