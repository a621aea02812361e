//! Locates concrete structure instances in a grid.
//!
//! Every recognizer is a pure function of the grid and its parameters. Results
//! are ordered by each instance's topmost-leftmost cell and never overlap,
//! except when a spatial scan requests several configuration kinds at once.

mod error;
mod landmarks;
mod regions;
mod spatial;
mod structure;

pub use error::RecognitionError;
pub use landmarks::{DistanceStrategy, LandmarkSet, landmark_distances};
pub use regions::{Relation, ValueCondition, recognize_connected_regions, recognize_value_regions};
pub use spatial::{BlockPattern, RunPattern, SpatialConfig, recognize_spatial_configurations};
pub use structure::{RecognizedStructure, StructureKind};
