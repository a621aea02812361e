pub mod error;
pub mod event;
pub mod outcome;
pub mod params;

pub use error::ResolutionError;
pub use event::UnknownStructureEvent;
pub use outcome::{RecognitionOutcome, Resolution, ResolutionOutcome, Stage, UnrecognizedReason};
pub use params::ResolutionParams;
