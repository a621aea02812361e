use grid_types::Coord;
use thiserror::Error;

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum RecognitionError {
    #[error("landmark set is empty")]
    EmptyLandmarks,
    #[error("landmark cell {0} lies outside the grid")]
    LandmarkOutOfBounds(Coord),
    #[error("{kind} threshold must be positive")]
    InvalidThreshold { kind: &'static str },
}
