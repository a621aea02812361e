use thiserror::Error;

/// Faults raised by collaborators. The resolver logs and swallows all of them.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ResolutionError {
    #[error("port error: {0}")]
    PortError(String),
    #[error("collaborator panicked: {0}")]
    Panicked(String),
}
