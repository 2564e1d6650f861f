use thiserror::Error;

/// Type-erased error reported by an external collaborator.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

#[derive(Error, Debug)]
pub enum ShuffleError {
    /// Malformed input handed to the core. Indicates a programming defect
    /// rather than a user error.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("at least 2 items are required to shuffle, got {len}")]
    InsufficientItems { len: usize },

    /// The range-move primitive rejected a command. The remote collection is
    /// left in the state produced by the first `applied` moves.
    #[error("range move failed after {applied} of {planned} moves: {source}")]
    ExternalMutationFailure {
        applied: usize,
        planned: usize,
        #[source]
        source: BoxError,
    },

    #[error("reading the current order failed: {0}")]
    Read(#[source] BoxError),

    #[error("collection is already being shuffled")]
    Busy,

    #[error("cannot seed random number generator: {0}")]
    Rng(#[from] rand::Error),
}

impl ShuffleError {
    /// Number of moves that reached the remote collection before the error.
    /// Every variant except [`ShuffleError::ExternalMutationFailure`] is raised
    /// before the first external call.
    pub fn moves_applied(&self) -> usize {
        match self {
            Self::ExternalMutationFailure { applied, .. } => *applied,
            _ => 0,
        }
    }
}

pub type Result<T> = std::result::Result<T, ShuffleError>;
