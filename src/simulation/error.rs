//! Error types shared across the simulation.

use thiserror::Error;

/// A weight vector that does not fit the fixed 3→6→1 network topology.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenomeError {
    /// A layer's weight vector has the wrong number of elements.
    #[error("{layer} holds {actual} weights, expected {expected}")]
    WrongLength {
        /// Name of the offending layer (`w1` or `w2`).
        layer: &'static str,
        /// Number of weights the topology requires.
        expected: usize,
        /// Number of weights actually supplied.
        actual: usize,
    },
}

/// Failures while reading or writing persisted state.
#[derive(Debug, Error)]
pub enum PersistenceError {
    /// The backing file could not be read or written.
    #[error("storage i/o failed: {0}")]
    Io(#[from] std::io::Error),
    /// A stored value is not valid JSON for its field.
    #[error("stored value is not valid json: {0}")]
    Json(#[from] serde_json::Error),
    /// A stored genome decoded, but its weight vectors have the wrong shape.
    #[error("stored genome is malformed: {0}")]
    Genome(#[from] GenomeError),
}
