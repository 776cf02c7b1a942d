//! Error type shared by the stepper, its stores and the C ABI.

use thiserror::Error;

/// Errors raised while building or driving a [`Stepper`](crate::Stepper).
#[derive(Debug, Error)]
pub enum Error {
    /// The requested source is not a vertex of the graph.
    #[error("source vertex {0} is not in the graph")]
    SourceNotInGraph(String),

    /// An edge carries a negative weight.
    #[error("edge {from} -> {to} has negative weight {weight}")]
    NegativeWeight { from: String, to: String, weight: f64 },

    /// An edge weight is NaN or infinite.
    #[error("edge {from} -> {to} has non-finite weight {weight}")]
    InvalidWeight { from: String, to: String, weight: f64 },

    /// An edge endpoint was never enumerated as a vertex.
    #[error("edge {from} -> {to} references a vertex outside the graph")]
    DanglingEdge { from: String, to: String },

    /// A graph adapter produced an inconsistent layout.
    #[error("invalid graph: {0}")]
    InvalidGraph(String),

    /// A query named a vertex that was not part of the snapshot.
    #[error("unknown vertex {0}")]
    UnknownVertex(String),

    /// `step()` was called after `has_next_step()` returned false.
    #[error("step requested after the run completed")]
    StepAfterCompletion,

    /// No predecessor chain leads from the source to this vertex.
    #[error("vertex {0} is unreachable from the source")]
    Unreachable(String),

    /// A predecessor cycle or similar broken invariant; always a bug.
    #[error("internal invariant violated: {0}")]
    InternalInvariantViolation(String),

    /// Configuration could not be parsed.
    #[error("invalid configuration: {0}")]
    Config(#[from] serde_json::Error),
}

impl Error {
    /// Stable negative status code used across the C ABI (0 == success).
    #[must_use]
    pub fn code(&self) -> i32 {
        match self {
            Error::SourceNotInGraph(_) => -2,
            Error::NegativeWeight { .. } => -3,
            Error::InvalidWeight { .. } => -4,
            Error::DanglingEdge { .. } => -5,
            Error::UnknownVertex(_) => -6,
            Error::InvalidGraph(_) => -11,
            Error::StepAfterCompletion => -7,
            Error::Unreachable(_) => -8,
            Error::InternalInvariantViolation(_) => -9,
            Error::Config(_) => -10,
        }
    }
}

/// Result alias for this crate.
pub type Result<T> = std::result::Result<T, Error>;
