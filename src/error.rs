//! Error taxonomy for the sequence-form solver.
//!
//! Four kinds of failure can occur: a malformed game file (fatal at load
//! time), an invalid sequence-form strategy or utility vector (an invariant
//! violation, fatal in debug builds), and a sampling error in MCCFR+ that
//! should never actually occur given the matcher's uniform fallback.

use std::fmt;

/// Errors produced while loading, validating, or solving a sequence-form
/// game.
#[derive(Debug, Clone)]
pub enum SolverError {
    /// The game file is malformed: a missing field, an unknown node type,
    /// an edge pointing at an id that doesn't exist, or a node order that
    /// isn't topological.
    MalformedGame(String),

    /// A sequence-form strategy failed the simplex-sum check at some
    /// decision node.
    InvalidStrategy {
        /// The decision node whose simplex constraint was violated.
        node_id: String,
        /// `|sum(children) - parent_reach|`, the observed violation.
        violation: f64,
    },

    /// A utility map's key set did not equal the sequence set Σ of the
    /// treeplex it was checked against.
    InvalidUtility(String),

    /// MCCFR+ sampling produced an empty distribution (all-zero weights).
    /// This should never happen because the local matcher always falls
    /// back to uniform; if observed, it's a programmer error upstream.
    SamplingError(String),
}

impl fmt::Display for SolverError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SolverError::MalformedGame(msg) => write!(f, "malformed game file: {}", msg),
            SolverError::InvalidStrategy { node_id, violation } => write!(
                f,
                "invalid sequence-form strategy at node {:?}: simplex violation {:.3e}",
                node_id, violation
            ),
            SolverError::InvalidUtility(msg) => write!(f, "invalid utility vector: {}", msg),
            SolverError::SamplingError(msg) => write!(f, "MCCFR+ sampling error: {}", msg),
        }
    }
}

impl std::error::Error for SolverError {}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, SolverError>;
