//! Error types for the Held-Karp engine.

use thiserror::Error;

/// Main error type for u-heldkarp operations.
///
/// A graph without any Hamiltonian cycle through the start is *not* an
/// error: it is reported as
/// [`TourOutcome::Unreachable`](crate::held_karp::TourOutcome::Unreachable).
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TspError {
    /// Malformed cost matrix or start index. Raised before any DP work.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Engine configuration rejected by [`HeldKarpConfig::validate`](crate::held_karp::HeldKarpConfig::validate).
    #[error("invalid config: {0}")]
    InvalidConfig(String),

    /// A state with a finite cost has no usable recorded decision.
    ///
    /// The recurrence and the reconstruction disagree; this indicates a bug
    /// in table population and is never produced by a correct table.
    #[error(
        "incomplete reconstruction at visited={visited:#b}, position={position}: {reason}"
    )]
    IncompleteReconstruction {
        visited: u32,
        position: usize,
        reason: String,
    },

    /// A decision table was asked to reconstruct a tour for a start it was
    /// not built for.
    #[error("table was built for start {built_for}, requested start {requested}")]
    StartMismatch { built_for: usize, requested: usize },

    /// The DP table for this many locations could not be allocated.
    #[error("cannot allocate the DP table for {locations} locations ({bytes} bytes)")]
    TableAllocation { locations: usize, bytes: usize },

    /// The cancellation flag was raised while filling the table.
    #[error("solve cancelled after {states_evaluated} state evaluations")]
    Cancelled { states_evaluated: usize },
}

/// Convenience result type for u-heldkarp operations.
pub type Result<T> = std::result::Result<T, TspError>;
