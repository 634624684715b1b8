//! Held-Karp dynamic programming for the exact TSP.
//!
//! States are `(visited-set, position)` pairs. Each state memoizes the
//! minimum cost of visiting the remaining locations and returning to the
//! start, together with the next location that achieves it. The optimal
//! tour is read back by following those decisions from `({start}, start)`.
//!
//! # Key Types
//!
//! - [`HeldKarpConfig`]: strategy, parallelism, size limit
//! - [`HeldKarpRunner`]: validates input, fills the table, reconstructs
//! - [`DpTable`]: the memo and decision table of one solve
//! - [`HeldKarpResult`]: the tour (or [`TourOutcome::Unreachable`]) and its cost
//!
//! # Complexity
//!
//! Only visited-sets containing the start are stored: `2^(N-1) × N` states,
//! O(N) work each, so O(2^N · N^2) time and O(2^N · N) memory. A state
//! costs [`BYTES_PER_STATE`] bytes (an `f64` cost and a `u8` decision code).
//!
//! # References
//!
//! - Held & Karp (1962), "A Dynamic Programming Approach to Sequencing Problems"
//! - Bellman (1962), "Dynamic Programming Treatment of the Travelling Salesman Problem"

mod config;
mod reconstruct;
mod runner;
mod table;
mod types;

pub use config::{HeldKarpConfig, Strategy};
pub use runner::{solve, HeldKarpResult, HeldKarpRunner};
pub use table::{table_bytes, DpTable, BYTES_PER_STATE};
pub use types::{Reconstruction, StateValue, Tour, TourOutcome, VisitedSet};
