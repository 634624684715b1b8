//! Exact Travelling Salesman solver based on the Held-Karp algorithm.
//!
//! Given a square cost matrix and a start location, finds the minimum-cost
//! Hamiltonian cycle with bitmask dynamic programming:
//!
//! - **Cost matrix** ([`matrix`]): non-negative costs with explicit edge
//!   absence, so a free edge is never mistaken for a missing one.
//! - **Engine** ([`held_karp`]): memoized recurrence over
//!   `(visited-set, position)` states, filled recursively or bottom-up by
//!   popcount layer (optionally in parallel), and tour reconstruction from
//!   the recorded decisions.
//! - **Oracle** ([`brute_force`]): exhaustive enumeration for small
//!   instances.
//!
//! A graph with no Hamiltonian cycle through the start is a regular
//! outcome, [`TourOutcome::Unreachable`], not an error.
//!
//! ```
//! use u_heldkarp::matrix::samples;
//!
//! let matrix = samples::seven_cities().unwrap();
//! let result = u_heldkarp::solve(&matrix, 0).unwrap();
//! assert_eq!(result.total_cost, Some(61.0));
//! assert_eq!(result.tour().unwrap().one_based(), vec![1, 2, 4, 3, 5, 6, 7, 1]);
//! ```

pub mod brute_force;
pub mod error;
pub mod held_karp;
pub mod matrix;
#[cfg(feature = "wasm")]
pub mod wasm;

pub use error::{Result, TspError};
pub use held_karp::{solve, HeldKarpConfig, HeldKarpResult, HeldKarpRunner, Tour, TourOutcome};
pub use matrix::CostMatrix;
