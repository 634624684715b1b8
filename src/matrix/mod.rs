//! Cost matrices: the read-only input of the engine.
//!
//! - [`CostMatrix`]: square matrix of non-negative costs, with edge absence
//!   represented explicitly rather than by a reserved number
//! - [`samples`]: built-in instances
//! - [`generate`]: seeded random instances for tests and benchmarks

mod cost;
pub mod generate;
pub mod samples;

pub use cost::{CostMatrix, MAX_LOCATIONS};
