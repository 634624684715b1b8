//! Top-level solve.

use super::config::{HeldKarpConfig, Strategy};
use super::table::DpTable;
use super::types::{Tour, TourOutcome};
use crate::error::{Result, TspError};
use crate::matrix::CostMatrix;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

/// Result of a Held-Karp solve.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HeldKarpResult {
    /// Optimal tour, or the explicit unreachable marker.
    pub outcome: TourOutcome,

    /// Optimal tour cost; `None` exactly when the outcome is unreachable.
    pub total_cost: Option<f64>,

    /// Start location the tour begins and ends at.
    pub start: usize,

    /// Number of locations N.
    pub location_count: usize,

    /// States evaluated while filling the table.
    pub states_evaluated: usize,

    /// Strategy that filled the table.
    pub strategy: Strategy,
}

impl HeldKarpResult {
    /// The optimal tour, if one exists.
    pub fn tour(&self) -> Option<&Tour> {
        match &self.outcome {
            TourOutcome::Tour(tour) => Some(tour),
            TourOutcome::Unreachable => None,
        }
    }

    pub fn is_unreachable(&self) -> bool {
        matches!(self.outcome, TourOutcome::Unreachable)
    }
}

/// Executes the Held-Karp algorithm.
pub struct HeldKarpRunner;

impl HeldKarpRunner {
    /// Solves for the optimal tour through `start`.
    pub fn run(matrix: &CostMatrix, start: usize, config: &HeldKarpConfig) -> Result<HeldKarpResult> {
        Self::run_with_cancel(matrix, start, config, None)
    }

    /// Solves with an optional cancellation token.
    ///
    /// The flag is polled every `config.cancel_check_interval` state
    /// evaluations; once raised the solve returns
    /// [`TspError::Cancelled`].
    pub fn run_with_cancel(
        matrix: &CostMatrix,
        start: usize,
        config: &HeldKarpConfig,
        cancel: Option<Arc<AtomicBool>>,
    ) -> Result<HeldKarpResult> {
        let table = Self::build_table_with_cancel(matrix, start, config, cancel)?;
        let outcome = table.tour(start)?;
        let total_cost = table.total_cost();

        match &outcome {
            TourOutcome::Tour(tour) => log::debug!(
                "optimal tour from {start}: cost {}, {} locations",
                tour.cost(),
                tour.location_count()
            ),
            TourOutcome::Unreachable => {
                log::debug!("no hamiltonian cycle through {start}")
            }
        }

        Ok(HeldKarpResult {
            outcome,
            total_cost,
            start,
            location_count: matrix.len(),
            states_evaluated: table.states_evaluated(),
            strategy: config.strategy,
        })
    }

    /// Validates the input and fills the DP table without reconstructing.
    ///
    /// Useful for inspecting per-state values and decisions.
    pub fn build_table<'m>(
        matrix: &'m CostMatrix,
        start: usize,
        config: &HeldKarpConfig,
    ) -> Result<DpTable<'m>> {
        Self::build_table_with_cancel(matrix, start, config, None)
    }

    /// [`build_table`](Self::build_table) with a cancellation token.
    pub fn build_table_with_cancel<'m>(
        matrix: &'m CostMatrix,
        start: usize,
        config: &HeldKarpConfig,
        cancel: Option<Arc<AtomicBool>>,
    ) -> Result<DpTable<'m>> {
        config.validate()?;
        check_input(matrix, start, config)?;
        DpTable::build(matrix, start, config, cancel.as_deref())
    }
}

fn check_input(matrix: &CostMatrix, start: usize, config: &HeldKarpConfig) -> Result<()> {
    if matrix.len() > config.max_locations {
        return Err(TspError::InvalidInput(format!(
            "{} locations exceed the configured limit of {}",
            matrix.len(),
            config.max_locations
        )));
    }
    matrix.validate_start(start)
}

/// Solves with the default configuration.
///
/// # Examples
///
/// ```
/// use u_heldkarp::matrix::CostMatrix;
///
/// let m = CostMatrix::from_dense(&[
///     [0.0, 1.0, 2.0, 3.0],
///     [1.0, 0.0, 4.0, 5.0],
///     [2.0, 4.0, 0.0, 6.0],
///     [3.0, 5.0, 6.0, 0.0],
/// ])
/// .unwrap();
///
/// let result = u_heldkarp::solve(&m, 0).unwrap();
/// assert_eq!(result.total_cost, Some(14.0));
/// assert_eq!(result.tour().unwrap().locations(), &[0, 1, 2, 3, 0]);
/// ```
pub fn solve(matrix: &CostMatrix, start: usize) -> Result<HeldKarpResult> {
    HeldKarpRunner::run(matrix, start, &HeldKarpConfig::default())
}
