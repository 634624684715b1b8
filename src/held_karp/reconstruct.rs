//! Tour reconstruction from recorded decisions.

use super::table::DpTable;
use super::types::{Reconstruction, Tour, TourOutcome, VisitedSet};
use crate::error::{Result, TspError};

impl DpTable<'_> {
    /// Walks `best_next` from `({start}, start)` until every location is
    /// placed, then closes the cycle if the edge back to start exists.
    ///
    /// Stops early with [`Reconstruction::Open`] when a state has no usable
    /// decision (none recorded, an already visited location, or a missing
    /// edge) or the final location has no edge back to the start.
    ///
    /// # Errors
    ///
    /// [`TspError::StartMismatch`] if `start` differs from the start the
    /// table was built for.
    pub fn reconstruct(&self, start: usize) -> Result<Reconstruction> {
        if start != self.start {
            return Err(TspError::StartMismatch {
                built_for: self.start,
                requested: start,
            });
        }

        let n = self.location_count();
        let mut visited = VisitedSet::singleton(start);
        let mut pos = start;
        let mut path = Vec::with_capacity(n + 1);
        path.push(start);

        if n == 1 {
            return Ok(Reconstruction::Closed(Tour::new(path, 0.0)));
        }

        while path.len() < n {
            let next = match self.best_next(visited, pos) {
                Some(next) if !visited.contains(next) && self.matrix.has_edge(pos, next) => next,
                _ => return Ok(Reconstruction::Open { path, visited }),
            };
            path.push(next);
            visited = visited.with(next);
            pos = next;
        }

        if !self.matrix.has_edge(pos, start) {
            return Ok(Reconstruction::Open { path, visited });
        }
        path.push(start);

        match self.matrix.path_cost(&path) {
            Some(cost) => Ok(Reconstruction::Closed(Tour::new(path, cost))),
            None => Ok(Reconstruction::Open { path, visited }),
        }
    }

    /// The optimal outcome for `start`: a closed tour, or
    /// [`TourOutcome::Unreachable`] when the start state has no finite cost.
    ///
    /// # Errors
    ///
    /// [`TspError::IncompleteReconstruction`] if the start state is finite
    /// but the decisions do not lead to a closed tour of the same cost.
    pub fn tour(&self, start: usize) -> Result<TourOutcome> {
        if start != self.start {
            return Err(TspError::StartMismatch {
                built_for: self.start,
                requested: start,
            });
        }
        let Some(total) = self.total_cost() else {
            return Ok(TourOutcome::Unreachable);
        };

        match self.reconstruct(start)? {
            Reconstruction::Closed(tour) if tour.cost() == total => Ok(TourOutcome::Tour(tour)),
            Reconstruction::Closed(tour) => Err(TspError::IncompleteReconstruction {
                visited: VisitedSet::full(self.location_count()).bits(),
                position: start,
                reason: format!(
                    "tour re-costs to {} but the start state holds {total}",
                    tour.cost()
                ),
            }),
            Reconstruction::Open { path, visited } => {
                let position = path.last().copied().unwrap_or(start);
                let reason = if path.len() < self.location_count() {
                    "no usable decision recorded for a finite state"
                } else {
                    "no edge back to the start"
                };
                Err(TspError::IncompleteReconstruction {
                    visited: visited.bits(),
                    position,
                    reason: reason.into(),
                })
            }
        }
    }
}
