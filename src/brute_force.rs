//! Exhaustive permutation search.
//!
//! Enumerates every visiting order explicitly, O(N!), as an independent
//! reference for the DP engine. Orders are explored in ascending
//! lexicographic order and only a strictly cheaper tour replaces the
//! incumbent, so among equal-cost tours the lexicographically smallest is
//! returned, the same tour the engine's lowest-index tie-break produces.

use crate::error::{Result, TspError};
use crate::held_karp::{Tour, VisitedSet};
use crate::matrix::CostMatrix;

/// Largest instance the enumeration accepts.
pub const BRUTE_FORCE_LIMIT: usize = 11;

fn check(matrix: &CostMatrix, start: usize) -> Result<()> {
    if matrix.len() > BRUTE_FORCE_LIMIT {
        return Err(TspError::InvalidInput(format!(
            "brute force is limited to {BRUTE_FORCE_LIMIT} locations, got {}",
            matrix.len()
        )));
    }
    matrix.validate_start(start)
}

/// Optimal tour through `start`, `None` if no Hamiltonian cycle exists.
pub fn optimal_tour(matrix: &CostMatrix, start: usize) -> Result<Option<Tour>> {
    check(matrix, start)?;
    if matrix.len() == 1 {
        return Ok(Some(Tour::new(vec![start], 0.0)));
    }
    Ok(best_completion(matrix, start, VisitedSet::singleton(start), start)
        .map(|(cost, path)| Tour::new(path, cost)))
}

/// Cheapest way to visit every location outside `visited` starting at
/// `pos` and return to `start`; `None` if there is none.
///
/// This is the quantity the engine memoizes for state `(visited, pos)`.
pub fn completion_cost(
    matrix: &CostMatrix,
    start: usize,
    visited: VisitedSet,
    pos: usize,
) -> Result<Option<f64>> {
    check(matrix, start)?;
    if visited.bits() >> matrix.len() != 0 {
        return Err(TspError::InvalidInput(format!(
            "visited set {:#b} names locations beyond {}",
            visited.bits(),
            matrix.len()
        )));
    }
    if pos >= matrix.len() || !visited.contains(pos) || !visited.contains(start) {
        return Err(TspError::InvalidInput(format!(
            "state ({:#b}, {pos}) must contain both the start and the position",
            visited.bits()
        )));
    }
    if matrix.len() == 1 {
        return Ok(Some(0.0));
    }
    Ok(best_completion(matrix, start, visited, pos).map(|(cost, _)| cost))
}

/// Returns `(cost, path)` with `path = [pos, …, start]`.
fn best_completion(
    matrix: &CostMatrix,
    start: usize,
    visited: VisitedSet,
    pos: usize,
) -> Option<(f64, Vec<usize>)> {
    let mut path = vec![pos];
    let mut best = None;
    extend(matrix, start, visited, &mut path, &mut best);
    best
}

fn extend(
    matrix: &CostMatrix,
    start: usize,
    visited: VisitedSet,
    path: &mut Vec<usize>,
    best: &mut Option<(f64, Vec<usize>)>,
) {
    let n = matrix.len();
    let pos = path[path.len() - 1];

    if visited == VisitedSet::full(n) {
        if !matrix.has_edge(pos, start) {
            return;
        }
        path.push(start);
        if let Some(cost) = matrix.path_cost(path) {
            if best.as_ref().is_none_or(|(b, _)| cost < *b) {
                *best = Some((cost, path.clone()));
            }
        }
        path.pop();
        return;
    }

    for next in 0..n {
        if visited.contains(next) || !matrix.has_edge(pos, next) {
            continue;
        }
        path.push(next);
        extend(matrix, start, visited.with(next), path, best);
        path.pop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square() -> CostMatrix {
        CostMatrix::from_dense(&[
            [0.0, 1.0, 9.0, 1.0],
            [1.0, 0.0, 1.0, 9.0],
            [9.0, 1.0, 0.0, 1.0],
            [1.0, 9.0, 1.0, 0.0],
        ])
        .unwrap()
    }

    #[test]
    fn test_optimal_tour_square() {
        let tour = optimal_tour(&square(), 0).unwrap().unwrap();
        assert_eq!(tour.cost(), 4.0);
        // 0-1-2-3-0 and 0-3-2-1-0 tie; lexicographic order keeps the first.
        assert_eq!(tour.locations(), &[0, 1, 2, 3, 0]);
    }

    #[test]
    fn test_completion_cost() {
        let m = square();
        let visited = VisitedSet::from_bits(0b0011);
        // From 1 having seen {0, 1}: 1→2→3→0 = 3
        assert_eq!(completion_cost(&m, 0, visited, 1).unwrap(), Some(3.0));
        assert_eq!(
            completion_cost(&m, 0, VisitedSet::full(4), 3).unwrap(),
            Some(1.0)
        );
    }

    #[test]
    fn test_no_cycle() {
        let m = CostMatrix::from_rows(vec![
            vec![None, Some(1.0), None],
            vec![None, None, Some(1.0)],
            vec![None, None, None],
        ])
        .unwrap();
        assert_eq!(optimal_tour(&m, 0).unwrap(), None);
    }

    #[test]
    fn test_invalid_state() {
        let m = square();
        assert!(completion_cost(&m, 0, VisitedSet::singleton(1), 1).is_err());
        assert!(completion_cost(&m, 0, VisitedSet::singleton(0), 2).is_err());
    }

    #[test]
    fn test_visited_bits_beyond_matrix() {
        let m = square();
        let visited = VisitedSet::from_bits(0b1_0011);
        assert!(matches!(
            completion_cost(&m, 0, visited, 1),
            Err(TspError::InvalidInput(ref msg)) if msg.contains("beyond 4")
        ));
    }

    #[test]
    fn test_limit() {
        let n = BRUTE_FORCE_LIMIT + 1;
        let m = CostMatrix::from_dense(&vec![vec![1.0; n]; n]).unwrap();
        assert!(matches!(
            optimal_tour(&m, 0),
            Err(TspError::InvalidInput(_))
        ));
    }
}
