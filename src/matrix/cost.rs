//! Square edge-cost matrix with explicit edge absence.

use crate::error::{Result, TspError};

/// Largest location count any matrix may hold.
///
/// Visited-sets are `u32` bitmasks and the DP table holds `2^(N-1) × N`
/// states, so 25 locations already means ~420M states (about 3.8 GB).
pub const MAX_LOCATIONS: usize = 25;

/// An immutable N×N matrix of travel costs.
///
/// `edge(i, j)` is the cost of travelling directly from `i` to `j`, or
/// `None` when no direct edge exists. Costs are finite and non-negative;
/// a zero cost is a real, free edge. The diagonal is never part of a tour
/// and is always reported as absent, whatever the input held there.
///
/// The matrix need not be symmetric.
///
/// # Examples
///
/// ```
/// use u_heldkarp::matrix::CostMatrix;
///
/// let m = CostMatrix::from_rows(vec![
///     vec![None, Some(2.0), None],
///     vec![Some(2.0), None, Some(0.0)],
///     vec![Some(1.0), Some(4.0), None],
/// ])
/// .unwrap();
///
/// assert_eq!(m.len(), 3);
/// assert_eq!(m.edge(0, 1), Some(2.0));
/// assert_eq!(m.edge(0, 2), None);
/// assert_eq!(m.edge(1, 2), Some(0.0));
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(try_from = "Vec<Vec<Option<f64>>>", into = "Vec<Vec<Option<f64>>>")
)]
pub struct CostMatrix {
    n: usize,
    /// Row-major, `n * n` cells.
    cells: Vec<Option<f64>>,
}

impl CostMatrix {
    /// Builds a matrix from rows of optional costs.
    ///
    /// # Errors
    ///
    /// [`TspError::InvalidInput`] if the matrix is empty, not square, larger
    /// than [`MAX_LOCATIONS`], or holds a negative or non-finite off-diagonal
    /// cost.
    pub fn from_rows(rows: Vec<Vec<Option<f64>>>) -> Result<Self> {
        let n = rows.len();
        if n == 0 {
            return Err(TspError::InvalidInput("cost matrix is empty".into()));
        }
        if n > MAX_LOCATIONS {
            return Err(TspError::InvalidInput(format!(
                "{n} locations exceed the bitmask limit of {MAX_LOCATIONS}"
            )));
        }

        let mut cells = Vec::with_capacity(n * n);
        for (i, row) in rows.into_iter().enumerate() {
            if row.len() != n {
                return Err(TspError::InvalidInput(format!(
                    "cost matrix is not square: row {i} has {} columns, expected {n}",
                    row.len()
                )));
            }
            for (j, cell) in row.into_iter().enumerate() {
                if i == j {
                    cells.push(None);
                    continue;
                }
                if let Some(cost) = cell {
                    if !cost.is_finite() || cost < 0.0 {
                        return Err(TspError::InvalidInput(format!(
                            "cost[{i}][{j}] = {cost} must be finite and non-negative"
                        )));
                    }
                }
                cells.push(cell);
            }
        }

        Ok(Self { n, cells })
    }

    /// Builds a complete matrix: every off-diagonal cell is an edge.
    pub fn from_dense<R: AsRef<[f64]>>(rows: &[R]) -> Result<Self> {
        Self::from_rows(
            rows.iter()
                .map(|row| row.as_ref().iter().map(|&c| Some(c)).collect())
                .collect(),
        )
    }

    /// Builds a matrix where a stored `0` means "no direct edge".
    ///
    /// This is the convention of plain adjacency-matrix data sets. Such data
    /// cannot express a zero-cost edge; use [`from_rows`](Self::from_rows)
    /// when free edges exist.
    pub fn from_zero_absent<R: AsRef<[f64]>>(rows: &[R]) -> Result<Self> {
        Self::from_rows(
            rows.iter()
                .map(|row| {
                    row.as_ref()
                        .iter()
                        .map(|&c| if c == 0.0 { None } else { Some(c) })
                        .collect()
                })
                .collect(),
        )
    }

    /// Number of locations N.
    #[inline]
    pub fn len(&self) -> usize {
        self.n
    }

    /// Always `false`: construction rejects empty matrices.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.n == 0
    }

    /// Cost of the direct edge `from → to`, `None` if absent.
    ///
    /// # Panics
    ///
    /// Panics if either index is `>= len()`.
    #[inline]
    pub fn edge(&self, from: usize, to: usize) -> Option<f64> {
        assert!(from < self.n && to < self.n, "location out of range");
        self.cells[from * self.n + to]
    }

    /// Whether a direct edge `from → to` exists.
    #[inline]
    pub fn has_edge(&self, from: usize, to: usize) -> bool {
        self.edge(from, to).is_some()
    }

    /// Number of present directed edges.
    pub fn edge_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }

    /// Largest present edge cost, `None` if the matrix has no edges.
    pub fn max_cost(&self) -> Option<f64> {
        self.cells.iter().flatten().copied().reduce(f64::max)
    }

    /// Whether `edge(i, j) == edge(j, i)` for every pair.
    pub fn is_symmetric(&self) -> bool {
        (0..self.n).all(|i| (i + 1..self.n).all(|j| self.edge(i, j) == self.edge(j, i)))
    }

    /// Checks that `start` names a location.
    pub fn validate_start(&self, start: usize) -> Result<()> {
        if start >= self.n {
            return Err(TspError::InvalidInput(format!(
                "start location {start} out of range for {} locations",
                self.n
            )));
        }
        Ok(())
    }

    /// Total cost of walking `path` edge by edge.
    ///
    /// Returns `None` if any consecutive pair has no direct edge or an index
    /// is out of range. Paths with fewer than two locations cost `0`.
    ///
    /// Edges are summed from the last to the first, the same association
    /// the DP recurrence uses (`c0 + (c1 + (… + ck))`), so a reconstructed
    /// tour re-costs to exactly the engine's optimum.
    pub fn path_cost(&self, path: &[usize]) -> Option<f64> {
        if path.iter().any(|&p| p >= self.n) {
            return None;
        }
        path.windows(2)
            .rev()
            .try_fold(0.0, |acc, w| self.edge(w[0], w[1]).map(|c| c + acc))
    }

    /// Row view with explicit absence.
    pub fn rows(&self) -> Vec<Vec<Option<f64>>> {
        self.cells.chunks(self.n).map(|r| r.to_vec()).collect()
    }
}

impl TryFrom<Vec<Vec<Option<f64>>>> for CostMatrix {
    type Error = TspError;

    fn try_from(rows: Vec<Vec<Option<f64>>>) -> Result<Self> {
        Self::from_rows(rows)
    }
}

impl From<CostMatrix> for Vec<Vec<Option<f64>>> {
    fn from(matrix: CostMatrix) -> Self {
        matrix.rows()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_rows_ok() {
        let m = CostMatrix::from_rows(vec![
            vec![None, Some(1.0)],
            vec![Some(3.0), None],
        ])
        .unwrap();
        assert_eq!(m.len(), 2);
        assert_eq!(m.edge(0, 1), Some(1.0));
        assert_eq!(m.edge(1, 0), Some(3.0));
        assert!(!m.is_symmetric());
    }

    #[test]
    fn test_empty_rejected() {
        let err = CostMatrix::from_rows(vec![]).unwrap_err();
        assert!(matches!(err, TspError::InvalidInput(_)));
    }

    #[test]
    fn test_non_square_rejected() {
        let err = CostMatrix::from_dense(&[vec![0.0, 1.0], vec![1.0]]).unwrap_err();
        assert!(matches!(err, TspError::InvalidInput(ref m) if m.contains("not square")));
    }

    #[test]
    fn test_wide_rows_rejected() {
        let err = CostMatrix::from_dense(&[vec![0.0, 1.0, 2.0], vec![1.0, 0.0, 2.0]]).unwrap_err();
        assert!(matches!(err, TspError::InvalidInput(_)));
    }

    #[test]
    fn test_negative_cost_rejected() {
        let err = CostMatrix::from_dense(&[[0.0, -1.0], [1.0, 0.0]]).unwrap_err();
        assert!(matches!(err, TspError::InvalidInput(ref m) if m.contains("cost[0][1]")));
    }

    #[test]
    fn test_non_finite_cost_rejected() {
        assert!(CostMatrix::from_dense(&[[0.0, f64::NAN], [1.0, 0.0]]).is_err());
        assert!(CostMatrix::from_dense(&[[0.0, f64::INFINITY], [1.0, 0.0]]).is_err());
    }

    #[test]
    fn test_too_many_locations_rejected() {
        let n = MAX_LOCATIONS + 1;
        let rows = vec![vec![1.0; n]; n];
        let err = CostMatrix::from_dense(&rows).unwrap_err();
        assert!(matches!(err, TspError::InvalidInput(ref m) if m.contains("bitmask")));
    }

    #[test]
    fn test_diagonal_ignored() {
        // A negative self-loop is never validated nor used.
        let m = CostMatrix::from_dense(&[[-5.0, 1.0], [1.0, 7.0]]).unwrap();
        assert_eq!(m.edge(0, 0), None);
        assert_eq!(m.edge(1, 1), None);
        assert_eq!(m.edge_count(), 2);
    }

    #[test]
    fn test_zero_absent() {
        let m = CostMatrix::from_zero_absent(&[[0.0, 4.0, 0.0], [4.0, 0.0, 2.0], [0.0, 2.0, 0.0]])
            .unwrap();
        assert!(m.has_edge(0, 1));
        assert!(!m.has_edge(0, 2));
        assert!(m.is_symmetric());
        assert_eq!(m.max_cost(), Some(4.0));
    }

    #[test]
    fn test_zero_cost_edge_is_an_edge() {
        let m = CostMatrix::from_dense(&[[0.0, 0.0], [0.0, 0.0]]).unwrap();
        assert_eq!(m.edge(0, 1), Some(0.0));
        assert_eq!(m.path_cost(&[0, 1, 0]), Some(0.0));
    }

    #[test]
    fn test_path_cost() {
        let m = CostMatrix::from_dense(&[[0.0, 1.0, 2.0], [1.0, 0.0, 4.0], [2.0, 4.0, 0.0]])
            .unwrap();
        assert_eq!(m.path_cost(&[0, 1, 2, 0]), Some(7.0));
        assert_eq!(m.path_cost(&[0]), Some(0.0));
        assert_eq!(m.path_cost(&[]), Some(0.0));
        assert_eq!(m.path_cost(&[0, 0]), None);
        assert_eq!(m.path_cost(&[0, 3]), None);
    }

    #[test]
    fn test_validate_start() {
        let m = CostMatrix::from_dense(&[[0.0, 1.0], [1.0, 0.0]]).unwrap();
        assert!(m.validate_start(1).is_ok());
        assert!(matches!(
            m.validate_start(2),
            Err(TspError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_rows_round_trip() {
        let rows = vec![
            vec![None, Some(1.5), None],
            vec![None, None, Some(2.5)],
            vec![Some(0.5), None, None],
        ];
        let m = CostMatrix::try_from(rows.clone()).unwrap();
        let back: Vec<Vec<Option<f64>>> = m.into();
        assert_eq!(back, rows);
    }
}
