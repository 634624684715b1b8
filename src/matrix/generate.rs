//! Seeded random instance generators.
//!
//! All costs are whole numbers in `1..=max_cost` stored as `f64`, so every
//! tour sum is exact and strategies can be compared with `==`.

use super::cost::CostMatrix;
use crate::error::{Result, TspError};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn check_params(n: usize, max_cost: u32) -> Result<()> {
    if n == 0 {
        return Err(TspError::InvalidInput("n must be positive".into()));
    }
    if max_cost == 0 {
        return Err(TspError::InvalidInput("max_cost must be positive".into()));
    }
    Ok(())
}

/// Complete directed graph with independent costs on every edge.
pub fn random_complete(n: usize, max_cost: u32, seed: u64) -> Result<CostMatrix> {
    check_params(n, max_cost)?;
    let mut rng = StdRng::seed_from_u64(seed);
    let rows: Vec<Vec<Option<f64>>> = (0..n)
        .map(|i| {
            (0..n)
                .map(|j| (i != j).then(|| rng.random_range(1..=max_cost) as f64))
                .collect()
        })
        .collect();
    CostMatrix::from_rows(rows)
}

/// Complete undirected graph: `edge(i, j) == edge(j, i)`.
pub fn random_symmetric(n: usize, max_cost: u32, seed: u64) -> Result<CostMatrix> {
    check_params(n, max_cost)?;
    let mut rng = StdRng::seed_from_u64(seed);
    let mut rows = vec![vec![None; n]; n];
    for i in 0..n {
        for j in i + 1..n {
            let c = rng.random_range(1..=max_cost) as f64;
            rows[i][j] = Some(c);
            rows[j][i] = Some(c);
        }
    }
    CostMatrix::from_rows(rows)
}

/// Directed graph keeping each edge with probability `edge_probability`.
///
/// Sparse graphs frequently have no Hamiltonian cycle at all, which is
/// what makes them useful for exercising the unreachable outcome.
pub fn random_sparse(
    n: usize,
    max_cost: u32,
    edge_probability: f64,
    seed: u64,
) -> Result<CostMatrix> {
    check_params(n, max_cost)?;
    if !(0.0..=1.0).contains(&edge_probability) {
        return Err(TspError::InvalidInput(format!(
            "edge_probability must be in [0, 1], got {edge_probability}"
        )));
    }
    let mut rng = StdRng::seed_from_u64(seed);
    let rows: Vec<Vec<Option<f64>>> = (0..n)
        .map(|i| {
            (0..n)
                .map(|j| {
                    if i != j && rng.random_bool(edge_probability) {
                        Some(rng.random_range(1..=max_cost) as f64)
                    } else {
                        None
                    }
                })
                .collect()
        })
        .collect();
    CostMatrix::from_rows(rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_complete_is_complete() {
        let m = random_complete(6, 50, 7).unwrap();
        assert_eq!(m.edge_count(), 30);
        for i in 0..6 {
            for j in 0..6 {
                if let Some(c) = m.edge(i, j) {
                    assert!((1.0..=50.0).contains(&c));
                    assert_eq!(c.fract(), 0.0);
                }
            }
        }
    }

    #[test]
    fn test_same_seed_same_matrix() {
        assert_eq!(
            random_complete(5, 100, 42).unwrap(),
            random_complete(5, 100, 42).unwrap()
        );
    }

    #[test]
    fn test_symmetric() {
        assert!(random_symmetric(7, 20, 3).unwrap().is_symmetric());
    }

    #[test]
    fn test_sparse_extremes() {
        assert_eq!(random_sparse(5, 10, 0.0, 1).unwrap().edge_count(), 0);
        assert_eq!(random_sparse(5, 10, 1.0, 1).unwrap().edge_count(), 20);
    }

    #[test]
    fn test_bad_params() {
        assert!(random_complete(0, 10, 1).is_err());
        assert!(random_complete(3, 0, 1).is_err());
        assert!(random_sparse(3, 10, 1.5, 1).is_err());
    }
}
