//! The DP table and the two strategies that fill it.
//!
//! The value of a state `(visited, pos)` is the cheapest way to visit every
//! location outside `visited`, starting at `pos`, and end back at the start:
//!
//! ```text
//! cost(full, pos)  = edge(pos, start)                       (none if absent)
//! cost(S, pos)     = min over next ∉ S with edge(pos, next):
//!                        edge(pos, next) + cost(S ∪ {next}, next)
//! ```
//!
//! Every state depends only on states with exactly one more visited
//! location, so the dependency graph is a DAG layered by popcount.
//!
//! Every evaluated visited-set contains the start, so rows are indexed by
//! the set with the start bit squeezed out: `2^(N-1)` rows of `N` columns.
//! Each slot is an `f64` cost plus a `u8` decision code; codes at or above
//! `NO_NEXT` mark the base case, unreachable and unevaluated states.

use super::config::{HeldKarpConfig, Strategy};
use super::types::{StateValue, VisitedSet};
use crate::error::{Result, TspError};
use crate::matrix::CostMatrix;
use std::mem::size_of;
use std::sync::atomic::{AtomicBool, Ordering};

/// Bytes one stored state occupies: its cost and its decision code.
pub const BYTES_PER_STATE: usize = size_of::<f64>() + size_of::<u8>();

/// Finite cost without a next location (the all-visited base case).
const NO_NEXT: u8 = u8::MAX - 2;
const UNREACHABLE: u8 = u8::MAX - 1;
const UNEVALUATED: u8 = u8::MAX;

fn slot_count(n: usize) -> usize {
    match n {
        0 => 0,
        n => (1usize << (n - 1)) * n,
    }
}

/// Memory needed by the table of an `n`-location problem.
///
/// ```
/// use u_heldkarp::held_karp::table_bytes;
///
/// // 2^19 rows × 20 columns × 9 bytes
/// assert_eq!(table_bytes(20), 94_371_840);
/// ```
pub fn table_bytes(n: usize) -> usize {
    slot_count(n) * BYTES_PER_STATE
}

/// A vector of `len` copies of `fill`, or [`TspError::TableAllocation`].
fn allocate<T: Clone>(len: usize, fill: T, locations: usize) -> Result<Vec<T>> {
    let mut v = Vec::new();
    v.try_reserve_exact(len)
        .map_err(|_| TspError::TableAllocation {
            locations,
            bytes: table_bytes(locations),
        })?;
    v.resize(len, fill);
    Ok(v)
}

/// Memoized state values and decisions for one start location.
///
/// Built by [`HeldKarpRunner::build_table`](super::HeldKarpRunner::build_table).
/// Values are start-relative through the base case, so a table only answers
/// for the start it was built with.
#[derive(Debug, Clone)]
pub struct DpTable<'m> {
    pub(crate) matrix: &'m CostMatrix,
    pub(crate) start: usize,
    costs: Vec<f64>,
    decisions: Vec<u8>,
    states_evaluated: usize,
}

impl<'m> DpTable<'m> {
    pub(crate) fn build(
        matrix: &'m CostMatrix,
        start: usize,
        config: &HeldKarpConfig,
        cancel: Option<&AtomicBool>,
    ) -> Result<Self> {
        let n = matrix.len();
        let slots = slot_count(n);
        log::debug!(
            "filling held-karp table: n={n}, start={start}, slots={slots}, bytes={}, strategy={:?}",
            table_bytes(n),
            config.strategy
        );
        let mut table = Self {
            matrix,
            start,
            costs: allocate(slots, f64::INFINITY, n)?,
            decisions: allocate(slots, UNEVALUATED, n)?,
            states_evaluated: 0,
        };

        let mut guard = CancelGuard::new(cancel, config.cancel_check_interval);
        guard.check()?;

        match config.strategy {
            Strategy::Recursive => {
                let mut fill = RecursiveFill {
                    table: &mut table,
                    guard: &mut guard,
                };
                fill.visit(VisitedSet::singleton(start), start)?;
                table.states_evaluated = guard.evaluated;
            }
            Strategy::BottomUp => fill_bottom_up(&mut table, config.parallel, &mut guard)?,
        }

        log::debug!(
            "held-karp table filled: {} states evaluated",
            table.states_evaluated
        );
        Ok(table)
    }

    /// The start location this table was built for.
    pub fn start(&self) -> usize {
        self.start
    }

    /// Number of locations N.
    pub fn location_count(&self) -> usize {
        self.matrix.len()
    }

    /// The matrix this table was built over.
    pub fn matrix(&self) -> &'m CostMatrix {
        self.matrix
    }

    /// How many states were evaluated while filling.
    ///
    /// The recursive strategy only touches states reachable from the start
    /// through existing edges; bottom-up evaluates every state whose
    /// visited-set contains the start.
    pub fn states_evaluated(&self) -> usize {
        self.states_evaluated
    }

    /// Memoized value of a state, `None` if it was never evaluated or lies
    /// outside the table (a visited-set without the start included).
    pub fn state(&self, visited: VisitedSet, pos: usize) -> Option<StateValue> {
        let n = self.location_count();
        if pos >= n || (visited.bits() as usize) >> n != 0 || !visited.contains(self.start) {
            return None;
        }
        self.load(self.index(visited, pos))
    }

    /// Minimum completion cost of a state; `None` if unevaluated or
    /// unreachable.
    pub fn min_cost(&self, visited: VisitedSet, pos: usize) -> Option<f64> {
        self.state(visited, pos).and_then(|s| s.cost)
    }

    /// Recorded decision of a state.
    pub fn best_next(&self, visited: VisitedSet, pos: usize) -> Option<usize> {
        self.state(visited, pos).and_then(|s| s.best_next)
    }

    /// Optimal tour cost: the value of `({start}, start)`.
    pub fn total_cost(&self) -> Option<f64> {
        self.min_cost(VisitedSet::singleton(self.start), self.start)
    }

    /// Slot of a state whose visited-set contains the start.
    #[inline]
    fn index(&self, visited: VisitedSet, pos: usize) -> usize {
        let bits = visited.bits() as usize;
        let below = bits & ((1usize << self.start) - 1);
        let above = (bits >> (self.start + 1)) << self.start;
        (below | above) * self.location_count() + pos
    }

    fn load(&self, idx: usize) -> Option<StateValue> {
        match self.decisions[idx] {
            UNEVALUATED => None,
            UNREACHABLE => Some(StateValue::UNREACHABLE),
            NO_NEXT => Some(StateValue {
                cost: Some(self.costs[idx]),
                best_next: None,
            }),
            next => Some(StateValue {
                cost: Some(self.costs[idx]),
                best_next: Some(next as usize),
            }),
        }
    }

    fn store(&mut self, idx: usize, value: StateValue) {
        let (cost, code) = match (value.cost, value.best_next) {
            (None, _) => (f64::INFINITY, UNREACHABLE),
            (Some(cost), None) => (cost, NO_NEXT),
            (Some(cost), Some(next)) => {
                debug_assert!(next < NO_NEXT as usize);
                (cost, next as u8)
            }
        };
        self.costs[idx] = cost;
        self.decisions[idx] = code;
    }
}

/// Evaluates one state from the values of its successors.
///
/// `completion(S ∪ {next}, next)` must return the successor's cost.
/// Candidates are scanned in ascending index and only a strictly cheaper
/// total replaces the incumbent, so the lowest index wins ties.
fn evaluate<F>(
    matrix: &CostMatrix,
    start: usize,
    visited: VisitedSet,
    pos: usize,
    mut completion: F,
) -> Result<StateValue>
where
    F: FnMut(VisitedSet, usize) -> Result<Option<f64>>,
{
    let n = matrix.len();
    if visited == VisitedSet::full(n) {
        // A single location is already a closed tour.
        let cost = if n == 1 {
            Some(0.0)
        } else {
            matrix.edge(pos, start)
        };
        return Ok(StateValue {
            cost,
            best_next: None,
        });
    }

    let mut best: Option<(f64, usize)> = None;
    for next in 0..n {
        if visited.contains(next) {
            continue;
        }
        let Some(step) = matrix.edge(pos, next) else {
            continue;
        };
        if let Some(rest) = completion(visited.with(next), next)? {
            let total = step + rest;
            if best.is_none_or(|(cost, _)| total < cost) {
                best = Some((total, next));
            }
        }
    }

    Ok(match best {
        Some((cost, next)) => StateValue {
            cost: Some(cost),
            best_next: Some(next),
        },
        None => StateValue::UNREACHABLE,
    })
}

/// Counts evaluations and polls the cancellation flag every `interval`.
struct CancelGuard<'c> {
    flag: Option<&'c AtomicBool>,
    interval: usize,
    evaluated: usize,
}

impl<'c> CancelGuard<'c> {
    fn new(flag: Option<&'c AtomicBool>, interval: usize) -> Self {
        Self {
            flag,
            interval: interval.max(1),
            evaluated: 0,
        }
    }

    fn is_raised(&self) -> bool {
        self.flag.is_some_and(|f| f.load(Ordering::Relaxed))
    }

    fn check(&self) -> Result<()> {
        if self.is_raised() {
            return Err(TspError::Cancelled {
                states_evaluated: self.evaluated,
            });
        }
        Ok(())
    }

    fn tick(&mut self, states: usize) -> Result<()> {
        let before = self.evaluated / self.interval;
        self.evaluated += states;
        if self.evaluated / self.interval != before {
            self.check()?;
        }
        Ok(())
    }
}

struct RecursiveFill<'t, 'm, 'g, 'c> {
    table: &'t mut DpTable<'m>,
    guard: &'g mut CancelGuard<'c>,
}

impl RecursiveFill<'_, '_, '_, '_> {
    fn visit(&mut self, visited: VisitedSet, pos: usize) -> Result<Option<f64>> {
        let idx = self.table.index(visited, pos);
        if let Some(value) = self.table.load(idx) {
            return Ok(value.cost);
        }
        self.guard.tick(1)?;

        let matrix = self.table.matrix;
        let start = self.table.start;
        let value = evaluate(matrix, start, visited, pos, |v, p| self.visit(v, p))?;
        self.table.store(idx, value);
        Ok(value.cost)
    }
}

type Row = (VisitedSet, Vec<(usize, StateValue)>);

/// Visited-sets containing `start`, bucketed by popcount.
fn layers_containing(n: usize, start: usize) -> Vec<Vec<VisitedSet>> {
    let mut layers = vec![Vec::new(); n + 1];
    for bits in 0..(1u32 << n) {
        let visited = VisitedSet::from_bits(bits);
        if visited.contains(start) {
            layers[visited.len()].push(visited);
        }
    }
    layers
}

/// Evaluates every state of one visited-set. Successors must be filled.
fn evaluate_row(table: &DpTable<'_>, visited: VisitedSet) -> Result<Vec<(usize, StateValue)>> {
    let start = table.start;
    // Only the start state sits at the start; everywhere else the current
    // position is the last location added.
    let positions: Vec<usize> = if visited == VisitedSet::singleton(start) {
        vec![start]
    } else {
        visited.iter().filter(|&p| p != start).collect()
    };

    positions
        .into_iter()
        .map(|pos| {
            let value = evaluate(table.matrix, start, visited, pos, |v, p| {
                debug_assert!(table.state(v, p).is_some(), "successor not filled");
                Ok(table.min_cost(v, p))
            })?;
            Ok((pos, value))
        })
        .collect()
}

fn fill_bottom_up(table: &mut DpTable<'_>, parallel: bool, guard: &mut CancelGuard<'_>) -> Result<()> {
    let n = table.location_count();
    let layers = layers_containing(n, table.start);

    for size in (1..=n).rev() {
        let sets = &layers[size];
        let rows: Vec<Row> = if parallel {
            evaluate_layer_parallel(table, sets, guard)?
        } else {
            let snapshot: &DpTable<'_> = table;
            let mut rows = Vec::with_capacity(sets.len());
            for &visited in sets {
                let row = evaluate_row(snapshot, visited)?;
                guard.tick(row.len())?;
                rows.push((visited, row));
            }
            rows
        };

        let mut written = 0;
        for (visited, row) in rows {
            for (pos, value) in row {
                let idx = table.index(visited, pos);
                table.store(idx, value);
                written += 1;
            }
        }
        table.states_evaluated += written;
        log::trace!("layer {size}: {} visited-sets, {written} states", sets.len());
    }
    Ok(())
}

#[cfg(feature = "parallel")]
fn evaluate_layer_parallel(
    table: &DpTable<'_>,
    sets: &[VisitedSet],
    guard: &mut CancelGuard<'_>,
) -> Result<Vec<Row>> {
    use rayon::prelude::*;

    let flag = guard.flag;
    let done = guard.evaluated;
    let rows: Vec<Row> = sets
        .par_iter()
        .map(|&visited| {
            if flag.is_some_and(|f| f.load(Ordering::Relaxed)) {
                return Err(TspError::Cancelled {
                    states_evaluated: done,
                });
            }
            Ok((visited, evaluate_row(table, visited)?))
        })
        .collect::<Result<_>>()?;

    guard.evaluated += rows.iter().map(|(_, row)| row.len()).sum::<usize>();
    Ok(rows)
}

#[cfg(not(feature = "parallel"))]
fn evaluate_layer_parallel(
    _table: &DpTable<'_>,
    _sets: &[VisitedSet],
    _guard: &mut CancelGuard<'_>,
) -> Result<Vec<Row>> {
    Err(TspError::InvalidConfig(
        "parallel evaluation requires the `parallel` feature".into(),
    ))
}
