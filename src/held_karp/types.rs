//! State and result types shared by the table, the runner and reconstruction.

use crate::matrix::MAX_LOCATIONS;

/// A set of visited locations encoded as a bitmask.
///
/// Bit `i` set means location `i` has been visited. Locations are limited
/// to [`MAX_LOCATIONS`], well inside the 32 available bits.
///
/// # Examples
///
/// ```
/// use u_heldkarp::held_karp::VisitedSet;
///
/// let s = VisitedSet::singleton(0).with(3);
/// assert!(s.contains(3));
/// assert_eq!(s.len(), 2);
/// assert_eq!(s.iter().collect::<Vec<_>>(), vec![0, 3]);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct VisitedSet(u32);

impl VisitedSet {
    /// The empty set.
    pub const EMPTY: Self = Self(0);

    /// Wraps raw bits.
    #[inline]
    pub const fn from_bits(bits: u32) -> Self {
        Self(bits)
    }

    /// The set containing only `location`.
    #[inline]
    pub fn singleton(location: usize) -> Self {
        debug_assert!(location < MAX_LOCATIONS);
        Self(1 << location)
    }

    /// The set `{0, …, n-1}`.
    #[inline]
    pub fn full(n: usize) -> Self {
        debug_assert!(n <= MAX_LOCATIONS);
        Self((1u32 << n) - 1)
    }

    /// Raw bits; also the row index of the set in the DP table.
    #[inline]
    pub const fn bits(self) -> u32 {
        self.0
    }

    #[inline]
    pub fn contains(self, location: usize) -> bool {
        self.0 & (1 << location) != 0
    }

    /// This set plus `location`.
    #[inline]
    #[must_use]
    pub fn with(self, location: usize) -> Self {
        Self(self.0 | (1 << location))
    }

    /// Popcount: the number of visited locations.
    #[inline]
    pub fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Visited locations in ascending order.
    pub fn iter(self) -> impl Iterator<Item = usize> {
        let bits = self.0;
        (0..u32::BITS as usize).filter(move |&i| bits & (1 << i) != 0)
    }
}

/// Memoized value of one `(visited, position)` state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StateValue {
    /// Minimum cost to visit every remaining location and return to the
    /// start. `None` means no such completion exists.
    pub cost: Option<f64>,

    /// The next location achieving `cost`.
    ///
    /// `None` for the all-visited base case and for unreachable states.
    pub best_next: Option<usize>,
}

impl StateValue {
    pub(crate) const UNREACHABLE: Self = Self {
        cost: None,
        best_next: None,
    };

    #[inline]
    pub fn is_reachable(&self) -> bool {
        self.cost.is_some()
    }
}

/// A closed optimal tour.
///
/// For N ≥ 2 the tour holds N+1 locations: it starts and ends at the start
/// location and lists every other location exactly once in between. A
/// single-location problem has the trivial tour `[start]` of cost 0.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tour {
    locations: Vec<usize>,
    cost: f64,
}

impl Tour {
    pub(crate) fn new(locations: Vec<usize>, cost: f64) -> Self {
        Self { locations, cost }
    }

    /// Visiting order, 0-based, start repeated at the end.
    pub fn locations(&self) -> &[usize] {
        &self.locations
    }

    /// Visiting order as 1-based location ids.
    pub fn one_based(&self) -> Vec<usize> {
        self.locations.iter().map(|&l| l + 1).collect()
    }

    pub fn start(&self) -> usize {
        self.locations[0]
    }

    /// Sum of the edge costs along the tour.
    pub fn cost(&self) -> f64 {
        self.cost
    }

    /// Number of distinct locations visited.
    pub fn location_count(&self) -> usize {
        self.locations.len().saturating_sub(1).max(1)
    }

    /// Consecutive `(from, to)` pairs of the tour.
    pub fn edges(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.locations.windows(2).map(|w| (w[0], w[1]))
    }
}

/// Final answer of a solve.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TourOutcome {
    /// An optimal Hamiltonian cycle through the start.
    Tour(Tour),

    /// No Hamiltonian cycle covers all locations and returns to the start.
    Unreachable,
}

/// Result of walking the decision table from the start state.
#[derive(Debug, Clone, PartialEq)]
pub enum Reconstruction {
    /// Every location placed and the closing edge back to start exists.
    Closed(Tour),

    /// The walk stopped before closing a cycle.
    ///
    /// `path` holds the locations placed so far and `visited` the
    /// corresponding set; the last element of `path` is where it stopped.
    Open { path: Vec<usize>, visited: VisitedSet },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_visited_set_basics() {
        let s = VisitedSet::singleton(2);
        assert_eq!(s.bits(), 0b100);
        assert!(s.contains(2));
        assert!(!s.contains(0));
        assert_eq!(s.len(), 1);
        assert!(!s.is_empty());
        assert!(VisitedSet::EMPTY.is_empty());
    }

    #[test]
    fn test_visited_set_grows_by_one() {
        let s = VisitedSet::singleton(0).with(1).with(4);
        assert_eq!(s.len(), 3);
        assert_eq!(s.with(4), s);
    }

    #[test]
    fn test_visited_set_full() {
        assert_eq!(VisitedSet::full(1).bits(), 0b1);
        assert_eq!(VisitedSet::full(4).bits(), 0b1111);
        assert_eq!(VisitedSet::full(MAX_LOCATIONS).len(), MAX_LOCATIONS);
    }

    #[test]
    fn test_visited_set_iter() {
        let s = VisitedSet::from_bits(0b10_1001);
        assert_eq!(s.iter().collect::<Vec<_>>(), vec![0, 3, 5]);
    }

    #[test]
    fn test_tour_accessors() {
        let tour = Tour::new(vec![0, 2, 1, 0], 9.0);
        assert_eq!(tour.start(), 0);
        assert_eq!(tour.location_count(), 3);
        assert_eq!(tour.one_based(), vec![1, 3, 2, 1]);
        assert_eq!(tour.edges().collect::<Vec<_>>(), vec![(0, 2), (2, 1), (1, 0)]);
    }

    #[test]
    fn test_trivial_tour() {
        let tour = Tour::new(vec![3], 0.0);
        assert_eq!(tour.location_count(), 1);
        assert_eq!(tour.edges().count(), 0);
    }
}
