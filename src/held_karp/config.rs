//! Held-Karp engine configuration.

use crate::error::{Result, TspError};
use crate::matrix::MAX_LOCATIONS;

/// Order in which DP states are evaluated.
///
/// Both strategies run the same recurrence with the same tie-breaking, so
/// every state they both evaluate gets the same value and decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Strategy {
    /// Memoized recursion from `({start}, start)`.
    ///
    /// Only evaluates states reachable through existing edges. Call-stack
    /// depth is bounded by N.
    Recursive,

    /// Iterative fill by popcount layer, from the full set down to `{start}`.
    ///
    /// Evaluates every state whose visited-set contains the start. No
    /// recursion; each layer only reads the layer above it, which is what
    /// allows parallel evaluation.
    #[default]
    BottomUp,
}

/// Configuration for the Held-Karp engine.
///
/// # Examples
///
/// ```
/// use u_heldkarp::held_karp::{HeldKarpConfig, Strategy};
///
/// let config = HeldKarpConfig::default()
///     .with_strategy(Strategy::Recursive)
///     .with_max_locations(16);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HeldKarpConfig {
    /// State evaluation order.
    pub strategy: Strategy,

    /// Evaluate each popcount layer with rayon.
    ///
    /// Requires the `parallel` feature and [`Strategy::BottomUp`].
    pub parallel: bool,

    /// Largest accepted problem size, effectively a memory budget.
    ///
    /// The table holds `2^(N-1) × N` states of
    /// [`BYTES_PER_STATE`](super::BYTES_PER_STATE) bytes each: about 94 MB
    /// at the default of 20, about 3.8 GB at the hard limit of 25. See
    /// [`table_bytes`](super::table_bytes).
    pub max_locations: usize,

    /// Number of state evaluations between cancellation checks.
    pub cancel_check_interval: usize,
}

impl Default for HeldKarpConfig {
    fn default() -> Self {
        Self {
            strategy: Strategy::default(),
            parallel: false,
            max_locations: 20,
            cancel_check_interval: 1024,
        }
    }
}

impl HeldKarpConfig {
    pub fn with_strategy(mut self, strategy: Strategy) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn with_max_locations(mut self, n: usize) -> Self {
        self.max_locations = n;
        self
    }

    pub fn with_cancel_check_interval(mut self, n: usize) -> Self {
        self.cancel_check_interval = n;
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.max_locations == 0 || self.max_locations > MAX_LOCATIONS {
            return Err(TspError::InvalidConfig(format!(
                "max_locations must be in 1..={MAX_LOCATIONS}, got {}",
                self.max_locations
            )));
        }
        if self.cancel_check_interval == 0 {
            return Err(TspError::InvalidConfig(
                "cancel_check_interval must be positive".into(),
            ));
        }
        if self.parallel {
            if self.strategy != Strategy::BottomUp {
                return Err(TspError::InvalidConfig(
                    "parallel evaluation requires the bottom-up strategy".into(),
                ));
            }
            if !cfg!(feature = "parallel") {
                return Err(TspError::InvalidConfig(
                    "parallel evaluation requires the `parallel` feature".into(),
                ));
            }
        }
        Ok(())
    }
}
