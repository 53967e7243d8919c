//! Solution snapshots and the driver's overall result surface.

use crate::core::stats::Statistics;
use crate::variables::VStore;

/// A single found solution: a snapshot of the store at the moment every
/// branching variable was assigned.
#[derive(Debug, Clone)]
pub struct Solution {
    store: VStore,
}

impl Solution {
    /// Wraps a fully-assigned store as a solution snapshot.
    #[must_use]
    pub const fn new(store: VStore) -> Self {
        Self { store }
    }

    /// Reads the assigned value of `v` from this solution.
    ///
    /// # Panics
    ///
    /// Panics if `v`'s domain in this snapshot is not a single value —
    /// which would mean this `Solution` was constructed from a
    /// non-leaf store, an internal invariant violation.
    #[must_use]
    pub fn value(&self, v: crate::variables::VarId) -> i64 {
        let d = self.store.dom(v);
        assert!(
            d.is_assigned(),
            "Solution::value called on an unassigned variable"
        );
        d.lb
    }

    /// The underlying store, for callers that need more than a single
    /// value (e.g. re-checking entailment of a propagator post hoc).
    #[must_use]
    pub const fn store(&self) -> &VStore {
        &self.store
    }
}

/// What the driver returns once every worker has finished (or the
/// search was cut short by a budget).
#[derive(Debug, Clone)]
pub struct DriverResult {
    /// `true` if no worker's subtree was cut short by a budget.
    pub exhaustive: bool,
    /// How many solutions were found in total.
    pub solutions_count: u64,
    /// The best solution found, if any (lowest objective value when
    /// minimizing; otherwise the last one found).
    pub best_solution: Option<Solution>,
    /// The best objective value found, if an objective was set.
    pub best_objective_value: Option<i64>,
    /// Combined statistics across every worker.
    pub statistics: Statistics,
}
