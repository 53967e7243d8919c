//! Search statistics and their associative, commutative join.

/// Per-worker (or globally joined) search counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Statistics {
    /// Search nodes visited (branch points entered).
    pub nodes: u64,
    /// Nodes that failed (store reached top).
    pub fails: u64,
    /// Solutions found.
    pub solutions: u64,
    /// Deepest branching depth reached.
    pub depth_max: u64,
    /// Fixpoint sweeps performed across the whole search.
    pub fixpoint_iterations: u64,
    /// The best objective value found so far, if minimizing.
    pub best_bound: Option<i64>,
    /// `true` if the search completed without being cut short by a
    /// node, solution, or time budget.
    pub exhaustive: bool,
}

impl Statistics {
    /// The zero-valued, exhaustive-by-default statistics record: the
    /// identity element for [`Statistics::join`].
    #[must_use]
    pub const fn new() -> Self {
        Self {
            nodes: 0,
            fails: 0,
            solutions: 0,
            depth_max: 0,
            fixpoint_iterations: 0,
            best_bound: None,
            exhaustive: true,
        }
    }

    /// Combines two workers' statistics. Associative and commutative:
    /// counts sum, `depth_max` takes the max, `best_bound` takes the
    /// lesser of the two (absent is the identity), and `exhaustive` is
    /// the logical AND of both sides.
    #[must_use]
    pub fn join(self, other: Self) -> Self {
        let best_bound = match (self.best_bound, other.best_bound) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (Some(a), None) | (None, Some(a)) => Some(a),
            (None, None) => None,
        };
        Self {
            nodes: self.nodes + other.nodes,
            fails: self.fails + other.fails,
            solutions: self.solutions + other.solutions,
            depth_max: self.depth_max.max(other.depth_max),
            fixpoint_iterations: self.fixpoint_iterations + other.fixpoint_iterations,
            best_bound,
            exhaustive: self.exhaustive && other.exhaustive,
        }
    }
}
