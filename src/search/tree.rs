//! The explicit-stack depth-first branch-and-bound search tree.
//!
//! One call to [`search_subtree`] explores exactly one worker's share of
//! the problem (see `solver::driver` for how subproblems are carved
//! out). The fixpoint strategy is injected as a closure rather than
//! called directly from here, so this module stays agnostic of whether
//! propagation within a worker is sequential or And-parallel (that
//! choice lives in `solver::driver`).

use std::sync::atomic::{AtomicBool, AtomicI64, AtomicU64, Ordering};

use parking_lot::Mutex;
use tracing::trace;

use crate::core::{Solution, Statistics};
use crate::search::branch;
use crate::variables::{VarId, VStore, DOM_MAX};

/// State shared by every worker exploring the same problem: the
/// monotonically-tightening objective bound, the best solution found so
/// far, and the global stop/solution/node counters used to enforce
/// driver-wide budgets.
#[derive(Debug)]
pub struct SharedState {
    best_ub: AtomicI64,
    best_store: Mutex<Option<Solution>>,
    stop: AtomicBool,
    solutions_total: AtomicU64,
    nodes_total: AtomicU64,
}

/// Sentinel meaning "no solution has been published yet".
const NO_BOUND: i64 = DOM_MAX + 1;

impl SharedState {
    /// A fresh shared state with no published bound or solution.
    #[must_use]
    pub fn new() -> Self {
        Self {
            best_ub: AtomicI64::new(NO_BOUND),
            best_store: Mutex::new(None),
            stop: AtomicBool::new(false),
            solutions_total: AtomicU64::new(0),
            nodes_total: AtomicU64::new(0),
        }
    }

    /// Requests every worker to stop at its next check.
    pub fn request_stop(&self) {
        self.stop.store(true, Ordering::Relaxed);
    }

    /// `true` once a stop has been requested.
    #[must_use]
    pub fn should_stop(&self) -> bool {
        self.stop.load(Ordering::Relaxed)
    }

    /// The best objective value published so far, if any.
    #[must_use]
    pub fn best_value(&self) -> Option<i64> {
        let v = self.best_ub.load(Ordering::Acquire);
        (v <= DOM_MAX).then_some(v)
    }

    /// The solution snapshot matching [`SharedState::best_value`].
    #[must_use]
    pub fn best_solution(&self) -> Option<Solution> {
        self.best_store.lock().clone()
    }

    /// Total solutions found across every worker so far.
    #[must_use]
    pub fn solutions_total(&self) -> u64 {
        self.solutions_total.load(Ordering::Relaxed)
    }

    /// Total nodes visited across every worker so far.
    #[must_use]
    pub fn nodes_total(&self) -> u64 {
        self.nodes_total.load(Ordering::Relaxed)
    }

    /// Publishes `candidate` as the new best bound iff it strictly
    /// improves on the current one. CAS loop: retries under
    /// contention, gives up if another worker already published
    /// something at least as good.
    fn try_publish_bound(&self, candidate: i64) -> bool {
        loop {
            let current = self.best_ub.load(Ordering::Acquire);
            if candidate >= current {
                return false;
            }
            if self
                .best_ub
                .compare_exchange_weak(current, candidate, Ordering::AcqRel, Ordering::Acquire)
                .is_ok()
            {
                return true;
            }
        }
    }
}

impl Default for SharedState {
    fn default() -> Self {
        Self::new()
    }
}

fn apply_shared_bound(store: &mut VStore, minimize_var: Option<VarId>, shared: &SharedState) {
    if let Some(obj) = minimize_var {
        if let Some(bound) = shared.best_value() {
            let _ = store.update_ub(obj, bound - 1);
        }
    }
}

/// Runs one worker's branch-and-bound search starting from
/// `initial_store`, which already has any subproblem-decomposition
/// prefix applied.
///
/// `run_fixpoint` is called once per node before the top/leaf checks; it
/// must narrow `store` to a fixpoint and return the number of sweeps it
/// performed (folded into the returned statistics).
///
/// When `minimize_var` is `None` this is a plain satisfying search: the
/// returned `Solution` (if any) is simply the last one this worker
/// found. When `minimize_var` is `Some`, improving solutions are
/// published to `shared` instead, and the returned `Solution` is always
/// `None` — callers should read [`SharedState::best_solution`].
pub fn search_subtree(
    initial_store: VStore,
    branching_vars: &[VarId],
    minimize_var: Option<VarId>,
    free_search: bool,
    stop_after_n_solutions: u64,
    stop_after_n_nodes: u64,
    shared: &SharedState,
    mut run_fixpoint: impl FnMut(&mut VStore) -> u64,
) -> (Statistics, Option<Solution>) {
    let mut stats = Statistics::new();
    let mut last_solution: Option<Solution> = None;
    let mut current = initial_store;
    let mut depth: u64 = 0;
    let mut stack: Vec<(VStore, u64)> = Vec::new();

    loop {
        if shared.should_stop() {
            stats.exhaustive = false;
            break;
        }

        let total_nodes = shared.nodes_total.fetch_add(1, Ordering::Relaxed) + 1;
        stats.nodes += 1;
        if stop_after_n_nodes != 0 && total_nodes >= stop_after_n_nodes {
            stats.exhaustive = false;
            shared.request_stop();
            break;
        }

        apply_shared_bound(&mut current, minimize_var, shared);
        stats.fixpoint_iterations += run_fixpoint(&mut current);

        if current.is_top() {
            stats.fails += 1;
            trace!(depth, "backtrack: top reached");
            match stack.pop() {
                Some((next, next_depth)) => {
                    current = next;
                    depth = next_depth;
                    continue;
                }
                None => break,
            }
        }

        if branch::all_assigned(&current, branching_vars) {
            stats.solutions += 1;
            let total_solutions = shared.solutions_total.fetch_add(1, Ordering::Relaxed) + 1;
            trace!(depth, total_solutions, "solution found");

            if let Some(obj) = minimize_var {
                let value = current.dom(obj).lb;
                stats.best_bound = Some(stats.best_bound.map_or(value, |b| b.min(value)));
                if shared.try_publish_bound(value) {
                    *shared.best_store.lock() = Some(Solution::new(current.clone()));
                }
            } else {
                last_solution = Some(Solution::new(current.clone()));
            }

            if stop_after_n_solutions != 0 && total_solutions >= stop_after_n_solutions {
                stats.exhaustive = false;
                shared.request_stop();
                break;
            }

            match stack.pop() {
                Some((next, next_depth)) => {
                    current = next;
                    depth = next_depth;
                    continue;
                }
                None => break,
            }
        }

        let Some(v) = branch::select(&current, branching_vars, free_search) else {
            stats.fails += 1;
            match stack.pop() {
                Some((next, next_depth)) => {
                    current = next;
                    depth = next_depth;
                    continue;
                }
                None => break,
            }
        };

        let new_depth = depth + 1;
        stats.depth_max = stats.depth_max.max(new_depth);

        let dom = current.dom(v);
        let left_ub = dom.lb + (dom.width() / 2) - 1;
        let mut right = current.clone();
        let _ = right.update_lb(v, left_ub + 1);
        stack.push((right, new_depth));
        let _ = current.update_ub(v, left_ub);
        depth = new_depth;
    }

    (stats, last_solution)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constraints::{run_fixpoint, Propagator, Propagators, Temporal};
    use crate::variables::Interval;

    fn fixpoint_of(propagators: &Propagators) -> impl FnMut(&mut VStore) -> u64 + '_ {
        move |store: &mut VStore| run_fixpoint(store, propagators) as u64
    }

    #[test]
    fn enumerates_all_satisfying_assignments() {
        let mut store = VStore::new(3);
        store.set_dom(1, Interval::new(0, 2));
        store.set_dom(2, Interval::new(0, 2));
        let mut props = Propagators::new();
        let _ = props.push(Propagator::Temporal(Temporal::new(1, 1, 2)));
        let shared = SharedState::new();
        let (stats, _) = search_subtree(store, &[1, 2], None, false, 0, 0, &shared, fixpoint_of(&props));
        assert_eq!(stats.solutions, 3);
        assert!(stats.exhaustive);
    }

    #[test]
    fn root_contradiction_fails_without_branching() {
        let mut store = VStore::new(2);
        store.set_dom(1, Interval::new(5, 5));
        let _ = store.update_ub(1, 4);
        let props = Propagators::new();
        let shared = SharedState::new();
        let (stats, sol) = search_subtree(store, &[1], None, false, 0, 0, &shared, fixpoint_of(&props));
        assert_eq!(stats.solutions, 0);
        assert_eq!(stats.nodes, 1, "the root itself counts as a visited node");
        assert!(sol.is_none());
    }

    #[test]
    fn minimization_converges_on_the_true_optimum() {
        let mut store = VStore::new(3);
        store.set_dom(1, Interval::new(0, 10));
        store.set_dom(2, Interval::new(0, 10));
        let mut props = Propagators::new();
        let _ = props.push(Propagator::Temporal(Temporal::new(1, 1, 2)));
        let shared = SharedState::new();
        let (_stats, _) = search_subtree(store, &[1, 2], Some(2), false, 0, 0, &shared, fixpoint_of(&props));
        assert_eq!(shared.best_value(), Some(1));
        assert_eq!(shared.best_solution().unwrap().value(2), 1);
    }

    #[test]
    fn stop_after_n_solutions_cuts_search_short() {
        let mut store = VStore::new(3);
        store.set_dom(1, Interval::new(0, 2));
        store.set_dom(2, Interval::new(0, 2));
        let mut props = Propagators::new();
        let _ = props.push(Propagator::Temporal(Temporal::new(1, 1, 2)));
        let shared = SharedState::new();
        let (stats, _) = search_subtree(store, &[1, 2], None, false, 1, 0, &shared, fixpoint_of(&props));
        assert_eq!(stats.solutions, 1);
        assert!(!stats.exhaustive);
    }
}
