//! The parallel driver: an Or-parallel pool of search workers, each
//! optionally using an And-parallel helper pool within its own fixpoint
//! sweeps.
//!
//! Grounded in `xgillard-ddo`'s `ParallelSolver`: a pool of workers
//! pulling work from a shared counter under `std::thread::scope`,
//! synchronizing only through a small set of atomics and one mutex.
//! Unlike `ddo`, workers here pull a deterministic subproblem index
//! rather than popping from a shared priority fringe, so no
//! fringe/condvar is needed.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

use rayon::prelude::*;

use crate::constraints::{run_fixpoint, Propagators};
use crate::core::{DriverResult, Statistics};
use crate::model::Problem;
use crate::search::{search_subtree, SharedState};
use crate::solver::config::DriverConfig;
use crate::variables::{VStore, VarId};

/// Applies the first `power` branching decisions encoded by `index`'s
/// low bits to a clone of `root`, before any propagation has run.
/// Bit `k` selects the right half of the `k`-th branching variable's
/// domain when set, the left half otherwise — the same split formula
/// `search::tree` uses mid-search. Running out of branching variables
/// before `power` bits are consumed is not an error: later bits are
/// simply no-ops.
fn apply_subproblem_prefix(root: &VStore, branching_vars: &[VarId], power: u32, index: u64) -> VStore {
    let mut store = root.clone();
    for (bit, &v) in branching_vars.iter().enumerate().take(power as usize) {
        let dom = store.dom(v);
        if dom.is_assigned() {
            continue;
        }
        let width = dom.width();
        let left_ub = dom.lb + (width / 2) - 1;
        let take_right = (index >> bit) & 1 == 1;
        if take_right {
            let _ = store.update_lb(v, left_ub + 1);
        } else {
            let _ = store.update_ub(v, left_ub);
        }
    }
    store
}

/// Partitions `propagators` into `helpers` contiguous chunks and
/// propagates each chunk against its own clone of `store`, then folds
/// every clone back together with [`VStore::join`]. Because narrowing
/// is monotone, the folded result is independent of helper count and
/// scheduling order — no atomic-CAS-per-bound scheme is needed to keep
/// helpers from stepping on each other.
fn parallel_sweep(store: &VStore, propagators: &Propagators, helpers: usize) -> VStore {
    let items = propagators.as_slice();
    if helpers <= 1 || items.len() <= 1 {
        let mut local = store.clone();
        for p in items {
            if local.is_top() {
                break;
            }
            let _ = p.propagate(&mut local);
        }
        return local;
    }

    let chunk_size = items.len().div_ceil(helpers).max(1);
    items
        .par_chunks(chunk_size)
        .map(|chunk| {
            let mut local = store.clone();
            for p in chunk {
                if local.is_top() {
                    break;
                }
                let _ = p.propagate(&mut local);
            }
            local
        })
        .reduce(|| store.clone(), |a, b| a.join(&b))
}

/// Runs `propagators` to a fixpoint, using `helpers` And-parallel
/// workers per sweep when `helpers > 1`. Returns the number of sweeps.
fn run_fixpoint_with_helpers(store: &mut VStore, propagators: &Propagators, helpers: usize) -> u64 {
    if helpers <= 1 {
        return run_fixpoint(store, propagators) as u64;
    }
    let mut sweeps: u64 = 0;
    loop {
        sweeps += 1;
        let folded = parallel_sweep(store, propagators, helpers);
        let changed = folded != *store;
        *store = folded;
        if store.is_top() || !changed {
            break;
        }
    }
    sweeps
}

/// Solves `problem` under `config`, distributing the root decomposition
/// across `config.or_nodes` workers.
#[must_use]
pub fn solve(problem: &Problem, config: &DriverConfig) -> DriverResult {
    // A root that is already top needs no decomposition: splitting an
    // empty domain just produces duplicate copies of the same empty
    // domain, one per subproblem, inflating the node count for no
    // reason. One root node visited, no solutions, done.
    if problem.store.is_top() {
        let mut statistics = Statistics::new();
        statistics.nodes = 1;
        statistics.fails = 1;
        return DriverResult {
            exhaustive: true,
            solutions_count: 0,
            best_solution: None,
            best_objective_value: None,
            statistics,
        };
    }

    // A decomposition bit with no corresponding branching variable would
    // make every index beyond 2^actual_power collide with an
    // already-enumerated subproblem, double-counting its solutions.
    // Clamping the depth to the number of branching variables keeps
    // every subproblem region disjoint.
    let actual_power = config.subproblems_power.min(problem.branching_vars.len() as u32).min(63);
    let total_subproblems: u64 = 1u64 << actual_power;
    let next_index = AtomicU64::new(0);
    let shared = SharedState::new();
    let start = Instant::now();
    let deadline = (config.timeout_ms > 0).then(|| Duration::from_millis(config.timeout_ms));

    let worker_stats: Vec<(Statistics, Option<crate::core::Solution>)> = std::thread::scope(|scope| {
        let handles: Vec<_> = (0..config.or_nodes)
            .map(|_| {
                scope.spawn(|| {
                    let mut local_stats = Statistics::new();
                    let mut local_solution = None;
                    loop {
                        if shared.should_stop() {
                            break;
                        }
                        if let Some(budget) = deadline {
                            if start.elapsed() >= budget {
                                shared.request_stop();
                                break;
                            }
                        }
                        let index = next_index.fetch_add(1, Ordering::Relaxed);
                        if index >= total_subproblems {
                            break;
                        }
                        let subproblem =
                            apply_subproblem_prefix(&problem.store, &problem.branching_vars, actual_power, index);
                        let (stats, solution) = search_subtree(
                            subproblem,
                            &problem.branching_vars,
                            problem.minimize_var,
                            config.free_search,
                            config.stop_after_n_solutions,
                            config.stop_after_n_nodes,
                            &shared,
                            |s| run_fixpoint_with_helpers(s, &problem.propagators, config.and_nodes),
                        );
                        local_stats = local_stats.join(stats);
                        if solution.is_some() {
                            local_solution = solution;
                        }
                        if config.print_intermediate_solutions {
                            if let Some(value) = shared.best_value() {
                                tracing::info!(value, "improving solution");
                            }
                        }
                    }
                    (local_stats, local_solution)
                })
            })
            .collect();
        handles.into_iter().map(|h| h.join().expect("worker thread panicked")).collect()
    });

    let statistics = worker_stats
        .iter()
        .map(|(s, _)| *s)
        .fold(Statistics::new(), Statistics::join);

    let (best_solution, best_objective_value) = if problem.minimize_var.is_some() {
        (shared.best_solution(), shared.best_value())
    } else {
        let any = worker_stats.into_iter().find_map(|(_, sol)| sol);
        (any, None)
    };

    DriverResult {
        exhaustive: statistics.exhaustive,
        solutions_count: statistics.solutions,
        best_solution,
        best_objective_value,
        statistics,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Builder, Op};

    fn trivial_sat_problem() -> Problem {
        let mut b = Builder::new();
        let x = b.add_var("x", 0, 2).unwrap();
        let y = b.add_var("y", 0, 2).unwrap();
        b.add_temporal_constraint(x, 1, Op::Le, y).unwrap();
        b.build().unwrap()
    }

    #[test]
    fn trivial_sat_finds_three_solutions() {
        let problem = trivial_sat_problem();
        let config = DriverConfig::new();
        let result = solve(&problem, &config);
        assert_eq!(result.solutions_count, 3);
        assert!(result.exhaustive);
    }

    #[test]
    fn linear_unsat_root_detected_without_branching() {
        let mut b = Builder::new();
        let x = b.add_var("x", 5, 10).unwrap();
        b.strengthen_domain("x", Op::Le, 4).unwrap();
        let _ = x;
        let problem = b.build().unwrap();
        let result = solve(&problem, &DriverConfig::new());
        assert_eq!(result.solutions_count, 0);
        assert!(result.exhaustive);
        assert_eq!(result.statistics.nodes, 1, "the root itself counts as a visited node");
    }

    #[test]
    fn minimization_finds_the_true_optimum() {
        let mut b = Builder::new();
        let x = b.add_var("x", 0, 10).unwrap();
        let y = b.add_var("y", 0, 10).unwrap();
        b.add_temporal_constraint(x, 1, Op::Le, y).unwrap();
        b.set_objective_minimize("y").unwrap();
        let _ = x;
        let problem = b.build().unwrap();
        let result = solve(&problem, &DriverConfig::new());
        assert_eq!(result.best_objective_value, Some(1));
        assert_eq!(result.best_solution.unwrap().value(y), 1);
    }

    #[test]
    fn determinism_holds_across_worker_counts() {
        let problem = trivial_sat_problem();
        let r1 = solve(&problem, &DriverConfig::new().with_or_nodes(1));
        let r4 = solve(&problem, &DriverConfig::new().with_or_nodes(4));
        let r16 = solve(&problem, &DriverConfig::new().with_or_nodes(16));
        assert_eq!(r1.solutions_count, r4.solutions_count);
        assert_eq!(r4.solutions_count, r16.solutions_count);
        assert_eq!(r1.statistics.depth_max, r4.statistics.depth_max);
        assert_eq!(r4.statistics.depth_max, r16.statistics.depth_max);
    }

    #[test]
    fn and_parallel_helpers_agree_with_sequential_fixpoint() {
        let problem = trivial_sat_problem();
        let sequential = solve(&problem, &DriverConfig::new().with_and_nodes(1));
        let parallel = solve(&problem, &DriverConfig::new().with_and_nodes(3));
        assert_eq!(sequential.solutions_count, parallel.solutions_count);
    }
}
