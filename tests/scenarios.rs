//! End-to-end scenarios exercising the builder, propagators, search, and
//! parallel driver together.

use parabb::prelude::*;

#[test]
fn trivial_sat_enumerates_all_three_solutions() {
    let mut builder = Builder::new();
    let x = builder.add_var("x", 0, 2).unwrap();
    let y = builder.add_var("y", 0, 2).unwrap();
    builder.add_temporal_constraint(x, 1, Op::Le, y).unwrap();

    let problem = builder.build().unwrap();
    let result = parabb::solve(&problem, &DriverConfig::new());

    assert_eq!(result.solutions_count, 3);
    assert!(result.exhaustive);
}

#[test]
fn linear_unsat_root_is_detected_without_branching() {
    let mut builder = Builder::new();
    builder.add_var("x", 5, 10).unwrap();
    builder.strengthen_domain("x", Op::Le, 4).unwrap();

    let problem = builder.build().unwrap();
    assert!(problem.store.is_top());

    let result = parabb::solve(&problem, &DriverConfig::new());
    assert_eq!(result.solutions_count, 0);
    assert!(result.exhaustive);
    assert_eq!(result.statistics.nodes, 1, "the root itself counts as a visited node");
}

#[test]
fn minimization_finds_y_equal_one() {
    let mut builder = Builder::new();
    let x = builder.add_var("x", 0, 10).unwrap();
    let y = builder.add_var("y", 0, 10).unwrap();
    builder.add_temporal_constraint(x, 1, Op::Le, y).unwrap();
    builder.set_objective_minimize("y").unwrap();

    let problem = builder.build().unwrap();
    let result = parabb::solve(&problem, &DriverConfig::new());

    assert_eq!(result.best_objective_value, Some(1));
    let solution = result.best_solution.expect("a solution must exist");
    assert_eq!(solution.value(y), 1);
    assert_eq!(solution.value(x), 0);
}

#[test]
fn reified_guard_tracks_both_conjuncts() {
    let mut builder = Builder::new();
    let b = builder.add_var("b", 0, 1).unwrap();
    let x = builder.add_var("x", 0, 5).unwrap();
    let y = builder.add_var("y", 0, 5).unwrap();
    // b <=> (x <= y - 1 AND y <= x + 3)
    builder
        .add_reified_constraint(b, x, 1, Op::Le, y, y, -3, Op::Le, x)
        .unwrap();
    builder.strengthen_domain("x", Op::Eq, 2).unwrap();
    builder.strengthen_domain("y", Op::Eq, 4).unwrap();

    let problem = builder.build().unwrap();
    let result = parabb::solve(&problem, &DriverConfig::new().with_subproblems_power(0));

    // x=2, y=4: 2 <= 3 holds and 4 <= 5 holds, so b is forced to 1.
    assert_eq!(result.solutions_count, 1);
    let solution = result.best_solution.expect("propagation should pin b");
    assert_eq!(solution.value(b), 1);
}

#[test]
fn reified_guard_forces_false_when_a_conjunct_fails() {
    let mut builder = Builder::new();
    let b = builder.add_var("b", 0, 1).unwrap();
    let x = builder.add_var("x", 0, 5).unwrap();
    let y = builder.add_var("y", 0, 5).unwrap();
    builder
        .add_reified_constraint(b, x, 1, Op::Le, y, y, -3, Op::Le, x)
        .unwrap();
    builder.strengthen_domain("x", Op::Eq, 3).unwrap();
    builder.strengthen_domain("y", Op::Eq, 3).unwrap();

    let problem = builder.build().unwrap();
    let result = parabb::solve(&problem, &DriverConfig::new().with_subproblems_power(0));

    // x=3, y=3: x <= y - 1 is 3 <= 2, false, so b is forced to 0.
    assert_eq!(result.solutions_count, 1);
    let solution = result.best_solution.expect("propagation should pin b");
    assert_eq!(solution.value(b), 0);
}

#[test]
fn solution_count_is_deterministic_across_worker_counts() {
    let mut builder = Builder::new();
    let x = builder.add_var("x", 0, 2).unwrap();
    let y = builder.add_var("y", 0, 2).unwrap();
    builder.add_temporal_constraint(x, 1, Op::Le, y).unwrap();
    let problem = builder.build().unwrap();

    let one_worker = parabb::solve(&problem, &DriverConfig::new().with_or_nodes(1));
    let many_workers = parabb::solve(&problem, &DriverConfig::new().with_or_nodes(16));

    assert_eq!(one_worker.solutions_count, many_workers.solutions_count);
    assert_eq!(one_worker.statistics.depth_max, many_workers.statistics.depth_max);
}

#[test]
fn best_bound_only_ever_improves() {
    let mut builder = Builder::new();
    let x = builder.add_var("x", 0, 50).unwrap();
    let y = builder.add_var("y", 0, 50).unwrap();
    builder.add_temporal_constraint(x, 3, Op::Le, y).unwrap();
    builder.set_objective_minimize("y").unwrap();
    let problem = builder.build().unwrap();

    let result = parabb::solve(&problem, &DriverConfig::new().with_or_nodes(4));
    assert_eq!(result.best_objective_value, Some(3));
    assert!(result.exhaustive);
}

#[test]
fn linear_constraint_prunes_an_unreachable_region() {
    let mut builder = Builder::new();
    let x = builder.add_var("x", 0, 5).unwrap();
    let y = builder.add_var("y", 0, 5).unwrap();
    builder.add_linear_constraint(&[x, y], &[1, 1], 3).unwrap();

    let problem = builder.build().unwrap();
    let result = parabb::solve(&problem, &DriverConfig::new());

    // x + y <= 3 over [0,5]x[0,5]: (0,0)..(3,0),(0,3) etc — 10 pairs.
    assert_eq!(result.solutions_count, 10);
}

#[test]
fn stop_after_n_solutions_halts_early() {
    let mut builder = Builder::new();
    let x = builder.add_var("x", 0, 20).unwrap();
    let y = builder.add_var("y", 0, 20).unwrap();
    builder.add_temporal_constraint(x, 1, Op::Le, y).unwrap();
    let problem = builder.build().unwrap();

    let config = DriverConfig::new().with_stop_after_n_solutions(5);
    let result = parabb::solve(&problem, &config);

    assert_eq!(result.solutions_count, 5);
    assert!(!result.exhaustive);
}
