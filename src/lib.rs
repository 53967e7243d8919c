//! A parallel branch-and-bound constraint solver over integer domains.
//!
//! Models are built from a small, closed set of collaborators:
//!
//! - [`variables`] — the interval domain store ([`variables::VStore`])
//!   that every propagator and search step narrows.
//! - [`constraints`] — the propagator library (temporal, linear,
//!   logical-and, reified) and the fixpoint engine that sweeps them.
//! - [`model`] — [`model::Builder`], the normalized problem-construction
//!   surface that plays the role an XCSP3/FlatZinc front end would.
//! - [`search`] — the explicit-stack depth-first branch-and-bound
//!   traversal, plus the state shared across Or-parallel workers.
//! - [`solver`] — [`solver::DriverConfig`] and [`solver::solve`], which
//!   distribute a problem's root decomposition across workers.
//!
//! # Example
//!
//! ```
//! use parabb::prelude::*;
//!
//! let mut builder = Builder::new();
//! let x = builder.add_var("x", 0, 2).unwrap();
//! let y = builder.add_var("y", 0, 2).unwrap();
//! builder.add_temporal_constraint(x, 1, Op::Le, y).unwrap();
//!
//! let problem = builder.build().unwrap();
//! let result = parabb::solve(&problem, &DriverConfig::new());
//! assert_eq!(result.solutions_count, 3);
//! assert!(result.exhaustive);
//! ```
//!
//! # Minimization
//!
//! ```
//! use parabb::prelude::*;
//!
//! let mut builder = Builder::new();
//! let x = builder.add_var("x", 0, 10).unwrap();
//! let y = builder.add_var("y", 0, 10).unwrap();
//! builder.add_temporal_constraint(x, 1, Op::Le, y).unwrap();
//! builder.set_objective_minimize("y").unwrap();
//!
//! let problem = builder.build().unwrap();
//! let result = parabb::solve(&problem, &DriverConfig::new());
//! assert_eq!(result.best_objective_value, Some(1));
//! ```

pub mod constraints;
pub mod core;
pub mod model;
pub mod prelude;
pub mod search;
pub mod solver;
pub mod variables;

pub use core::{DriverResult, Solution, SolverError, SolverResult, Statistics};
pub use solver::{solve, DriverConfig};
