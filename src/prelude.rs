//! Convenience re-exports for the common entry points: build a
//! [`Problem`](crate::model::Problem) with a [`Builder`], then call
//! [`solve`](crate::solve) with a [`DriverConfig`].

pub use crate::core::{DriverResult, Solution, SolverError, SolverResult};
pub use crate::model::{Builder, Op, Problem};
pub use crate::solver::{solve, DriverConfig};
