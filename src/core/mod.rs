//! Error types, solution snapshots, and search statistics.

mod error;
mod solution;
mod stats;

pub use error::{SolverError, SolverResult};
pub use solution::{DriverResult, Solution};
pub use stats::Statistics;
