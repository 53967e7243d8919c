//! The problem-construction surface.

mod builder;

pub use builder::{Builder, Op, Problem};
