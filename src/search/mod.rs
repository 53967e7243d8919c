//! The branch-and-bound search tree and its shared cross-worker state.

mod branch;
mod tree;

pub use branch::select as select_branching_var;
pub use tree::{search_subtree, SharedState};
