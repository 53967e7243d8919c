//! Branching variable selection.

use crate::variables::{VStore, VarId};

/// Picks the next variable to branch on, or `None` once every branching
/// variable is assigned.
///
/// With `free_search` unset, picks the first unassigned variable in
/// `branching_vars`' declaration order. With `free_search` set, picks
/// the unassigned variable with the smallest current domain width,
/// breaking ties by declaration order.
#[must_use]
pub fn select(store: &VStore, branching_vars: &[VarId], free_search: bool) -> Option<VarId> {
    if free_search {
        branching_vars
            .iter()
            .copied()
            .filter(|&v| !store.dom(v).is_assigned())
            .min_by_key(|&v| store.dom(v).width())
    } else {
        branching_vars
            .iter()
            .copied()
            .find(|&v| !store.dom(v).is_assigned())
    }
}

/// `true` once every branching variable is assigned.
#[must_use]
pub fn all_assigned(store: &VStore, branching_vars: &[VarId]) -> bool {
    branching_vars.iter().all(|&v| store.dom(v).is_assigned())
}
