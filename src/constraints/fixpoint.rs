//! The fixpoint engine: the naive "round until quiet" propagation loop.
//!
//! Propagators are swept in registration order; a sweep that narrows
//! nothing means the store has reached a fixpoint. This is deliberately
//! not a dirty-propagator work queue: a plain round-robin sweep is
//! trivial to split across And-parallel helpers, whereas a work queue
//! would need its own synchronization.

use crate::constraints::Propagators;
use crate::variables::VStore;
use tracing::{debug, trace};

/// Runs propagators to a fixpoint. Returns the number of sweeps
/// performed (at least 1).
pub fn run_fixpoint(store: &mut VStore, propagators: &Propagators) -> usize {
    let mut sweeps = 0;
    loop {
        sweeps += 1;
        let mut any_changed = false;
        for p in propagators.as_slice() {
            if store.is_top() {
                break;
            }
            if p.propagate(store) {
                any_changed = true;
            }
        }
        trace!(sweep = sweeps, changed = any_changed, "fixpoint sweep");
        if store.is_top() {
            debug!(sweep = sweeps, "store reached top");
            break;
        }
        if !any_changed {
            break;
        }
    }
    sweeps
}
