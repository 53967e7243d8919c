//! The reified propagator: `b <=> (p1 AND p2)`, restricted to a
//! conjunction of two temporal constraints.
//!
//! General reification of an arbitrary propagator shape opens questions
//! this solver doesn't need to answer; this restriction is the one
//! shape it supports, matching every reified constraint the builder can
//! construct (`model::builder::Builder::add_reified_constraint`).

use super::Temporal;
use crate::variables::{VStore, VarId};

/// Enforces `b <=> (p1 AND p2)` where `b` is a 0/1 variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Reified {
    /// The boolean guard variable, domain restricted to `{0, 1}`.
    pub b: VarId,
    /// First conjunct.
    pub p1: Temporal,
    /// Second conjunct.
    pub p2: Temporal,
}

impl Reified {
    /// Builds `b <=> (p1 AND p2)`.
    #[must_use]
    pub const fn new(b: VarId, p1: Temporal, p2: Temporal) -> Self {
        Self { b, p1, p2 }
    }

    /// Narrows `b` from the conjuncts' entailment status, or narrows the
    /// conjuncts once `b` is fixed. Returns whether anything changed.
    pub fn propagate(&self, store: &mut VStore) -> bool {
        let b_dom = store.dom(self.b);
        if b_dom.lb == 1 {
            let c1 = self.p1.propagate(store);
            let c2 = self.p2.propagate(store);
            return c1 || c2;
        }
        if b_dom.ub == 0 {
            return self.force_negation(store);
        }

        let entailed = self.p1.is_entailed(store) && self.p2.is_entailed(store);
        let disentailed = self.p1.is_disentailed(store) || self.p2.is_disentailed(store);
        if entailed {
            return store.assign(self.b, 1);
        }
        if disentailed {
            return store.assign(self.b, 0);
        }
        false
    }

    /// With `b` forced to 0, strengthens whichever conjunct is not yet
    /// disentailed toward its negation — the policy this solver commits
    /// to for the restricted `LogicalAnd(Temporal, Temporal)` shape.
    fn force_negation(&self, store: &mut VStore) -> bool {
        if self.p1.is_entailed(store) {
            // p1 holds, so p2 must not: negate p2 (y <= x + k - 1).
            store.update_ub(self.p2.y, store.dom(self.p2.x).ub + self.p2.k - 1)
        } else if self.p2.is_entailed(store) {
            store.update_ub(self.p1.y, store.dom(self.p1.x).ub + self.p1.k - 1)
        } else {
            false
        }
    }

    /// `true` once `b`'s value is already forced by the conjuncts.
    #[must_use]
    pub fn is_entailed(&self, store: &VStore) -> bool {
        let b_dom = store.dom(self.b);
        if !b_dom.is_assigned() {
            return false;
        }
        if b_dom.lb == 1 {
            self.p1.is_entailed(store) && self.p2.is_entailed(store)
        } else {
            self.p1.is_disentailed(store) || self.p2.is_disentailed(store)
        }
    }

    /// `true` once `b`'s forced value contradicts the conjuncts.
    #[must_use]
    pub fn is_disentailed(&self, store: &VStore) -> bool {
        let b_dom = store.dom(self.b);
        if !b_dom.is_assigned() {
            return false;
        }
        if b_dom.lb == 1 {
            self.p1.is_disentailed(store) || self.p2.is_disentailed(store)
        } else {
            self.p1.is_entailed(store) && self.p2.is_entailed(store)
        }
    }

    /// Variables this propagator reads and writes.
    #[must_use]
    pub fn vars(&self) -> Vec<VarId> {
        let mut v = vec![self.b];
        v.extend(self.p1.vars());
        v.extend(self.p2.vars());
        v
    }
}
