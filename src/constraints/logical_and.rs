//! The logical-and propagator: the conjunction of two propagators.

use super::Propagator;
use crate::variables::{VStore, VarId};

/// Enforces `p1 AND p2`.
#[derive(Debug, Clone)]
pub struct LogicalAnd {
    /// First conjunct.
    pub p1: Box<Propagator>,
    /// Second conjunct.
    pub p2: Box<Propagator>,
}

impl LogicalAnd {
    /// Builds the conjunction of `p1` and `p2`.
    #[must_use]
    pub fn new(p1: Propagator, p2: Propagator) -> Self {
        Self {
            p1: Box::new(p1),
            p2: Box::new(p2),
        }
    }

    /// Propagates both conjuncts. Returns whether either changed the
    /// store.
    pub fn propagate(&self, store: &mut VStore) -> bool {
        let c1 = self.p1.propagate(store);
        let c2 = self.p2.propagate(store);
        c1 || c2
    }

    /// `true` iff both conjuncts are entailed.
    #[must_use]
    pub fn is_entailed(&self, store: &VStore) -> bool {
        self.p1.is_entailed(store) && self.p2.is_entailed(store)
    }

    /// `true` iff either conjunct is disentailed.
    #[must_use]
    pub fn is_disentailed(&self, store: &VStore) -> bool {
        self.p1.is_disentailed(store) || self.p2.is_disentailed(store)
    }

    /// Variables this propagator reads and writes.
    #[must_use]
    pub fn vars(&self) -> Vec<VarId> {
        let mut v = self.p1.vars();
        v.extend(self.p2.vars());
        v
    }
}
