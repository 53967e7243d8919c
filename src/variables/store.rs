//! The variable store: a fixed-length vector of interval domains with a
//! sticky top (contradiction) flag.
//!
//! Variables are addressed by a signed [`VarId`]. A positive id `v`
//! addresses the stored interval directly; a negative id `-v` addresses
//! its *negation view* — reads and writes through `-v` transparently
//! negate the interval, so callers never need to special-case polarity.
//! Index `0` is a reserved sentinel slot that cannot be negated.

use crate::variables::interval::Interval;

/// A signed variable identifier. Positive values index a variable
/// directly; negative values index its negation view. `0` is reserved.
pub type VarId = i32;

/// A fixed-size collection of interval domains, plus a monotone
/// contradiction flag.
///
/// Invariants:
/// - the number of slots never changes after construction;
/// - once [`VStore::is_top`] returns `true` it stays `true` until
///   [`VStore::reset`] is called;
/// - every narrowing update only tightens bounds;
/// - writes through a negative index never mutate the positive slot
///   directly — they go through [`Interval::neg`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VStore {
    slots: Vec<Interval>,
    top: bool,
}

impl VStore {
    /// Allocates `n` slots (including the reserved sentinel at index 0),
    /// each set to the full default domain.
    #[must_use]
    pub fn new(n: usize) -> Self {
        Self {
            slots: vec![Interval::full(); n],
            top: false,
        }
    }

    /// Number of allocated slots.
    #[must_use]
    pub fn size(&self) -> usize {
        self.slots.len()
    }

    /// `true` once any narrowing has driven a slot empty.
    #[must_use]
    pub fn is_top(&self) -> bool {
        self.top
    }

    fn index_of(v: VarId) -> (usize, bool) {
        if v >= 0 {
            (v as usize, false)
        } else {
            ((-v) as usize, true)
        }
    }

    /// Reads the current domain of `v`, applying the negation view if
    /// `v` is negative.
    #[must_use]
    pub fn dom(&self, v: VarId) -> Interval {
        let (idx, negated) = Self::index_of(v);
        let raw = self.slots[idx];
        if negated {
            raw.neg()
        } else {
            raw
        }
    }

    /// Unconditionally sets the domain of `v` (builder-time use only).
    /// Sets top if the result is empty.
    pub fn set_dom(&mut self, v: VarId, itv: Interval) {
        let (idx, negated) = Self::index_of(v);
        let stored = if negated { itv.neg() } else { itv };
        self.slots[idx] = stored;
        if self.slots[idx].is_empty() {
            self.top = true;
        }
    }

    /// Narrows the lower bound of `v`. Returns whether the domain
    /// strictly tightened. On a negated index this narrows the *upper*
    /// bound of the underlying positive slot.
    pub fn update_lb(&mut self, v: VarId, new_lb: i64) -> bool {
        let (idx, negated) = Self::index_of(v);
        let current = self.slots[idx];
        let (next, changed) = if negated {
            // lb(view) = -ub(slot): raising view-lb lowers slot-ub.
            let (slot, changed) = current.narrow_ub(-new_lb);
            (slot, changed)
        } else {
            current.narrow_lb(new_lb)
        };
        self.slots[idx] = next;
        if next.is_empty() {
            self.top = true;
        }
        changed
    }

    /// Narrows the upper bound of `v`. Returns whether the domain
    /// strictly tightened. On a negated index this narrows the *lower*
    /// bound of the underlying positive slot.
    pub fn update_ub(&mut self, v: VarId, new_ub: i64) -> bool {
        let (idx, negated) = Self::index_of(v);
        let current = self.slots[idx];
        let (next, changed) = if negated {
            let (slot, changed) = current.narrow_lb(-new_ub);
            (slot, changed)
        } else {
            current.narrow_ub(new_ub)
        };
        self.slots[idx] = next;
        if next.is_empty() {
            self.top = true;
        }
        changed
    }

    /// Narrows both bounds of `v` to the intersection with `itv`.
    /// Returns whether either bound strictly tightened.
    pub fn update(&mut self, v: VarId, itv: Interval) -> bool {
        let lb_changed = self.update_lb(v, itv.lb);
        let ub_changed = self.update_ub(v, itv.ub);
        lb_changed || ub_changed
    }

    /// Narrows `v` to the single value `k`.
    pub fn assign(&mut self, v: VarId, k: i64) -> bool {
        self.update(v, Interval::new(k, k))
    }

    /// Pointwise intersection of two stores of matching size: each slot
    /// becomes `self.slot.join(other.slot)`, and the result is top if
    /// either input was. Used to fold And-parallel helper results back
    /// into one store after a partitioned propagation sweep.
    ///
    /// # Panics
    ///
    /// Panics if `self.size() != other.size()`, the same internal
    /// invariant as [`VStore::reset`].
    #[must_use]
    pub fn join(&self, other: &Self) -> Self {
        assert!(
            self.size() == other.size(),
            "VStore::join requires matching sizes (got {} and {})",
            self.size(),
            other.size()
        );
        let slots: Vec<Interval> = self
            .slots
            .iter()
            .zip(&other.slots)
            .map(|(a, b)| a.join(*b))
            .collect();
        let top = self.top || other.top || slots.iter().any(|i| i.is_empty());
        Self { slots, top }
    }

    /// Overwrites every slot and the top flag from `other`.
    ///
    /// # Panics
    ///
    /// Panics if `self.size() != other.size()` — this is an internal
    /// invariant violation, not a user-facing error: stores are never
    /// reset across differently-sized problems.
    pub fn reset(&mut self, other: &Self) {
        assert!(
            self.size() == other.size(),
            "VStore::reset requires matching sizes (got {} and {})",
            self.size(),
            other.size()
        );
        self.slots.copy_from_slice(&other.slots);
        self.top = other.top;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_store_is_full_domain() {
        let s = VStore::new(3);
        assert_eq!(s.dom(1), Interval::full());
        assert!(!s.is_top());
    }

    #[test]
    fn negative_index_is_negated_view() {
        let mut s = VStore::new(2);
        s.set_dom(1, Interval::new(2, 9));
        assert_eq!(s.dom(-1), Interval::new(-9, -2));
    }

    #[test]
    fn writing_through_negative_index_negates() {
        let mut s = VStore::new(2);
        let changed = s.update_ub(-1, -3);
        assert!(changed);
        // view ub <= -3  =>  slot lb >= 3
        assert_eq!(s.dom(1).lb, 3);
    }

    #[test]
    fn narrowing_to_empty_sets_top() {
        let mut s = VStore::new(2);
        let _ = s.update_lb(1, 10);
        assert!(!s.is_top());
        let _ = s.update_ub(1, 5);
        assert!(s.is_top());
    }

    #[test]
    fn reset_restores_snapshot() {
        let mut s = VStore::new(2);
        let snapshot = s.clone();
        let _ = s.assign(1, 7);
        assert_ne!(s.dom(1), snapshot.dom(1));
        s.reset(&snapshot);
        assert_eq!(s.dom(1), snapshot.dom(1));
        assert_eq!(s.is_top(), snapshot.is_top());
    }

    #[test]
    fn join_folds_disjoint_narrowings() {
        let mut a = VStore::new(3);
        a.set_dom(1, Interval::new(0, 10));
        a.set_dom(2, Interval::new(0, 10));
        let mut b = a.clone();
        let _ = a.update_ub(1, 5);
        let _ = b.update_lb(2, 7);
        let joined = a.join(&b);
        assert_eq!(joined.dom(1), Interval::new(0, 5));
        assert_eq!(joined.dom(2), Interval::new(7, 10));
    }

    #[test]
    fn update_never_widens() {
        let mut s = VStore::new(2);
        let _ = s.update(1, Interval::new(0, 5));
        let _ = s.update(1, Interval::new(-10, 20));
        assert_eq!(s.dom(1), Interval::new(0, 5));
    }
}
