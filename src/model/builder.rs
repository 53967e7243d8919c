//! The problem-construction API: the normalized surface that would
//! otherwise be produced by an XCSP3/FlatZinc front end (out of scope
//! for this solver).
//!
//! ```
//! use parabb::prelude::*;
//!
//! let mut builder = Builder::new();
//! let x = builder.add_var("x", 0, 2).unwrap();
//! let y = builder.add_var("y", 0, 2).unwrap();
//! builder.add_temporal_constraint(x, 1, Op::Le, y).unwrap();
//! let problem = builder.build().unwrap();
//! assert_eq!(problem.branching_vars.len(), 2);
//! ```

use std::collections::HashMap;

use crate::constraints::{LinearIneq, LogicalAnd, Propagator, Propagators, Reified, Temporal};
use crate::core::{SolverError, SolverResult};
use crate::variables::{Interval, VStore, VarId};

/// A comparison operator accepted by [`Builder::strengthen_domain`] and
/// [`Builder::add_temporal_constraint`].
///
/// `Ne` exists only so it can be rejected uniformly: this solver's
/// propagator library has no disequality propagator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[allow(clippy::exhaustive_enums, reason = "closed operator set by design")]
pub enum Op {
    /// `<=`
    Le,
    /// `<`
    Lt,
    /// `>=`
    Ge,
    /// `>`
    Gt,
    /// `=`
    Eq,
    /// `!=`, always rejected.
    Ne,
}

/// The normalized output of [`Builder::build`]: an initial store, the
/// propagator set, and the search surface (which variables to branch on
/// and, optionally, which to minimize).
#[derive(Debug, Clone)]
pub struct Problem {
    /// The initial, builder-narrowed store.
    pub store: VStore,
    /// Every registered propagator.
    pub propagators: Propagators,
    /// Variables the search layer branches on, in declaration order.
    pub branching_vars: Vec<VarId>,
    /// The variable to minimize, if an objective was set.
    pub minimize_var: Option<VarId>,
}

/// Incrementally builds a [`Problem`] from named variables and
/// constraints.
#[derive(Debug, Clone, Default)]
pub struct Builder {
    names: HashMap<String, VarId>,
    domains: Vec<Interval>,
    propagators: Vec<Propagator>,
    branching_vars: Vec<VarId>,
    minimize_var: Option<VarId>,
}

impl Builder {
    /// An empty builder. Index `0` is reserved internally; the first
    /// call to [`Builder::add_var`] returns id `1`.
    #[must_use]
    pub fn new() -> Self {
        Self {
            names: HashMap::new(),
            domains: vec![Interval::full()],
            propagators: Vec::new(),
            branching_vars: Vec::new(),
            minimize_var: None,
        }
    }

    /// Registers a new integer variable with initial domain `[lb, ub]`.
    ///
    /// # Errors
    ///
    /// Returns [`SolverError::InvalidDomain`] if `lb > ub`.
    pub fn add_var(&mut self, name: impl Into<String>, lb: i64, ub: i64) -> SolverResult<VarId> {
        let name = name.into();
        if lb > ub {
            return Err(SolverError::invalid_domain(
                format!("declared domain [{lb}, {ub}] is empty"),
                name,
            ));
        }
        let id = self.domains.len() as VarId;
        self.domains.push(Interval::new(lb, ub));
        self.branching_vars.push(id);
        let _ = self.names.insert(name, id);
        Ok(id)
    }

    fn resolve(&self, name: &str) -> SolverResult<VarId> {
        self.names
            .get(name)
            .copied()
            .ok_or_else(|| SolverError::unknown_variable(name))
    }

    /// Tightens a single variable's domain at build time (e.g.
    /// `x <= 5`).
    ///
    /// # Errors
    ///
    /// Returns [`SolverError::InvalidVariable`] for an unknown name, or
    /// [`SolverError::InvalidConstraint`] for `op == Op::Ne`.
    pub fn strengthen_domain(&mut self, name: &str, op: Op, k: i64) -> SolverResult<()> {
        let v = self.resolve(name)?;
        let idx = v as usize;
        let cur = self.domains[idx];
        let narrowed = match op {
            Op::Le => Interval::new(cur.lb, cur.ub.min(k)),
            Op::Lt => Interval::new(cur.lb, cur.ub.min(k - 1)),
            Op::Ge => Interval::new(cur.lb.max(k), cur.ub),
            Op::Gt => Interval::new(cur.lb.max(k + 1), cur.ub),
            Op::Eq => Interval::new(cur.lb.max(k), cur.ub.min(k)),
            Op::Ne => {
                return Err(SolverError::invalid_constraint_with_vars(
                    "disequality domain restriction is not supported",
                    vec![name.to_string()],
                ))
            }
        };
        self.domains[idx] = narrowed;
        Ok(())
    }

    /// Builds the `Temporal` propagator for `x + k <op> y`, where `op`
    /// is one of `Le, Lt, Ge, Gt` — the shape a reified conjunct must
    /// take. `Eq`/`Ne` are rejected here since a single `Temporal`
    /// cannot represent them atomically.
    fn normalize_atomic_temporal(x: VarId, k: i64, op: Op, y: VarId) -> SolverResult<Temporal> {
        match op {
            Op::Le => Ok(Temporal::new(x, k, y)),
            Op::Lt => Ok(Temporal::new(x, k + 1, y)),
            Op::Ge => Ok(Temporal::new(y, -k, x)),
            Op::Gt => Ok(Temporal::new(y, 1 - k, x)),
            Op::Eq | Op::Ne => Err(SolverError::invalid_constraint(
                "reified conjuncts must use <=, <, >= or >",
            )),
        }
    }

    /// Registers `x + k <op> y`.
    ///
    /// `Eq` expands to the conjunction of `<=` and `>=`. `Ne` is always
    /// rejected — this solver has no disequality propagator.
    ///
    /// # Errors
    ///
    /// Returns [`SolverError::InvalidConstraint`] for `op == Op::Ne`.
    pub fn add_temporal_constraint(&mut self, x: VarId, k: i64, op: Op, y: VarId) -> SolverResult<()> {
        match op {
            Op::Ne => Err(SolverError::invalid_constraint(
                "disequality constraints are not supported",
            )),
            Op::Eq => {
                let le = Self::normalize_atomic_temporal(x, k, Op::Le, y)?;
                let ge = Self::normalize_atomic_temporal(x, k, Op::Ge, y)?;
                self.propagators.push(Propagator::LogicalAnd(LogicalAnd::new(
                    Propagator::Temporal(le),
                    Propagator::Temporal(ge),
                )));
                Ok(())
            }
            _ => {
                let t = Self::normalize_atomic_temporal(x, k, op, y)?;
                self.propagators.push(Propagator::Temporal(t));
                Ok(())
            }
        }
    }

    /// Registers `sum(coefs[i] * vars[i]) <= c`.
    ///
    /// # Errors
    ///
    /// Returns [`SolverError::InvalidInput`] if `vars.len() !=
    /// coefs.len()`.
    pub fn add_linear_constraint(&mut self, vars: &[VarId], coefs: &[i64], c: i64) -> SolverResult<()> {
        if vars.len() != coefs.len() {
            return Err(SolverError::invalid_input(
                format!(
                    "vars has {} entries but coefs has {}",
                    vars.len(),
                    coefs.len()
                ),
                "add_linear_constraint",
            ));
        }
        self.propagators
            .push(Propagator::LinearIneq(LinearIneq::new(vars.to_vec(), coefs.to_vec(), c)));
        Ok(())
    }

    /// Registers `b <=> ((x1 + k1 <op1> y1) AND (x2 + k2 <op2> y2))`.
    ///
    /// # Errors
    ///
    /// Returns [`SolverError::InvalidConstraint`] if either conjunct
    /// uses `Eq` or `Ne`.
    #[allow(clippy::too_many_arguments, reason = "mirrors the two atomic-temporal conjuncts directly")]
    pub fn add_reified_constraint(
        &mut self,
        b: VarId,
        x1: VarId,
        k1: i64,
        op1: Op,
        y1: VarId,
        x2: VarId,
        k2: i64,
        op2: Op,
        y2: VarId,
    ) -> SolverResult<()> {
        let p1 = Self::normalize_atomic_temporal(x1, k1, op1, y1)?;
        let p2 = Self::normalize_atomic_temporal(x2, k2, op2, y2)?;
        self.propagators
            .push(Propagator::Reified(Reified::new(b, p1, p2)));
        Ok(())
    }

    /// Marks `name` as the objective variable to minimize.
    ///
    /// # Errors
    ///
    /// Returns [`SolverError::InvalidVariable`] for an unknown name.
    pub fn set_objective_minimize(&mut self, name: &str) -> SolverResult<()> {
        let v = self.resolve(name)?;
        self.minimize_var = Some(v);
        Ok(())
    }

    /// Finalizes the problem: allocates the store from every declared
    /// domain and hands back the propagator set and search surface.
    ///
    /// Root-level contradictions (an `Eq`/range strengthening that left
    /// a domain empty) surface as an already-top store rather than an
    /// error.
    ///
    /// # Errors
    ///
    /// This method currently never fails; it returns `SolverResult` to
    /// leave room for future build-time validation without an API
    /// break.
    pub fn build(self) -> SolverResult<Problem> {
        let mut store = VStore::new(self.domains.len());
        for (idx, dom) in self.domains.iter().enumerate() {
            store.set_dom(idx as VarId, *dom);
        }
        let mut propagators = Propagators::new();
        for p in self.propagators {
            let _ = propagators.push(p);
        }
        Ok(Problem {
            store,
            propagators,
            branching_vars: self.branching_vars,
            minimize_var: self.minimize_var,
        })
    }
}
