use crate::goal::Goal;
use crate::lterm::LTerm;
use crate::solver::{Solve, Solver};
use crate::state::{unify_rec, Constraint, SMap, SResult, State};
use crate::stream::Stream;
use std::rc::Rc;
use tracing::debug;

#[derive(Debug)]
pub struct Diseq {
    u: LTerm,
    v: LTerm,
}

impl Diseq {
    pub fn new(u: LTerm, v: LTerm) -> Goal {
        Goal::dynamic(Rc::new(Diseq { u, v }))
    }
}

impl Solve for Diseq {
    fn solve(&self, _solver: &Solver, state: State) -> Stream {
        debug!("post {} =/= {}", self.u, self.v);
        match state.disunify(&self.u, &self.v) {
            Ok(state) => Stream::unit(Box::new(state)),
            Err(_) => Stream::empty(),
        }
    }
}

/// Disequality relation.
///
/// Posts the constraint that `u` and `v` never become equal. The constraint
/// survives later unifications: whenever the substitution grows, it is
/// re-checked, and a state in which the terms would become equal is
/// discarded.
///
/// # Example
/// ```rust
/// use kanrel::prelude::*;
///
/// let x = var("x");
/// let solutions = run(0, &x, [
///     neq(x.clone(), 1),
///     membero(x.clone(), list![1, 2]),
/// ])
/// .unwrap();
/// assert_eq!(solutions, vec![LTerm::from(2)]);
/// ```
pub fn neq(u: impl Into<LTerm>, v: impl Into<LTerm>) -> Goal {
    Diseq::new(u.into(), v.into())
}

/// Disequality constraint in the list-of-pairs form.
///
/// The constraint holds a substitution map of pairs, of which at least one
/// must eventually fail to unify. The pairwise simplification on each
/// revalidation is what keeps the constraint complete under compound
/// unification: unifying the pairs in a scratch state either proves some
/// pair can never unify (constraint satisfied, dropped), proves all pairs
/// already equal (violated), or leaves a smaller set of pairs to watch.
#[derive(Debug, Clone)]
pub struct DisequalityConstraint(SMap);

impl DisequalityConstraint {
    pub fn new(smap: SMap) -> Rc<dyn Constraint> {
        Rc::new(DisequalityConstraint(smap))
    }

    pub fn smap_ref(&self) -> &SMap {
        &self.0
    }

    /// If the `self` subsumes the `other`.
    ///
    /// A constraint is subsumed by another constraint if unifying the
    /// constraint in the substitution of the another constraint does not
    /// extend the substitution.
    pub fn subsumes(&self, other: &DisequalityConstraint) -> bool {
        let mut extension = SMap::new();
        let mut state = State::new().with_smap(other.smap_ref().clone());
        for (u, v) in self.0.iter() {
            match unify_rec(state, &mut extension, u, v) {
                Err(()) => return false,
                Ok(s) => state = s,
            }
        }

        extension.is_empty()
    }
}

impl Constraint for DisequalityConstraint {
    fn run(self: Rc<Self>, state: State) -> SResult {
        let mut extension = SMap::new();
        let mut test_state = state.clone();
        for (u, v) in self.0.iter() {
            match unify_rec(test_state, &mut extension, u, v) {
                // Some pair can never unify again: satisfied forever.
                Err(_) => return Ok(state),
                Ok(new_state) => test_state = new_state,
            }
        }

        if extension.is_empty() {
            // All pairs unify without extending the substitution: the terms
            // are equal and the constraint is violated.
            Err(())
        } else {
            // The constraint becomes the disequality over the pairs the
            // unification would have added.
            let c = DisequalityConstraint::new(extension);
            Ok(state.with_constraint(c))
        }
    }

    fn operands(&self) -> Vec<LTerm> {
        self.0.operands()
    }
}

impl std::fmt::Display for DisequalityConstraint {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        for (u, v) in self.0.iter() {
            write!(f, "{} != {},", u, v)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::list;
    use crate::query::run;
    use crate::relation::eq::eq;

    #[test]
    fn test_subsumes() {
        // ((x.5)) subsumes ((x.5)(y.6))
        let x = LTerm::any();
        let y = LTerm::any();
        let mut smap = SMap::new();
        smap.extend(x.clone(), 5.into());
        smap.extend(y.clone(), 6.into());
        let c0 = DisequalityConstraint(smap);
        let mut smap = SMap::new();
        smap.extend(x.clone(), 5.into());
        let c1 = DisequalityConstraint(smap);
        assert!(c1.subsumes(&c0));
        assert!(!c0.subsumes(&c1));
    }

    #[test]
    fn test_diseq_before_eq() {
        let q = LTerm::var("q");
        let solutions = run(0, &q, [neq(3, q.clone()), eq(q.clone(), 3)]).unwrap();
        assert!(solutions.is_empty());
    }

    #[test]
    fn test_diseq_after_eq() {
        let q = LTerm::var("q");
        let solutions = run(0, &q, [eq(q.clone(), 3), neq(3, q.clone())]).unwrap();
        assert!(solutions.is_empty());
    }

    #[test]
    fn test_diseq_between_vars() {
        let q = LTerm::var("q");
        let x = LTerm::any();
        let y = LTerm::any();
        let solutions = run(
            0,
            &q,
            [
                neq(x.clone(), y.clone()),
                eq(x.clone(), y.clone()),
                eq(x, q.clone()),
            ],
        )
        .unwrap();
        assert!(solutions.is_empty());
    }

    #[test]
    fn test_diseq_transitive_violation() {
        let q = LTerm::var("q");
        let x = LTerm::any();
        let y = LTerm::any();
        let solutions = run(
            0,
            &q,
            [
                neq(x.clone(), y.clone()),
                eq(3, x.clone()),
                eq(3, y),
                eq(x, q.clone()),
            ],
        )
        .unwrap();
        assert!(solutions.is_empty());
    }

    #[test]
    fn test_diseq_compound_pairs() {
        // [x, 1] =/= [2, y] is violated only when both x == 2 and y == 1.
        let q = LTerm::var("q");
        let x = LTerm::any();
        let y = LTerm::any();
        let solutions = run(
            0,
            &q,
            [
                neq(
                    LTerm::from_vec(vec![x.clone(), 1.into()]),
                    LTerm::from_vec(vec![2.into(), y.clone()]),
                ),
                eq(x.clone(), 2),
                eq(y.clone(), 1),
                eq(q.clone(), list![]),
            ],
        )
        .unwrap();
        assert!(solutions.is_empty());

        // Binding only one of the pairs keeps the constraint satisfiable.
        let solutions = run(
            0,
            &q,
            [
                neq(
                    LTerm::from_vec(vec![x.clone(), 1.into()]),
                    LTerm::from_vec(vec![2.into(), y.clone()]),
                ),
                eq(x, 2),
                eq(q.clone(), list![]),
            ],
        )
        .unwrap();
        assert_eq!(solutions.len(), 1);
    }

    #[test]
    fn test_diseq_satisfied_forever() {
        // Once some pair can never unify, the constraint is dropped.
        let q = LTerm::var("q");
        let x = LTerm::any();
        let solutions = run(
            0,
            &q,
            [neq(x.clone(), 1), eq(x.clone(), 2), eq(q.clone(), x)],
        )
        .unwrap();
        assert_eq!(solutions, vec![LTerm::from(2)]);
    }
}
