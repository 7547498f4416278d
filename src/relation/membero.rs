use crate::error::Error;
use crate::goal::Goal;
use crate::lterm::{LTerm, LTermInner};
use crate::relation::eq::eq;
use crate::relation::map_sum;
use crate::solver::{Solve, Solver};
use crate::state::State;
use crate::stream::Stream;
use std::rc::Rc;

#[derive(Debug)]
pub struct Member {
    x: LTerm,
    collection: LTerm,
}

impl Solve for Member {
    fn solve(&self, solver: &Solver, state: State) -> Stream {
        // The collection's spine must be known when the goal runs; the
        // elements themselves may still contain variables.
        let collection = state.smap_ref().walk_star(&self.collection);
        let mut elements = vec![];
        let mut rest = &collection;
        loop {
            match rest.as_ref() {
                LTermInner::Empty => break,
                LTermInner::Cons(head, tail) => {
                    elements.push(head.clone());
                    rest = tail;
                }
                LTermInner::Var(_, _) => {
                    return Stream::error(Error::non_ground("membero", rest));
                }
                // A non-collection has no members.
                _ => return Stream::empty(),
            }
        }

        let x = self.x.clone();
        map_sum(solver, state, |element| eq(x.clone(), element), elements)
    }
}

/// A relation that succeeds for each occurrence of `x` in the collection.
///
/// The collection expands into a fair disjunction over its elements, so it
/// must be a list with a ground spine when the goal runs; applying `membero`
/// to an unbound collection aborts the query with [`Error::NonGround`]
/// rather than failing silently.
///
/// # Example
/// ```rust
/// use kanrel::prelude::*;
///
/// let q = var("q");
/// let solutions = run(0, &q, [membero(q.clone(), list![1, 2, 3])]).unwrap();
/// assert_eq!(solutions.len(), 3);
/// ```
pub fn membero(x: impl Into<LTerm>, collection: impl Into<LTerm>) -> Goal {
    Goal::dynamic(Rc::new(Member {
        x: x.into(),
        collection: collection.into(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::list;
    use crate::query::run;

    #[test]
    fn test_membero_enumerates_in_order() {
        let q = LTerm::var("q");
        let solutions = run(0, &q, [membero(q.clone(), list![1, 2, 3])]).unwrap();
        assert_eq!(
            solutions,
            vec![LTerm::from(1), LTerm::from(2), LTerm::from(3)]
        );
    }

    #[test]
    fn test_membero_duplicates_dedup() {
        // Distinct results only: the same reified value appears once.
        let q = LTerm::var("q");
        let solutions = run(0, &q, [membero(q.clone(), list![1, 1, 1])]).unwrap();
        assert_eq!(solutions, vec![LTerm::from(1)]);
    }

    #[test]
    fn test_membero_empty() {
        let q = LTerm::var("q");
        let solutions = run(0, &q, [membero(q.clone(), list![])]).unwrap();
        assert!(solutions.is_empty());
    }

    #[test]
    fn test_membero_non_ground_collection() {
        let q = LTerm::var("q");
        let c = LTerm::any();
        match run(0, &q, [membero(q.clone(), c)]) {
            Err(Error::NonGround { relation, .. }) => assert_eq!(relation, "membero"),
            other => panic!("expected NonGround error, got {:?}", other),
        }
    }

    #[test]
    fn test_membero_spine_bound_late() {
        // The collection may be bound by an earlier goal in the conjunction.
        let q = LTerm::var("q");
        let c = LTerm::any();
        let solutions = run(
            0,
            &q,
            [
                crate::relation::eq::eq(c.clone(), list![4, 5]),
                membero(q.clone(), c),
            ],
        )
        .unwrap();
        assert_eq!(solutions, vec![LTerm::from(4), LTerm::from(5)]);
    }
}
