use crate::goal::Goal;
use crate::lterm::LTerm;
use crate::solver::{Solve, Solver};
use crate::state::State;
use crate::stream::Stream;
use std::rc::Rc;

#[derive(Debug)]
pub struct Eq {
    u: LTerm,
    v: LTerm,
}

impl Eq {
    pub fn new(u: LTerm, v: LTerm) -> Goal {
        Goal::dynamic(Rc::new(Eq { u, v }))
    }
}

impl Solve for Eq {
    fn solve(&self, _solver: &Solver, state: State) -> Stream {
        // Return the state where u and v are unified, or no state if
        // unification is not possible.
        match state.unify(&self.u, &self.v) {
            Ok(state) => Stream::unit(Box::new(state)),
            Err(_) => Stream::empty(),
        }
    }
}

/// Equality relation.
///
/// Unifies the two terms. Unification failure is not an error; the goal
/// simply produces no states.
///
/// # Example
/// ```rust
/// use kanrel::prelude::*;
///
/// let x = var("x");
/// let solutions = run(1, &x, [eq(x.clone(), 1)]).unwrap();
/// assert_eq!(solutions[0], 1);
/// ```
pub fn eq(u: impl Into<LTerm>, v: impl Into<LTerm>) -> Goal {
    Eq::new(u.into(), v.into())
}
