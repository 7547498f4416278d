use crate::goal::Goal;
use crate::lterm::LTerm;
use crate::solver::{Solve, Solver};
use crate::state::State;
use crate::stream::Stream;
use std::rc::Rc;

#[derive(Debug)]
pub struct Ground {
    u: LTerm,
}

impl Solve for Ground {
    fn solve(&self, _solver: &Solver, state: State) -> Stream {
        if state.smap_ref().walk_star(&self.u).is_ground() {
            Stream::unit(Box::new(state))
        } else {
            Stream::empty()
        }
    }
}

/// Succeeds iff the term contains no unbound variables when the goal runs.
pub fn groundo(u: impl Into<LTerm>) -> Goal {
    Goal::dynamic(Rc::new(Ground { u: u.into() }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::list;
    use crate::query::run;
    use crate::relation::eq::eq;

    #[test]
    fn test_groundo() {
        let q = LTerm::var("q");
        let solutions = run(0, &q, [eq(q.clone(), 1), groundo(q.clone())]).unwrap();
        assert_eq!(solutions, vec![LTerm::from(1)]);

        let x = LTerm::any();
        let solutions = run(0, &q, [eq(q.clone(), list![1, x]), groundo(q.clone())]).unwrap();
        assert!(solutions.is_empty());
    }
}
