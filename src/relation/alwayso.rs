use crate::goal::Goal;
use crate::solver::{Solve, Solver};
use crate::state::State;
use crate::stream::{LazyStream, Stream};
use std::rc::Rc;

#[derive(Debug)]
pub struct Always;

impl Solve for Always {
    fn solve(&self, _solver: &Solver, state: State) -> Stream {
        Stream::cons(
            Box::new(state.clone()),
            LazyStream::pause(Box::new(state), alwayso()),
        )
    }
}

/// A relation that succeeds an unbounded number of times.
pub fn alwayso() -> Goal {
    Goal::dynamic(Rc::new(Always))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::run;
    use crate::lterm::LTerm;
    use crate::operator::all::lall;
    use crate::relation::eq::eq;

    #[test]
    fn test_alwayso() {
        let q = LTerm::var("q");
        // Infinitely many identical states, one distinct result.
        let solutions = run(1, &q, [lall([alwayso(), eq(q.clone(), 1)])]).unwrap();
        assert_eq!(solutions, vec![LTerm::from(1)]);
    }
}
