use crate::goal::Goal;
use crate::solver::{Solve, Solver};
use crate::state::State;
use crate::stream::Stream;
use std::rc::Rc;

#[derive(Debug)]
pub struct Never;

impl Solve for Never {
    fn solve(&self, _solver: &Solver, state: State) -> Stream {
        // Suspends forever without producing a state.
        Stream::pause(Box::new(state), nevero())
    }
}

/// A relation that never succeeds and never finishes.
pub fn nevero() -> Goal {
    Goal::dynamic(Rc::new(Never))
}
