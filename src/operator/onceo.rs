use crate::goal::Goal;
use crate::solver::{Solve, Solver};
use crate::state::State;
use crate::stream::Stream;
use std::rc::Rc;

#[derive(Debug)]
pub struct Once {
    goal: Goal,
}

impl Once {
    pub fn new(goal: Goal) -> Goal {
        Goal::dynamic(Rc::new(Once { goal }))
    }
}

impl Solve for Once {
    fn solve(&self, solver: &Solver, state: State) -> Stream {
        // Take only the first state from the stream by truncating it.
        let stream = self.goal.solve(solver, state);
        solver.trunc(stream)
    }
}

/// Yields at most one state from `goal`.
pub fn onceo(goal: Goal) -> Goal {
    Once::new(goal)
}
