use crate::goal::Goal;
use crate::lterm::{vars, LTerm};
use crate::solver::{Solve, Solver};
use crate::state::State;
use crate::stream::Stream;
use std::fmt;
use std::rc::Rc;

pub struct Fresh {
    n: usize,
    body: Rc<dyn Fn(Vec<LTerm>) -> Goal>,
}

impl Fresh {
    pub fn new(n: usize, body: Rc<dyn Fn(Vec<LTerm>) -> Goal>) -> Goal {
        Goal::dynamic(Rc::new(Fresh { n, body }))
    }
}

impl Solve for Fresh {
    fn solve(&self, _solver: &Solver, state: State) -> Stream {
        let goal = (self.body)(vars(self.n));
        Stream::pause(Box::new(state), goal)
    }
}

impl fmt::Debug for Fresh {
    fn fmt(&self, fm: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(fm, "Fresh({}, ...)", self.n)
    }
}

/// Introduces `n` fresh variables into the scope of `body`.
///
/// The variables are created when the goal is solved, so every state that
/// reaches the goal sees its own fresh variables.
pub fn fresh<F>(n: usize, body: F) -> Goal
where
    F: Fn(Vec<LTerm>) -> Goal + 'static,
{
    Fresh::new(n, Rc::new(body))
}
