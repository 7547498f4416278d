use crate::solver::{Solve, Solver};
use crate::state::State;
use crate::stream::Stream;
use std::rc::Rc;

/// A solvable goal.
///
/// A goal is a function from a state to a lazy stream of states. The
/// `Succeed` and `Fail` terminals are recognized structurally so that
/// combinators can simplify around them; everything else is a dynamic
/// [`Solve`] implementation.
#[derive(Debug, Clone)]
pub enum Goal {
    Succeed,
    Fail,
    Dynamic(Rc<dyn Solve>),
}

impl Goal {
    pub fn dynamic(u: Rc<dyn Solve>) -> Goal {
        Goal::Dynamic(u)
    }

    pub fn is_succeed(&self) -> bool {
        matches!(self, Goal::Succeed)
    }

    pub fn is_fail(&self) -> bool {
        matches!(self, Goal::Fail)
    }

    pub fn solve(&self, solver: &Solver, state: State) -> Stream {
        match self {
            Goal::Succeed => Stream::unit(Box::new(state)),
            Goal::Fail => Stream::empty(),
            Goal::Dynamic(dynamic) => dynamic.solve(solver, state),
        }
    }
}

/// A goal that succeeds with the input state unchanged.
pub fn succeed() -> Goal {
    Goal::Succeed
}

/// A goal that never succeeds.
pub fn fail() -> Goal {
    Goal::Fail
}
