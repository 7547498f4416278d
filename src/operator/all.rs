use crate::goal::Goal;
use crate::solver::{Solve, Solver};
use crate::state::State;
use crate::stream::{LazyStream, Stream};
use std::rc::Rc;

#[derive(Debug)]
pub struct Conj {
    pub goal_1: Goal,
    pub goal_2: Goal,
}

impl Conj {
    pub fn new(goal_1: Goal, goal_2: Goal) -> Goal {
        if goal_1.is_succeed() {
            return goal_2;
        }
        if goal_2.is_succeed() {
            return goal_1;
        }
        if goal_1.is_fail() || goal_2.is_fail() {
            return Goal::Fail;
        }

        Goal::dynamic(Rc::new(Conj { goal_1, goal_2 }))
    }
}

impl Solve for Conj {
    fn solve(&self, _solver: &Solver, state: State) -> Stream {
        Stream::lazy_bind(
            LazyStream::pause(Box::new(state), self.goal_1.clone()),
            self.goal_2.clone(),
        )
    }
}

/// Conjunction of two goals.
pub fn conj(goal_1: Goal, goal_2: Goal) -> Goal {
    Conj::new(goal_1, goal_2)
}

/// Conjunction of all the given goals.
///
/// An empty conjunction succeeds.
pub fn lall<I>(goals: I) -> Goal
where
    I: IntoIterator<Item = Goal>,
{
    let goals: Vec<Goal> = goals.into_iter().collect();
    let mut p = Goal::Succeed;
    for g in goals.into_iter().rev() {
        p = Conj::new(g, p);
    }
    p
}
