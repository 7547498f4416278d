use crate::goal::Goal;
use crate::operator::all::lall;
use crate::solver::{Solve, Solver};
use crate::state::State;
use crate::stream::{LazyStream, Stream};
use std::rc::Rc;

#[derive(Debug)]
pub struct Disj {
    pub goal_1: Goal,
    pub goal_2: Goal,
}

impl Disj {
    pub fn new(goal_1: Goal, goal_2: Goal) -> Goal {
        // `fail` is the identity of disjunction.
        if goal_1.is_fail() {
            return goal_2;
        }
        if goal_2.is_fail() {
            return goal_1;
        }

        Goal::dynamic(Rc::new(Disj { goal_1, goal_2 }))
    }
}

impl Solve for Disj {
    fn solve(&self, solver: &Solver, state: State) -> Stream {
        // The second arm stays suspended; the fair merge interleaves it with
        // the first as the solver pulls.
        let stream = self.goal_1.solve(solver, state.clone());
        let lazy = LazyStream::pause(Box::new(state), self.goal_2.clone());
        Stream::mplus(stream, lazy)
    }
}

/// Disjunction of two goals.
pub fn disj(goal_1: Goal, goal_2: Goal) -> Goal {
    Disj::new(goal_1, goal_2)
}

/// Fair disjunction of all the given goals.
///
/// The solutions of the disjuncts are interleaved: a disjunct with
/// infinitely many solutions does not starve the others. An empty
/// disjunction fails.
pub fn lany<I>(goals: I) -> Goal
where
    I: IntoIterator<Item = Goal>,
{
    let goals: Vec<Goal> = goals.into_iter().collect();
    let mut p = Goal::Fail;
    for g in goals.into_iter().rev() {
        p = Disj::new(g, p);
    }
    p
}

/// Disjunction of conjunctions.
///
/// Each case is a sequence of goals that are conjoined; the cases are
/// combined with the fair disjunction.
pub fn conde(cases: &[&[Goal]]) -> Goal {
    lany(cases.iter().map(|case| lall(case.to_vec())))
}
