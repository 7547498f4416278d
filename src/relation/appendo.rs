use crate::goal::Goal;
use crate::lterm::LTerm;
use crate::operator::any::lany;
use crate::operator::all::lall;
use crate::relation::conso::conso;
use crate::relation::eq::eq;
use crate::solver::{Solve, Solver};
use crate::state::State;
use crate::stream::Stream;
use std::rc::Rc;

#[derive(Debug)]
pub struct Appendo {
    l: LTerm,
    s: LTerm,
    ls: LTerm,
}

impl Appendo {
    pub fn new(l: LTerm, s: LTerm, ls: LTerm) -> Goal {
        Goal::dynamic(Rc::new(Appendo { l, s, ls }))
    }
}

impl Solve for Appendo {
    fn solve(&self, solver: &Solver, state: State) -> Stream {
        // The recursive case is constructed only when the goal is solved,
        // so building the goal itself terminates.
        let a = LTerm::any();
        let d = LTerm::any();
        let res = LTerm::any();
        let goal = lany([
            lall([eq(self.l.clone(), LTerm::empty_list()), eq(self.s.clone(), self.ls.clone())]),
            lall([
                conso(a.clone(), d.clone(), self.l.clone()),
                conso(a, res.clone(), self.ls.clone()),
                Appendo::new(d, self.s.clone(), res),
            ]),
        ]);
        goal.solve(solver, state)
    }
}

/// A relation such that `ls` is `s` appended to `l`.
///
/// Fully relational; with only `ls` ground it lazily enumerates every split
/// of `ls`.
///
/// # Example
/// ```rust
/// use kanrel::prelude::*;
///
/// let q = var("q");
/// let solutions = run(0, &q, [appendo(list![1, 2, 3], list![4, 5], q.clone())]).unwrap();
/// assert_eq!(solutions, vec![list![1, 2, 3, 4, 5]]);
/// ```
pub fn appendo(l: impl Into<LTerm>, s: impl Into<LTerm>, ls: impl Into<LTerm>) -> Goal {
    Appendo::new(l.into(), s.into(), ls.into())
}
