use crate::goal::Goal;
use crate::solver::{Solve, Solver};
use crate::state::State;
use crate::stream::Stream;
use std::fmt;
use std::rc::Rc;

pub struct Closure {
    f: Box<dyn Fn() -> Goal>,
}

impl Closure {
    pub fn new(f: Box<dyn Fn() -> Goal>) -> Goal {
        Goal::dynamic(Rc::new(Closure { f }))
    }
}

impl Solve for Closure {
    fn solve(&self, solver: &Solver, state: State) -> Stream {
        (*self.f)().solve(solver, state)
    }
}

impl fmt::Debug for Closure {
    fn fmt(&self, fm: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Goals that are put into closure are typically recursive; therefore,
        // evaluating the goal here and trying to print it would end up in
        // infinite recursion.
        write!(fm, "Closure(...)")
    }
}

/// Defers construction of a goal until it is solved.
///
/// Recursive relations written as plain Rust functions wrap their recursive
/// call in `defer` so that constructing the goal terminates.
pub fn defer<F>(f: F) -> Goal
where
    F: Fn() -> Goal + 'static,
{
    Closure::new(Box::new(f))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lterm::{var, LTerm};
    use crate::operator::any::lany;
    use crate::query::run;
    use crate::relation::eq::eq;

    // Without defer, constructing this goal would recurse forever.
    fn counto(x: LTerm, from: isize) -> Goal {
        lany([
            eq(x.clone(), from),
            defer(move || counto(x.clone(), from + 1)),
        ])
    }

    #[test]
    fn test_defer_recursive_relation() {
        let x = var("x");
        let solutions = run(3, &x, [counto(x.clone(), 0)]).unwrap();
        assert_eq!(
            solutions,
            vec![LTerm::from(0), LTerm::from(1), LTerm::from(2)]
        );
    }
}
