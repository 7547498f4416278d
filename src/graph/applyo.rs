use crate::goal::Goal;
use crate::lterm::{LTerm, LTermInner};
use crate::operator::all::lall;
use crate::relation::eq::eq;
use crate::solver::{Solve, Solver};
use crate::state::State;
use crate::stream::Stream;
use std::rc::Rc;

#[derive(Debug)]
pub struct Apply {
    rator: LTerm,
    rands: LTerm,
    obj: LTerm,
}

impl Solve for Apply {
    fn solve(&self, solver: &Solver, state: State) -> Stream {
        let obj = state.smap_ref().walk(&self.obj).clone();
        let goal = match obj.as_ref() {
            // A user compound is projected through the term interface.
            LTermInner::Compound(object) => lall([
                eq(self.rator.clone(), object.head()),
                eq(self.rands.clone(), LTerm::from_vec(object.children())),
            ]),
            // The built-in compound form is the cons list with the operator
            // first, so decomposing a known compound, inventing one for an
            // unbound object, and failing on atoms are all the same
            // unification.
            _ => eq(obj, LTerm::cons(self.rator.clone(), self.rands.clone())),
        };
        goal.solve(solver, state)
    }
}

/// Relates a compound `obj` to its head `rator` and its list of children
/// `rands`.
///
/// When `obj` is unbound the goal invents a compound from the head and
/// children, which may themselves still be unbound; when `obj` is an atom
/// the goal fails. A nullary compound is related to its head and the empty
/// children list.
pub fn applyo(rator: impl Into<LTerm>, rands: impl Into<LTerm>, obj: impl Into<LTerm>) -> Goal {
    Goal::dynamic(Rc::new(Apply {
        rator: rator.into(),
        rands: rands.into(),
        obj: obj.into(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::list;
    use crate::lterm::var;
    use crate::query::run;

    #[test]
    fn test_applyo_decompose() {
        let op = var("op");
        let args = var("args");
        let q = LTerm::from_vec(vec![op.clone(), args.clone()]);
        let solutions = run(0, &q, [applyo(op, args, list!["add", 1, 2])]).unwrap();
        assert_eq!(solutions, vec![list!["add", list![1, 2]]]);
    }

    #[test]
    fn test_applyo_construct() {
        let q = var("q");
        let solutions = run(0, &q, [applyo("add", list![1, 2], q.clone())]).unwrap();
        assert_eq!(solutions, vec![list!["add", 1, 2]]);
    }

    #[test]
    fn test_applyo_nullary() {
        let q = var("q");
        let solutions = run(0, &q, [applyo("nil", list![], q.clone())]).unwrap();
        assert_eq!(solutions, vec![list!["nil"]]);
    }

    #[test]
    fn test_applyo_atom_fails() {
        let q = var("q");
        let solutions = run(0, &q, [applyo(q.clone(), LTerm::any(), 5)]).unwrap();
        assert!(solutions.is_empty());
    }

    #[test]
    fn test_applyo_user_compound() {
        let pair = LTerm::from((LTerm::from("k"), LTerm::from(7)));
        let op = var("op");
        let args = var("args");
        let q = LTerm::from_vec(vec![op.clone(), args.clone()]);
        let solutions = run(0, &q, [applyo(op, args, pair)]).unwrap();
        assert_eq!(solutions, vec![list!["k", list![7]]]);
    }
}
