use crate::goal::Goal;
use crate::graph::TermRel;
use crate::lterm::LTerm;
use crate::operator::any::conde;
use crate::relation::eq::eq;
use crate::solver::{Solve, Solver};
use crate::state::State;
use crate::stream::Stream;
use std::fmt;
use std::rc::Rc;

pub struct Reduceo {
    relation: TermRel,
    a: LTerm,
    b: LTerm,
}

impl Reduceo {
    pub fn goal(relation: TermRel, a: LTerm, b: LTerm) -> Goal {
        Goal::dynamic(Rc::new(Reduceo { relation, a, b }))
    }
}

impl Solve for Reduceo {
    fn solve(&self, solver: &Solver, state: State) -> Stream {
        let a = state.smap_ref().walk_star(&self.a);
        let b = state.smap_ref().walk_star(&self.b);

        // The result of rewriting the input once.
        let reduced = LTerm::any();
        let single = (self.relation)(a.clone(), reduced.clone());
        let stop = eq(reduced.clone(), b.clone());
        let transitive = Reduceo::goal(self.relation.clone(), reduced, b);

        let goal = if a.is_var() {
            // Working backward from a known output: the input has no
            // structure to bound the search, so the potentially infinite
            // transitive branch must be scheduled before the single-step
            // branch.
            conde(&[&[transitive, single.clone()], &[stop, single]])
        } else {
            // Reducing a known input: run the transitive branch first so
            // that the fixed point appears early in the stream.
            conde(&[&[single.clone(), transitive], &[single, stop]])
        };
        goal.solve(solver, state)
    }
}

impl fmt::Debug for Reduceo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Reduceo({:?}, {:?})", self.a, self.b)
    }
}

/// Closes a one-step rewriting relation under repeated application.
///
/// Given `relation(a, b)` meaning "`a` rewrites to `b` in one step",
/// `reduceo(relation)` is the relation holding between a term and every
/// term reachable from it by one or more steps. A term from which no step
/// fires is related to nothing; a term whose reductions dead-end is related
/// to each intermediate form, the normal form included.
///
/// The returned relation runs in both directions; see the module
/// documentation.
pub fn reduceo<R>(relation: R) -> impl Fn(LTerm, LTerm) -> Goal + Clone
where
    R: Fn(LTerm, LTerm) -> Goal + 'static,
{
    let relation: TermRel = Rc::new(relation);
    move |a, b| Reduceo::goal(relation.clone(), a, b)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::testing::math_step;
    use crate::list;
    use crate::lterm::var;
    use crate::query::{run, run_iter};

    #[test]
    fn test_reduceo_single_step() {
        let q = var("q");
        let solutions = run(0, &q, [reduceo(math_step)(list!["add", 3, 3], q.clone())]).unwrap();
        assert_eq!(solutions, vec![list!["mul", 2, 3]]);
    }

    #[test]
    fn test_reduceo_two_steps() {
        // log(exp(add(5, 5))) -> add(5, 5) -> mul(2, 5); both the
        // intermediate form and the fixed point are solutions.
        let q = var("q");
        let input = list!["log", list!["exp", list!["add", 5, 5]]];
        let solutions = run(0, &q, [reduceo(math_step)(input, q.clone())]).unwrap();
        assert_eq!(solutions.len(), 2);
        assert!(solutions.contains(&list!["add", 5, 5]));
        assert!(solutions.contains(&list!["mul", 2, 5]));
    }

    #[test]
    fn test_reduceo_irreducible_input() {
        let q = var("q");
        let solutions = run(0, &q, [reduceo(math_step)(list!["mul", 2, 3], q.clone())]).unwrap();
        assert!(solutions.is_empty());
    }

    #[test]
    fn test_reduceo_expansion_is_productive() {
        // Expanding mul(2, 5) enumerates an infinite stream of preimages;
        // the two one-step preimages appear early.
        let e = var("e");
        let expected_one = list!["add", 5, 5];
        let expected_two = list!["log", list!["exp", list!["mul", 2, 5]]];
        let solutions: Vec<LTerm> = run_iter(&e, [reduceo(math_step)(e.clone(), list!["mul", 2, 5])])
            .take(6)
            .collect::<Result<_, _>>()
            .unwrap();
        assert!(solutions.contains(&expected_one));
        assert!(solutions.contains(&expected_two));
    }
}
