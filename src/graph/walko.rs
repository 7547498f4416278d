use crate::goal::Goal;
use crate::graph::applyo::applyo;
use crate::graph::TermRel;
use crate::lterm::LTerm;
use crate::operator::all::lall;
use crate::operator::any::lany;
use crate::relation::eq::eq;
use crate::solver::{Solve, Solver};
use crate::state::State;
use crate::stream::Stream;
use std::fmt;
use std::rc::Rc;

pub struct MapAnyo {
    goal: TermRel,
    l_in: LTerm,
    l_out: LTerm,
    null: LTerm,
    any_succeed: bool,
}

impl MapAnyo {
    pub fn goal(goal: TermRel, l_in: LTerm, l_out: LTerm, null: LTerm, any_succeed: bool) -> Goal {
        Goal::dynamic(Rc::new(MapAnyo {
            goal,
            l_in,
            l_out,
            null,
            any_succeed,
        }))
    }
}

impl Solve for MapAnyo {
    fn solve(&self, solver: &Solver, state: State) -> Stream {
        let l_in = state.smap_ref().walk_star(&self.l_in);
        let l_out = state.smap_ref().walk_star(&self.l_out);

        let mut branches = vec![];

        // The sequences may only bottom out at the null sentinel once some
        // pair has been related by the inner goal; this is what excludes the
        // everywhere-unchanged correspondence.
        if self.any_succeed {
            branches.push(lall([
                eq(l_in.clone(), self.null.clone()),
                eq(l_out.clone(), self.null.clone()),
            ]));
        }

        let a = LTerm::any();
        let d = LTerm::any();
        let b = LTerm::any();
        let e = LTerm::any();
        let related = lall([
            (self.goal)(a.clone(), b.clone()),
            MapAnyo::goal(
                self.goal.clone(),
                d.clone(),
                e.clone(),
                self.null.clone(),
                true,
            ),
        ]);
        let unchanged = lall([
            eq(a.clone(), b.clone()),
            MapAnyo::goal(
                self.goal.clone(),
                d.clone(),
                e.clone(),
                self.null.clone(),
                self.any_succeed,
            ),
        ]);
        branches.push(lall([
            eq(l_in, LTerm::cons(a, d)),
            eq(l_out, LTerm::cons(b, e)),
            lany([related, unchanged]),
        ]));

        lany(branches).solve(solver, state)
    }
}

impl fmt::Debug for MapAnyo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "MapAnyo({:?}, {:?})", self.l_in, self.l_out)
    }
}

/// Relates two sequences elementwise, requiring at least one pair of
/// corresponding elements to be related by `goal`; the remaining pairs
/// unify. The sequences end at the empty list.
pub fn map_anyo<G>(goal: G, l_in: impl Into<LTerm>, l_out: impl Into<LTerm>) -> Goal
where
    G: Fn(LTerm, LTerm) -> Goal + 'static,
{
    MapAnyo::goal(
        Rc::new(goal),
        l_in.into(),
        l_out.into(),
        LTerm::empty_list(),
        false,
    )
}

pub struct Walko {
    goal: TermRel,
    a: LTerm,
    b: LTerm,
    head_goal: Option<TermRel>,
    null: LTerm,
}

impl Walko {
    pub fn goal(
        goal: TermRel,
        a: LTerm,
        b: LTerm,
        head_goal: Option<TermRel>,
        null: LTerm,
    ) -> Goal {
        Goal::dynamic(Rc::new(Walko {
            goal,
            a,
            b,
            head_goal,
            null,
        }))
    }
}

impl Solve for Walko {
    fn solve(&self, solver: &Solver, state: State) -> Stream {
        let a = state.smap_ref().walk_star(&self.a);
        let b = state.smap_ref().walk_star(&self.b);

        // Either the relation holds at the root...
        let here = (self.goal)(a.clone(), b.clone());

        // ...or both terms are compounds whose heads are related and whose
        // children correspond under the walk. The children are paired off
        // with the fair disjunction, so an infinite descent in one child
        // does not starve its siblings or the root alternative.
        let rator_in = LTerm::any();
        let rands_in = LTerm::any();
        let rator_out = LTerm::any();
        let rands_out = LTerm::any();
        let heads = match &self.head_goal {
            Some(head_goal) => head_goal(rator_in.clone(), rator_out.clone()),
            None => eq(rator_in.clone(), rator_out.clone()),
        };

        let inner = self.goal.clone();
        let head_goal = self.head_goal.clone();
        let null = self.null.clone();
        let child_rel: TermRel = Rc::new(move |x, y| {
            Walko::goal(inner.clone(), x, y, head_goal.clone(), null.clone())
        });
        let descend = lall([
            applyo(rator_in, rands_in.clone(), a),
            applyo(rator_out, rands_out.clone(), b),
            heads,
            MapAnyo::goal(child_rel, rands_in, rands_out, self.null.clone(), false),
        ]);

        lany([here, descend]).solve(solver, state)
    }
}

impl fmt::Debug for Walko {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Walko({:?}, {:?})", self.a, self.b)
    }
}

/// Relates two trees such that `goal` holds between corresponding subtrees.
///
/// At every position, either `goal` relates the two subtrees directly, or
/// both are compounds with equal heads whose children are walked pairwise,
/// at least one of them through `goal`. Runs in both directions; see the
/// module documentation.
///
/// # Example
/// ```rust
/// use kanrel::prelude::*;
///
/// // Identity relation: the walker relates every ground term to itself.
/// let q = var("q");
/// let t = list!["f", 1, list!["g", 2]];
/// let solutions = run(0, &q, [walko(eq, t.clone(), q.clone())]).unwrap();
/// assert!(solutions.contains(&t));
/// ```
pub fn walko<G>(goal: G, a: impl Into<LTerm>, b: impl Into<LTerm>) -> Goal
where
    G: Fn(LTerm, LTerm) -> Goal + 'static,
{
    Walko::goal(Rc::new(goal), a.into(), b.into(), None, LTerm::empty_list())
}

/// [`walko`] with a configurable head relation and null sentinel.
///
/// `head_goal` relates the heads of corresponding compounds (`eq` in plain
/// `walko`); `null` is the term that terminates invented child sequences,
/// distinguishing a genuinely empty compound from an atom.
pub fn walko_with<G, H>(
    goal: G,
    a: impl Into<LTerm>,
    b: impl Into<LTerm>,
    head_goal: H,
    null: impl Into<LTerm>,
) -> Goal
where
    G: Fn(LTerm, LTerm) -> Goal + 'static,
    H: Fn(LTerm, LTerm) -> Goal + 'static,
{
    let head_goal: TermRel = Rc::new(head_goal);
    Walko::goal(Rc::new(goal), a.into(), b.into(), Some(head_goal), null.into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::reduceo::reduceo;
    use crate::graph::testing::math_step;
    use crate::list;
    use crate::lterm::var;
    use crate::query::{run, run_iter};
    use itertools::Itertools;

    #[test]
    fn test_map_anyo_requires_one_application() {
        // Relate corresponding elements by increment-by-ten facts.
        fn bump(a: LTerm, b: LTerm) -> Goal {
            lany([
                lall([eq(a.clone(), 1), eq(b.clone(), 11)]),
                lall([eq(a, 2), eq(b, 12)]),
            ])
        }

        let q = var("q");
        let solutions = run(0, &q, [map_anyo(bump, list![1, 2], q.clone())]).unwrap();
        let rendered: Vec<String> = solutions.iter().map(|s| format!("{}", s)).sorted().collect();
        // One or both elements are bumped; the unchanged list is absent.
        assert_eq!(rendered, vec!["[1, 12]", "[11, 12]", "[11, 2]"]);
    }

    #[test]
    fn test_map_anyo_empty_fails() {
        let q = var("q");
        let solutions = run(0, &q, [map_anyo(eq, list![], q.clone())]).unwrap();
        assert!(solutions.is_empty());
    }

    #[test]
    fn test_walko_identity_round_trip() {
        let t = list!["add", list!["mul", 1, 2], 3];
        let q = var("q");

        let forward = run(0, &q, [walko(eq, t.clone(), q.clone())]).unwrap();
        assert!(forward.contains(&t));

        let backward = run(0, &q, [walko(eq, q.clone(), t.clone())]).unwrap();
        assert!(backward.contains(&t));
    }

    #[test]
    fn test_walko_reduction_fixed_point_set() {
        // Reducing add(add(3, 3), exp(log(exp(5)))) rewrites each reducible
        // position independently; the unchanged input is not a solution.
        let q = var("q");
        let input = list![
            "add",
            list!["add", 3, 3],
            list!["exp", list!["log", list!["exp", 5]]]
        ];
        let solutions = run(0, &q, [walko(reduceo(math_step), input, q.clone())]).unwrap();
        let rendered: Vec<String> = solutions.iter().map(|s| format!("{}", s)).sorted().collect();
        let expected: Vec<String> = vec![
            list!["add", list!["add", 3, 3], list!["exp", 5]],
            list!["add", list!["mul", 2, 3], list!["exp", 5]],
            list![
                "add",
                list!["mul", 2, 3],
                list!["exp", list!["log", list!["exp", 5]]]
            ],
        ]
        .iter()
        .map(|s| format!("{}", s))
        .sorted()
        .collect();
        assert_eq!(rendered, expected);
    }

    #[test]
    fn test_walko_with_head_relation() {
        // Heads are related by their own goal instead of plain equality.
        fn head_rel(a: LTerm, b: LTerm) -> Goal {
            lany([
                eq(a.clone(), b.clone()),
                lall([eq(a, "plus"), eq(b, "add")]),
            ])
        }
        fn bump(a: LTerm, b: LTerm) -> Goal {
            lall([eq(a, 1), eq(b, 11)])
        }

        let q = var("q");
        let solutions = run(
            0,
            &q,
            [walko_with(bump, list!["plus", 1], q.clone(), head_rel, list![])],
        )
        .unwrap();
        assert!(solutions.contains(&list!["add", 11]));
        assert!(solutions.contains(&list!["plus", 11]));
        assert_eq!(solutions.len(), 2);
    }

    #[test]
    fn test_walko_expansion_is_fair() {
        // Expanding the reduced term enumerates an infinite stream of
        // expanded forms; the shallow expansions appear in a bounded prefix.
        let e = var("e");
        let solutions: Vec<LTerm> =
            run_iter(&e, [walko(reduceo(math_step), e.clone(), list!["mul", 2, 5])])
                .take(10)
                .collect::<Result<_, _>>()
                .unwrap();
        assert!(solutions.contains(&list!["add", 5, 5]));
        assert!(solutions.contains(&list!["log", list!["exp", list!["add", 5, 5]]]));
    }
}
