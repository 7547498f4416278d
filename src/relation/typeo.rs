use crate::goal::Goal;
use crate::lterm::{LTerm, LTermInner};
use crate::solver::{Solve, Solver};
use crate::state::{Constraint, SResult, State};
use crate::stream::Stream;
use std::fmt;
use std::rc::Rc;

/// Named predicate over ground terms, used by [`typeo`] and [`not_typeo`].
///
/// The predicate is only ever evaluated on a fully ground term; while the
/// constrained term still contains variables the constraint stays pending.
#[derive(Clone, Copy)]
pub struct TypePredicate {
    name: &'static str,
    test: fn(&LTerm) -> bool,
}

impl TypePredicate {
    pub const fn new(name: &'static str, test: fn(&LTerm) -> bool) -> TypePredicate {
        TypePredicate { name, test }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn holds(&self, t: &LTerm) -> bool {
        (self.test)(t)
    }

    pub const NUMBER: TypePredicate = TypePredicate::new("number", |t| t.is_number());
    pub const STRING: TypePredicate = TypePredicate::new("string", |t| t.is_string());
    pub const BOOLEAN: TypePredicate = TypePredicate::new("boolean", |t| t.is_bool());
    pub const CHARACTER: TypePredicate = TypePredicate::new("character", |t| t.is_char());
    pub const COLLECTION: TypePredicate = TypePredicate::new("collection", |t| t.is_list());
}

impl fmt::Debug for TypePredicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TypePredicate({})", self.name)
    }
}

impl fmt::Display for TypePredicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// Type membership or exclusion constraint.
///
/// Decided as soon as the constrained term walks to a ground value; until
/// then the constraint re-adds itself on every revalidation.
#[derive(Debug, Clone)]
pub struct TypeConstraint {
    u: LTerm,
    predicate: TypePredicate,
    exclude: bool,
}

impl TypeConstraint {
    pub fn new(u: LTerm, predicate: TypePredicate, exclude: bool) -> Rc<dyn Constraint> {
        Rc::new(TypeConstraint {
            u,
            predicate,
            exclude,
        })
    }
}

impl Constraint for TypeConstraint {
    fn run(self: Rc<Self>, state: State) -> SResult {
        let walked = state.smap_ref().walk_star(&self.u);
        if walked.is_ground() {
            if self.predicate.holds(&walked) != self.exclude {
                Ok(state)
            } else {
                Err(())
            }
        } else {
            // Still pending.
            Ok(state.with_constraint(self))
        }
    }

    fn operands(&self) -> Vec<LTerm> {
        fn collect(t: &LTerm, vars: &mut Vec<LTerm>) {
            match t.as_ref() {
                LTermInner::Var(_, _) => vars.push(t.clone()),
                LTermInner::Cons(head, tail) => {
                    collect(head, vars);
                    collect(tail, vars);
                }
                LTermInner::Compound(object) => {
                    collect(&object.head(), vars);
                    for child in object.children() {
                        collect(&child, vars);
                    }
                }
                _ => (),
            }
        }
        let mut vars = vec![];
        collect(&self.u, &mut vars);
        vars
    }
}

impl fmt::Display for TypeConstraint {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.exclude {
            write!(f, "{} is not {}", self.u, self.predicate)
        } else {
            write!(f, "{} is {}", self.u, self.predicate)
        }
    }
}

#[derive(Debug)]
struct TypeGoal {
    u: LTerm,
    predicate: TypePredicate,
    exclude: bool,
}

impl Solve for TypeGoal {
    fn solve(&self, _solver: &Solver, state: State) -> Stream {
        // Post the constraint with an immediate check; a decided constraint
        // is never stored.
        let c = TypeConstraint::new(self.u.clone(), self.predicate, self.exclude);
        match c.run(state) {
            Ok(state) => Stream::unit(Box::new(state)),
            Err(_) => Stream::empty(),
        }
    }
}

/// Type membership constraint.
///
/// Succeeds when `walk*(u)` satisfies the predicate once ground; pending
/// until then.
pub fn typeo(u: impl Into<LTerm>, predicate: TypePredicate) -> Goal {
    Goal::dynamic(Rc::new(TypeGoal {
        u: u.into(),
        predicate,
        exclude: false,
    }))
}

/// Type exclusion constraint; the negated form of [`typeo`].
pub fn not_typeo(u: impl Into<LTerm>, predicate: TypePredicate) -> Goal {
    Goal::dynamic(Rc::new(TypeGoal {
        u: u.into(),
        predicate,
        exclude: true,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::run;
    use crate::relation::eq::eq;
    use crate::relation::membero::membero;
    use crate::list;

    #[test]
    fn test_typeo_ground() {
        let q = LTerm::var("q");
        let solutions = run(0, &q, [typeo(1, TypePredicate::NUMBER), eq(q.clone(), 1)]).unwrap();
        assert_eq!(solutions.len(), 1);

        let solutions = run(0, &q, [typeo("one", TypePredicate::NUMBER)]).unwrap();
        assert!(solutions.is_empty());
    }

    #[test]
    fn test_typeo_pending_then_bound() {
        let q = LTerm::var("q");
        let solutions = run(
            0,
            &q,
            [
                typeo(q.clone(), TypePredicate::NUMBER),
                membero(q.clone(), list![1, "two", 3]),
            ],
        )
        .unwrap();
        assert_eq!(solutions, vec![LTerm::from(1), LTerm::from(3)]);
    }

    #[test]
    fn test_not_typeo() {
        let q = LTerm::var("q");
        let solutions = run(
            0,
            &q,
            [
                not_typeo(q.clone(), TypePredicate::NUMBER),
                membero(q.clone(), list![1, "two", 3]),
            ],
        )
        .unwrap();
        assert_eq!(solutions, vec![LTerm::from("two")]);
    }

    #[test]
    fn test_typeo_violation_after_bind() {
        let q = LTerm::var("q");
        let solutions = run(
            0,
            &q,
            [typeo(q.clone(), TypePredicate::STRING), eq(q.clone(), 5)],
        )
        .unwrap();
        assert!(solutions.is_empty());
    }
}
