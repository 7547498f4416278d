use crate::goal::Goal;
use crate::lterm::LTerm;
use crate::operator::all::lall;
use crate::relation::eq::eq;
use crate::relation::map_sum;
use crate::solver::{Solve, Solver};
use crate::state::State;
use crate::stream::Stream;
use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

#[derive(Debug, Default)]
struct FactBase {
    arity: Option<usize>,
    facts: Vec<Vec<LTerm>>,
    // One map per argument position, from ground argument values to the
    // facts carrying that value at that position. Facts with a non-ground
    // term at a position are listed in the wildcard set of that position.
    index: Vec<HashMap<LTerm, Vec<usize>>>,
    wildcards: Vec<Vec<usize>>,
}

impl FactBase {
    fn insert(&mut self, fact: Vec<LTerm>) {
        match self.arity {
            None => {
                self.arity = Some(fact.len());
                self.index = (0..fact.len()).map(|_| HashMap::new()).collect();
                self.wildcards = vec![vec![]; fact.len()];
            }
            Some(arity) => {
                if arity != fact.len() {
                    panic!(
                        "relation of arity {} given a fact of arity {}",
                        arity,
                        fact.len()
                    );
                }
            }
        }

        let id = self.facts.len();
        for (position, value) in fact.iter().enumerate() {
            if value.is_ground() {
                self.index[position]
                    .entry(value.clone())
                    .or_insert_with(Vec::new)
                    .push(id);
            } else {
                self.wildcards[position].push(id);
            }
        }
        self.facts.push(fact);
    }

    /// Fact ids to try for the given arguments, in insertion order. Each
    /// ground argument restricts the candidates through its position index;
    /// the smallest restriction wins.
    fn candidates(&self, args: &[LTerm]) -> Vec<usize> {
        let mut best: Option<Vec<usize>> = None;
        for (position, arg) in args.iter().enumerate() {
            if !arg.is_ground() {
                continue;
            }
            let mut ids: Vec<usize> = self.index[position]
                .get(arg)
                .cloned()
                .unwrap_or_default();
            ids.extend(self.wildcards[position].iter().copied());
            ids.sort_unstable();
            if best.as_ref().map_or(true, |b| ids.len() < b.len()) {
                best = Some(ids);
            }
        }
        best.unwrap_or_else(|| (0..self.facts.len()).collect())
    }
}

/// A mutable, indexed set of facts usable as a goal constructor.
///
/// Facts are added with [`facts`] before the query starts; applying the
/// relation to arguments produces a disjunction over its facts, unifying
/// argument-wise in insertion order. Mutating a relation while a query over
/// it is running is not supported.
///
/// # Example
/// ```rust
/// use kanrel::prelude::*;
///
/// let parent = Relation::new("parent");
/// facts(&parent, [
///     [LTerm::from("Homer"), LTerm::from("Bart")],
///     [LTerm::from("Abe"), LTerm::from("Homer")],
/// ]);
/// let q = var("q");
/// let solutions = run(0, &q, [parent.apply([q.clone(), "Bart".into()])]).unwrap();
/// assert_eq!(solutions, vec![LTerm::from("Homer")]);
/// ```
#[derive(Clone, Debug)]
pub struct Relation {
    name: &'static str,
    base: Rc<RefCell<FactBase>>,
}

impl Relation {
    pub fn new(name: &'static str) -> Relation {
        Relation {
            name,
            base: Rc::new(RefCell::new(FactBase::default())),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn len(&self) -> usize {
        self.base.borrow().facts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Inserts one fact.
    pub fn fact<I, T>(&self, fact: I)
    where
        I: IntoIterator<Item = T>,
        T: Into<LTerm>,
    {
        let fact: Vec<LTerm> = fact.into_iter().map(Into::into).collect();
        self.base.borrow_mut().insert(fact);
    }

    /// Applying the relation to arguments is a goal constructor.
    pub fn apply<I, T>(&self, args: I) -> Goal
    where
        I: IntoIterator<Item = T>,
        T: Into<LTerm>,
    {
        let args: Vec<LTerm> = args.into_iter().map(Into::into).collect();
        Goal::dynamic(Rc::new(FactsGoal {
            relation: self.clone(),
            args,
        }))
    }
}

/// Inserts facts into a relation.
pub fn facts<I, F, T>(relation: &Relation, tuples: I)
where
    I: IntoIterator<Item = F>,
    F: IntoIterator<Item = T>,
    T: Into<LTerm>,
{
    for tuple in tuples {
        relation.fact(tuple);
    }
}

struct FactsGoal {
    relation: Relation,
    args: Vec<LTerm>,
}

impl Solve for FactsGoal {
    fn solve(&self, solver: &Solver, state: State) -> Stream {
        let base = self.relation.base.borrow();
        if base.arity != Some(self.args.len()) {
            // No facts of this arity.
            return Stream::empty();
        }

        let walked_args: Vec<LTerm> = self
            .args
            .iter()
            .map(|arg| state.smap_ref().walk_star(arg))
            .collect();
        let cases: Vec<Vec<LTerm>> = base
            .candidates(&walked_args)
            .into_iter()
            .map(|id| base.facts[id].clone())
            .collect();
        drop(base);

        let args = self.args.clone();
        map_sum(
            solver,
            state,
            |fact| {
                lall(
                    args.iter()
                        .zip(fact.into_iter())
                        .map(|(arg, value)| eq(arg.clone(), value)),
                )
            },
            cases,
        )
    }
}

impl fmt::Debug for FactsGoal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FactsGoal({}, {:?})", self.relation.name, self.args)
    }
}
