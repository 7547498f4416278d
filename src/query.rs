use crate::error::Error;
use crate::goal::Goal;
use crate::lterm::LTerm;
use crate::operator::all::lall;
use crate::solver::Solver;
use crate::state::{reify_term, State};
use crate::stream::Stream;
use std::collections::HashSet;
use std::iter::FusedIterator;
use tracing::debug;

/// Query-level knobs.
#[derive(Debug, Clone, Copy, Default)]
pub struct Settings {
    /// Enable the occurs check in unification. Off by default; the standard
    /// relational idioms assume its absence.
    pub occurs_check: bool,
}

/// Iterator over the distinct reified solutions of a query.
///
/// The stream is pull-based: no part of the search runs until `next` is
/// called, and dropping the iterator abandons the rest of the search. Each
/// distinct reified value is yielded once; an error aborts the iteration.
pub struct RunIterator {
    solver: Solver,
    query: LTerm,
    stream: Stream,
    seen: HashSet<LTerm>,
    failed: bool,
}

impl RunIterator {
    pub fn new(query: LTerm, goal: Goal, initial_state: State) -> RunIterator {
        let solver = Solver::new();
        let stream = solver.start(&goal, initial_state);
        RunIterator {
            solver,
            query,
            stream,
            seen: HashSet::new(),
            failed: false,
        }
    }
}

impl Iterator for RunIterator {
    type Item = Result<LTerm, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        loop {
            match self.solver.next(&mut self.stream)? {
                Ok(state) => {
                    let reified = reify_term(&state, &self.query);
                    if self.seen.insert(reified.clone()) {
                        return Some(Ok(reified));
                    }
                }
                Err(error) => {
                    self.failed = true;
                    return Some(Err(error));
                }
            }
        }
    }
}

// The underlying stream keeps returning None once exhausted, and an error
// latches the iterator shut.
impl FusedIterator for RunIterator {}

/// Creates the solution iterator for a query without bounding the number of
/// solutions.
///
/// `query` is the term reified against each solution state; it is typically
/// a variable or a list of variables.
pub fn run_iter<Q, G>(query: Q, goals: G) -> RunIterator
where
    Q: Into<LTerm>,
    G: IntoIterator<Item = Goal>,
{
    run_iter_with(Settings::default(), query, goals)
}

/// [`run_iter`] with explicit [`Settings`].
pub fn run_iter_with<Q, G>(settings: Settings, query: Q, goals: G) -> RunIterator
where
    Q: Into<LTerm>,
    G: IntoIterator<Item = Goal>,
{
    let query = query.into();
    let goal = lall(goals);
    debug!("run {}", query);
    let initial_state = State::new().with_occurs_check(settings.occurs_check);
    RunIterator::new(query, goal, initial_state)
}

/// Runs a query for up to `n` distinct solutions.
///
/// Seeds the empty state, conjoins the goals, walks the resulting stream,
/// and reifies `query` against each yielded state. Duplicates are suppressed
/// on the reified representation. `n = 0` exhausts the stream, which only
/// terminates when the search space is finite.
///
/// # Example
/// ```rust
/// use kanrel::prelude::*;
///
/// let x = var("x");
/// let z = var("z");
/// let solutions = run(
///     1,
///     list![x.clone(), z.clone()],
///     [eq(x.clone(), z.clone()), eq(z.clone(), 3)],
/// )
/// .unwrap();
/// assert_eq!(solutions, vec![list![3, 3]]);
/// ```
pub fn run<Q, G>(n: usize, query: Q, goals: G) -> Result<Vec<LTerm>, Error>
where
    Q: Into<LTerm>,
    G: IntoIterator<Item = Goal>,
{
    run_with(Settings::default(), n, query, goals)
}

/// [`run`] with explicit [`Settings`].
pub fn run_with<Q, G>(settings: Settings, n: usize, query: Q, goals: G) -> Result<Vec<LTerm>, Error>
where
    Q: Into<LTerm>,
    G: IntoIterator<Item = Goal>,
{
    let iter = run_iter_with(settings, query, goals);
    let mut solutions = vec![];
    for result in iter {
        solutions.push(result?);
        if n != 0 && solutions.len() == n {
            break;
        }
    }
    Ok(solutions)
}
