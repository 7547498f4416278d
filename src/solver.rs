use crate::error::Error;
use crate::goal::Goal;
use crate::state::State;
use crate::stream::{Lazy, LazyStream, Stream};
use std::cell::Cell;
use std::fmt;
use tracing::trace;

/// Pull-based driver of the search.
///
/// The solver forces lazy stream nodes one step at a time; nothing in a
/// query is evaluated until the consumer asks for the next state. The step
/// counter only feeds trace logging.
#[derive(Debug, Default)]
pub struct Solver {
    steps: Cell<u64>,
}

impl Solver {
    pub fn new() -> Solver {
        Solver::default()
    }

    pub fn start(&self, goal: &Goal, initial_state: State) -> Stream {
        goal.solve(self, initial_state)
    }

    /// Forces one lazy node into a (possibly still lazy) stream.
    pub fn step(&self, lazy: Lazy) -> Stream {
        self.steps.set(self.steps.get() + 1);
        match lazy {
            Lazy::Pause(state, goal) => goal.solve(self, *state),
            Lazy::MPlus(s1, s2) => {
                let stream = self.step(*s1.0);
                Stream::mplus(stream, s2)
            }
            Lazy::Bind(s, goal) => {
                let stream = self.step(*s.0);
                Stream::bind(stream, goal)
            }
            Lazy::Delay(stream) => stream,
        }
    }

    /// Advances the stream to its next state, if any. An error node aborts
    /// the stream and is handed to the caller.
    pub fn next(&self, stream: &mut Stream) -> Option<Result<Box<State>, Error>> {
        loop {
            match std::mem::replace(stream, Stream::Empty) {
                Stream::Empty => return None,
                Stream::Unit(state) => {
                    trace!(steps = self.steps.get(), "solution");
                    return Some(Ok(state));
                }
                Stream::Lazy(LazyStream(lazy)) => *stream = self.step(*lazy),
                Stream::Cons(state, lazy_stream) => {
                    *stream = Stream::Lazy(lazy_stream);
                    trace!(steps = self.steps.get(), "solution");
                    return Some(Ok(state));
                }
                Stream::Error(error) => return Some(Err(error)),
            }
        }
    }

    /// Truncates the stream to at most its first state.
    pub fn trunc(&self, mut stream: Stream) -> Stream {
        loop {
            match stream {
                Stream::Empty => return Stream::Empty,
                Stream::Unit(a) | Stream::Cons(a, _) => return Stream::Unit(a),
                Stream::Lazy(LazyStream(lazy)) => stream = self.step(*lazy),
                Stream::Error(error) => return Stream::Error(error),
            }
        }
    }
}

/// Implemented by every dynamic goal.
pub trait Solve: fmt::Debug {
    /// Generate a stream of solutions to the goal by applying it to some
    /// initial state.
    fn solve(&self, solver: &Solver, state: State) -> Stream;
}
