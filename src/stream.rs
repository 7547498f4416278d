use crate::error::Error;
use crate::goal::Goal;
use crate::state::State;

/// Deferred stream node.
///
/// Evaluation of a lazy node advances only when the solver steps it; the
/// suspension points of the search are exactly these nodes.
#[derive(Debug)]
pub enum Lazy {
    Bind(LazyStream, Goal),
    MPlus(LazyStream, LazyStream),
    Pause(Box<State>, Goal),
    Delay(Stream),
}

#[derive(Debug)]
pub struct LazyStream(pub Box<Lazy>);

impl LazyStream {
    pub fn bind(ls: LazyStream, goal: Goal) -> LazyStream {
        LazyStream(Box::new(Lazy::Bind(ls, goal)))
    }

    pub fn mplus(ls1: LazyStream, ls2: LazyStream) -> LazyStream {
        LazyStream(Box::new(Lazy::MPlus(ls1, ls2)))
    }

    pub fn pause(state: Box<State>, goal: Goal) -> LazyStream {
        LazyStream(Box::new(Lazy::Pause(state, goal)))
    }

    pub fn delay(stream: Stream) -> LazyStream {
        LazyStream(Box::new(Lazy::Delay(stream)))
    }
}

/// Lazy stream of states.
///
/// A goal applied to a state produces a `Stream`; the solver pulls states
/// out of it one at a time. `Error` aborts the whole query: it is produced
/// by goals whose argument policy was violated (see [`Error`]) and
/// short-circuits both `mplus` and `bind`.
#[derive(Debug)]
pub enum Stream {
    Empty,
    Unit(Box<State>),
    Lazy(LazyStream),
    Cons(Box<State>, LazyStream),
    Error(Error),
}

impl Stream {
    pub fn is_empty(&self) -> bool {
        matches!(self, Stream::Empty)
    }

    pub fn unit(u: Box<State>) -> Stream {
        Stream::Unit(u)
    }

    pub fn empty() -> Stream {
        Stream::Empty
    }

    pub fn error(error: Error) -> Stream {
        Stream::Error(error)
    }

    pub fn cons(a: Box<State>, lazy: LazyStream) -> Stream {
        Stream::Cons(a, lazy)
    }

    pub fn lazy(lazy: LazyStream) -> Stream {
        Stream::Lazy(lazy)
    }

    /// Fair merge of a forced stream with an unforced one.
    ///
    /// When the forced stream is itself still lazy, the unforced argument is
    /// swapped in front of it. The swap is what makes the merge fair: a
    /// disjunct with infinitely many solutions cannot starve its sibling.
    pub fn mplus(stream: Stream, lazy: LazyStream) -> Stream {
        match stream {
            Stream::Empty => Stream::lazy(lazy),
            Stream::Lazy(lazy_hat) => Stream::lazy_mplus(lazy, lazy_hat),
            Stream::Unit(a) => Stream::cons(a, lazy),
            Stream::Cons(head, lazy_hat) => Stream::cons(head, LazyStream::mplus(lazy, lazy_hat)),
            Stream::Error(error) => Stream::Error(error),
        }
    }

    /// Fair flat-map: applies `goal` to every state of `stream`,
    /// interleaving the result streams instead of exhausting them in order.
    pub fn bind(stream: Stream, goal: Goal) -> Stream {
        if goal.is_succeed() {
            stream
        } else if goal.is_fail() {
            match stream {
                Stream::Error(error) => Stream::Error(error),
                _ => Stream::empty(),
            }
        } else {
            match stream {
                Stream::Empty => Stream::Empty,
                Stream::Lazy(lazy) => Stream::lazy_bind(lazy, goal),
                Stream::Unit(a) => Stream::pause(a, goal),
                Stream::Cons(state, lazy) => Stream::lazy_mplus(
                    LazyStream::pause(state, goal.clone()),
                    LazyStream::bind(lazy, goal),
                ),
                Stream::Error(error) => Stream::Error(error),
            }
        }
    }

    pub fn lazy_mplus(lazy: LazyStream, lazy_hat: LazyStream) -> Stream {
        Stream::Lazy(LazyStream::mplus(lazy, lazy_hat))
    }

    pub fn lazy_bind(lazy: LazyStream, goal: Goal) -> Stream {
        if goal.is_succeed() {
            Stream::lazy(lazy)
        } else if goal.is_fail() {
            Stream::empty()
        } else {
            Stream::Lazy(LazyStream::bind(lazy, goal))
        }
    }

    pub fn pause(state: Box<State>, goal: Goal) -> Stream {
        Stream::Lazy(LazyStream::pause(state, goal))
    }

    pub fn delay(stream: Stream) -> Stream {
        Stream::Lazy(LazyStream::delay(stream))
    }

    pub fn is_mature(&self) -> bool {
        !matches!(self, Stream::Lazy(_))
    }

    pub fn head(&self) -> Option<&State> {
        match self {
            Stream::Unit(a) | Stream::Cons(a, _) => Some(a),
            _ => None,
        }
    }
}
