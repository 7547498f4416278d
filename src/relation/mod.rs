use crate::goal::Goal;
use crate::solver::Solver;
use crate::state::State;
use crate::stream::{LazyStream, Stream};

pub mod alwayso;
pub mod appendo;
pub mod conso;
pub mod diseq;
pub mod eq;
pub mod facts;
pub mod groundo;
pub mod membero;
pub mod nevero;
pub mod typeo;

pub use alwayso::alwayso;
pub use appendo::appendo;
pub use conso::{conso, heado, tailo};
pub use diseq::neq;
pub use eq::eq;
pub use facts::{facts, Relation};
pub use groundo::groundo;
pub use membero::membero;
pub use nevero::nevero;
pub use typeo::{not_typeo, typeo, TypePredicate};

/// Builds a fair disjunction over the streams produced by applying `f` to
/// each item, preserving item order in the solution stream.
pub(crate) fn map_sum<T, F>(solver: &Solver, state: State, mut f: F, items: Vec<T>) -> Stream
where
    F: FnMut(T) -> Goal,
{
    let mut iter = items.into_iter().rev().peekable();
    let mut stream = Stream::empty();
    while let Some(d) = iter.next() {
        if iter.peek().is_none() {
            // Last item; no need to clone `state`.
            let new_stream = f(d).solve(solver, state);
            return Stream::mplus(new_stream, LazyStream::delay(stream));
        } else {
            let new_stream = f(d).solve(solver, state.clone());
            stream = Stream::mplus(new_stream, LazyStream::delay(stream));
        }
    }
    stream
}
