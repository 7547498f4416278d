//! Relational rewriting over compound-term trees.
//!
//! [`reduceo`] closes a one-step rewriting relation under repeated
//! application; [`walko`] applies a relation at every position of a tree.
//! Composed, they relate an expression to its partially and fully rewritten
//! forms, in both directions: reduction of a ground input, expansion of a
//! ground output, or enumeration of related pairs when both ends are
//! unbound. There is no cycle detection; fair interleaving is what keeps
//! every solution reachable.

use crate::goal::Goal;
use crate::lterm::LTerm;
use std::rc::Rc;

mod applyo;
mod reduceo;
mod walko;

pub use applyo::applyo;
pub use reduceo::reduceo;
pub use walko::{map_anyo, walko, walko_with};

/// A binary relation over terms, as used by the graph combinators.
pub type TermRel = Rc<dyn Fn(LTerm, LTerm) -> Goal>;

#[cfg(test)]
pub(crate) mod testing {
    use crate::goal::Goal;
    use crate::list;
    use crate::lterm::LTerm;
    use crate::operator::any::conde;
    use crate::operator::fresh::fresh;
    use crate::relation::eq::eq;

    // add(x, x) <-> mul(2, x) and log(exp(x)) <-> x
    pub(crate) fn math_step(a: LTerm, b: LTerm) -> Goal {
        fresh(1, move |vs| {
            let x = vs[0].clone();
            conde(&[
                &[
                    eq(a.clone(), list!["add", x.clone(), x.clone()]),
                    eq(b.clone(), list!["mul", 2, x.clone()]),
                ],
                &[
                    eq(a.clone(), list!["log", list!["exp", x.clone()]]),
                    eq(b.clone(), x),
                ],
            ])
        })
    }
}
