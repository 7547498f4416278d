#![doc = include_str!("../README.md")]

pub mod compound;
pub mod error;
pub mod goal;
pub mod graph;
pub mod lterm;
pub mod lvalue;
pub mod operator;
pub mod query;
pub mod relation;
pub mod solver;
pub mod state;
pub mod stream;

pub use error::Error;

pub mod prelude {
    pub use crate::compound::{register_unify, CompoundObject};
    pub use crate::error::Error;
    pub use crate::goal::{fail, succeed, Goal};
    pub use crate::graph::{applyo, map_anyo, reduceo, walko, walko_with};
    pub use crate::list;
    pub use crate::lterm::{var, vars, LTerm};
    pub use crate::lvalue::LValue;
    pub use crate::operator::{conde, conj, defer, disj, fresh, lall, lany, onceo};
    pub use crate::query::{run, run_iter, run_iter_with, run_with, Settings};
    pub use crate::relation::{
        alwayso, appendo, conso, eq, facts, groundo, heado, membero, neq, nevero, not_typeo,
        tailo, typeo, Relation, TypePredicate,
    };
    pub use crate::solver::{Solve, Solver};
    pub use crate::state::{Constraint, State};
}
