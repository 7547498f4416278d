use thiserror::Error;

/// Errors that abort a query.
///
/// Logical failure is not an error: a goal that cannot be satisfied produces
/// an empty stream and the search simply backtracks. The variants here are
/// conditions that the caller must be able to tell apart from "no solutions",
/// and they propagate out of [`run`](crate::query::run) unchanged.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// A goal required a ground argument but found an unbound variable at
    /// query time, e.g. `membero` over an unbound collection.
    #[error("{relation} requires a ground argument, found unbound {term}")]
    NonGround {
        relation: &'static str,
        term: String,
    },
}

impl Error {
    pub fn non_ground(relation: &'static str, term: impl std::fmt::Display) -> Error {
        Error::NonGround {
            relation,
            term: term.to_string(),
        }
    }
}
