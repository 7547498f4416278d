use crate::lterm::LTerm;
use crate::state::{SResult, State};
use std::any::{Any, TypeId};
use std::fmt::{Debug, Display};
use std::hash::{Hash, Hasher};
use std::ptr;
use std::rc::Rc;

pub mod store;

/// A predicate attached to a state that must remain satisfiable as the
/// substitution grows.
///
/// `run` is invoked when the constraint is posted and again whenever a
/// unification extends the substitution. A constraint that is decided
/// returns the state without re-adding itself (satisfied) or fails the
/// state (violated); a constraint that is still pending adds itself back to
/// the store.
pub trait Constraint: Debug + Display + AnyConstraint {
    fn run(self: Rc<Self>, state: State) -> SResult;

    /// The variables this constraint mentions.
    fn operands(&self) -> Vec<LTerm>;
}

pub trait AnyConstraint: Any {
    fn as_any(&self) -> &dyn Any;
}

impl<T> AnyConstraint for T
where
    T: Constraint,
{
    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl dyn Constraint {
    #[inline]
    pub fn is<T: Constraint>(&self) -> bool {
        TypeId::of::<T>() == self.type_id()
    }

    #[inline]
    pub fn downcast_ref<T: Any + Constraint>(&self) -> Option<&T> {
        self.as_any().downcast_ref::<T>()
    }
}

// Constraints are stored and taken back out of the store by identity.
impl Hash for dyn Constraint {
    fn hash<H: Hasher>(&self, state: &mut H) {
        ptr::hash(self as *const Self, state)
    }
}

impl PartialEq for dyn Constraint {
    fn eq(&self, other: &Self) -> bool {
        ptr::eq(self, other)
    }
}

impl Eq for dyn Constraint {}
