//! User-defined compound terms.
//!
//! The built-in compound form is the list whose first element is the head
//! operator. Any other tree-shaped host type can participate in unification
//! and graph walking by implementing [`CompoundObject`]: the engine only ever
//! sees a compound through its head, its ordered children, and
//! `reconstruct`, which rebuilds a compound of the same class from walked
//! children.
//!
//! Unification of compound pairs is open: [`register_unify`] installs an
//! override for a pair of compound types, consulted before the default
//! structural treatment (same class, equal heads, equal-length children
//! unified pairwise). Registration is additive and the last registration for
//! a pair wins. Terms are reference-counted and single-threaded, so the
//! registry is per-thread.

use crate::lterm::LTerm;
use crate::state::{SMap, SResult, State};
use std::any::{Any, TypeId};
use std::cell::RefCell;
use std::collections::HashMap;
use std::hash::{Hash, Hasher};
use std::rc::Rc;

pub trait CompoundObject: CompoundHash + CompoundEq + CompoundAs + std::fmt::Debug {
    fn type_name(&self) -> &'static str {
        ""
    }

    /// The head operator of the compound.
    fn head(&self) -> LTerm;

    /// The ordered children of the compound. May be empty.
    fn children(&self) -> Vec<LTerm>;

    /// Builds a new compound of the same class from a head and children.
    ///
    /// Implementations must panic on an arity mismatch; a wrong-length child
    /// sequence is a programmer error, not a logical failure.
    fn reconstruct(&self, head: LTerm, children: Vec<LTerm>) -> LTerm;

    /// Structurally rebuilds the compound with all subterms walked in `smap`.
    fn walk_star(&self, smap: &SMap) -> LTerm {
        let head = smap.walk_star(&self.head());
        let children = self
            .children()
            .iter()
            .map(|child| smap.walk_star(child))
            .collect();
        self.reconstruct(head, children)
    }
}

pub trait CompoundAs: Any {
    fn as_any(&self) -> &dyn Any;

    fn as_object(&self) -> &dyn CompoundObject;
}

impl<T> CompoundAs for T
where
    T: CompoundObject,
{
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_object(&self) -> &dyn CompoundObject {
        self
    }
}

pub trait CompoundEq {
    fn compound_eq(&self, other: &dyn CompoundObject) -> bool;
}

impl<T> CompoundEq for T
where
    T: PartialEq + CompoundObject,
{
    fn compound_eq(&self, other: &dyn CompoundObject) -> bool {
        match other.as_any().downcast_ref::<T>() {
            Some(other_object) => self.eq(other_object),
            None => false,
        }
    }
}

pub trait CompoundHash {
    fn compound_hash(&self, state: &mut dyn Hasher);
}

impl<T> CompoundHash for T
where
    T: Hash + CompoundObject + ?Sized,
{
    fn compound_hash(&self, mut state: &mut dyn Hasher) {
        self.hash(&mut state);
    }
}

impl PartialEq for dyn CompoundObject {
    fn eq(&self, other: &dyn CompoundObject) -> bool {
        self.compound_eq(other)
    }
}

impl Hash for dyn CompoundObject {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.compound_hash(state);
    }
}

/// Unification override for a pair of compound types.
///
/// The function receives both objects with their registered types already
/// matched, the current state, and the extension map that collects the
/// substitutions added by the enclosing unification.
pub type CompoundUnifyFn =
    fn(&Rc<dyn CompoundObject>, &Rc<dyn CompoundObject>, State, &mut SMap) -> SResult;

thread_local! {
    static UNIFY_REGISTRY: RefCell<HashMap<(TypeId, TypeId), CompoundUnifyFn>> =
        RefCell::new(HashMap::new());
}

/// Registers a unification override for the compound type pair `(A, B)`.
///
/// The override is consulted for `(A, B)` pairs in both argument orders;
/// registering again for the same pair replaces the previous function.
pub fn register_unify<A, B>(f: CompoundUnifyFn)
where
    A: CompoundObject,
    B: CompoundObject,
{
    UNIFY_REGISTRY.with(|registry| {
        registry
            .borrow_mut()
            .insert((TypeId::of::<A>(), TypeId::of::<B>()), f);
    });
}

/// Looks up a registered unification override for the types of `u` and `v`.
/// The boolean is true when the arguments must be swapped to match the
/// registered order.
pub(crate) fn registered_unify(
    u: &Rc<dyn CompoundObject>,
    v: &Rc<dyn CompoundObject>,
) -> Option<(CompoundUnifyFn, bool)> {
    let ut = u.as_any().type_id();
    let vt = v.as_any().type_id();
    UNIFY_REGISTRY.with(|registry| {
        let registry = registry.borrow();
        if let Some(f) = registry.get(&(ut, vt)) {
            Some((*f, false))
        } else {
            registry.get(&(vt, ut)).map(|f| (*f, true))
        }
    })
}

// An (LTerm, LTerm) pair is the simplest user compound: the first element is
// the head, the second the single child.
impl CompoundObject for (LTerm, LTerm) {
    fn type_name(&self) -> &'static str {
        "pair"
    }

    fn head(&self) -> LTerm {
        self.0.clone()
    }

    fn children(&self) -> Vec<LTerm> {
        vec![self.1.clone()]
    }

    fn reconstruct(&self, head: LTerm, mut children: Vec<LTerm>) -> LTerm {
        if children.len() != 1 {
            panic!(
                "arity mismatch reconstructing pair: expected 1 child, got {}",
                children.len()
            );
        }
        LTerm::compound(Rc::new((head, children.pop().unwrap())))
    }
}

impl From<(LTerm, LTerm)> for LTerm {
    fn from(u: (LTerm, LTerm)) -> LTerm {
        LTerm::compound(Rc::new(u))
    }
}
