use crate::lterm::LTerm;
use crate::relation::diseq::DisequalityConstraint;
use std::rc::Rc;
use tracing::trace;

mod substitution;
pub use substitution::SMap;

mod unification;
pub use unification::unify_rec;

pub mod constraint;
pub use constraint::Constraint;

use constraint::store::ConstraintStore;

mod reification;
pub use reification::reify_term;

pub type SResult = Result<State, ()>;

/// Logic program state
///
/// The `State` structure represents a state of the search. A logic program
/// consists of goals, which when applied to states, produce streams of
/// states. Each state is a solution to a (part of) logic program. The
/// `State` can be cloned and each clone can be modified independently of
/// each other; the substitution map and the constraint store are
/// clone-on-write.
///
/// Invariant: every constraint in the store is consistent with the current
/// substitution. Unification revalidates the store against each extension
/// and discards the state on violation.
#[derive(Clone, Debug)]
pub struct State {
    /// The substitution map
    smap: Rc<SMap>,

    /// The constraint store
    cstore: Rc<ConstraintStore>,

    occurs_check: bool,
}

impl State {
    pub fn new() -> State {
        State {
            smap: Rc::new(SMap::new()),
            cstore: Rc::new(ConstraintStore::new()),
            occurs_check: false,
        }
    }

    /// Enables or disables the occurs check for all unifications in this
    /// state and its descendants. Off by default; the standard relational
    /// idioms assume its absence.
    pub fn with_occurs_check(mut self, occurs_check: bool) -> State {
        self.occurs_check = occurs_check;
        self
    }

    pub fn occurs_check_enabled(&self) -> bool {
        self.occurs_check
    }

    /// Return a reference to the substitution map of the state
    pub fn smap_ref(&self) -> &SMap {
        self.smap.as_ref()
    }

    pub fn smap_to_mut(&mut self) -> &mut SMap {
        Rc::make_mut(&mut self.smap)
    }

    /// Returns the state with replaced substitution map
    pub fn with_smap(self, smap: SMap) -> State {
        State {
            smap: Rc::new(smap),
            ..self
        }
    }

    /// Get a cloned reference to the substitution map of the state
    pub fn get_smap(&self) -> Rc<SMap> {
        Rc::clone(&self.smap)
    }

    /// Return a reference to the constraint store of the state
    pub fn cstore_ref(&self) -> &ConstraintStore {
        self.cstore.as_ref()
    }

    pub fn cstore_to_mut(&mut self) -> &mut ConstraintStore {
        Rc::make_mut(&mut self.cstore)
    }

    pub fn get_cstore(&self) -> Rc<ConstraintStore> {
        Rc::clone(&self.cstore)
    }

    /// Return the state with a new constraint
    pub fn with_constraint(mut self, constraint: Rc<dyn Constraint>) -> State {
        self.cstore_to_mut().push_and_normalize(constraint);
        self
    }

    pub fn take_constraint(
        mut self,
        constraint: &Rc<dyn Constraint>,
    ) -> (State, Option<Rc<dyn Constraint>>) {
        match self.cstore_to_mut().take(constraint) {
            Some(constraint) => (self, Some(constraint)),
            None => (self, None),
        }
    }

    /// Runs all constraints from the constraint store on the current state.
    /// If any of the constraints fail, the state is discarded. Otherwise the
    /// state is returned with an updated constraint store.
    pub fn run_constraints(mut self) -> SResult {
        let constraints = self
            .cstore
            .iter()
            .cloned()
            .collect::<Vec<Rc<dyn Constraint>>>();

        // Each constraint is first removed from the store and then run
        // against the state. If the constraint does not want to be removed
        // from the store, it adds itself back when it is run.
        for constraint in constraints.into_iter() {
            self = match self.take_constraint(&constraint) {
                (unconstrained_state, Some(constraint)) => {
                    match constraint.run(unconstrained_state) {
                        Ok(constrained_state) => constrained_state,
                        Err(error) => {
                            trace!("constraint violation");
                            return Err(error);
                        }
                    }
                }
                (constrained_state, None) => constrained_state, /* Constraint has removed itself. */
            };
        }

        Ok(self)
    }

    /// Processes the extension to the substitution
    ///
    /// The extension consists of all substitutions added in a single
    /// unification. Every constraint in the store is revalidated against
    /// the extended substitution.
    fn process_extension(self, extension: SMap) -> SResult {
        if extension.is_empty() {
            Ok(self)
        } else {
            self.run_constraints()
        }
    }

    pub fn unify(self, u: &LTerm, v: &LTerm) -> SResult {
        // Extension will contain all substitutions added in the recursive
        // unification of the terms
        let mut extension = SMap::new();
        unify_rec(self, &mut extension, u, v)?.process_extension(extension)
    }

    /// Add a disequality constraint between `u` and `v`
    ///
    /// Disunification is implemented in terms of unification: the terms are
    /// unified in a scratch copy of the state, and the extension that the
    /// unification would have added becomes the list of pairs of which at
    /// least one must eventually fail to unify.
    pub fn disunify(self, u: &LTerm, v: &LTerm) -> SResult {
        let mut extension = SMap::new();
        match unify_rec(self.clone(), &mut extension, u, v) {
            Ok(_) => {
                if extension.is_empty() {
                    // Unification succeeded without extending the current
                    // substitution, therefore the terms are already equal
                    // and the disequality constraint fails.
                    Err(())
                } else {
                    // Unification succeeded with an extended substitution
                    // map. Instead of adding the substitutions to the state,
                    // we add the corresponding constraint, against which
                    // later unifications will be verified.
                    let c = DisequalityConstraint::new(extension);
                    Ok(self.with_constraint(c))
                }
            }
            Err(_) => Ok(self),
        }
    }
}

impl Default for State {
    fn default() -> State {
        State::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_unify() {
        let x = LTerm::any();
        let state = State::new().unify(&x, &LTerm::from(1)).unwrap();
        assert_eq!(*state.smap_ref().walk(&x), 1);

        // A variable cannot be two different atoms at once.
        assert!(state.unify(&x, &LTerm::from(2)).is_err());
    }

    #[test]
    fn test_state_disunify() {
        let x = LTerm::any();

        // Posting x =/= 1 and then unifying x with 1 fails,
        let state = State::new().disunify(&x, &LTerm::from(1)).unwrap();
        assert!(state.clone().unify(&x, &LTerm::from(1)).is_err());

        // while unifying with another atom is fine.
        assert!(state.unify(&x, &LTerm::from(2)).is_ok());
    }

    #[test]
    fn test_state_disunify_already_equal() {
        let x = LTerm::any();
        let state = State::new().unify(&x, &LTerm::from(1)).unwrap();
        assert!(state.disunify(&x, &LTerm::from(1)).is_err());
    }
}
