use crate::lterm::{LTerm, LTermInner};
use std::collections::HashMap;
use std::ops::Deref;

/// Substitution map
///
/// Substitution maps track the binding of variables to terms. The map is
/// extended monotonically by unification; it never rebinds a variable.
#[derive(Clone, Debug, Default)]
pub struct SMap(HashMap<LTerm, LTerm>);

impl SMap {
    /// Construct an empty substitution map with no substitutions
    pub fn new() -> SMap {
        SMap(HashMap::new())
    }

    /// Extend substitution map with a new substitution
    pub fn extend(&mut self, k: LTerm, v: LTerm) {
        self.0.insert(k, v);
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Walk substitution map
    ///
    /// Walking the substitution map recursively traverses the map until no
    /// next term is found, or the term found is a non-variable.
    pub fn walk<'a>(&'a self, mut k: &'a LTerm) -> &'a LTerm {
        loop {
            match k.as_ref() {
                LTermInner::Var(_, _) => {
                    match self.0.get(k) {
                        Some(s) => k = s, // recurse for variable-kind
                        None => return k, // if no next term found
                    }
                }
                _ => return k, // if the term is not a variable
            }
        }
    }

    /// Deeper walk of substitution map
    ///
    /// Walks the substitution map recursively like `walk()`, but does not
    /// stop at lists or compounds, and instead recurses to do the deep walk
    /// also for the subterms. Returns a term which is a tree where all
    /// leaves are walked terms.
    pub fn walk_star(&self, v: &LTerm) -> LTerm {
        let v = self.walk(v);
        match v.as_ref() {
            LTermInner::Cons(head, tail) => LTerm::cons(self.walk_star(head), self.walk_star(tail)),
            LTermInner::Compound(object) => object.walk_star(self),
            _ => v.clone(),
        }
    }

    /// Check that the variable `x` is not contained in the term `v`.
    ///
    /// Occurs check is used to prevent unification of terms that would cause
    /// the variable to be contained in itself.
    pub fn occurs_check(&self, x: &LTerm, v: &LTerm) -> bool {
        match self.walk(v).as_ref() {
            LTermInner::Var(vvar, _) => match x.as_ref() {
                LTermInner::Var(xvar, _) => *vvar == *xvar,
                _ => false,
            },
            LTermInner::Cons(head, tail) => {
                self.occurs_check(x, head) || self.occurs_check(x, tail)
            }
            LTermInner::Compound(object) => {
                self.occurs_check(x, &object.head())
                    || object
                        .children()
                        .iter()
                        .any(|child| self.occurs_check(x, child))
            }
            _ => false,
        }
    }

    /// Returns the variable operands referenced by the substitution
    pub fn operands(&self) -> Vec<LTerm> {
        let mut operands = vec![];
        for (k, v) in self.0.iter() {
            operands.push(k.clone());
            if v.is_var() {
                operands.push(v.clone());
            }
        }
        operands
    }
}

impl IntoIterator for SMap {
    type Item = (LTerm, LTerm);
    type IntoIter = std::collections::hash_map::IntoIter<LTerm, LTerm>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl Deref for SMap {
    type Target = HashMap<LTerm, LTerm>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}
