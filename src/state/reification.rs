use crate::lterm::{LTerm, LTermInner};
use crate::state::State;
use std::collections::HashMap;

/// Reifies a term against a state.
///
/// The term is deep-walked in the state's substitution, and every variable
/// that remains unbound is renamed to a stable placeholder. Placeholders are
/// numbered in left-to-right first-occurrence order, independently of the
/// variables' internal ids, so that reified results are comparable across
/// runs. A placeholder prints as `~name` when the variable was named, and
/// `~_k` otherwise.
pub fn reify_term(state: &State, t: &LTerm) -> LTerm {
    let walked = state.smap_ref().walk_star(t);
    let mut renames = HashMap::new();
    rename_free(&walked, &mut renames)
}

fn rename_free(t: &LTerm, renames: &mut HashMap<LTerm, LTerm>) -> LTerm {
    match t.as_ref() {
        LTermInner::Var(_, name) => match renames.get(t) {
            Some(placeholder) => placeholder.clone(),
            None => {
                let placeholder = LTerm::reified(renames.len(), *name);
                renames.insert(t.clone(), placeholder.clone());
                placeholder
            }
        },
        LTermInner::Cons(head, tail) => {
            LTerm::cons(rename_free(head, renames), rename_free(tail, renames))
        }
        LTermInner::Compound(object) => {
            let head = rename_free(&object.head(), renames);
            let children = object
                .children()
                .iter()
                .map(|child| rename_free(child, renames))
                .collect();
            object.reconstruct(head, children)
        }
        _ => t.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::list;

    #[test]
    fn test_reify_ground() {
        let state = State::new();
        let t = list![1, 2, 3];
        assert_eq!(reify_term(&state, &t), t);
    }

    #[test]
    fn test_reify_bound_var() {
        let x = LTerm::any();
        let state = State::new().unify(&x, &LTerm::from(5)).unwrap();
        assert_eq!(reify_term(&state, &x), 5);
    }

    #[test]
    fn test_reify_free_vars_first_occurrence_order() {
        let x = LTerm::any();
        let y = LTerm::any();
        let state = State::new();
        let t = LTerm::from_vec(vec![x.clone(), y.clone(), x.clone()]);
        let r = reify_term(&state, &t);
        assert_eq!(format!("{}", r), "[~_0, ~_1, ~_0]");

        // The numbering depends on occurrence order, not on variable ids.
        let t = LTerm::from_vec(vec![y, x.clone(), x]);
        let r = reify_term(&state, &t);
        assert_eq!(format!("{}", r), "[~_0, ~_1, ~_1]");
    }

    #[test]
    fn test_reify_stability() {
        // Reifying the same state twice yields identical output.
        let x = LTerm::any();
        let y = LTerm::any();
        let state = State::new().unify(&x, &list![1, y]).unwrap();
        let r1 = reify_term(&state, &x);
        let r2 = reify_term(&state, &x);
        assert_eq!(r1, r2);
    }

    #[test]
    fn test_reify_named_var() {
        let q = LTerm::var("q");
        let state = State::new();
        assert_eq!(format!("{}", reify_term(&state, &q)), "~q");
    }
}
