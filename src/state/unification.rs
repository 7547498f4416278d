use crate::compound::registered_unify;
use crate::lterm::{LTerm, LTermInner};
use crate::state::{SMap, SResult, State};
use tracing::trace;

/// Recursive unification of two terms
///
/// On success the returned state's substitution extends the input state's,
/// and all substitutions added along the way are also collected into
/// `extension` so that the caller can revalidate constraints against them.
pub fn unify_rec(mut state: State, extension: &mut SMap, u: &LTerm, v: &LTerm) -> SResult {
    let uwalk = state.smap_ref().walk(u).clone();
    let vwalk = state.smap_ref().walk(v).clone();
    trace!("unify {} with {}", uwalk, vwalk);
    match (uwalk.as_ref(), vwalk.as_ref()) {
        (LTermInner::Var(uvar, _), LTermInner::Var(vvar, _)) if uvar == vvar => {
            // Both terms walk to the same variable, so they are already
            // unified in the current state.
            Ok(state)
        }
        (LTermInner::Var(_, _), _) => {
            // The term u is an unbound variable, and the term v is something
            // else. They unify by extending the substitution map.
            if state.occurs_check_enabled() && state.smap_ref().occurs_check(&uwalk, &vwalk) {
                Err(())
            } else {
                extension.extend(uwalk.clone(), vwalk.clone());
                state.smap_to_mut().extend(uwalk, vwalk);
                Ok(state)
            }
        }
        (_, LTermInner::Var(_, _)) => {
            if state.occurs_check_enabled() && state.smap_ref().occurs_check(&vwalk, &uwalk) {
                Err(())
            } else {
                extension.extend(vwalk.clone(), uwalk.clone());
                state.smap_to_mut().extend(vwalk, uwalk);
                Ok(state)
            }
        }
        (LTermInner::Val(uval), LTermInner::Val(vval)) if uval == vval => {
            // Two atoms unify exactly when the host values are equal.
            Ok(state)
        }
        (LTermInner::Reified(uidx, _), LTermInner::Reified(vidx, _)) if uidx == vidx => Ok(state),
        (LTermInner::Empty, LTermInner::Empty) => Ok(state),
        (LTermInner::Cons(uhead, utail), LTermInner::Cons(vhead, vtail)) => {
            let uhead = uhead.clone();
            let utail = utail.clone();
            let vhead = vhead.clone();
            let vtail = vtail.clone();
            let state = unify_rec(state, extension, &uhead, &vhead)?;
            unify_rec(state, extension, &utail, &vtail)
        }
        (LTermInner::Compound(uobj), LTermInner::Compound(vobj)) => {
            // A registered override for the type pair takes precedence over
            // the structural default.
            if let Some((unify_fn, swap)) = registered_unify(uobj, vobj) {
                if swap {
                    return unify_fn(vobj, uobj, state, extension);
                } else {
                    return unify_fn(uobj, vobj, state, extension);
                }
            }

            if uobj.as_any().type_id() != vobj.as_any().type_id() {
                return Err(());
            }
            let uchildren = uobj.children();
            let vchildren = vobj.children();
            if uchildren.len() != vchildren.len() {
                return Err(());
            }
            let mut state = unify_rec(state, extension, &uobj.head(), &vobj.head())?;
            for (uchild, vchild) in uchildren.iter().zip(vchildren.iter()) {
                state = unify_rec(state, extension, uchild, vchild)?;
            }
            Ok(state)
        }
        _ => Err(()),
    }
}
