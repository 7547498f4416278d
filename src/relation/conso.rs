use crate::goal::Goal;
use crate::lterm::LTerm;
use crate::operator::fresh::fresh;
use crate::relation::eq::eq;

/// A relation such that `list` is `head` prepended to `tail`.
///
/// Fully relational: any of the three terms may be unbound.
pub fn conso(head: impl Into<LTerm>, tail: impl Into<LTerm>, list: impl Into<LTerm>) -> Goal {
    eq(LTerm::cons(head.into(), tail.into()), list)
}

/// A relation such that `head` is the first element of `list`.
pub fn heado(list: impl Into<LTerm>, head: impl Into<LTerm>) -> Goal {
    let list = list.into();
    let head = head.into();
    fresh(1, move |vs| {
        conso(head.clone(), vs[0].clone(), list.clone())
    })
}

/// A relation such that `tail` is `list` without its first element.
pub fn tailo(list: impl Into<LTerm>, tail: impl Into<LTerm>) -> Goal {
    let list = list.into();
    let tail = tail.into();
    fresh(1, move |vs| {
        conso(vs[0].clone(), tail.clone(), list.clone())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::list;
    use crate::query::run;

    #[test]
    fn test_conso_forward() {
        let q = LTerm::var("q");
        let solutions = run(0, &q, [conso(1, list![2, 3], q.clone())]).unwrap();
        assert_eq!(solutions, vec![list![1, 2, 3]]);
    }

    #[test]
    fn test_conso_backward() {
        // Any one of the three may be unbound.
        let q = LTerm::var("q");
        let solutions = run(0, &q, [conso(q.clone(), list![2, 3], list![1, 2, 3])]).unwrap();
        assert_eq!(solutions, vec![LTerm::from(1)]);

        let solutions = run(0, &q, [conso(1, q.clone(), list![1, 2, 3])]).unwrap();
        assert_eq!(solutions, vec![list![2, 3]]);
    }

    #[test]
    fn test_heado_tailo() {
        let q = LTerm::var("q");
        let solutions = run(0, &q, [heado(list![1, 2, 3], q.clone())]).unwrap();
        assert_eq!(solutions, vec![LTerm::from(1)]);

        let solutions = run(0, &q, [tailo(list![1, 2, 3], q.clone())]).unwrap();
        assert_eq!(solutions, vec![list![2, 3]]);
    }

    #[test]
    fn test_heado_empty_fails() {
        let q = LTerm::var("q");
        let solutions = run(0, &q, [heado(list![], q.clone())]).unwrap();
        assert!(solutions.is_empty());
    }
}
