//! Hash join over a keyed lookup of the inner sequence.

use asyncq_core::comparer::EqualityComparer;

use crate::group::Lookup;

/// Inner join: one result per matching (outer, inner) pair.
///
/// Results follow outer source order, then inner source order within a key.
/// Outer elements without a match produce nothing.
pub fn join<O, I, K, R, II, OK, IK, RF, C>(
    outer: Vec<O>,
    inner: II,
    mut outer_key: OK,
    inner_key: IK,
    mut result: RF,
    comparer: C,
) -> Vec<R>
where
    II: IntoIterator<Item = I>,
    OK: FnMut(&O) -> K,
    IK: FnMut(&I) -> K,
    RF: FnMut(&O, &I) -> R,
    C: EqualityComparer<K>,
{
    let lookup = Lookup::build(inner.into_iter().collect(), inner_key, |i| i, comparer);
    let mut out = Vec::new();
    for o in &outer {
        let key = outer_key(o);
        out.extend(lookup.get(&key).iter().map(|i| result(o, i)));
    }
    out
}

/// One result per outer element, paired with every matching inner element
/// (possibly none).
pub fn group_join<O, I, K, R, II, OK, IK, RF, C>(
    outer: Vec<O>,
    inner: II,
    mut outer_key: OK,
    inner_key: IK,
    mut result: RF,
    comparer: C,
) -> Vec<R>
where
    II: IntoIterator<Item = I>,
    OK: FnMut(&O) -> K,
    IK: FnMut(&I) -> K,
    RF: FnMut(O, &[I]) -> R,
    C: EqualityComparer<K>,
{
    let lookup = Lookup::build(inner.into_iter().collect(), inner_key, |i| i, comparer);
    outer
        .into_iter()
        .map(|o| {
            let key = outer_key(&o);
            result(o, lookup.get(&key))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use asyncq_core::comparer::DefaultEquality;

    #[derive(Debug, Clone, PartialEq)]
    struct Row {
        id: u32,
        v: &'static str,
    }

    #[test]
    fn join_pairs_in_inner_order() {
        let outer = vec![1u32, 2];
        let inner = vec![Row { id: 1, v: "a" }, Row { id: 1, v: "b" }];
        let out = join(
            outer,
            inner,
            |o| *o,
            |i| i.id,
            |o, i| (*o, i.v),
            DefaultEquality,
        );
        assert_eq!(out, vec![(1, "a"), (1, "b")]);
    }

    #[test]
    fn join_follows_outer_order() {
        let out = join(
            vec!["y", "x", "y"],
            vec![("x", 1), ("y", 2), ("y", 3)],
            |o| o.to_string(),
            |i| i.0.to_string(),
            |o, i| format!("{o}{}", i.1),
            DefaultEquality,
        );
        assert_eq!(out, vec!["y2", "y3", "x1", "y2", "y3"]);
    }

    #[test]
    fn group_join_keeps_unmatched_outer() {
        let out = group_join(
            vec![1u32, 2, 3],
            vec![Row { id: 3, v: "c" }, Row { id: 1, v: "a" }, Row { id: 3, v: "d" }],
            |o| *o,
            |i| i.id,
            |o, rows| (o, rows.iter().map(|r| r.v).collect::<Vec<_>>()),
            DefaultEquality,
        );
        assert_eq!(
            out,
            vec![(1, vec!["a"]), (2, vec![]), (3, vec!["c", "d"])]
        );
    }
}
