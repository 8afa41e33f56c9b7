//! Set operators under a pluggable `EqualityComparer`.
//!
//! Each operator indexes borrowed elements first, marks the survivors, and
//! only then moves them out, so no element is cloned. Output order is always
//! first-appearance order of the first sequence (then the second, for union).

use asyncq_core::comparer::EqualityComparer;

use crate::index::{retain_marked, ByRef, KeyIndex};

/// First occurrence of each equivalence class.
pub fn distinct<T, C>(items: Vec<T>, comparer: C) -> Vec<T>
where
    C: EqualityComparer<T>,
{
    let keep = {
        let mut seen = KeyIndex::with_capacity(ByRef(&comparer), items.len());
        items.iter().map(|item| seen.insert(item).1).collect::<Vec<_>>()
    };
    retain_marked(items, &keep)
}

pub fn union<T, I, C>(mut items: Vec<T>, second: I, comparer: C) -> Vec<T>
where
    I: IntoIterator<Item = T>,
    C: EqualityComparer<T>,
{
    items.extend(second);
    distinct(items, comparer)
}

/// Elements of the first sequence that also occur in `second`, each class at
/// most once.
pub fn intersect<T, I, C>(items: Vec<T>, second: I, comparer: C) -> Vec<T>
where
    I: IntoIterator<Item = T>,
    C: EqualityComparer<T>,
{
    let second: Vec<T> = second.into_iter().collect();
    let keep = {
        let mut probe = KeyIndex::with_capacity(ByRef(&comparer), second.len());
        for item in &second {
            probe.insert(item);
        }
        let mut taken = vec![false; probe.len()];
        items
            .iter()
            .map(|item| match probe.find(&item) {
                Some(slot) if !taken[slot] => {
                    taken[slot] = true;
                    true
                }
                _ => false,
            })
            .collect::<Vec<_>>()
    };
    retain_marked(items, &keep)
}

/// Elements of the first sequence absent from `second`, de-duplicated.
pub fn except<T, I, C>(items: Vec<T>, second: I, comparer: C) -> Vec<T>
where
    I: IntoIterator<Item = T>,
    C: EqualityComparer<T>,
{
    let second: Vec<T> = second.into_iter().collect();
    let keep = {
        let mut seen = KeyIndex::with_capacity(ByRef(&comparer), second.len() + items.len());
        for item in &second {
            seen.insert(item);
        }
        items.iter().map(|item| seen.insert(item).1).collect::<Vec<_>>()
    };
    retain_marked(items, &keep)
}

/// Same length and pairwise equal in order.
pub fn sequence_equal<T, I, C>(items: &[T], second: I, comparer: C) -> bool
where
    I: IntoIterator<Item = T>,
    C: EqualityComparer<T>,
{
    let second: Vec<T> = second.into_iter().collect();
    items.len() == second.len()
        && items
            .iter()
            .zip(&second)
            .all(|(a, b)| comparer.equals(a, b))
}
