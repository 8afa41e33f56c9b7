//! Grouping and keyed lookups.
//!
//! Building a group set runs in two phases: every key is derived and
//! partitioned first, then element selectors run, then result selectors.
//! Groups come out in first-appearance order of their key, and elements keep
//! source order within a group.

use serde::{Deserialize, Serialize};

use asyncq_core::comparer::{DefaultEquality, EqualityComparer};

use crate::index::KeyIndex;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grouping<K, V> {
    pub key: K,
    pub elements: Vec<V>,
}

impl<K, V> Grouping<K, V> {
    pub fn new(key: K, elements: Vec<V>) -> Self {
        Self { key, elements }
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn into_parts(self) -> (K, Vec<V>) {
        (self.key, self.elements)
    }
}

/// Key to element-list map with first-appearance iteration order.
///
/// Unknown keys read as an empty group rather than an error.
pub struct Lookup<K, V, C = DefaultEquality> {
    index: KeyIndex<K, C>,
    groups: Vec<Vec<V>>,
}

impl<K, V, C: EqualityComparer<K>> Lookup<K, V, C> {
    pub fn build<T, KF, EF>(items: Vec<T>, mut key: KF, mut element: EF, comparer: C) -> Self
    where
        KF: FnMut(&T) -> K,
        EF: FnMut(T) -> V,
    {
        let mut index = KeyIndex::new(comparer);
        let slots: Vec<usize> = items.iter().map(|item| index.insert(key(item)).0).collect();

        let mut groups: Vec<Vec<V>> = (0..index.len()).map(|_| Vec::new()).collect();
        for (item, slot) in items.into_iter().zip(slots) {
            groups[slot].push(element(item));
        }
        Self { index, groups }
    }

    pub fn get(&self, key: &K) -> &[V] {
        match self.index.find(key) {
            Some(slot) => self.groups[slot].as_slice(),
            None => &[],
        }
    }

    pub fn contains_key(&self, key: &K) -> bool {
        self.index.contains(key)
    }
}

impl<K, V, C> Lookup<K, V, C> {
    /// Number of distinct keys.
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn keys(&self) -> &[K] {
        self.index.keys()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&K, &[V])> + '_ {
        self.index
            .keys()
            .iter()
            .zip(self.groups.iter().map(Vec::as_slice))
    }

    pub fn into_groupings(self) -> Vec<Grouping<K, V>> {
        self.index
            .into_keys()
            .into_iter()
            .zip(self.groups)
            .map(|(key, elements)| Grouping { key, elements })
            .collect()
    }
}

impl<K: std::fmt::Debug, V: std::fmt::Debug, C> std::fmt::Debug for Lookup<K, V, C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

pub fn group_by<T, K, KF, C>(items: Vec<T>, key: KF, comparer: C) -> Vec<Grouping<K, T>>
where
    KF: FnMut(&T) -> K,
    C: EqualityComparer<K>,
{
    Lookup::build(items, key, |item| item, comparer).into_groupings()
}

pub fn group_by_element<T, K, V, KF, EF, C>(
    items: Vec<T>,
    key: KF,
    element: EF,
    comparer: C,
) -> Vec<Grouping<K, V>>
where
    KF: FnMut(&T) -> K,
    EF: FnMut(T) -> V,
    C: EqualityComparer<K>,
{
    Lookup::build(items, key, element, comparer).into_groupings()
}

/// One result per group, computed once all groups are complete.
pub fn group_by_result<T, K, R, KF, RF, C>(
    items: Vec<T>,
    key: KF,
    result: RF,
    comparer: C,
) -> Vec<R>
where
    KF: FnMut(&T) -> K,
    RF: FnMut(K, Vec<T>) -> R,
    C: EqualityComparer<K>,
{
    group_by_element_result(items, key, |item| item, result, comparer)
}

pub fn group_by_element_result<T, K, V, R, KF, EF, RF, C>(
    items: Vec<T>,
    key: KF,
    element: EF,
    mut result: RF,
    comparer: C,
) -> Vec<R>
where
    KF: FnMut(&T) -> K,
    EF: FnMut(T) -> V,
    RF: FnMut(K, Vec<V>) -> R,
    C: EqualityComparer<K>,
{
    Lookup::build(items, key, element, comparer)
        .into_groupings()
        .into_iter()
        .map(|g| result(g.key, g.elements))
        .collect()
}

pub fn to_lookup<T, K, KF, C>(items: Vec<T>, key: KF, comparer: C) -> Lookup<K, T, C>
where
    KF: FnMut(&T) -> K,
    C: EqualityComparer<K>,
{
    Lookup::build(items, key, |item| item, comparer)
}

pub fn to_lookup_element<T, K, V, KF, EF, C>(
    items: Vec<T>,
    key: KF,
    element: EF,
    comparer: C,
) -> Lookup<K, V, C>
where
    KF: FnMut(&T) -> K,
    EF: FnMut(T) -> V,
    C: EqualityComparer<K>,
{
    Lookup::build(items, key, element, comparer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use asyncq_core::comparer::by_key;

    #[test]
    fn groups_follow_first_appearance() {
        let groups = group_by(vec![1, 2, 3, 4, 5, 6], |x| x % 3, DefaultEquality);
        let keys: Vec<i32> = groups.iter().map(|g| g.key).collect();
        assert_eq!(keys, vec![1, 2, 0]);
        assert_eq!(groups[0].elements, vec![1, 4]);
        assert_eq!(groups[2].elements, vec![3, 6]);
    }

    #[test]
    fn selectors_run_after_partitioning() {
        let mut log = Vec::new();
        {
            let log = std::cell::RefCell::new(&mut log);
            let _ = group_by_element(
                vec!["a", "b"],
                |s| {
                    log.borrow_mut().push(format!("key {s}"));
                    s.len()
                },
                |s| {
                    log.borrow_mut().push(format!("elem {s}"));
                    s
                },
                DefaultEquality,
            );
        }
        assert_eq!(log, vec!["key a", "key b", "elem a", "elem b"]);
    }

    #[test]
    fn result_selector_sees_whole_group() {
        let words = vec!["apple", "avocado", "banana", "blueberry", "cherry"];
        let summary = group_by_result(
            words,
            |w| w.chars().next(),
            |k, ws| format!("{}={}", k.unwrap_or('?'), ws.len()),
            DefaultEquality,
        );
        assert_eq!(summary, vec!["a=2", "b=2", "c=1"]);
    }

    #[test]
    fn lookup_with_custom_comparer() {
        let people = vec![("Ann", 31), ("ann", 40), ("Bo", 22)];
        let by_name = to_lookup_element(
            people,
            |p| p.0.to_string(),
            |p| p.1,
            by_key(|s: &String| s.to_lowercase()),
        );
        assert_eq!(by_name.len(), 2);
        assert_eq!(by_name.get(&"ANN".to_string()), &[31, 40]);
        assert!(by_name.get(&"zed".to_string()).is_empty());
        assert!(by_name.contains_key(&"bo".to_string()));
        // The first-seen spelling is the one kept.
        assert_eq!(by_name.keys(), &["Ann".to_string(), "Bo".to_string()]);
    }

    #[test]
    fn lookup_iterates_in_key_order() {
        let lookup = to_lookup(vec!["x1", "y1", "x2"], |s| s.as_bytes()[0], DefaultEquality);
        let flat: Vec<(u8, usize)> = lookup.iter().map(|(k, v)| (*k, v.len())).collect();
        assert_eq!(flat, vec![(b'x', 2), (b'y', 1)]);
        let groups = lookup.into_groupings();
        assert_eq!(groups[0], Grouping::new(b'x', vec!["x1", "x2"]));
    }
}
