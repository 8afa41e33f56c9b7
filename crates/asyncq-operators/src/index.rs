//! Hash-partitioned index over distinct keys.
//!
//! Keys are bucketed by `EqualityComparer::hash` and confirmed with
//! `EqualityComparer::equals`, so lookups stay sub-quadratic for any comparer
//! that honors the hash/equality contract. Slots are handed out in insertion
//! order, which is what gives groups and sets their first-appearance order.

use std::collections::HashMap;

use asyncq_core::comparer::EqualityComparer;

pub struct KeyIndex<K, C> {
    comparer: C,
    buckets: HashMap<u64, Vec<usize>>,
    keys: Vec<K>,
}

impl<K, C: EqualityComparer<K>> KeyIndex<K, C> {
    pub fn new(comparer: C) -> Self {
        Self::with_capacity(comparer, 0)
    }

    pub fn with_capacity(comparer: C, capacity: usize) -> Self {
        Self {
            comparer,
            buckets: HashMap::with_capacity(capacity),
            keys: Vec::with_capacity(capacity),
        }
    }

    /// Slot of the key equal to `key`, if any.
    pub fn find(&self, key: &K) -> Option<usize> {
        let hash = self.comparer.hash(key);
        self.buckets
            .get(&hash)?
            .iter()
            .copied()
            .find(|&slot| self.comparer.equals(&self.keys[slot], key))
    }

    /// Insert `key` unless an equal key exists. Returns the slot and whether
    /// the key was new. The first-seen key is the one retained.
    pub fn insert(&mut self, key: K) -> (usize, bool) {
        let hash = self.comparer.hash(&key);
        let bucket = self.buckets.entry(hash).or_default();
        if let Some(&slot) = bucket
            .iter()
            .find(|&&slot| self.comparer.equals(&self.keys[slot], &key))
        {
            return (slot, false);
        }
        let slot = self.keys.len();
        bucket.push(slot);
        self.keys.push(key);
        (slot, true)
    }

    pub fn contains(&self, key: &K) -> bool {
        self.find(key).is_some()
    }
}

impl<K, C> KeyIndex<K, C> {
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Distinct keys in first-insertion order.
    pub fn keys(&self) -> &[K] {
        &self.keys
    }

    pub fn key(&self, slot: usize) -> Option<&K> {
        self.keys.get(slot)
    }

    pub fn comparer(&self) -> &C {
        &self.comparer
    }

    pub fn into_keys(self) -> Vec<K> {
        self.keys
    }
}

/// Lifts a comparer over `T` to one over `&T`, so element sets can index
/// borrowed elements and move only the survivors afterwards.
pub(crate) struct ByRef<C>(pub C);

impl<'a, T: ?Sized, C: EqualityComparer<T>> EqualityComparer<&'a T> for ByRef<C> {
    fn equals(&self, a: &&'a T, b: &&'a T) -> bool {
        self.0.equals(*a, *b)
    }

    fn hash(&self, value: &&'a T) -> u64 {
        self.0.hash(*value)
    }
}

/// Keep the elements whose mark is set, preserving order.
pub(crate) fn retain_marked<T>(items: Vec<T>, keep: &[bool]) -> Vec<T> {
    items
        .into_iter()
        .zip(keep)
        .filter_map(|(item, &k)| k.then_some(item))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use asyncq_core::comparer::{equality_fn, DefaultEquality};

    #[test]
    fn slots_follow_first_insertion() {
        let mut idx = KeyIndex::new(DefaultEquality);
        assert_eq!(idx.insert("b"), (0, true));
        assert_eq!(idx.insert("a"), (1, true));
        assert_eq!(idx.insert("b"), (0, false));
        assert_eq!(idx.keys(), &["b", "a"]);
        assert_eq!(idx.find(&"a"), Some(1));
        assert_eq!(idx.find(&"z"), None);
    }

    #[test]
    fn colliding_hashes_still_compare_by_equality() {
        // Every key lands in one bucket; equality alone separates them.
        let c = equality_fn(|a: &i32, b: &i32| a == b, |_: &i32| 7);
        let mut idx = KeyIndex::new(c);
        for v in [3, 1, 3, 2, 1] {
            idx.insert(v);
        }
        assert_eq!(idx.keys(), &[3, 1, 2]);
        assert!(idx.contains(&2));
        assert!(!idx.contains(&9));
    }

    #[test]
    fn retain_marked_keeps_order() {
        let out = retain_marked(vec!['a', 'b', 'c', 'd'], &[true, false, false, true]);
        assert_eq!(out, vec!['a', 'd']);
    }
}
