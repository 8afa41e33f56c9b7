//! Materializing into keyed maps and sets.
//!
//! `Dictionary` and `ElementSet` honor an arbitrary `EqualityComparer` and
//! iterate in insertion order. The plain `to_dictionary`/`to_hash_set` forms
//! return std collections for `Eq + Hash` keys.

use std::collections::{HashMap, HashSet};
use std::hash::Hash;

use asyncq_core::comparer::{DefaultEquality, EqualityComparer};
use asyncq_core::error::{Error, Result};

use crate::index::KeyIndex;

/// Unique-key map. Building one fails on the first repeated key.
pub struct Dictionary<K, V, C = DefaultEquality> {
    index: KeyIndex<K, C>,
    values: Vec<V>,
}

impl<K, V, C: EqualityComparer<K>> Dictionary<K, V, C> {
    pub fn build<T, KF, EF>(
        items: Vec<T>,
        mut key: KF,
        mut element: EF,
        comparer: C,
    ) -> Result<Self>
    where
        KF: FnMut(&T) -> K,
        EF: FnMut(T) -> V,
    {
        let mut index = KeyIndex::with_capacity(comparer, items.len());
        let mut values = Vec::with_capacity(items.len());
        for (position, item) in items.into_iter().enumerate() {
            let (_, fresh) = index.insert(key(&item));
            if !fresh {
                return Err(Error::DuplicateKey(format!(
                    "key produced by element {position} was already present"
                )));
            }
            values.push(element(item));
        }
        Ok(Self { index, values })
    }

    pub fn get(&self, key: &K) -> Option<&V> {
        self.index.find(key).map(|slot| &self.values[slot])
    }

    pub fn contains_key(&self, key: &K) -> bool {
        self.index.contains(key)
    }
}

impl<K, V, C> Dictionary<K, V, C> {
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&K, &V)> + '_ {
        self.index.keys().iter().zip(&self.values)
    }

    pub fn into_pairs(self) -> Vec<(K, V)> {
        self.index.into_keys().into_iter().zip(self.values).collect()
    }
}

impl<K: Eq + Hash, V, C> Dictionary<K, V, C> {
    pub fn into_hash_map(self) -> HashMap<K, V> {
        self.into_pairs().into_iter().collect()
    }
}

impl<K: std::fmt::Debug, V: std::fmt::Debug, C> std::fmt::Debug for Dictionary<K, V, C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

/// Set of elements under a custom comparer. The first of each equivalence
/// class is the one kept.
pub struct ElementSet<T, C = DefaultEquality> {
    index: KeyIndex<T, C>,
}

impl<T, C: EqualityComparer<T>> ElementSet<T, C> {
    pub fn new(comparer: C) -> Self {
        Self {
            index: KeyIndex::new(comparer),
        }
    }

    pub fn from_vec(items: Vec<T>, comparer: C) -> Self {
        let mut set = Self {
            index: KeyIndex::with_capacity(comparer, items.len()),
        };
        for item in items {
            set.insert(item);
        }
        set
    }

    /// Returns false when an equal element was already present.
    pub fn insert(&mut self, value: T) -> bool {
        self.index.insert(value).1
    }

    pub fn contains(&self, value: &T) -> bool {
        self.index.contains(value)
    }
}

impl<T, C> ElementSet<T, C> {
    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.index.keys().iter()
    }

    pub fn into_vec(self) -> Vec<T> {
        self.index.into_keys()
    }
}

impl<T: std::fmt::Debug, C> std::fmt::Debug for ElementSet<T, C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

pub fn to_array<T>(items: Vec<T>) -> Box<[T]> {
    items.into_boxed_slice()
}

pub fn to_hash_set<T: Eq + Hash>(items: Vec<T>) -> HashSet<T> {
    items.into_iter().collect()
}

pub fn to_hash_set_with<T, C>(items: Vec<T>, comparer: C) -> ElementSet<T, C>
where
    C: EqualityComparer<T>,
{
    ElementSet::from_vec(items, comparer)
}

pub fn to_dictionary<T, K, KF>(items: Vec<T>, key: KF) -> Result<HashMap<K, T>>
where
    K: Eq + Hash,
    KF: FnMut(&T) -> K,
{
    to_dictionary_element(items, key, |item| item)
}

pub fn to_dictionary_element<T, K, V, KF, EF>(
    items: Vec<T>,
    key: KF,
    element: EF,
) -> Result<HashMap<K, V>>
where
    K: Eq + Hash,
    KF: FnMut(&T) -> K,
    EF: FnMut(T) -> V,
{
    Dictionary::build(items, key, element, DefaultEquality).map(Dictionary::into_hash_map)
}

pub fn to_dictionary_with<T, K, KF, C>(
    items: Vec<T>,
    key: KF,
    comparer: C,
) -> Result<Dictionary<K, T, C>>
where
    KF: FnMut(&T) -> K,
    C: EqualityComparer<K>,
{
    Dictionary::build(items, key, |item| item, comparer)
}

pub fn to_dictionary_element_with<T, K, V, KF, EF, C>(
    items: Vec<T>,
    key: KF,
    element: EF,
    comparer: C,
) -> Result<Dictionary<K, V, C>>
where
    KF: FnMut(&T) -> K,
    EF: FnMut(T) -> V,
    C: EqualityComparer<K>,
{
    Dictionary::build(items, key, element, comparer)
}
