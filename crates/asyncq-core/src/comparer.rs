//! Pluggable equality and ordering capabilities.
//!
//! Set, grouping, lookup and join operators partition by
//! `EqualityComparer::hash` and confirm with `EqualityComparer::equals`.
//! Implementations must keep `equals(a, b) ⇒ hash(a) == hash(b)`.
//! Ordering comparers must describe a total order; nothing checks this.

use std::cmp::Ordering;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

pub trait EqualityComparer<T: ?Sized> {
    fn equals(&self, a: &T, b: &T) -> bool;
    fn hash(&self, value: &T) -> u64;
}

impl<T: ?Sized, C: EqualityComparer<T> + ?Sized> EqualityComparer<T> for &C {
    fn equals(&self, a: &T, b: &T) -> bool {
        (**self).equals(a, b)
    }

    fn hash(&self, value: &T) -> u64 {
        (**self).hash(value)
    }
}

/// Natural structural equality (`Eq`) with a consistent `Hash`.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultEquality;

impl<T: Eq + Hash + ?Sized> EqualityComparer<T> for DefaultEquality {
    fn equals(&self, a: &T, b: &T) -> bool {
        a == b
    }

    fn hash(&self, value: &T) -> u64 {
        stable_hash(value)
    }
}

/// Equality through a projected key, e.g. case-insensitive strings.
#[derive(Debug, Clone, Copy)]
pub struct KeyEquality<F> {
    key: F,
}

pub fn by_key<F>(key: F) -> KeyEquality<F> {
    KeyEquality { key }
}

impl<T, K, F> EqualityComparer<T> for KeyEquality<F>
where
    T: ?Sized,
    K: Eq + Hash,
    F: Fn(&T) -> K,
{
    fn equals(&self, a: &T, b: &T) -> bool {
        (self.key)(a) == (self.key)(b)
    }

    fn hash(&self, value: &T) -> u64 {
        stable_hash(&(self.key)(value))
    }
}

/// Equality assembled from an `equals` closure and a `hash` closure.
#[derive(Debug, Clone, Copy)]
pub struct FnEquality<E, H> {
    eq: E,
    hash: H,
}

pub fn equality_fn<E, H>(eq: E, hash: H) -> FnEquality<E, H> {
    FnEquality { eq, hash }
}

impl<T, E, H> EqualityComparer<T> for FnEquality<E, H>
where
    T: ?Sized,
    E: Fn(&T, &T) -> bool,
    H: Fn(&T) -> u64,
{
    fn equals(&self, a: &T, b: &T) -> bool {
        (self.eq)(a, b)
    }

    fn hash(&self, value: &T) -> u64 {
        (self.hash)(value)
    }
}

/// Deterministic SipHash of any `Hash` value. Exposed so custom comparers can
/// hash the same way the default one does.
pub fn stable_hash<T: Hash + ?Sized>(value: &T) -> u64 {
    let mut h = DefaultHasher::new();
    value.hash(&mut h);
    h.finish()
}

pub trait OrderingComparer<T: ?Sized> {
    fn compare(&self, a: &T, b: &T) -> Ordering;
}

/// The type's own `Ord`.
#[derive(Debug, Clone, Copy, Default)]
pub struct NaturalOrder;

impl<T: Ord + ?Sized> OrderingComparer<T> for NaturalOrder {
    fn compare(&self, a: &T, b: &T) -> Ordering {
        a.cmp(b)
    }
}

impl<T, F> OrderingComparer<T> for F
where
    T: ?Sized,
    F: Fn(&T, &T) -> Ordering,
{
    fn compare(&self, a: &T, b: &T) -> Ordering {
        self(a, b)
    }
}
