//! Multi-key ordering.
//!
//! `order_by*` starts an `OrderedSequence` with a primary level; `then_by*`
//! on the sequence appends secondary levels. Nothing is sorted until
//! `OrderedSequence::into_vec`.

pub mod ordered;

pub use ordered::OrderedSequence;

use asyncq_core::comparer::{NaturalOrder, OrderingComparer};

pub fn order_by<T, K, F>(items: Vec<T>, key: F) -> OrderedSequence<T>
where
    K: Ord + 'static,
    F: Fn(&T) -> K + Send + Sync + 'static,
{
    OrderedSequence::new(items).then_by(key, NaturalOrder, false)
}

pub fn order_by_with<T, K, F, C>(items: Vec<T>, key: F, comparer: C) -> OrderedSequence<T>
where
    K: 'static,
    F: Fn(&T) -> K + Send + Sync + 'static,
    C: OrderingComparer<K> + Send + Sync + 'static,
{
    OrderedSequence::new(items).then_by(key, comparer, false)
}

pub fn order_by_descending<T, K, F>(items: Vec<T>, key: F) -> OrderedSequence<T>
where
    K: Ord + 'static,
    F: Fn(&T) -> K + Send + Sync + 'static,
{
    OrderedSequence::new(items).then_by(key, NaturalOrder, true)
}

pub fn order_by_descending_with<T, K, F, C>(
    items: Vec<T>,
    key: F,
    comparer: C,
) -> OrderedSequence<T>
where
    K: 'static,
    F: Fn(&T) -> K + Send + Sync + 'static,
    C: OrderingComparer<K> + Send + Sync + 'static,
{
    OrderedSequence::new(items).then_by(key, comparer, true)
}
