//! Deferred composite sort.
//!
//! An `OrderedSequence` holds its elements in source order plus a chain of
//! levels. Materializing computes each level's keys once per element, sorts
//! positions with one stable sort under the composite comparator, then
//! permutes the elements. Ties on every level keep source order.

use std::cmp::Ordering;
use std::fmt;
use std::marker::PhantomData;

use asyncq_core::comparer::OrderingComparer;

/// One ordering level, erased over its key type.
trait SortLevel<T>: Send + Sync {
    fn compute<'a>(&'a self, items: &[T]) -> Box<dyn KeyColumn + 'a>;
}

/// Keys of one level, addressed by source position.
trait KeyColumn {
    fn compare(&self, a: usize, b: usize) -> Ordering;
}

struct KeyLevel<F, C, K> {
    key: F,
    comparer: C,
    descending: bool,
    _key: PhantomData<fn() -> K>,
}

struct Column<'a, K, C> {
    keys: Vec<K>,
    comparer: &'a C,
    descending: bool,
}

impl<T, K, F, C> SortLevel<T> for KeyLevel<F, C, K>
where
    K: 'static,
    F: Fn(&T) -> K + Send + Sync,
    C: OrderingComparer<K> + Send + Sync,
{
    fn compute<'a>(&'a self, items: &[T]) -> Box<dyn KeyColumn + 'a> {
        Box::new(Column {
            keys: items.iter().map(&self.key).collect(),
            comparer: &self.comparer,
            descending: self.descending,
        })
    }
}

impl<K, C: OrderingComparer<K>> KeyColumn for Column<'_, K, C> {
    fn compare(&self, a: usize, b: usize) -> Ordering {
        let ord = self.comparer.compare(&self.keys[a], &self.keys[b]);
        if self.descending {
            ord.reverse()
        } else {
            ord
        }
    }
}

pub struct OrderedSequence<T> {
    items: Vec<T>,
    levels: Vec<Box<dyn SortLevel<T>>>,
}

impl<T> OrderedSequence<T> {
    /// A sequence with no levels yet; it materializes in source order.
    pub fn new(items: Vec<T>) -> Self {
        Self {
            items,
            levels: Vec::new(),
        }
    }

    /// Append a level that breaks ties left by every earlier level.
    pub fn then_by<K, F, C>(mut self, key: F, comparer: C, descending: bool) -> Self
    where
        K: 'static,
        F: Fn(&T) -> K + Send + Sync + 'static,
        C: OrderingComparer<K> + Send + Sync + 'static,
    {
        self.levels.push(Box::new(KeyLevel {
            key,
            comparer,
            descending,
            _key: PhantomData,
        }));
        self
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of ordering levels in the chain.
    pub fn depth(&self) -> usize {
        self.levels.len()
    }

    pub fn into_vec(self) -> Vec<T> {
        let Self { items, levels } = self;
        if levels.is_empty() || items.len() < 2 {
            return items;
        }

        let order = {
            let columns: Vec<Box<dyn KeyColumn + '_>> =
                levels.iter().map(|level| level.compute(&items)).collect();
            let mut order: Vec<usize> = (0..items.len()).collect();
            order.sort_by(|&a, &b| {
                columns
                    .iter()
                    .map(|column| column.compare(a, b))
                    .find(|ord| ord.is_ne())
                    .unwrap_or(Ordering::Equal)
            });
            order
        };

        let mut rank = vec![0usize; order.len()];
        for (pos, &src) in order.iter().enumerate() {
            rank[src] = pos;
        }
        let mut ranked: Vec<(usize, T)> = rank.into_iter().zip(items).collect();
        ranked.sort_unstable_by_key(|&(r, _)| r);
        ranked.into_iter().map(|(_, item)| item).collect()
    }
}

impl<T> From<Vec<T>> for OrderedSequence<T> {
    fn from(items: Vec<T>) -> Self {
        Self::new(items)
    }
}

impl<T: fmt::Debug> fmt::Debug for OrderedSequence<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OrderedSequence")
            .field("items", &self.items)
            .field("levels", &self.levels.len())
            .finish()
    }
}
