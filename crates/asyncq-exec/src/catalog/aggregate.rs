use asyncq_core::cancel::CancellationHandle;
use asyncq_core::comparer::{DefaultEquality, EqualityComparer, NaturalOrder, OrderingComparer};
use asyncq_core::error::Result;
use asyncq_core::numeric::Aggregatable;
use asyncq_operators::aggregate as ops;

use crate::deferred::Deferred;

impl<T> Deferred<T> {
    pub async fn aggregate<F>(self, func: F, cancel: Option<&CancellationHandle>) -> Result<T>
    where
        F: FnMut(T, T) -> T,
    {
        ops::aggregate(self.realize("aggregate", cancel).await?, func)
    }

    pub async fn aggregate_seeded<A, F>(
        self,
        seed: A,
        func: F,
        cancel: Option<&CancellationHandle>,
    ) -> Result<A>
    where
        F: FnMut(A, T) -> A,
    {
        let items = self.realize("aggregate", cancel).await?;
        Ok(ops::aggregate_seeded(items, seed, func))
    }

    pub async fn aggregate_with<A, R, F, S>(
        self,
        seed: A,
        func: F,
        result: S,
        cancel: Option<&CancellationHandle>,
    ) -> Result<R>
    where
        F: FnMut(A, T) -> A,
        S: FnOnce(A) -> R,
    {
        let items = self.realize("aggregate", cancel).await?;
        Ok(ops::aggregate_with(items, seed, func, result))
    }

    pub async fn sum(self, cancel: Option<&CancellationHandle>) -> Result<T::Kind>
    where
        T: Aggregatable,
    {
        ops::sum(self.realize("sum", cancel).await?)
    }

    pub async fn sum_by<A, F>(
        self,
        selector: F,
        cancel: Option<&CancellationHandle>,
    ) -> Result<A::Kind>
    where
        A: Aggregatable,
        F: FnMut(T) -> A,
    {
        ops::sum(self.realize("sum", cancel).await?.into_iter().map(selector))
    }

    pub async fn average(self, cancel: Option<&CancellationHandle>) -> Result<T::Mean>
    where
        T: Aggregatable,
    {
        ops::average(self.realize("average", cancel).await?)
    }

    pub async fn average_by<A, F>(
        self,
        selector: F,
        cancel: Option<&CancellationHandle>,
    ) -> Result<A::Mean>
    where
        A: Aggregatable,
        F: FnMut(T) -> A,
    {
        ops::average(self.realize("average", cancel).await?.into_iter().map(selector))
    }

    pub async fn min(self, cancel: Option<&CancellationHandle>) -> Result<T::Extreme>
    where
        T: Aggregatable,
    {
        ops::min(self.realize("min", cancel).await?)
    }

    pub async fn min_by<A, F>(
        self,
        selector: F,
        cancel: Option<&CancellationHandle>,
    ) -> Result<A::Extreme>
    where
        A: Aggregatable,
        F: FnMut(T) -> A,
    {
        ops::min(self.realize("min", cancel).await?.into_iter().map(selector))
    }

    pub async fn max(self, cancel: Option<&CancellationHandle>) -> Result<T::Extreme>
    where
        T: Aggregatable,
    {
        ops::max(self.realize("max", cancel).await?)
    }

    pub async fn max_by<A, F>(
        self,
        selector: F,
        cancel: Option<&CancellationHandle>,
    ) -> Result<A::Extreme>
    where
        A: Aggregatable,
        F: FnMut(T) -> A,
    {
        ops::max(self.realize("max", cancel).await?.into_iter().map(selector))
    }

    /// Smallest element under `comparer`; the first wins ties.
    pub async fn min_with<C>(self, comparer: C, cancel: Option<&CancellationHandle>) -> Result<T>
    where
        C: OrderingComparer<T>,
    {
        ops::min_with(self.realize("min", cancel).await?, comparer)
    }

    pub async fn max_with<C>(self, comparer: C, cancel: Option<&CancellationHandle>) -> Result<T>
    where
        C: OrderingComparer<T>,
    {
        ops::max_with(self.realize("max", cancel).await?, comparer)
    }

    /// Smallest projected value under `comparer`.
    pub async fn min_of<U, F, C>(
        self,
        selector: F,
        comparer: C,
        cancel: Option<&CancellationHandle>,
    ) -> Result<U>
    where
        F: FnMut(T) -> U,
        C: OrderingComparer<U>,
    {
        let items = self.realize("min", cancel).await?;
        ops::min_with(items.into_iter().map(selector), comparer)
    }

    pub async fn max_of<U, F, C>(
        self,
        selector: F,
        comparer: C,
        cancel: Option<&CancellationHandle>,
    ) -> Result<U>
    where
        F: FnMut(T) -> U,
        C: OrderingComparer<U>,
    {
        let items = self.realize("max", cancel).await?;
        ops::max_with(items.into_iter().map(selector), comparer)
    }

    /// Smallest present projected value; `None` projections are skipped and
    /// an all-absent source yields `None`.
    pub async fn min_nullable_of<U, F, C>(
        self,
        selector: F,
        comparer: C,
        cancel: Option<&CancellationHandle>,
    ) -> Result<Option<U>>
    where
        F: FnMut(T) -> Option<U>,
        C: OrderingComparer<U>,
    {
        let items = self.realize("min", cancel).await?;
        Ok(ops::min_nullable_with(items.into_iter().map(selector), comparer))
    }

    pub async fn max_nullable_of<U, F, C>(
        self,
        selector: F,
        comparer: C,
        cancel: Option<&CancellationHandle>,
    ) -> Result<Option<U>>
    where
        F: FnMut(T) -> Option<U>,
        C: OrderingComparer<U>,
    {
        let items = self.realize("max", cancel).await?;
        Ok(ops::max_nullable_with(items.into_iter().map(selector), comparer))
    }

    pub async fn count(self, cancel: Option<&CancellationHandle>) -> Result<usize> {
        Ok(ops::count(&self.realize("count", cancel).await?))
    }

    pub async fn count_where<P>(
        self,
        predicate: P,
        cancel: Option<&CancellationHandle>,
    ) -> Result<usize>
    where
        P: FnMut(&T) -> bool,
    {
        Ok(ops::count_where(&self.realize("count", cancel).await?, predicate))
    }

    pub async fn long_count(self, cancel: Option<&CancellationHandle>) -> Result<u64> {
        Ok(ops::long_count(&self.realize("long_count", cancel).await?))
    }

    pub async fn long_count_where<P>(
        self,
        predicate: P,
        cancel: Option<&CancellationHandle>,
    ) -> Result<u64>
    where
        P: FnMut(&T) -> bool,
    {
        Ok(ops::long_count_where(
            &self.realize("long_count", cancel).await?,
            predicate,
        ))
    }

    pub async fn any(self, cancel: Option<&CancellationHandle>) -> Result<bool> {
        Ok(ops::any(&self.realize("any", cancel).await?))
    }

    pub async fn any_where<P>(
        self,
        predicate: P,
        cancel: Option<&CancellationHandle>,
    ) -> Result<bool>
    where
        P: FnMut(&T) -> bool,
    {
        Ok(ops::any_where(&self.realize("any", cancel).await?, predicate))
    }

    /// True for an empty source.
    pub async fn all<P>(self, predicate: P, cancel: Option<&CancellationHandle>) -> Result<bool>
    where
        P: FnMut(&T) -> bool,
    {
        Ok(ops::all(&self.realize("all", cancel).await?, predicate))
    }

    pub async fn contains(self, value: &T, cancel: Option<&CancellationHandle>) -> Result<bool>
    where
        T: Eq + std::hash::Hash,
    {
        self.contains_with(value, DefaultEquality, cancel).await
    }

    pub async fn contains_with<C>(
        self,
        value: &T,
        comparer: C,
        cancel: Option<&CancellationHandle>,
    ) -> Result<bool>
    where
        C: EqualityComparer<T>,
    {
        Ok(ops::contains(
            &self.realize("contains", cancel).await?,
            value,
            comparer,
        ))
    }
}

/// Min/max over nullable elements of any type: `None` entries are skipped.
impl<T> Deferred<Option<T>> {
    pub async fn min_nullable(self, cancel: Option<&CancellationHandle>) -> Result<Option<T>>
    where
        T: Ord,
    {
        self.min_nullable_with(NaturalOrder, cancel).await
    }

    pub async fn min_nullable_with<C>(
        self,
        comparer: C,
        cancel: Option<&CancellationHandle>,
    ) -> Result<Option<T>>
    where
        C: OrderingComparer<T>,
    {
        Ok(ops::min_nullable_with(self.realize("min", cancel).await?, comparer))
    }

    pub async fn max_nullable(self, cancel: Option<&CancellationHandle>) -> Result<Option<T>>
    where
        T: Ord,
    {
        self.max_nullable_with(NaturalOrder, cancel).await
    }

    pub async fn max_nullable_with<C>(
        self,
        comparer: C,
        cancel: Option<&CancellationHandle>,
    ) -> Result<Option<T>>
    where
        C: OrderingComparer<T>,
    {
        Ok(ops::max_nullable_with(self.realize("max", cancel).await?, comparer))
    }
}
