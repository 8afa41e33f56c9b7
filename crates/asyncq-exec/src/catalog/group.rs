//! Grouping, lookups and joins.

use std::hash::Hash;

use asyncq_core::cancel::CancellationHandle;
use asyncq_core::comparer::{DefaultEquality, EqualityComparer};
use asyncq_core::error::Result;
use asyncq_operators::{group, join, Grouping, Lookup};

use crate::deferred::Deferred;

impl<T> Deferred<T> {
    pub async fn group_by<K, KF>(
        self,
        key: KF,
        cancel: Option<&CancellationHandle>,
    ) -> Result<Deferred<Grouping<K, T>>>
    where
        K: Eq + Hash,
        KF: FnMut(&T) -> K,
    {
        self.group_by_with(key, DefaultEquality, cancel).await
    }

    pub async fn group_by_element<K, V, KF, EF>(
        self,
        key: KF,
        element: EF,
        cancel: Option<&CancellationHandle>,
    ) -> Result<Deferred<Grouping<K, V>>>
    where
        K: Eq + Hash,
        KF: FnMut(&T) -> K,
        EF: FnMut(T) -> V,
    {
        self.group_by_element_with(key, element, DefaultEquality, cancel)
            .await
    }

    pub async fn group_by_result<K, R, KF, RF>(
        self,
        key: KF,
        result: RF,
        cancel: Option<&CancellationHandle>,
    ) -> Result<Deferred<R>>
    where
        K: Eq + Hash,
        KF: FnMut(&T) -> K,
        RF: FnMut(K, Vec<T>) -> R,
    {
        self.group_by_result_with(key, result, DefaultEquality, cancel)
            .await
    }

    pub async fn group_by_element_result<K, V, R, KF, EF, RF>(
        self,
        key: KF,
        element: EF,
        result: RF,
        cancel: Option<&CancellationHandle>,
    ) -> Result<Deferred<R>>
    where
        K: Eq + Hash,
        KF: FnMut(&T) -> K,
        EF: FnMut(T) -> V,
        RF: FnMut(K, Vec<V>) -> R,
    {
        self.group_by_element_result_with(key, element, result, DefaultEquality, cancel)
            .await
    }

    pub async fn group_by_with<K, KF, C>(
        self,
        key: KF,
        comparer: C,
        cancel: Option<&CancellationHandle>,
    ) -> Result<Deferred<Grouping<K, T>>>
    where
        KF: FnMut(&T) -> K,
        C: EqualityComparer<K>,
    {
        let items = self.realize("group_by", cancel).await?;
        Ok(Deferred::Ready(group::group_by(items, key, comparer)))
    }

    pub async fn group_by_element_with<K, V, KF, EF, C>(
        self,
        key: KF,
        element: EF,
        comparer: C,
        cancel: Option<&CancellationHandle>,
    ) -> Result<Deferred<Grouping<K, V>>>
    where
        KF: FnMut(&T) -> K,
        EF: FnMut(T) -> V,
        C: EqualityComparer<K>,
    {
        let items = self.realize("group_by", cancel).await?;
        Ok(Deferred::Ready(group::group_by_element(
            items, key, element, comparer,
        )))
    }

    pub async fn group_by_result_with<K, R, KF, RF, C>(
        self,
        key: KF,
        result: RF,
        comparer: C,
        cancel: Option<&CancellationHandle>,
    ) -> Result<Deferred<R>>
    where
        KF: FnMut(&T) -> K,
        RF: FnMut(K, Vec<T>) -> R,
        C: EqualityComparer<K>,
    {
        let items = self.realize("group_by", cancel).await?;
        Ok(Deferred::Ready(group::group_by_result(
            items, key, result, comparer,
        )))
    }

    pub async fn group_by_element_result_with<K, V, R, KF, EF, RF, C>(
        self,
        key: KF,
        element: EF,
        result: RF,
        comparer: C,
        cancel: Option<&CancellationHandle>,
    ) -> Result<Deferred<R>>
    where
        KF: FnMut(&T) -> K,
        EF: FnMut(T) -> V,
        RF: FnMut(K, Vec<V>) -> R,
        C: EqualityComparer<K>,
    {
        let items = self.realize("group_by", cancel).await?;
        Ok(Deferred::Ready(group::group_by_element_result(
            items, key, element, result, comparer,
        )))
    }

    pub async fn to_lookup<K, KF>(
        self,
        key: KF,
        cancel: Option<&CancellationHandle>,
    ) -> Result<Lookup<K, T>>
    where
        K: Eq + Hash,
        KF: FnMut(&T) -> K,
    {
        self.to_lookup_with(key, DefaultEquality, cancel).await
    }

    pub async fn to_lookup_with<K, KF, C>(
        self,
        key: KF,
        comparer: C,
        cancel: Option<&CancellationHandle>,
    ) -> Result<Lookup<K, T, C>>
    where
        KF: FnMut(&T) -> K,
        C: EqualityComparer<K>,
    {
        let items = self.realize("to_lookup", cancel).await?;
        Ok(group::to_lookup(items, key, comparer))
    }

    pub async fn to_lookup_element<K, V, KF, EF>(
        self,
        key: KF,
        element: EF,
        cancel: Option<&CancellationHandle>,
    ) -> Result<Lookup<K, V>>
    where
        K: Eq + Hash,
        KF: FnMut(&T) -> K,
        EF: FnMut(T) -> V,
    {
        self.to_lookup_element_with(key, element, DefaultEquality, cancel)
            .await
    }

    pub async fn to_lookup_element_with<K, V, KF, EF, C>(
        self,
        key: KF,
        element: EF,
        comparer: C,
        cancel: Option<&CancellationHandle>,
    ) -> Result<Lookup<K, V, C>>
    where
        KF: FnMut(&T) -> K,
        EF: FnMut(T) -> V,
        C: EqualityComparer<K>,
    {
        let items = self.realize("to_lookup", cancel).await?;
        Ok(group::to_lookup_element(items, key, element, comparer))
    }

    /// Inner hash join against an already-realized `inner` sequence.
    pub async fn join<I, K, R, II, OK, IK, RF>(
        self,
        inner: II,
        outer_key: OK,
        inner_key: IK,
        result: RF,
        cancel: Option<&CancellationHandle>,
    ) -> Result<Deferred<R>>
    where
        K: Eq + Hash,
        II: IntoIterator<Item = I>,
        OK: FnMut(&T) -> K,
        IK: FnMut(&I) -> K,
        RF: FnMut(&T, &I) -> R,
    {
        self.join_with(inner, outer_key, inner_key, result, DefaultEquality, cancel)
            .await
    }

    pub async fn join_with<I, K, R, II, OK, IK, RF, C>(
        self,
        inner: II,
        outer_key: OK,
        inner_key: IK,
        result: RF,
        comparer: C,
        cancel: Option<&CancellationHandle>,
    ) -> Result<Deferred<R>>
    where
        II: IntoIterator<Item = I>,
        OK: FnMut(&T) -> K,
        IK: FnMut(&I) -> K,
        RF: FnMut(&T, &I) -> R,
        C: EqualityComparer<K>,
    {
        let outer = self.realize("join", cancel).await?;
        Ok(Deferred::Ready(join::join(
            outer, inner, outer_key, inner_key, result, comparer,
        )))
    }

    pub async fn group_join<I, K, R, II, OK, IK, RF>(
        self,
        inner: II,
        outer_key: OK,
        inner_key: IK,
        result: RF,
        cancel: Option<&CancellationHandle>,
    ) -> Result<Deferred<R>>
    where
        K: Eq + Hash,
        II: IntoIterator<Item = I>,
        OK: FnMut(&T) -> K,
        IK: FnMut(&I) -> K,
        RF: FnMut(T, &[I]) -> R,
    {
        self.group_join_with(inner, outer_key, inner_key, result, DefaultEquality, cancel)
            .await
    }

    pub async fn group_join_with<I, K, R, II, OK, IK, RF, C>(
        self,
        inner: II,
        outer_key: OK,
        inner_key: IK,
        result: RF,
        comparer: C,
        cancel: Option<&CancellationHandle>,
    ) -> Result<Deferred<R>>
    where
        II: IntoIterator<Item = I>,
        OK: FnMut(&T) -> K,
        IK: FnMut(&I) -> K,
        RF: FnMut(T, &[I]) -> R,
        C: EqualityComparer<K>,
    {
        let outer = self.realize("group_join", cancel).await?;
        Ok(Deferred::Ready(join::group_join(
            outer, inner, outer_key, inner_key, result, comparer,
        )))
    }
}
