//! Set operators. The plain forms use `DefaultEquality`; the `_with` forms
//! take any `EqualityComparer`. Second operands are already realized.

use std::hash::Hash;

use asyncq_core::cancel::CancellationHandle;
use asyncq_core::comparer::{DefaultEquality, EqualityComparer};
use asyncq_core::error::Result;
use asyncq_operators::set as ops;

use crate::deferred::Deferred;

impl<T> Deferred<T> {
    pub async fn distinct(self, cancel: Option<&CancellationHandle>) -> Result<Deferred<T>>
    where
        T: Eq + Hash,
    {
        self.distinct_with(DefaultEquality, cancel).await
    }

    pub async fn distinct_with<C>(
        self,
        comparer: C,
        cancel: Option<&CancellationHandle>,
    ) -> Result<Deferred<T>>
    where
        C: EqualityComparer<T>,
    {
        let items = self.realize("distinct", cancel).await?;
        Ok(Deferred::Ready(ops::distinct(items, comparer)))
    }

    pub async fn union<I>(
        self,
        second: I,
        cancel: Option<&CancellationHandle>,
    ) -> Result<Deferred<T>>
    where
        T: Eq + Hash,
        I: IntoIterator<Item = T>,
    {
        self.union_with(second, DefaultEquality, cancel).await
    }

    pub async fn union_with<I, C>(
        self,
        second: I,
        comparer: C,
        cancel: Option<&CancellationHandle>,
    ) -> Result<Deferred<T>>
    where
        I: IntoIterator<Item = T>,
        C: EqualityComparer<T>,
    {
        let items = self.realize("union", cancel).await?;
        Ok(Deferred::Ready(ops::union(items, second, comparer)))
    }

    pub async fn intersect<I>(
        self,
        second: I,
        cancel: Option<&CancellationHandle>,
    ) -> Result<Deferred<T>>
    where
        T: Eq + Hash,
        I: IntoIterator<Item = T>,
    {
        self.intersect_with(second, DefaultEquality, cancel).await
    }

    pub async fn intersect_with<I, C>(
        self,
        second: I,
        comparer: C,
        cancel: Option<&CancellationHandle>,
    ) -> Result<Deferred<T>>
    where
        I: IntoIterator<Item = T>,
        C: EqualityComparer<T>,
    {
        let items = self.realize("intersect", cancel).await?;
        Ok(Deferred::Ready(ops::intersect(items, second, comparer)))
    }

    pub async fn except<I>(
        self,
        second: I,
        cancel: Option<&CancellationHandle>,
    ) -> Result<Deferred<T>>
    where
        T: Eq + Hash,
        I: IntoIterator<Item = T>,
    {
        self.except_with(second, DefaultEquality, cancel).await
    }

    pub async fn except_with<I, C>(
        self,
        second: I,
        comparer: C,
        cancel: Option<&CancellationHandle>,
    ) -> Result<Deferred<T>>
    where
        I: IntoIterator<Item = T>,
        C: EqualityComparer<T>,
    {
        let items = self.realize("except", cancel).await?;
        Ok(Deferred::Ready(ops::except(items, second, comparer)))
    }

    pub async fn sequence_equal<I>(
        self,
        second: I,
        cancel: Option<&CancellationHandle>,
    ) -> Result<bool>
    where
        T: Eq + Hash,
        I: IntoIterator<Item = T>,
    {
        self.sequence_equal_with(second, DefaultEquality, cancel).await
    }

    pub async fn sequence_equal_with<I, C>(
        self,
        second: I,
        comparer: C,
        cancel: Option<&CancellationHandle>,
    ) -> Result<bool>
    where
        I: IntoIterator<Item = T>,
        C: EqualityComparer<T>,
    {
        let items = self.realize("sequence_equal", cancel).await?;
        Ok(ops::sequence_equal(&items, second, comparer))
    }
}

#[cfg(test)]
mod tests {
    use asyncq_core::comparer::by_key;

    use crate::deferred::Deferred;

    #[tokio::test]
    async fn distinct_preserves_first_occurrence() {
        let out = Deferred::pending(async { Ok(vec![3, 1, 3, 2, 1]) })
            .distinct(None)
            .await
            .unwrap()
            .resolve(None)
            .await
            .unwrap();
        assert_eq!(out, vec![3, 1, 2]);
    }

    #[tokio::test]
    async fn except_union_intersect_cover_distinct() {
        let a = vec![5, 2, 5, 8, 1];
        let b = vec![8, 9, 5];
        let left = Deferred::from(a.clone()).except(b.clone(), None).await.unwrap();
        let mut parts = left
            .union(
                Deferred::from(a.clone())
                    .intersect(b, None)
                    .await
                    .unwrap()
                    .resolve(None)
                    .await
                    .unwrap(),
                None,
            )
            .await
            .unwrap()
            .resolve(None)
            .await
            .unwrap();
        let mut whole = Deferred::from(a)
            .distinct(None)
            .await
            .unwrap()
            .resolve(None)
            .await
            .unwrap();
        parts.sort_unstable();
        whole.sort_unstable();
        assert_eq!(parts, whole);
    }

    #[tokio::test]
    async fn comparer_aware_sequence_equal() {
        let same = Deferred::from(vec!["A".to_string(), "b".to_string()])
            .sequence_equal_with(
                vec!["a".to_string(), "B".to_string()],
                by_key(|s: &String| s.to_lowercase()),
                None,
            )
            .await
            .unwrap();
        assert!(same);
        assert!(!Deferred::from(vec![1, 2]).sequence_equal(vec![1, 2, 3], None).await.unwrap());
    }
}
