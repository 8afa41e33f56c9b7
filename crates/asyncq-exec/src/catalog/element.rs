use asyncq_core::cancel::CancellationHandle;
use asyncq_core::error::Result;
use asyncq_operators::element as ops;

use crate::deferred::Deferred;

impl<T> Deferred<T> {
    pub async fn first(self, cancel: Option<&CancellationHandle>) -> Result<T> {
        ops::first(self.realize("first", cancel).await?)
    }

    pub async fn first_where<P>(
        self,
        predicate: P,
        cancel: Option<&CancellationHandle>,
    ) -> Result<T>
    where
        P: FnMut(&T) -> bool,
    {
        ops::first_where(self.realize("first", cancel).await?, predicate)
    }

    pub async fn first_or_default(self, cancel: Option<&CancellationHandle>) -> Result<Option<T>> {
        Ok(ops::first_or_default(
            self.realize("first_or_default", cancel).await?,
        ))
    }

    pub async fn first_or_default_where<P>(
        self,
        predicate: P,
        cancel: Option<&CancellationHandle>,
    ) -> Result<Option<T>>
    where
        P: FnMut(&T) -> bool,
    {
        let items = self.realize("first_or_default", cancel).await?;
        Ok(ops::first_or_default_where(items, predicate))
    }

    pub async fn last(self, cancel: Option<&CancellationHandle>) -> Result<T> {
        ops::last(self.realize("last", cancel).await?)
    }

    pub async fn last_where<P>(self, predicate: P, cancel: Option<&CancellationHandle>) -> Result<T>
    where
        P: FnMut(&T) -> bool,
    {
        ops::last_where(self.realize("last", cancel).await?, predicate)
    }

    pub async fn last_or_default(self, cancel: Option<&CancellationHandle>) -> Result<Option<T>> {
        Ok(ops::last_or_default(
            self.realize("last_or_default", cancel).await?,
        ))
    }

    pub async fn last_or_default_where<P>(
        self,
        predicate: P,
        cancel: Option<&CancellationHandle>,
    ) -> Result<Option<T>>
    where
        P: FnMut(&T) -> bool,
    {
        let items = self.realize("last_or_default", cancel).await?;
        Ok(ops::last_or_default_where(items, predicate))
    }

    /// Fails with `EmptySequence` or `MultipleMatches` unless exactly one
    /// element exists.
    pub async fn single(self, cancel: Option<&CancellationHandle>) -> Result<T> {
        ops::single(self.realize("single", cancel).await?)
    }

    pub async fn single_where<P>(
        self,
        predicate: P,
        cancel: Option<&CancellationHandle>,
    ) -> Result<T>
    where
        P: FnMut(&T) -> bool,
    {
        ops::single_where(self.realize("single", cancel).await?, predicate)
    }

    /// `None` when empty; still fails with `MultipleMatches` on two or more.
    pub async fn single_or_default(self, cancel: Option<&CancellationHandle>) -> Result<Option<T>> {
        ops::single_or_default(self.realize("single_or_default", cancel).await?)
    }

    pub async fn single_or_default_where<P>(
        self,
        predicate: P,
        cancel: Option<&CancellationHandle>,
    ) -> Result<Option<T>>
    where
        P: FnMut(&T) -> bool,
    {
        let items = self.realize("single_or_default", cancel).await?;
        ops::single_or_default_where(items, predicate)
    }

    pub async fn element_at(self, index: usize, cancel: Option<&CancellationHandle>) -> Result<T> {
        ops::element_at(self.realize("element_at", cancel).await?, index)
    }

    pub async fn element_at_or_default(
        self,
        index: usize,
        cancel: Option<&CancellationHandle>,
    ) -> Result<Option<T>> {
        let items = self.realize("element_at_or_default", cancel).await?;
        Ok(ops::element_at_or_default(items, index))
    }
}
