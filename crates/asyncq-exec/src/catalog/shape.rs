//! Filtering, partitioning, projection and sequence shaping. Every operator
//! here returns a ready `Deferred` so calls chain.

use asyncq_core::cancel::CancellationHandle;
use asyncq_core::error::Result;
use asyncq_operators::{filter, map, partition, sequence};

use crate::deferred::Deferred;

impl<T> Deferred<T> {
    pub async fn filter<P>(
        self,
        predicate: P,
        cancel: Option<&CancellationHandle>,
    ) -> Result<Deferred<T>>
    where
        P: FnMut(&T) -> bool,
    {
        let items = self.realize("where", cancel).await?;
        Ok(Deferred::Ready(filter::filter(items, predicate)))
    }

    pub async fn filter_indexed<P>(
        self,
        predicate: P,
        cancel: Option<&CancellationHandle>,
    ) -> Result<Deferred<T>>
    where
        P: FnMut(&T, usize) -> bool,
    {
        let items = self.realize("where", cancel).await?;
        Ok(Deferred::Ready(filter::filter_indexed(items, predicate)))
    }

    pub async fn skip(
        self,
        count: usize,
        cancel: Option<&CancellationHandle>,
    ) -> Result<Deferred<T>> {
        let items = self.realize("skip", cancel).await?;
        Ok(Deferred::Ready(partition::skip(items, count)))
    }

    pub async fn skip_while<P>(
        self,
        predicate: P,
        cancel: Option<&CancellationHandle>,
    ) -> Result<Deferred<T>>
    where
        P: FnMut(&T) -> bool,
    {
        let items = self.realize("skip_while", cancel).await?;
        Ok(Deferred::Ready(partition::skip_while(items, predicate)))
    }

    pub async fn skip_while_indexed<P>(
        self,
        predicate: P,
        cancel: Option<&CancellationHandle>,
    ) -> Result<Deferred<T>>
    where
        P: FnMut(&T, usize) -> bool,
    {
        let items = self.realize("skip_while", cancel).await?;
        Ok(Deferred::Ready(partition::skip_while_indexed(items, predicate)))
    }

    pub async fn skip_last(
        self,
        count: usize,
        cancel: Option<&CancellationHandle>,
    ) -> Result<Deferred<T>> {
        let items = self.realize("skip_last", cancel).await?;
        Ok(Deferred::Ready(partition::skip_last(items, count)))
    }

    pub async fn take(
        self,
        count: usize,
        cancel: Option<&CancellationHandle>,
    ) -> Result<Deferred<T>> {
        let items = self.realize("take", cancel).await?;
        Ok(Deferred::Ready(partition::take(items, count)))
    }

    pub async fn take_while<P>(
        self,
        predicate: P,
        cancel: Option<&CancellationHandle>,
    ) -> Result<Deferred<T>>
    where
        P: FnMut(&T) -> bool,
    {
        let items = self.realize("take_while", cancel).await?;
        Ok(Deferred::Ready(partition::take_while(items, predicate)))
    }

    pub async fn take_while_indexed<P>(
        self,
        predicate: P,
        cancel: Option<&CancellationHandle>,
    ) -> Result<Deferred<T>>
    where
        P: FnMut(&T, usize) -> bool,
    {
        let items = self.realize("take_while", cancel).await?;
        Ok(Deferred::Ready(partition::take_while_indexed(items, predicate)))
    }

    pub async fn take_last(
        self,
        count: usize,
        cancel: Option<&CancellationHandle>,
    ) -> Result<Deferred<T>> {
        let items = self.realize("take_last", cancel).await?;
        Ok(Deferred::Ready(partition::take_last(items, count)))
    }

    pub async fn select<U, F>(
        self,
        selector: F,
        cancel: Option<&CancellationHandle>,
    ) -> Result<Deferred<U>>
    where
        F: FnMut(T) -> U,
    {
        let items = self.realize("select", cancel).await?;
        Ok(Deferred::Ready(map::select(items, selector)))
    }

    pub async fn select_indexed<U, F>(
        self,
        selector: F,
        cancel: Option<&CancellationHandle>,
    ) -> Result<Deferred<U>>
    where
        F: FnMut(T, usize) -> U,
    {
        let items = self.realize("select", cancel).await?;
        Ok(Deferred::Ready(map::select_indexed(items, selector)))
    }

    pub async fn select_many<I, F>(
        self,
        selector: F,
        cancel: Option<&CancellationHandle>,
    ) -> Result<Deferred<I::Item>>
    where
        I: IntoIterator,
        F: FnMut(T) -> I,
    {
        let items = self.realize("select_many", cancel).await?;
        Ok(Deferred::Ready(map::select_many(items, selector)))
    }

    pub async fn select_many_indexed<I, F>(
        self,
        selector: F,
        cancel: Option<&CancellationHandle>,
    ) -> Result<Deferred<I::Item>>
    where
        I: IntoIterator,
        F: FnMut(T, usize) -> I,
    {
        let items = self.realize("select_many", cancel).await?;
        Ok(Deferred::Ready(map::select_many_indexed(items, selector)))
    }

    pub async fn select_many_with<I, R, F, G>(
        self,
        collection: F,
        result: G,
        cancel: Option<&CancellationHandle>,
    ) -> Result<Deferred<R>>
    where
        I: IntoIterator,
        F: FnMut(&T) -> I,
        G: FnMut(&T, I::Item) -> R,
    {
        let items = self.realize("select_many", cancel).await?;
        Ok(Deferred::Ready(map::select_many_with(items, collection, result)))
    }

    pub async fn select_many_indexed_with<I, R, F, G>(
        self,
        collection: F,
        result: G,
        cancel: Option<&CancellationHandle>,
    ) -> Result<Deferred<R>>
    where
        I: IntoIterator,
        F: FnMut(&T, usize) -> I,
        G: FnMut(&T, I::Item) -> R,
    {
        let items = self.realize("select_many", cancel).await?;
        Ok(Deferred::Ready(map::select_many_indexed_with(
            items, collection, result,
        )))
    }

    pub async fn append(
        self,
        element: T,
        cancel: Option<&CancellationHandle>,
    ) -> Result<Deferred<T>> {
        let items = self.realize("append", cancel).await?;
        Ok(Deferred::Ready(sequence::append(items, element)))
    }

    pub async fn prepend(
        self,
        element: T,
        cancel: Option<&CancellationHandle>,
    ) -> Result<Deferred<T>> {
        let items = self.realize("prepend", cancel).await?;
        Ok(Deferred::Ready(sequence::prepend(items, element)))
    }

    pub async fn concat<I>(
        self,
        second: I,
        cancel: Option<&CancellationHandle>,
    ) -> Result<Deferred<T>>
    where
        I: IntoIterator<Item = T>,
    {
        let items = self.realize("concat", cancel).await?;
        Ok(Deferred::Ready(sequence::concat(items, second)))
    }

    pub async fn reverse(self, cancel: Option<&CancellationHandle>) -> Result<Deferred<T>> {
        let items = self.realize("reverse", cancel).await?;
        Ok(Deferred::Ready(sequence::reverse(items)))
    }

    pub async fn default_if_empty(self, cancel: Option<&CancellationHandle>) -> Result<Deferred<T>>
    where
        T: Default,
    {
        let items = self.realize("default_if_empty", cancel).await?;
        Ok(Deferred::Ready(sequence::default_if_empty(items)))
    }

    pub async fn default_if_empty_with(
        self,
        value: T,
        cancel: Option<&CancellationHandle>,
    ) -> Result<Deferred<T>> {
        let items = self.realize("default_if_empty", cancel).await?;
        Ok(Deferred::Ready(sequence::default_if_empty_with(items, value)))
    }

    /// The realized elements as a plain iterator.
    pub async fn as_enumerable(
        self,
        cancel: Option<&CancellationHandle>,
    ) -> Result<std::vec::IntoIter<T>> {
        Ok(self.realize("as_enumerable", cancel).await?.into_iter())
    }

    pub async fn zip<U, I>(
        self,
        second: I,
        cancel: Option<&CancellationHandle>,
    ) -> Result<Deferred<(T, U)>>
    where
        I: IntoIterator<Item = U>,
    {
        let items = self.realize("zip", cancel).await?;
        Ok(Deferred::Ready(sequence::zip(items, second)))
    }
}
