//! Deferred ordering continuation.
//!
//! `DeferredOrdered<T>` mirrors `Deferred<T>` over an `OrderedSequence`, so a
//! producer may hand back a sequence that already carries ordering levels and
//! callers can keep appending `then_by` levels to it.

use std::fmt;
use std::future::Future;

use futures::future::BoxFuture;
use futures::FutureExt;

use asyncq_core::cancel::{ensure_live, CancellationHandle};
use asyncq_core::comparer::{NaturalOrder, OrderingComparer};
use asyncq_core::error::Result;
use asyncq_operators::OrderedSequence;

use crate::deferred::Deferred;
use crate::metrics;

pub enum DeferredOrdered<T> {
    Pending(BoxFuture<'static, Result<OrderedSequence<T>>>),
    Ready(OrderedSequence<T>),
}

impl<T> DeferredOrdered<T> {
    pub fn pending<F>(producer: F) -> Self
    where
        F: Future<Output = Result<OrderedSequence<T>>> + Send + 'static,
    {
        DeferredOrdered::Pending(producer.boxed())
    }

    pub fn ready(sequence: OrderedSequence<T>) -> Self {
        DeferredOrdered::Ready(sequence)
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, DeferredOrdered::Ready(_))
    }

    /// Same gate as `Deferred::resolve`: cancellation first, then one await.
    pub async fn resolve(self, cancel: Option<&CancellationHandle>) -> Result<OrderedSequence<T>> {
        ensure_live(cancel)?;
        match self {
            DeferredOrdered::Ready(sequence) => Ok(sequence),
            DeferredOrdered::Pending(producer) => producer.await,
        }
    }

    async fn realize(
        self,
        op: &'static str,
        cancel: Option<&CancellationHandle>,
    ) -> Result<OrderedSequence<T>> {
        let origin = if self.is_ready() { "ready" } else { "pending" };
        let outcome = self.resolve(cancel).await;
        match &outcome {
            Ok(sequence) => metrics::emit_span(
                op,
                &[
                    ("source", origin.to_string()),
                    ("len", sequence.len().to_string()),
                    ("levels", sequence.depth().to_string()),
                ],
            ),
            Err(err) => metrics::emit_failure(op, err),
        }
        outcome
    }

    pub async fn then_by<K, F>(self, key: F, cancel: Option<&CancellationHandle>) -> Result<Self>
    where
        K: Ord + 'static,
        F: Fn(&T) -> K + Send + Sync + 'static,
    {
        self.push_level("then_by", key, NaturalOrder, false, cancel).await
    }

    pub async fn then_by_with<K, F, C>(
        self,
        key: F,
        comparer: C,
        cancel: Option<&CancellationHandle>,
    ) -> Result<Self>
    where
        K: 'static,
        F: Fn(&T) -> K + Send + Sync + 'static,
        C: OrderingComparer<K> + Send + Sync + 'static,
    {
        self.push_level("then_by", key, comparer, false, cancel).await
    }

    pub async fn then_by_descending<K, F>(
        self,
        key: F,
        cancel: Option<&CancellationHandle>,
    ) -> Result<Self>
    where
        K: Ord + 'static,
        F: Fn(&T) -> K + Send + Sync + 'static,
    {
        self.push_level("then_by_descending", key, NaturalOrder, true, cancel)
            .await
    }

    pub async fn then_by_descending_with<K, F, C>(
        self,
        key: F,
        comparer: C,
        cancel: Option<&CancellationHandle>,
    ) -> Result<Self>
    where
        K: 'static,
        F: Fn(&T) -> K + Send + Sync + 'static,
        C: OrderingComparer<K> + Send + Sync + 'static,
    {
        self.push_level("then_by_descending", key, comparer, true, cancel)
            .await
    }

    async fn push_level<K, F, C>(
        self,
        op: &'static str,
        key: F,
        comparer: C,
        descending: bool,
        cancel: Option<&CancellationHandle>,
    ) -> Result<Self>
    where
        K: 'static,
        F: Fn(&T) -> K + Send + Sync + 'static,
        C: OrderingComparer<K> + Send + Sync + 'static,
    {
        let sequence = self.realize(op, cancel).await?;
        Ok(DeferredOrdered::Ready(
            sequence.then_by(key, comparer, descending),
        ))
    }

    /// Apply every level and return the sorted elements.
    pub async fn to_list(self, cancel: Option<&CancellationHandle>) -> Result<Vec<T>> {
        Ok(self.realize("to_list", cancel).await?.into_vec())
    }

    /// Sort now and continue with the unordered catalog.
    pub async fn into_deferred(self, cancel: Option<&CancellationHandle>) -> Result<Deferred<T>> {
        Ok(Deferred::Ready(self.to_list(cancel).await?))
    }
}

impl<T> From<OrderedSequence<T>> for DeferredOrdered<T> {
    fn from(sequence: OrderedSequence<T>) -> Self {
        DeferredOrdered::Ready(sequence)
    }
}

impl<T> fmt::Debug for DeferredOrdered<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeferredOrdered::Pending(_) => f.write_str("DeferredOrdered::Pending"),
            DeferredOrdered::Ready(seq) => write!(
                f,
                "DeferredOrdered::Ready({} items, {} levels)",
                seq.len(),
                seq.depth()
            ),
        }
    }
}
