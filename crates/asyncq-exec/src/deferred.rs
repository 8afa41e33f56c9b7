//! Pending source binding.
//!
//! `resolve` is the one gate every operator passes through: it consults the
//! cancellation handle before touching the producer, then awaits the producer
//! exactly once and returns its output unchanged. Nothing is memoized; a
//! `Deferred` is consumed by the operator that resolves it.

use std::fmt;
use std::future::Future;

use futures::future::BoxFuture;
use futures::FutureExt;

use asyncq_core::cancel::{ensure_live, CancellationHandle};
use asyncq_core::error::{Error, Result, SourceError};

use crate::metrics;

pub enum Deferred<T> {
    Pending(BoxFuture<'static, Result<Vec<T>>>),
    Ready(Vec<T>),
}

impl<T> Deferred<T> {
    /// Wrap a producer. It is not polled until an operator resolves it.
    pub fn pending<F>(producer: F) -> Self
    where
        F: Future<Output = Result<Vec<T>>> + Send + 'static,
    {
        Deferred::Pending(producer.boxed())
    }

    /// Wrap a producer that fails with its own error type. Failures surface
    /// as `Error::Source`.
    pub fn try_pending<F, E>(producer: F) -> Self
    where
        F: Future<Output = std::result::Result<Vec<T>, E>> + Send + 'static,
        E: Into<SourceError>,
    {
        Deferred::Pending(producer.map(|out| out.map_err(Error::source)).boxed())
    }

    pub fn ready(items: Vec<T>) -> Self {
        Deferred::Ready(items)
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, Deferred::Ready(_))
    }

    pub async fn resolve(self, cancel: Option<&CancellationHandle>) -> Result<Vec<T>> {
        ensure_live(cancel)?;
        match self {
            Deferred::Ready(items) => Ok(items),
            Deferred::Pending(producer) => producer.await,
        }
    }

    /// `resolve` plus an operator-scoped trace record.
    pub(crate) async fn realize(
        self,
        op: &'static str,
        cancel: Option<&CancellationHandle>,
    ) -> Result<Vec<T>> {
        let origin = if self.is_ready() { "ready" } else { "pending" };
        let outcome = self.resolve(cancel).await;
        match &outcome {
            Ok(items) => metrics::emit_span(
                op,
                &[("source", origin.to_string()), ("len", items.len().to_string())],
            ),
            Err(err) => metrics::emit_failure(op, err),
        }
        outcome
    }
}

/// Free-function form of `Deferred::resolve`.
pub async fn resolve<T>(
    source: Deferred<T>,
    cancel: Option<&CancellationHandle>,
) -> Result<Vec<T>> {
    source.resolve(cancel).await
}

impl<T> From<Vec<T>> for Deferred<T> {
    fn from(items: Vec<T>) -> Self {
        Deferred::Ready(items)
    }
}

impl<T> FromIterator<T> for Deferred<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Deferred::Ready(iter.into_iter().collect())
    }
}

impl<T> fmt::Debug for Deferred<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Deferred::Pending(_) => f.write_str("Deferred::Pending"),
            Deferred::Ready(items) => write!(f, "Deferred::Ready({} items)", items.len()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;

    fn probed(items: Vec<i32>) -> (Deferred<i32>, Arc<AtomicBool>) {
        let polled = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&polled);
        let source = Deferred::pending(async move {
            flag.store(true, Ordering::SeqCst);
            Ok(items)
        });
        (source, polled)
    }

    #[tokio::test]
    async fn canceled_handle_never_polls_producer() {
        let (source, polled) = probed(vec![1, 2]);
        let cancel = CancellationHandle::new();
        cancel.cancel();
        let err = source.resolve(Some(&cancel)).await.unwrap_err();
        assert!(err.is_canceled());
        assert!(!polled.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn canceled_handle_applies_to_ready_sources() {
        let cancel = CancellationHandle::new();
        cancel.cancel();
        let err = Deferred::ready(vec![1]).resolve(Some(&cancel)).await;
        assert!(matches!(err, Err(Error::Canceled)));
    }

    #[tokio::test]
    async fn live_handle_awaits_once() {
        let (source, polled) = probed(vec![3, 4]);
        let cancel = CancellationHandle::new();
        assert!(!source.is_ready());
        assert_eq!(resolve(source, Some(&cancel)).await.unwrap(), vec![3, 4]);
        assert!(polled.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn producer_error_is_returned_unchanged() {
        let source: Deferred<u8> = Deferred::pending(async { Err(Error::Overflow) });
        assert!(matches!(source.resolve(None).await, Err(Error::Overflow)));

        let io: Deferred<u8> = Deferred::try_pending(async {
            Err(std::io::Error::new(std::io::ErrorKind::NotFound, "gone"))
        });
        match io.resolve(None).await {
            Err(Error::Source(inner)) => assert_eq!(inner.to_string(), "gone"),
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[tokio::test]
    async fn cancel_after_resolve_does_not_matter() {
        let cancel = CancellationHandle::new();
        let items = Deferred::from(vec![7]).resolve(Some(&cancel)).await.unwrap();
        cancel.cancel();
        assert_eq!(items, vec![7]);
    }

    #[test]
    fn collects_into_ready() {
        let d: Deferred<i32> = (1..=3).collect();
        assert!(d.is_ready());
        assert_eq!(format!("{d:?}"), "Deferred::Ready(3 items)");
    }
}
