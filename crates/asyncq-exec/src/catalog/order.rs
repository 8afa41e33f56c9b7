use asyncq_core::cancel::CancellationHandle;
use asyncq_core::comparer::OrderingComparer;
use asyncq_core::error::Result;
use asyncq_operators::sort;

use crate::deferred::Deferred;
use crate::ordered::DeferredOrdered;

/// Ordering starts here; secondary levels are added on `DeferredOrdered`.
impl<T> Deferred<T> {
    pub async fn order_by<K, F>(
        self,
        key: F,
        cancel: Option<&CancellationHandle>,
    ) -> Result<DeferredOrdered<T>>
    where
        K: Ord + 'static,
        F: Fn(&T) -> K + Send + Sync + 'static,
    {
        let items = self.realize("order_by", cancel).await?;
        Ok(DeferredOrdered::Ready(sort::order_by(items, key)))
    }

    pub async fn order_by_with<K, F, C>(
        self,
        key: F,
        comparer: C,
        cancel: Option<&CancellationHandle>,
    ) -> Result<DeferredOrdered<T>>
    where
        K: 'static,
        F: Fn(&T) -> K + Send + Sync + 'static,
        C: OrderingComparer<K> + Send + Sync + 'static,
    {
        let items = self.realize("order_by", cancel).await?;
        Ok(DeferredOrdered::Ready(sort::order_by_with(items, key, comparer)))
    }

    pub async fn order_by_descending<K, F>(
        self,
        key: F,
        cancel: Option<&CancellationHandle>,
    ) -> Result<DeferredOrdered<T>>
    where
        K: Ord + 'static,
        F: Fn(&T) -> K + Send + Sync + 'static,
    {
        let items = self.realize("order_by_descending", cancel).await?;
        Ok(DeferredOrdered::Ready(sort::order_by_descending(items, key)))
    }

    pub async fn order_by_descending_with<K, F, C>(
        self,
        key: F,
        comparer: C,
        cancel: Option<&CancellationHandle>,
    ) -> Result<DeferredOrdered<T>>
    where
        K: 'static,
        F: Fn(&T) -> K + Send + Sync + 'static,
        C: OrderingComparer<K> + Send + Sync + 'static,
    {
        let items = self.realize("order_by_descending", cancel).await?;
        Ok(DeferredOrdered::Ready(sort::order_by_descending_with(
            items, key, comparer,
        )))
    }
}

#[cfg(test)]
mod tests {
    use crate::deferred::Deferred;

    #[derive(Debug, Clone, PartialEq)]
    struct Row {
        a: i32,
        b: i32,
        tag: &'static str,
    }

    fn rows() -> Deferred<Row> {
        Deferred::pending(async {
            Ok(vec![
                Row { a: 2, b: 1, tag: "x" },
                Row { a: 1, b: 2, tag: "y" },
                Row { a: 1, b: 1, tag: "z" },
                Row { a: 1, b: 1, tag: "w" },
            ])
        })
    }

    #[tokio::test]
    async fn order_then_by_is_stable() {
        let tags: Vec<&str> = rows()
            .order_by(|r: &Row| r.a, None)
            .await
            .unwrap()
            .then_by(|r: &Row| r.b, None)
            .await
            .unwrap()
            .to_list(None)
            .await
            .unwrap()
            .into_iter()
            .map(|r| r.tag)
            .collect();
        assert_eq!(tags, vec!["z", "w", "y", "x"]);
    }

    #[tokio::test]
    async fn descending_with_comparer() {
        let tags: Vec<&str> = rows()
            .order_by_descending_with(|r: &Row| r.tag, |a: &&str, b: &&str| a.cmp(b), None)
            .await
            .unwrap()
            .to_list(None)
            .await
            .unwrap()
            .into_iter()
            .map(|r| r.tag)
            .collect();
        assert_eq!(tags, vec!["z", "y", "x", "w"]);
    }
}
