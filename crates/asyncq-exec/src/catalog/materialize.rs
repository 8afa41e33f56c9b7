use std::collections::{HashMap, HashSet};
use std::hash::Hash;

use asyncq_core::cancel::CancellationHandle;
use asyncq_core::comparer::EqualityComparer;
use asyncq_core::error::Result;
use asyncq_operators::materialize as ops;
use asyncq_operators::{Dictionary, ElementSet};

use crate::deferred::Deferred;

impl<T> Deferred<T> {
    pub async fn to_list(self, cancel: Option<&CancellationHandle>) -> Result<Vec<T>> {
        self.realize("to_list", cancel).await
    }

    pub async fn to_array(self, cancel: Option<&CancellationHandle>) -> Result<Box<[T]>> {
        Ok(ops::to_array(self.realize("to_array", cancel).await?))
    }

    pub async fn to_hash_set(self, cancel: Option<&CancellationHandle>) -> Result<HashSet<T>>
    where
        T: Eq + Hash,
    {
        Ok(ops::to_hash_set(self.realize("to_hash_set", cancel).await?))
    }

    pub async fn to_hash_set_with<C>(
        self,
        comparer: C,
        cancel: Option<&CancellationHandle>,
    ) -> Result<ElementSet<T, C>>
    where
        C: EqualityComparer<T>,
    {
        let items = self.realize("to_hash_set", cancel).await?;
        Ok(ops::to_hash_set_with(items, comparer))
    }

    /// Fails with `DuplicateKey` on the first repeated key.
    pub async fn to_dictionary<K, KF>(
        self,
        key: KF,
        cancel: Option<&CancellationHandle>,
    ) -> Result<HashMap<K, T>>
    where
        K: Eq + Hash,
        KF: FnMut(&T) -> K,
    {
        ops::to_dictionary(self.realize("to_dictionary", cancel).await?, key)
    }

    pub async fn to_dictionary_with<K, KF, C>(
        self,
        key: KF,
        comparer: C,
        cancel: Option<&CancellationHandle>,
    ) -> Result<Dictionary<K, T, C>>
    where
        KF: FnMut(&T) -> K,
        C: EqualityComparer<K>,
    {
        let items = self.realize("to_dictionary", cancel).await?;
        ops::to_dictionary_with(items, key, comparer)
    }

    pub async fn to_dictionary_element<K, V, KF, EF>(
        self,
        key: KF,
        element: EF,
        cancel: Option<&CancellationHandle>,
    ) -> Result<HashMap<K, V>>
    where
        K: Eq + Hash,
        KF: FnMut(&T) -> K,
        EF: FnMut(T) -> V,
    {
        let items = self.realize("to_dictionary", cancel).await?;
        ops::to_dictionary_element(items, key, element)
    }

    pub async fn to_dictionary_element_with<K, V, KF, EF, C>(
        self,
        key: KF,
        element: EF,
        comparer: C,
        cancel: Option<&CancellationHandle>,
    ) -> Result<Dictionary<K, V, C>>
    where
        KF: FnMut(&T) -> K,
        EF: FnMut(T) -> V,
        C: EqualityComparer<K>,
    {
        let items = self.realize("to_dictionary", cancel).await?;
        ops::to_dictionary_element_with(items, key, element, comparer)
    }
}
