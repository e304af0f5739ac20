//! Storage Contract Module
//!
//! The key-indexed storage capability the cache service is built on, and the
//! factory that constructs it.

use std::sync::Arc;

use crate::cache::{CacheItem, KeyComparer};
use crate::error::Result;

// == Storage ==
/// Mechanical key-indexed storage of cache items.
///
/// A storage backend makes no policy decisions: it enforces no capacity bound
/// and never looks at expiration. Keys are unique under the comparer the
/// backend was built with. `None` keys are rejected with `InvalidKey`.
pub trait Storage<K, V> {
    /// Number of items currently stored.
    fn cached_item_count(&self) -> usize;

    /// Returns whether an item is stored under `key`, without side effects.
    fn is_cached_item(&self, key: Option<&K>) -> Result<bool>;

    /// Enumerates every stored `(key, item)` pair, in no particular order.
    fn get_all(&self) -> Box<dyn Iterator<Item = (&K, &CacheItem<V>)> + '_>;

    /// Fetches the item under `key`, refreshing its last access time.
    ///
    /// Fails with `ItemNotFound` if nothing is stored under `key`.
    fn get(&mut self, key: Option<&K>) -> Result<&CacheItem<V>>;

    /// Stores a new item living `lifetime_secs` seconds.
    ///
    /// Fails with `InvalidLifetime` for non-positive lifetimes and with
    /// `DuplicateKey` if `key` is already stored.
    fn add(&mut self, key: Option<K>, value: V, lifetime_secs: i64) -> Result<()>;

    /// Deletes the item under `key`, failing with `KeyNotFound` if absent.
    fn remove(&mut self, key: Option<&K>) -> Result<()>;
}

// == Storage Factory ==
/// Builds storage instances for a cache service.
///
/// Called exactly once, while the service is being constructed.
pub trait StorageFactory<K, V> {
    fn create_storage(
        &self,
        capacity: usize,
        key_comparer: Arc<dyn KeyComparer<K>>,
    ) -> Result<Box<dyn Storage<K, V>>>;
}
