//! Hash Storage Module
//!
//! Hash-bucketed storage backend honouring an injected key comparer.

use std::collections::HashMap;
use std::fmt::Debug;
use std::sync::Arc;

use tracing::trace;

use crate::cache::{lifetime_from_secs, CacheItem, KeyComparer, Storage, StorageFactory};
use crate::error::{CacheError, Result};

// == Hash Storage ==
/// In-memory storage keyed through a `KeyComparer`.
///
/// Items are grouped into buckets by `hash_key`; within a bucket the comparer
/// decides equality, so custom comparers (e.g. case-insensitive) work without
/// rewriting keys.
pub struct HashStorage<K, V> {
    /// Items grouped by key hash
    buckets: HashMap<u64, Vec<(K, CacheItem<V>)>>,
    /// Equality used for key lookups
    key_comparer: Arc<dyn KeyComparer<K>>,
    /// Number of stored items, always the sum of bucket lengths
    count: usize,
    /// Next access sequence number
    next_tick: u64,
}

impl<K: Debug, V> HashStorage<K, V> {
    // == Constructor ==
    /// Creates an empty storage sized for `capacity` items.
    ///
    /// Fails with `InvalidCapacity` if `capacity` is zero.
    pub fn new(capacity: usize, key_comparer: Arc<dyn KeyComparer<K>>) -> Result<Self> {
        if capacity == 0 {
            return Err(CacheError::InvalidCapacity(capacity));
        }

        Ok(Self {
            buckets: HashMap::with_capacity(capacity),
            key_comparer,
            count: 0,
            next_tick: 0,
        })
    }

    fn tick(&mut self) -> u64 {
        let tick = self.next_tick;
        self.next_tick += 1;
        tick
    }

    /// Locates `key` as `(bucket hash, index within bucket)`.
    fn position(&self, key: &K) -> (u64, Option<usize>) {
        let hash = self.key_comparer.hash_key(key);
        let index = self.buckets.get(&hash).and_then(|bucket| {
            bucket
                .iter()
                .position(|(stored, _)| self.key_comparer.equals(stored, key))
        });
        (hash, index)
    }
}

impl<K: Debug, V> Storage<K, V> for HashStorage<K, V> {
    fn cached_item_count(&self) -> usize {
        self.count
    }

    fn is_cached_item(&self, key: Option<&K>) -> Result<bool> {
        let key = key.ok_or(CacheError::InvalidKey)?;
        Ok(self.position(key).1.is_some())
    }

    fn get_all(&self) -> Box<dyn Iterator<Item = (&K, &CacheItem<V>)> + '_> {
        Box::new(
            self.buckets
                .values()
                .flat_map(|bucket| bucket.iter().map(|(key, item)| (key, item))),
        )
    }

    fn get(&mut self, key: Option<&K>) -> Result<&CacheItem<V>> {
        let key = key.ok_or(CacheError::InvalidKey)?;
        let (hash, index) = self.position(key);
        let index = index.ok_or_else(|| CacheError::ItemNotFound(format!("{:?}", key)))?;

        let tick = self.tick();
        let bucket = self
            .buckets
            .get_mut(&hash)
            .ok_or_else(|| CacheError::ItemNotFound(format!("{:?}", key)))?;
        let item = &mut bucket[index].1;
        item.touch(tick);
        trace!(?key, tick, "storage read");

        Ok(item)
    }

    fn add(&mut self, key: Option<K>, value: V, lifetime_secs: i64) -> Result<()> {
        let key = key.ok_or(CacheError::InvalidKey)?;

        let lifetime = lifetime_from_secs(lifetime_secs)?;

        let (hash, index) = self.position(&key);
        if index.is_some() {
            return Err(CacheError::DuplicateKey(format!("{:?}", key)));
        }

        let tick = self.tick();
        trace!(?key, lifetime_secs, tick, "storage insert");
        let item = CacheItem::new(value, lifetime, tick);
        self.buckets.entry(hash).or_default().push((key, item));
        self.count += 1;

        Ok(())
    }

    fn remove(&mut self, key: Option<&K>) -> Result<()> {
        let key = key.ok_or(CacheError::InvalidKey)?;
        let (hash, index) = self.position(key);
        let index = index.ok_or_else(|| CacheError::KeyNotFound(format!("{:?}", key)))?;

        if let Some(bucket) = self.buckets.get_mut(&hash) {
            bucket.swap_remove(index);
            if bucket.is_empty() {
                self.buckets.remove(&hash);
            }
            self.count -= 1;
            trace!(?key, "storage remove");
        }

        Ok(())
    }
}

// == Hash Storage Factory ==
/// Builds `HashStorage` backends.
#[derive(Debug, Default, Clone, Copy)]
pub struct HashStorageFactory;

impl<K, V> StorageFactory<K, V> for HashStorageFactory
where
    K: Debug + 'static,
    V: 'static,
{
    fn create_storage(
        &self,
        capacity: usize,
        key_comparer: Arc<dyn KeyComparer<K>>,
    ) -> Result<Box<dyn Storage<K, V>>> {
        Ok(Box::new(HashStorage::new(capacity, key_comparer)?))
    }
}
