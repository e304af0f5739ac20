//! Cache Service Module
//!
//! Capacity and TTL policy layered on top of a swappable storage backend.

use std::fmt::Debug;
use std::hash::Hash;
use std::sync::Arc;

use tracing::debug;

use crate::cache::{
    least_recently_accessed, lifetime_from_secs, CacheItem, DefaultKeyComparer, KeyComparer,
    Storage, StorageFactory, DEFAULT_CAPACITY,
};
use crate::config::Config;
use crate::error::{CacheError, Result};

// == Cache Service ==
/// Fixed-capacity cache with per-item lifetimes.
///
/// When full, adding a new key evicts the entry with the oldest last access
/// time. Expired entries are purged lazily, when a read finds them.
///
/// Not synchronized: share it behind a mutex if several threads need it.
pub struct CacheService<K, V> {
    /// Backend built by the storage factory at construction
    storage: Box<dyn Storage<K, V>>,
    /// Maximum number of entries, fixed at construction
    capacity: usize,
}

impl<K, V> CacheService<K, V>
where
    K: Debug + Clone,
    V: Clone,
{
    // == Constructor ==
    /// Creates a cache, building its storage through `storage_factory`.
    ///
    /// # Errors
    /// - `InvalidCapacity` if `capacity` is zero
    /// - `InvalidArgument` if the key comparer or the storage factory is missing
    pub fn new(
        capacity: usize,
        key_comparer: Option<Arc<dyn KeyComparer<K>>>,
        storage_factory: Option<&dyn StorageFactory<K, V>>,
    ) -> Result<Self> {
        if capacity == 0 {
            return Err(CacheError::InvalidCapacity(capacity));
        }

        let key_comparer = key_comparer.ok_or_else(|| {
            CacheError::InvalidArgument("the key comparer can not be absent".to_string())
        })?;
        let storage_factory = storage_factory.ok_or_else(|| {
            CacheError::InvalidArgument("the storage factory can not be absent".to_string())
        })?;

        let storage = storage_factory.create_storage(capacity, key_comparer)?;
        debug!(capacity, "cache service created");

        Ok(Self { storage, capacity })
    }

    /// Creates a cache with the default capacity and a custom key comparer.
    pub fn with_comparer(
        key_comparer: Arc<dyn KeyComparer<K>>,
        storage_factory: &dyn StorageFactory<K, V>,
    ) -> Result<Self> {
        Self::new(DEFAULT_CAPACITY, Some(key_comparer), Some(storage_factory))
    }

    // == Add Item ==
    /// Stores `item` under `key` for `lifetime_secs` seconds.
    ///
    /// An existing entry for the key is replaced. If the cache is full, the
    /// least recently accessed entry is evicted first.
    ///
    /// # Errors
    /// - `InvalidKey` if `key` is `None`
    /// - `InvalidLifetime` if `lifetime_secs` is not positive or out of range
    pub fn add_item(
        &mut self,
        key: impl Into<Option<K>>,
        item: V,
        lifetime_secs: i64,
    ) -> Result<()> {
        let key = key.into().ok_or(CacheError::InvalidKey)?;

        lifetime_from_secs(lifetime_secs)?;

        if self.storage.is_cached_item(Some(&key))? {
            debug!(?key, "replacing existing entry");
            self.storage.remove(Some(&key))?;
        }

        if self.storage.cached_item_count() >= self.capacity {
            self.evict_least_recently_accessed()?;
        }

        self.storage.add(Some(key), item, lifetime_secs)
    }

    // == Get Item ==
    /// Returns the value stored under `key`, refreshing its last access time.
    ///
    /// # Errors
    /// - `InvalidKey` if `key` is `None`
    /// - `ItemNotFound` if nothing is stored under `key`
    /// - `ItemExpired` if the entry's lifetime has lapsed; the entry is removed
    pub fn get_item<'a>(&mut self, key: impl Into<Option<&'a K>>) -> Result<V>
    where
        K: 'a,
    {
        let key = key.into().ok_or(CacheError::InvalidKey)?;

        if !self.storage.is_cached_item(Some(key))? {
            return Err(CacheError::ItemNotFound(format!("{:?}", key)));
        }

        let item = self.storage.get(Some(key))?;
        if !item.is_expired() {
            return Ok(item.value.clone());
        }

        self.storage.remove(Some(key))?;
        debug!(?key, "purged expired entry");
        Err(CacheError::ItemExpired(format!("{:?}", key)))
    }

    // == Remove Item ==
    /// Removes the entry stored under `key`.
    ///
    /// # Errors
    /// - `InvalidKey` if `key` is `None`
    /// - `KeyNotFound` if nothing is stored under `key`
    pub fn remove_item<'a>(&mut self, key: impl Into<Option<&'a K>>) -> Result<()>
    where
        K: 'a,
    {
        self.storage.remove(key.into())
    }

    // == Contains Key ==
    /// Returns whether an entry exists for `key`.
    ///
    /// Does not refresh the access time and does not check expiry.
    pub fn contains_key<'a>(&self, key: impl Into<Option<&'a K>>) -> Result<bool>
    where
        K: 'a,
    {
        self.storage.is_cached_item(key.into())
    }

    // == Entries ==
    /// Returns an owned snapshot of every entry, expired or not.
    pub fn entries(&self) -> Vec<(K, CacheItem<V>)> {
        self.storage
            .get_all()
            .map(|(key, item)| (key.clone(), item.clone()))
            .collect()
    }

    /// Returns the current number of entries.
    pub fn len(&self) -> usize {
        self.storage.cached_item_count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the maximum number of entries.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    fn evict_least_recently_accessed(&mut self) -> Result<()> {
        let victim = least_recently_accessed(self.storage.get_all()).cloned();

        if let Some(victim) = victim {
            self.storage.remove(Some(&victim))?;
            debug!(key = ?victim, "evicted least recently accessed entry");
        }

        Ok(())
    }
}

impl<K, V> CacheService<K, V>
where
    K: Debug + Clone + Eq + Hash + 'static,
    V: Clone,
{
    /// Creates a cache with the default capacity and natural key equality.
    pub fn with_factory(storage_factory: &dyn StorageFactory<K, V>) -> Result<Self> {
        Self::with_capacity(DEFAULT_CAPACITY, storage_factory)
    }

    /// Creates a cache of `capacity` entries with natural key equality.
    pub fn with_capacity(
        capacity: usize,
        storage_factory: &dyn StorageFactory<K, V>,
    ) -> Result<Self> {
        let key_comparer: Arc<dyn KeyComparer<K>> = Arc::new(DefaultKeyComparer::<K>::new());
        Self::new(capacity, Some(key_comparer), Some(storage_factory))
    }

    /// Creates a cache sized from `config`.
    pub fn from_config(
        config: &Config,
        storage_factory: &dyn StorageFactory<K, V>,
    ) -> Result<Self> {
        Self::with_capacity(config.capacity, storage_factory)
    }
}
