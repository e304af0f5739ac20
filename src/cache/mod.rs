//! Cache Module
//!
//! Provides a fixed-capacity in-memory cache with per-item TTL expiration and
//! least-recently-accessed eviction, layered over a swappable storage backend.

mod comparer;
mod eviction;
mod hash_storage;
mod item;
mod service;
mod storage;

#[cfg(test)]
mod property_tests;

// Re-export public types
pub use comparer::{CaseInsensitiveComparer, DefaultKeyComparer, KeyComparer};
pub use eviction::least_recently_accessed;
pub use hash_storage::{HashStorage, HashStorageFactory};
pub use item::{lifetime_from_secs, CacheItem};
pub use service::CacheService;
pub use storage::{Storage, StorageFactory};

// == Public Constants ==
/// Capacity used when the caller does not choose one
pub const DEFAULT_CAPACITY: usize = 7;
