//! Error types for the cache
//!
//! Provides unified error handling using thiserror.

use thiserror::Error;

// == Cache Error Enum ==
/// Unified error type for the cache service and its storage backends.
///
/// Every variant is a caller-handleable condition. Validation failures
/// guarantee that no mutation happened.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CacheError {
    /// A required dependency (key comparer, storage factory) was not supplied
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Capacity must be at least one entry
    #[error("Invalid capacity: {0}, capacity must be greater than zero")]
    InvalidCapacity(usize),

    /// No key was supplied to a keyed operation
    #[error("Invalid key: the key can not be absent")]
    InvalidKey,

    /// Lifetime must be a positive number of seconds
    #[error("Invalid lifetime: {0}s, lifetime must be greater than zero")]
    InvalidLifetime(i64),

    /// Storage already holds an item for this key
    #[error("Duplicate key: {0}")]
    DuplicateKey(String),

    /// Storage holds no item for this key
    #[error("Key not found: {0}")]
    KeyNotFound(String),

    /// The cache holds no item for this key
    #[error("Item not found: {0}")]
    ItemNotFound(String),

    /// The item's lifetime has lapsed; it was purged before this error was raised
    #[error("Item expired: {0}")]
    ItemExpired(String),
}

// == Result Type Alias ==
/// Convenience Result type for the cache.
pub type Result<T> = std::result::Result<T, CacheError>;
