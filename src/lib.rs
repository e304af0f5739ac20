//! TTL Cache - A fixed-capacity in-memory cache
//!
//! Provides per-item TTL expiration and least-recently-accessed eviction over
//! a pluggable storage backend.

pub mod cache;
pub mod config;
pub mod error;

pub use cache::{CacheService, HashStorageFactory};
pub use config::Config;
pub use error::{CacheError, Result};
