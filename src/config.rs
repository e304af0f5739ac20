//! Configuration Module
//!
//! Handles loading cache configuration from environment variables.

use std::env;

use crate::cache::DEFAULT_CAPACITY;

/// Default lifetime in seconds used when a caller has no specific TTL in mind.
pub const DEFAULT_LIFETIME: i64 = 60;

/// Cache configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Maximum number of entries the cache can hold
    pub capacity: usize,
    /// Lifetime in seconds for items added without an explicit TTL
    pub default_lifetime: i64,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `CACHE_CAPACITY` - Maximum cache entries (default: 7)
    /// - `DEFAULT_LIFETIME` - Default lifetime in seconds (default: 60)
    pub fn from_env() -> Self {
        Self {
            capacity: env::var("CACHE_CAPACITY")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_CAPACITY),
            default_lifetime: env::var("DEFAULT_LIFETIME")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_LIFETIME),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
            default_lifetime: DEFAULT_LIFETIME,
        }
    }
}
