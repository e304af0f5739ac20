//! Cache Item Module
//!
//! Defines the structure for individual cache items with TTL support.

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;

use crate::error::{CacheError, Result};

/// Converts a lifetime in seconds, rejecting non-positive or unrepresentable values.
pub fn lifetime_from_secs(lifetime_secs: i64) -> Result<Duration> {
    Duration::try_seconds(lifetime_secs)
        .filter(|lifetime| *lifetime > Duration::zero())
        .ok_or(CacheError::InvalidLifetime(lifetime_secs))
}

// == Cache Item ==
/// Represents a single cached value and its access metadata.
///
/// Created once per key by a storage backend; only a successful read
/// mutates it afterwards.
#[derive(Debug, Clone, Serialize)]
pub struct CacheItem<V> {
    /// The cached payload
    pub value: V,
    /// Set at creation and refreshed on every successful read
    pub last_access_time: DateTime<Utc>,
    /// `creation time + lifetime`, never recomputed
    pub expiration_time: DateTime<Utc>,
    /// Storage-wide access sequence number, orders accesses that share a timestamp
    pub access_tick: u64,
}

impl<V> CacheItem<V> {
    // == Constructor ==
    /// Creates a new cache item expiring `lifetime` from now.
    ///
    /// Lifetimes reaching past the representable range never expire.
    ///
    /// # Arguments
    /// * `value` - The value to store
    /// * `lifetime` - How long the item stays fresh
    /// * `access_tick` - The storage's current access sequence number
    pub fn new(value: V, lifetime: Duration, access_tick: u64) -> Self {
        let now = Utc::now();

        Self {
            value,
            last_access_time: now,
            expiration_time: now
                .checked_add_signed(lifetime)
                .unwrap_or(DateTime::<Utc>::MAX_UTC),
            access_tick,
        }
    }

    // == Touch ==
    /// Records a read: refreshes the last access time, leaves expiration alone.
    pub fn touch(&mut self, access_tick: u64) {
        self.last_access_time = Utc::now();
        self.access_tick = access_tick;
    }

    // == Is Expired ==
    /// Checks if the item has expired.
    ///
    /// An item is expired once the current time is greater than or equal to
    /// its expiration time.
    pub fn is_expired(&self) -> bool {
        Utc::now() >= self.expiration_time
    }

    // == Time To Live ==
    /// Returns the remaining lifetime, or zero once the item has expired.
    pub fn time_to_live(&self) -> Duration {
        let remaining = self.expiration_time - Utc::now();
        if remaining > Duration::zero() {
            remaining
        } else {
            Duration::zero()
        }
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use std::thread::sleep;
    use std::time::Duration as StdDuration;

    #[test]
    fn test_item_creation() {
        let item = CacheItem::new("test_value".to_string(), Duration::seconds(60), 1);

        assert_eq!(item.value, "test_value");
        assert_eq!(item.access_tick, 1);
        assert_eq!(
            item.expiration_time - item.last_access_time,
            Duration::seconds(60)
        );
        assert!(!item.is_expired());
    }

    #[test]
    fn test_item_expiration() {
        let item = CacheItem::new("test_value", Duration::seconds(1), 0);

        assert!(!item.is_expired());

        // Wait for expiration
        sleep(StdDuration::from_millis(1100));

        assert!(item.is_expired());
        assert_eq!(item.time_to_live(), Duration::zero());
    }

    #[test]
    fn test_touch_refreshes_access_not_expiration() {
        let mut item = CacheItem::new(7, Duration::seconds(10), 0);
        let created = item.last_access_time;
        let expires = item.expiration_time;

        sleep(StdDuration::from_millis(5));
        item.touch(3);

        assert!(item.last_access_time > created);
        assert_eq!(item.expiration_time, expires);
        assert_eq!(item.access_tick, 3);
    }

    #[test]
    fn test_lifetime_from_secs() {
        assert_eq!(lifetime_from_secs(5), Ok(Duration::seconds(5)));
        assert_eq!(lifetime_from_secs(0), Err(CacheError::InvalidLifetime(0)));
        assert_eq!(lifetime_from_secs(-3), Err(CacheError::InvalidLifetime(-3)));
        assert_eq!(
            lifetime_from_secs(i64::MAX),
            Err(CacheError::InvalidLifetime(i64::MAX))
        );
    }

    #[test]
    fn test_huge_lifetime_saturates() {
        let item = CacheItem::new((), Duration::MAX, 0);

        assert_eq!(item.expiration_time, DateTime::<Utc>::MAX_UTC);
        assert!(!item.is_expired());
    }

    #[test]
    fn test_time_to_live_remaining() {
        let item = CacheItem::new((), Duration::seconds(10), 0);

        let remaining = item.time_to_live();
        assert!(remaining <= Duration::seconds(10));
        assert!(remaining >= Duration::seconds(9));
    }

    #[test]
    fn test_expiration_boundary_condition() {
        let now = Utc::now();
        let item = CacheItem {
            value: "test",
            last_access_time: now,
            expiration_time: now, // Expires exactly at creation time
            access_tick: 0,
        };

        assert!(item.is_expired(), "Item should be expired at boundary");
    }
}
