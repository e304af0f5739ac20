//! Property-Based Tests for Cache Module
//!
//! Uses proptest to check the cache service's policy against arbitrary inputs.

use proptest::prelude::*;
use std::collections::HashSet;
use std::thread::sleep;
use std::time::Duration;

use crate::cache::{CacheService, HashStorageFactory};
use crate::error::CacheError;

// == Test Configuration ==
const TEST_CAPACITY: usize = 100;
const TEST_LIFETIME: i64 = 300;

// == Strategies ==
/// Generates cache keys, zero included
fn key_strategy() -> impl Strategy<Value = u32> {
    0u32..1000
}

/// Generates cache values
fn value_strategy() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9 ]{1,64}".prop_map(|s| s)
}

/// Generates a list of distinct keys
fn unique_keys_strategy(min: usize, max: usize) -> impl Strategy<Value = Vec<u32>> {
    prop::collection::hash_set(key_strategy(), min..max).prop_map(|set| set.into_iter().collect())
}

fn new_cache(capacity: usize) -> CacheService<u32, String> {
    CacheService::with_capacity(capacity, &HashStorageFactory).unwrap()
}

/// A cache operation for sequence testing
#[derive(Debug, Clone)]
enum CacheOp {
    Add { key: u32, value: String },
    Get { key: u32 },
    Remove { key: u32 },
}

fn cache_op_strategy() -> impl Strategy<Value = CacheOp> {
    prop_oneof![
        (key_strategy(), value_strategy()).prop_map(|(key, value)| CacheOp::Add { key, value }),
        key_strategy().prop_map(|key| CacheOp::Get { key }),
        key_strategy().prop_map(|key| CacheOp::Remove { key }),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    // Adding then immediately reading a key returns the stored value
    #[test]
    fn prop_roundtrip_storage(key in key_strategy(), value in value_strategy()) {
        let mut cache = new_cache(TEST_CAPACITY);

        cache.add_item(key, value.clone(), TEST_LIFETIME).unwrap();

        let retrieved = cache.get_item(&key).unwrap();
        prop_assert_eq!(retrieved, value, "Round-trip value mismatch");
    }

    // Re-adding a key replaces its value and leaves exactly one entry
    #[test]
    fn prop_overwrite_semantics(
        key in key_strategy(),
        value1 in value_strategy(),
        value2 in value_strategy()
    ) {
        let mut cache = new_cache(TEST_CAPACITY);

        cache.add_item(key, value1, TEST_LIFETIME).unwrap();
        cache.add_item(key, value2.clone(), TEST_LIFETIME).unwrap();

        prop_assert_eq!(cache.get_item(&key).unwrap(), value2);
        prop_assert_eq!(cache.len(), 1, "Should have exactly one entry after overwrite");
    }

    // No sequence of operations pushes the entry count past capacity, and
    // the snapshot always agrees with the count
    #[test]
    fn prop_capacity_enforcement(ops in prop::collection::vec(cache_op_strategy(), 1..200)) {
        let capacity = 10;
        let mut cache = new_cache(capacity);

        for op in ops {
            match op {
                CacheOp::Add { key, value } => {
                    cache.add_item(key, value, TEST_LIFETIME).unwrap();
                }
                CacheOp::Get { key } => {
                    match cache.get_item(&key) {
                        Ok(_) | Err(CacheError::ItemNotFound(_)) => {}
                        Err(other) => prop_assert!(false, "Unexpected error {:?}", other),
                    }
                }
                CacheOp::Remove { key } => {
                    let _ = cache.remove_item(&key);
                }
            }

            prop_assert!(
                cache.len() <= capacity,
                "Cache size {} exceeds capacity {}",
                cache.len(),
                capacity
            );
            prop_assert_eq!(cache.entries().len(), cache.len());
        }
    }

    // Overflowing a full cache evicts exactly the least recently added key
    #[test]
    fn prop_eviction_order(
        keys in unique_keys_strategy(2, 10),
        new_key in 1000u32..2000,
        new_value in value_strategy()
    ) {
        let capacity = keys.len();
        let mut cache = new_cache(capacity);

        for key in &keys {
            cache.add_item(*key, format!("value_{}", key), TEST_LIFETIME).unwrap();
        }
        cache.add_item(new_key, new_value, TEST_LIFETIME).unwrap();

        prop_assert_eq!(cache.len(), capacity);

        let remaining: HashSet<u32> = cache.entries().into_iter().map(|(k, _)| k).collect();
        let mut expected: HashSet<u32> = keys.iter().skip(1).copied().collect();
        expected.insert(new_key);
        prop_assert_eq!(remaining, expected);
    }

    // Reading a key protects it from the next eviction
    #[test]
    fn prop_read_refreshes_recency(
        keys in unique_keys_strategy(3, 8),
        access_index in 0usize..100,
        new_key in 1000u32..2000,
    ) {
        let capacity = keys.len();
        let mut cache = new_cache(capacity);

        for key in &keys {
            cache.add_item(*key, format!("value_{}", key), TEST_LIFETIME).unwrap();
        }

        let accessed = keys[access_index % capacity];
        cache.get_item(&accessed).unwrap();

        let expected_evicted = if accessed == keys[0] { keys[1] } else { keys[0] };

        cache.add_item(new_key, "new".to_string(), TEST_LIFETIME).unwrap();

        prop_assert!(cache.contains_key(&accessed).unwrap(), "Accessed key was evicted");
        prop_assert!(
            !cache.contains_key(&expected_evicted).unwrap(),
            "Key {} should have been evicted",
            expected_evicted
        );
    }

    // Keys never added are reported as not found
    #[test]
    fn prop_missing_key_not_found(keys in unique_keys_strategy(0, 20), probe in 1000u32..2000) {
        let mut cache = new_cache(TEST_CAPACITY);

        for key in keys {
            cache.add_item(key, "value".to_string(), TEST_LIFETIME).unwrap();
        }

        prop_assert!(matches!(cache.get_item(&probe), Err(CacheError::ItemNotFound(_))));
    }

    // Non-positive lifetimes are rejected without touching the cache
    #[test]
    fn prop_non_positive_lifetime_rejected(key in key_strategy(), lifetime in -1000i64..=0) {
        let mut cache = new_cache(TEST_CAPACITY);
        cache.add_item(1000, "existing".to_string(), TEST_LIFETIME).unwrap();

        let result = cache.add_item(key, "value".to_string(), lifetime);

        prop_assert_eq!(result, Err(CacheError::InvalidLifetime(lifetime)));
        prop_assert_eq!(cache.len(), 1);
    }
}

// Separate proptest block with fewer cases for time-sensitive TTL tests
proptest! {
    #![proptest_config(ProptestConfig::with_cases(3))]

    // An expired key is reported once as expired, then as not found
    #[test]
    fn prop_lazy_expiration(key in key_strategy(), value in value_strategy()) {
        let mut cache = new_cache(TEST_CAPACITY);

        cache.add_item(key, value.clone(), 1).unwrap();
        prop_assert_eq!(cache.get_item(&key).unwrap(), value);

        // Wait for the lifetime to lapse (add small buffer for timing)
        sleep(Duration::from_millis(1100));

        prop_assert_eq!(cache.len(), 1, "Expired entries are not swept eagerly");
        prop_assert!(matches!(cache.get_item(&key), Err(CacheError::ItemExpired(_))));
        prop_assert!(matches!(cache.get_item(&key), Err(CacheError::ItemNotFound(_))));
        prop_assert!(cache.is_empty());
    }
}
