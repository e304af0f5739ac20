//! Key Comparer Module
//!
//! Key equality capability injected into storage backends.

use std::collections::hash_map::DefaultHasher;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;

// == Key Comparer ==
/// Decides when two keys name the same cache entry.
///
/// Keys that are `equals` must produce the same `hash_key`.
pub trait KeyComparer<K>: Send + Sync {
    /// Returns true if both keys identify the same entry.
    fn equals(&self, a: &K, b: &K) -> bool;

    /// Hashes a key consistently with `equals`.
    fn hash_key(&self, key: &K) -> u64;
}

// == Default Key Comparer ==
/// Natural equality of the key type.
pub struct DefaultKeyComparer<K> {
    _key: PhantomData<fn(&K)>,
}

impl<K> DefaultKeyComparer<K> {
    pub fn new() -> Self {
        Self { _key: PhantomData }
    }
}

impl<K> Default for DefaultKeyComparer<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K> fmt::Debug for DefaultKeyComparer<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("DefaultKeyComparer")
    }
}

impl<K: Eq + Hash> KeyComparer<K> for DefaultKeyComparer<K> {
    fn equals(&self, a: &K, b: &K) -> bool {
        a == b
    }

    fn hash_key(&self, key: &K) -> u64 {
        let mut hasher = DefaultHasher::new();
        key.hash(&mut hasher);
        hasher.finish()
    }
}

// == Case Insensitive Comparer ==
/// Treats string keys that differ only in ASCII case as the same key.
#[derive(Debug, Default, Clone, Copy)]
pub struct CaseInsensitiveComparer;

impl<K: AsRef<str>> KeyComparer<K> for CaseInsensitiveComparer {
    fn equals(&self, a: &K, b: &K) -> bool {
        a.as_ref().eq_ignore_ascii_case(b.as_ref())
    }

    fn hash_key(&self, key: &K) -> u64 {
        let mut hasher = DefaultHasher::new();
        for byte in key.as_ref().bytes() {
            hasher.write_u8(byte.to_ascii_lowercase());
        }
        hasher.finish()
    }
}
