//! Eviction Module
//!
//! Victim selection for capacity-triggered eviction.

use crate::cache::CacheItem;

// == Least Recently Accessed ==
/// Returns the key of the least recently accessed entry, or None if empty.
///
/// Scans every entry and picks the smallest `last_access_time`. Entries that
/// share a timestamp are ordered by `access_tick`, so the choice is total.
pub fn least_recently_accessed<'a, K: 'a, V: 'a>(
    entries: impl IntoIterator<Item = (&'a K, &'a CacheItem<V>)>,
) -> Option<&'a K> {
    entries
        .into_iter()
        .min_by_key(|(_, item)| (item.last_access_time, item.access_tick))
        .map(|(key, _)| key)
}
