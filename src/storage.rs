//! Internal storage implementation for the cache.
//!
//! This module provides the low-level store using an `IndexMap` so that
//! `keys()` reflects insertion order, with an overwrite keeping the key's
//! original position.

use bytes::Bytes;
use indexmap::IndexMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::time::Instant;

use crate::config::{CacheConfig, Ttl};
use crate::entry::Entry;
use crate::stats::CacheStats;

/// Thread-safe wrapper around the internal store.
///
/// This is the internal implementation; users should use `Cache` instead.
#[derive(Debug)]
pub(crate) struct Db {
    /// The actual storage, protected by a read-write lock.
    /// IndexMap maintains insertion order, which `keys()` exposes.
    entries: RwLock<IndexMap<String, Entry>>,

    /// Configuration for this store.
    config: CacheConfig,

    /// Statistics for cache operations.
    stats: Arc<CacheStats>,
}

impl Db {
    /// Create a new store with the given configuration.
    pub(crate) fn new(config: CacheConfig) -> Self {
        Self {
            entries: RwLock::new(IndexMap::new()),
            config,
            stats: Arc::new(CacheStats::new()),
        }
    }

    /// Create a new store with default configuration.
    pub(crate) fn with_defaults() -> Self {
        Self::new(CacheConfig::default())
    }

    /// Get a value from the store.
    ///
    /// Returns `None` if the key doesn't exist or has expired. An expired
    /// entry is deleted as a side effect of the read, so a logically-expired
    /// value is never observable even before a sweep has run.
    pub(crate) fn get(&self, key: &str) -> Option<Bytes> {
        {
            let entries = self.read_lock()?;

            if let Some(entry) = entries.get(key) {
                if entry.is_expired() {
                    // Entry expired - need write lock to remove it
                    drop(entries);
                    self.remove_expired(key);
                    self.stats.record_miss();
                    return None;
                }

                let value = entry.value().clone();
                self.stats.record_hit();
                return Some(value);
            }
        }

        self.stats.record_miss();
        None
    }

    /// Write a value under `key`, or remove the key when `value` is `None`.
    ///
    /// A `None` value is the absence sentinel: writing it is defined as a
    /// delete, so the store never holds a valueless entry. Otherwise the
    /// entry's expiration is resolved from `ttl` once, here, and any
    /// existing entry under `key` is overwritten in place.
    pub(crate) fn put(&self, key: String, value: Option<Bytes>, ttl: Ttl) {
        let value = match value {
            Some(v) => v,
            None => {
                self.remove(&key);
                return;
            }
        };

        let entry = match ttl {
            Ttl::After(duration) => Entry::with_expiration(value, Instant::now() + duration),
            Ttl::Never => Entry::new(value),
        };

        let mut entries = match self.write_lock() {
            Some(e) => e,
            None => return, // Lock poisoned, silently fail
        };

        let is_new = !entries.contains_key(&key);
        // IndexMap keeps the original position of an existing key
        entries.insert(key, entry);

        if is_new {
            self.stats.increment_size();
        }
        self.stats.record_set();
    }

    /// Write a value using the store's default TTL.
    pub(crate) fn put_default(&self, key: String, value: Option<Bytes>) {
        self.put(key, value, self.config.default_ttl);
    }

    /// Remove a key from the store unconditionally.
    ///
    /// Returns `true` if the key existed. Removing an absent key is a no-op,
    /// not an error.
    pub(crate) fn remove(&self, key: &str) -> bool {
        let mut entries = match self.write_lock() {
            Some(e) => e,
            None => return false,
        };

        let existed = entries.shift_remove(key).is_some();
        if existed {
            self.stats.decrement_size();
            self.stats.record_remove();
        }
        existed
    }

    /// Check if a key exists in the store (and is not expired).
    pub(crate) fn contains(&self, key: &str) -> bool {
        let entries = match self.read_lock() {
            Some(e) => e,
            None => return false,
        };

        match entries.get(key) {
            Some(entry) => {
                if entry.is_expired() {
                    drop(entries);
                    self.remove_expired(key);
                    false
                } else {
                    true
                }
            }
            None => false,
        }
    }

    /// Get the keys of all live entries, in insertion order.
    ///
    /// Expired entries are filtered out of the result but not evicted; this
    /// is a pure read. Overwriting a key does not move it in this sequence.
    pub(crate) fn keys(&self) -> Vec<String> {
        let entries = match self.read_lock() {
            Some(e) => e,
            None => return Vec::new(),
        };

        let now = Instant::now();
        entries
            .iter()
            .filter(|(_, entry)| !entry.is_expired_at(now))
            .map(|(key, _)| key.clone())
            .collect()
    }

    /// Get the number of entries in the store.
    ///
    /// Note: This may include expired entries that haven't been reclaimed yet.
    pub(crate) fn len(&self) -> usize {
        match self.read_lock() {
            Some(entries) => entries.len(),
            None => 0,
        }
    }

    /// Check if the store is empty.
    pub(crate) fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Remove all entries from the store.
    pub(crate) fn clear(&self) {
        if let Some(mut entries) = self.write_lock() {
            entries.clear();
            self.stats.set_size(0);
        }
    }

    /// Get a reference to the statistics.
    pub(crate) fn stats(&self) -> Arc<CacheStats> {
        Arc::clone(&self.stats)
    }

    /// Remove every entry whose expiry has passed.
    ///
    /// Never-expiring entries are untouched. This is the eager counterpart
    /// to the lazy per-read deletion in `get`, and is what the background
    /// sweep task invokes once per interval.
    pub(crate) fn purge(&self) -> usize {
        let mut entries = match self.write_lock() {
            Some(e) => e,
            None => return 0,
        };

        let initial_len = entries.len();
        let now = Instant::now();

        entries.retain(|_, entry| {
            let expired = entry.is_expired_at(now);
            if expired {
                self.stats.record_expiration();
                self.stats.decrement_size();
            }
            !expired
        });

        initial_len - entries.len()
    }

    // Private helper methods

    /// Acquire a read lock, returning None if poisoned.
    fn read_lock(&self) -> Option<RwLockReadGuard<'_, IndexMap<String, Entry>>> {
        self.entries.read().ok()
    }

    /// Acquire a write lock, returning None if poisoned.
    fn write_lock(&self) -> Option<RwLockWriteGuard<'_, IndexMap<String, Entry>>> {
        self.entries.write().ok()
    }

    /// Remove a specific expired key.
    ///
    /// Rechecks expiry under the write lock; another caller may have
    /// overwritten the entry since the read lock was dropped.
    fn remove_expired(&self, key: &str) {
        if let Some(mut entries) = self.write_lock() {
            if let Some(entry) = entries.get(key) {
                if entry.is_expired() {
                    entries.shift_remove(key);
                    self.stats.decrement_size();
                    self.stats.record_expiration();
                }
            }
        }
    }
}

impl Default for Db {
    fn default() -> Self {
        Self::with_defaults()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_basic_put_get() {
        let db = Db::with_defaults();

        db.put("key1".into(), Some(Bytes::from("value1")), Ttl::Never);
        let result = db.get("key1");

        assert_eq!(result, Some(Bytes::from("value1")));
    }

    #[test]
    fn test_get_nonexistent() {
        let db = Db::with_defaults();

        let result = db.get("nonexistent");
        assert!(result.is_none());
    }

    #[test]
    fn test_put_absent_value_removes() {
        let db = Db::with_defaults();

        db.put("key1".into(), Some(Bytes::from("value1")), Ttl::Never);
        assert!(db.contains("key1"));

        db.put("key1".into(), None, Ttl::Never);
        assert!(db.get("key1").is_none());
        assert_eq!(db.len(), 0);
    }

    #[test]
    fn test_remove() {
        let db = Db::with_defaults();

        db.put("key1".into(), Some(Bytes::from("value1")), Ttl::Never);
        assert!(db.contains("key1"));

        let removed = db.remove("key1");
        assert!(removed);
        assert!(!db.contains("key1"));
    }

    #[test]
    fn test_remove_nonexistent() {
        let db = Db::with_defaults();

        let removed = db.remove("nonexistent");
        assert!(!removed);
    }

    #[test]
    fn test_overwrite() {
        let db = Db::with_defaults();

        db.put("key1".into(), Some(Bytes::from("value1")), Ttl::Never);
        db.put("key1".into(), Some(Bytes::from("value2")), Ttl::Never);

        assert_eq!(db.get("key1"), Some(Bytes::from("value2")));
        assert_eq!(db.len(), 1);
    }

    #[test]
    fn test_overwrite_refreshes_expiry() {
        let db = Db::with_defaults();

        db.put("key1".into(), Some(Bytes::from("v1")), Ttl::millis(0));
        db.put("key1".into(), Some(Bytes::from("v2")), Ttl::Never);

        // The overwrite replaced the already-expired entry wholesale
        assert_eq!(db.get("key1"), Some(Bytes::from("v2")));
    }

    #[test]
    fn test_clear() {
        let db = Db::with_defaults();

        db.put("key1".into(), Some(Bytes::from("value1")), Ttl::Never);
        db.put("key2".into(), Some(Bytes::from("value2")), Ttl::Never);
        assert_eq!(db.len(), 2);

        db.clear();
        assert!(db.is_empty());
    }

    #[test]
    fn test_lazy_expiration_on_get() {
        let db = Db::with_defaults();

        db.put("key1".into(), Some(Bytes::from("value1")), Ttl::millis(1));

        std::thread::sleep(Duration::from_millis(10));

        // No sweep has run; the read itself reclaims the entry
        assert!(db.get("key1").is_none());
        assert_eq!(db.len(), 0);
    }

    #[test]
    fn test_zero_ttl_is_immediately_expired() {
        let db = Db::with_defaults();

        db.put("key1".into(), Some(Bytes::from("value1")), Ttl::millis(0));
        assert!(db.get("key1").is_none());
    }

    #[test]
    fn test_keys_insertion_order() {
        let db = Db::with_defaults();

        db.put("a".into(), Some(Bytes::from("1")), Ttl::Never);
        db.put("b".into(), Some(Bytes::from("2")), Ttl::Never);
        db.put("c".into(), Some(Bytes::from("3")), Ttl::Never);

        assert_eq!(db.keys(), vec!["a", "b", "c"]);

        // Overwriting does not move the key
        db.put("a".into(), Some(Bytes::from("1.1")), Ttl::Never);
        assert_eq!(db.keys(), vec!["a", "b", "c"]);

        // Removal keeps the order of the rest
        db.remove("b");
        assert_eq!(db.keys(), vec!["a", "c"]);
    }

    #[test]
    fn test_keys_filters_expired_without_evicting() {
        let db = Db::with_defaults();

        db.put("live".into(), Some(Bytes::from("1")), Ttl::Never);
        db.put("dead".into(), Some(Bytes::from("2")), Ttl::millis(0));

        assert_eq!(db.keys(), vec!["live"]);
        // The expired entry is still physically present until purged or read
        assert_eq!(db.len(), 2);
    }

    #[test]
    fn test_purge_removes_only_expired() {
        let db = Db::with_defaults();

        db.put("expired".into(), Some(Bytes::from("1")), Ttl::millis(0));
        db.put("fresh".into(), Some(Bytes::from("2")), Ttl::After(Duration::from_secs(60)));
        db.put("forever".into(), Some(Bytes::from("3")), Ttl::Never);

        let removed = db.purge();
        assert_eq!(removed, 1);
        assert_eq!(db.keys(), vec!["fresh", "forever"]);
    }

    #[test]
    fn test_default_ttl_applies_at_write_time() {
        let config = CacheConfig::new().default_ttl(Ttl::millis(0)).build();
        let db = Db::new(config);

        db.put_default("key1".into(), Some(Bytes::from("value1")));
        assert!(db.get("key1").is_none());

        // An explicit TTL on the same key wins over the default
        db.put("key1".into(), Some(Bytes::from("value1")), Ttl::Never);
        assert_eq!(db.get("key1"), Some(Bytes::from("value1")));
    }

    #[test]
    fn test_stats_tracking() {
        let db = Db::with_defaults();

        db.put("key1".into(), Some(Bytes::from("value1")), Ttl::Never);
        let _ = db.get("key1"); // Hit
        let _ = db.get("nonexistent"); // Miss

        let stats = db.stats();
        assert_eq!(stats.hits(), 1);
        assert_eq!(stats.misses(), 1);
        assert_eq!(stats.sets(), 1);
    }
}
