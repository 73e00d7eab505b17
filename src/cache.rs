//! The main cache interface.
//!
//! This module provides the primary `Cache` type that users interact with.
//! It wraps the internal store and owns the background sweep task.

use bytes::Bytes;
use std::sync::Arc;
use std::time::Duration;

use crate::config::{CacheConfig, Ttl};
use crate::stats::{CacheStats, StatsSnapshot};
use crate::storage::Db;
use crate::sweep::Sweeper;

/// A thread-safe, in-process cache with per-entry TTL and background sweeping.
///
/// # Features
/// - **Thread-safe**: Can be safely shared across threads by cloning.
/// - **TTL support**: Every entry expires after its TTL, or never with `Ttl::Never`.
/// - **Lazy and eager reclamation**: Expired entries are deleted on read,
///   and a background task purges the rest once per interval.
/// - **Statistics**: Track hits, misses, expirations, and more.
///
/// # Example
/// ```
/// use memo_cache::{Cache, CacheConfig, Ttl};
/// use std::time::Duration;
///
/// // Five minute default TTL, one minute sweep interval
/// let cache = Cache::new(CacheConfig::default());
///
/// cache.set("user:123", "Alice");
/// if let Some(value) = cache.get("user:123") {
///     println!("Found: {:?}", value);
/// }
///
/// // With explicit TTL
/// cache.set_with_ttl("session:abc", "data", Ttl::After(Duration::from_secs(60)));
///
/// // Pinned entries never expire
/// cache.set_with_ttl("schema", "v2", Ttl::Never);
/// ```
///
/// # Sharing
///
/// Cloning a `Cache` returns another handle to the same underlying store and
/// sweep task; distinct `Cache::new` calls create fully independent stores.
#[derive(Debug, Clone)]
pub struct Cache {
    inner: Arc<Shared>,
}

/// State shared by every handle cloned from one `Cache`.
#[derive(Debug)]
struct Shared {
    db: Arc<Db>,
    sweeper: Sweeper,
}

impl Cache {
    /// Create a new cache with the given configuration.
    ///
    /// When `background_sweep` is enabled (the default) and a Tokio runtime
    /// is available, this also starts the periodic purge task at the
    /// configured sweep interval. Outside a runtime the cache still works;
    /// expired entries are then reclaimed lazily on read or by `purge()`.
    ///
    /// # Example
    /// ```
    /// use memo_cache::{Cache, CacheConfig};
    ///
    /// let cache = Cache::new(CacheConfig::default());
    /// ```
    pub fn new(config: CacheConfig) -> Self {
        let background_sweep = config.background_sweep;
        let sweep_interval = config.sweep_interval;

        let db = Arc::new(Db::new(config));
        let sweeper = Sweeper::new(Arc::clone(&db));
        if background_sweep {
            sweeper.start(sweep_interval);
        }

        Self {
            inner: Arc::new(Shared { db, sweeper }),
        }
    }

    /// Get a value from the cache.
    ///
    /// Returns `None` if the key doesn't exist or has expired. An expired
    /// entry is deleted as a side effect of this call, so `get` never
    /// observes a logically-expired value even if the sweep hasn't run.
    ///
    /// A missing, expired, and explicitly removed key all produce the same
    /// `None`; callers cannot distinguish the three.
    ///
    /// # Example
    /// ```
    /// use memo_cache::{Cache, CacheConfig};
    ///
    /// let cache = Cache::new(CacheConfig::default());
    /// cache.set("key", "value");
    ///
    /// match cache.get("key") {
    ///     Some(value) => println!("Found: {:?}", value),
    ///     None => println!("Not found"),
    /// }
    /// ```
    pub fn get(&self, key: &str) -> Option<Bytes> {
        self.inner.db.get(key)
    }

    /// Set a value in the cache using the configured default TTL.
    ///
    /// Overwrites any existing entry under `key`, replacing both its value
    /// and its expiration.
    ///
    /// # Example
    /// ```
    /// use memo_cache::{Cache, CacheConfig};
    ///
    /// let cache = Cache::new(CacheConfig::default());
    /// cache.set("string_key", "string value");
    /// cache.set("bytes_key", vec![1, 2, 3, 4]);
    /// ```
    pub fn set(&self, key: impl Into<String>, value: impl Into<Bytes>) {
        self.inner.db.put_default(key.into(), Some(value.into()));
    }

    /// Set a value in the cache with an explicit TTL.
    ///
    /// The entry expires `ttl` after this write, or never for `Ttl::Never`.
    /// A zero TTL yields an entry that is already expired and therefore
    /// never retrievable; this is accepted, not an error.
    ///
    /// # Example
    /// ```
    /// use memo_cache::{Cache, CacheConfig, Ttl};
    /// use std::time::Duration;
    ///
    /// let cache = Cache::new(CacheConfig::default());
    /// cache.set_with_ttl("session", "data", Ttl::After(Duration::from_secs(3600)));
    /// cache.set_with_ttl("pinned", "data", Ttl::Never);
    /// ```
    pub fn set_with_ttl(&self, key: impl Into<String>, value: impl Into<Bytes>, ttl: Ttl) {
        self.inner.db.put(key.into(), Some(value.into()), ttl);
    }

    /// Set a value that may be absent.
    ///
    /// Writing `None` is defined as removing the key, so the store never
    /// holds a valueless entry. `Some(v)` behaves exactly like `set`.
    ///
    /// # Example
    /// ```
    /// use memo_cache::{Cache, CacheConfig};
    /// use bytes::Bytes;
    ///
    /// let cache = Cache::new(CacheConfig::default());
    /// cache.set_opt("key", Some(Bytes::from("value")));
    /// cache.set_opt("key", None); // removes the key
    /// assert!(cache.get("key").is_none());
    /// ```
    pub fn set_opt(&self, key: impl Into<String>, value: Option<Bytes>) {
        self.inner.db.put_default(key.into(), value);
    }

    /// Get the keys of all live entries, in insertion order.
    ///
    /// Expired keys are filtered out of the result but not evicted (no
    /// mutation). Overwriting a key neither duplicates it nor moves its
    /// position in this sequence.
    ///
    /// # Example
    /// ```
    /// use memo_cache::{Cache, CacheConfig};
    ///
    /// let cache = Cache::new(CacheConfig::default());
    /// cache.set("a", "1");
    /// cache.set("b", "2");
    /// assert_eq!(cache.keys(), vec!["a", "b"]);
    /// ```
    pub fn keys(&self) -> Vec<String> {
        self.inner.db.keys()
    }

    /// Remove a key from the cache unconditionally.
    ///
    /// Returns `true` if the key existed. Removing an absent key is a
    /// silent no-op.
    ///
    /// # Example
    /// ```
    /// use memo_cache::{Cache, CacheConfig};
    ///
    /// let cache = Cache::new(CacheConfig::default());
    /// cache.set("key", "value");
    /// assert!(cache.remove("key"));
    /// assert!(!cache.remove("key")); // Already removed
    /// ```
    pub fn remove(&self, key: &str) -> bool {
        self.inner.db.remove(key)
    }

    /// Check if a key exists in the cache and is not expired.
    ///
    /// Like `get`, checking an expired key deletes it as a side effect.
    pub fn contains(&self, key: &str) -> bool {
        self.inner.db.contains(key)
    }

    /// Get the number of entries in the cache.
    ///
    /// Note: This may include expired entries that haven't been reclaimed
    /// yet by a read or a sweep.
    pub fn len(&self) -> usize {
        self.inner.db.len()
    }

    /// Check if the cache is empty.
    pub fn is_empty(&self) -> bool {
        self.inner.db.is_empty()
    }

    /// Remove all entries from the cache.
    ///
    /// Affects the whole shared store, including entries written through
    /// other handles cloned from this cache.
    ///
    /// # Example
    /// ```
    /// use memo_cache::{Cache, CacheConfig};
    ///
    /// let cache = Cache::new(CacheConfig::default());
    /// cache.set("key1", "value1");
    /// cache.set("key2", "value2");
    /// cache.clear();
    /// assert!(cache.is_empty());
    /// ```
    pub fn clear(&self) {
        self.inner.db.clear();
    }

    /// Eagerly delete every expired entry.
    ///
    /// Returns the number of entries removed. Never-expiring and
    /// not-yet-expired entries are untouched. This is the batch counterpart
    /// to the lazy per-read deletion, and is exactly what the background
    /// sweep invokes once per interval.
    ///
    /// # Example
    /// ```
    /// use memo_cache::{Cache, CacheConfig, Ttl};
    /// use std::time::Duration;
    ///
    /// let cache = Cache::new(CacheConfig::default());
    /// cache.set_with_ttl("key", "value", Ttl::After(Duration::from_millis(1)));
    /// std::thread::sleep(Duration::from_millis(10));
    /// assert_eq!(cache.purge(), 1);
    /// ```
    pub fn purge(&self) -> usize {
        self.inner.db.purge()
    }

    /// Reconfigure the background sweep interval.
    ///
    /// Cancels the running sweep task and starts a new one at the given
    /// interval; the first pass runs one full interval from now, never
    /// immediately. Requires a Tokio runtime; outside one this leaves the
    /// cache in lazy-only mode.
    pub fn set_purge_interval(&self, interval: Duration) {
        self.inner.sweeper.start(interval);
    }

    /// Stop the background sweep task.
    ///
    /// Lazy expiry on read and manual `purge()` continue to work. The task
    /// is also stopped automatically when the last handle is dropped, so
    /// embedders and test suites never leak a running timer.
    pub fn stop_sweep(&self) {
        self.inner.sweeper.stop();
    }

    /// Whether the background sweep task is currently running.
    pub fn is_sweep_running(&self) -> bool {
        self.inner.sweeper.is_running()
    }

    /// Get a snapshot of the cache statistics.
    ///
    /// # Example
    /// ```
    /// use memo_cache::{Cache, CacheConfig};
    ///
    /// let cache = Cache::new(CacheConfig::default());
    /// cache.set("key", "value");
    /// let _ = cache.get("key");        // Hit
    /// let _ = cache.get("missing");    // Miss
    ///
    /// let stats = cache.stats();
    /// println!("Hits: {}, Misses: {}", stats.hits, stats.misses);
    /// ```
    pub fn stats(&self) -> StatsSnapshot {
        self.inner.db.stats().snapshot()
    }

    /// Get a reference to the internal statistics counters.
    ///
    /// This is useful for integrating with external metrics systems.
    pub fn stats_ref(&self) -> Arc<CacheStats> {
        self.inner.db.stats()
    }
}

impl Default for Cache {
    fn default() -> Self {
        Self::new(CacheConfig::default())
    }
}
