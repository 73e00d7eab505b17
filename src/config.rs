//! Configuration for the cache.
//!
//! This module provides the `Ttl` type used throughout the public API and a
//! builder pattern for configuring default expiry and background sweeping.

use std::time::Duration;

/// Default time-to-live applied when a configuration does not specify one.
pub const DEFAULT_TTL: Duration = Duration::from_secs(5 * 60);

/// Default interval between background sweep passes.
pub const DEFAULT_SWEEP_INTERVAL: Duration = Duration::from_secs(60);

/// Time-to-live for a cache entry.
///
/// A TTL is resolved into an absolute expiration time once, at write time.
/// `Ttl::After(Duration::ZERO)` produces an entry that is already expired
/// and therefore never retrievable; this is accepted rather than reported
/// as an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ttl {
    /// The entry expires this long after the write.
    After(Duration),
    /// The entry never expires and is never purged.
    Never,
}

impl Ttl {
    /// Convenience constructor from milliseconds.
    pub fn millis(ms: u64) -> Self {
        Ttl::After(Duration::from_millis(ms))
    }
}

impl From<Duration> for Ttl {
    fn from(d: Duration) -> Self {
        Ttl::After(d)
    }
}

/// Configuration for creating a new cache instance.
///
/// Use the builder pattern to construct configuration:
///
/// ```
/// use memo_cache::{CacheConfig, Ttl};
/// use std::time::Duration;
///
/// let config = CacheConfig::new()
///     .default_ttl(Ttl::After(Duration::from_secs(300)))
///     .sweep_interval(Duration::from_secs(30))
///     .build();
/// ```
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// TTL applied to writes that don't specify their own.
    /// `Ttl::Never` means entries don't expire by default.
    pub(crate) default_ttl: Ttl,

    /// Interval between background sweep passes.
    pub(crate) sweep_interval: Duration,

    /// Whether to run the background sweep task.
    /// When disabled, only lazy expiry and manual `purge()` reclaim entries.
    pub(crate) background_sweep: bool,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            default_ttl: Ttl::After(DEFAULT_TTL),
            sweep_interval: DEFAULT_SWEEP_INTERVAL,
            background_sweep: true,
        }
    }
}

impl CacheConfig {
    /// Create a new configuration builder with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the default TTL for entries written without an explicit one.
    ///
    /// Use `Ttl::Never` to make entries non-expiring by default. The default
    /// applies at write time only; it never retroactively changes entries
    /// already in the store.
    pub fn default_ttl(mut self, ttl: Ttl) -> Self {
        self.default_ttl = ttl;
        self
    }

    /// Set the interval for the background sweep of expired entries.
    ///
    /// The sweep runs at this interval in addition to lazy expiry
    /// (entries checked on access).
    pub fn sweep_interval(mut self, interval: Duration) -> Self {
        self.sweep_interval = interval;
        self
    }

    /// Enable or disable the background sweep task.
    pub fn background_sweep(mut self, enabled: bool) -> Self {
        self.background_sweep = enabled;
        self
    }

    /// Build the final configuration.
    pub fn build(self) -> Self {
        self
    }

    /// Get the default TTL.
    pub fn get_default_ttl(&self) -> Ttl {
        self.default_ttl
    }

    /// Get the sweep interval.
    pub fn get_sweep_interval(&self) -> Duration {
        self.sweep_interval
    }
}
