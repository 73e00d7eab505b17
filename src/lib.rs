//! # Memo Cache
//!
//! An in-process, time-aware key/value cache for single-process memoization
//! of short-lived computed values (API responses and the like).
//!
//! ## Features
//!
//! - **Thread-safe**: Share across threads with `Clone` (uses `Arc` internally)
//! - **TTL support**: Every entry expires after its TTL, or never with `Ttl::Never`
//! - **Lazy reclamation**: Expired entries are deleted as a side effect of reads
//! - **Background sweeping**: A cancelable periodic task purges expired entries
//! - **Statistics**: Track cache hits, misses, expirations, and more
//! - **Zero unsafe code**: Built entirely with safe Rust
//!
//! ## Quick Start
//!
//! ```rust
//! use memo_cache::{Cache, CacheConfig, Ttl};
//! use std::time::Duration;
//!
//! // Create a cache with a 5 minute default TTL
//! let config = CacheConfig::new()
//!     .default_ttl(Ttl::After(Duration::from_secs(300)))
//!     .build();
//!
//! let cache = Cache::new(config);
//!
//! // Store and retrieve values
//! cache.set("user:123", "Alice");
//!
//! if let Some(value) = cache.get("user:123") {
//!     println!("Found: {:?}", value);
//! }
//!
//! // Set with a custom TTL, or pin a value forever
//! cache.set_with_ttl("session:abc", "session_data", Ttl::After(Duration::from_secs(60)));
//! cache.set_with_ttl("schema", "v2", Ttl::Never);
//!
//! // Enumerate live keys in insertion order
//! assert_eq!(cache.keys(), vec!["user:123", "session:abc", "schema"]);
//! ```
//!
//! ## Expiry model
//!
//! A TTL is resolved into an absolute expiration time once, at write time.
//! An entry whose expiry has passed behaves as if it does not exist: `get`
//! deletes it and returns `None`, and `keys()` filters it out. The background
//! sweep task additionally purges expired entries once per interval so they
//! don't linger unread; see [`Cache::set_purge_interval`] and
//! [`Cache::stop_sweep`] for its lifecycle.
//!
//! Missing, expired, and removed keys are indistinguishable: all of them
//! surface as `None`. No operation returns an error.

// Public API
pub mod cache;
pub mod config;
pub mod stats;

pub use cache::Cache;
pub use config::{CacheConfig, Ttl, DEFAULT_SWEEP_INTERVAL, DEFAULT_TTL};
pub use stats::{CacheStats, StatsSnapshot};

// Internal modules - not part of public API
pub(crate) mod entry;
pub(crate) mod storage;
pub(crate) mod sweep;
