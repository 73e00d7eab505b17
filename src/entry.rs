//! Cache entry: a stored value plus its expiration time.

use bytes::Bytes;
use std::time::Instant;

/// A single cache entry.
///
/// The payload is opaque to the engine; the only metadata an entry carries
/// is its absolute expiration time, computed once at write time.
#[derive(Debug, Clone)]
pub(crate) struct Entry {
    /// The stored value.
    pub(crate) value: Bytes,

    /// When this entry expires. `None` is the never-expire sentinel.
    pub(crate) expires_at: Option<Instant>,
}

impl Entry {
    /// Create an entry that never expires.
    pub(crate) fn new(value: Bytes) -> Self {
        Self {
            value,
            expires_at: None,
        }
    }

    /// Create an entry that expires at the given absolute time.
    pub(crate) fn with_expiration(value: Bytes, expires_at: Instant) -> Self {
        Self {
            value,
            expires_at: Some(expires_at),
        }
    }

    /// Check if this entry has expired.
    pub(crate) fn is_expired(&self) -> bool {
        self.is_expired_at(Instant::now())
    }

    /// Check if this entry has expired at a given time.
    /// Useful for evaluating a whole scan against a single clock reading.
    pub(crate) fn is_expired_at(&self, now: Instant) -> bool {
        match self.expires_at {
            Some(expires) => now >= expires,
            None => false,
        }
    }

    /// Get a reference to the value.
    pub(crate) fn value(&self) -> &Bytes {
        &self.value
    }
}
