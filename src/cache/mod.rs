//! Session-scoped response cache.
//!
//! The cache keeps the last successful payload for each request identity
//! together with the instant it was stored and the TTL chosen at write
//! time. Entries are never evicted for age: an expired entry stays put as
//! the fallback for a later fetch whose attempts all fail, until a newer
//! write under the same key replaces it.
//!
//! [`CacheStore`] is the storage seam used by the [`Fetcher`](crate::Fetcher);
//! [`SessionCache`] is the in-memory implementation whose lifetime is the
//! session.

pub mod session;

pub use session::{CacheConfig, SessionCache};

use std::time::Duration;

use tokio::time::Instant;

use crate::Result;
use crate::types::Payload;

/// A stored payload with its freshness metadata.
#[derive(Debug, Clone, PartialEq)]
pub struct CacheEntry {
    pub payload: Payload,
    pub stored_at: Instant,
    pub ttl: Duration,
}

impl CacheEntry {
    /// Create an entry stored now.
    pub fn new(payload: Payload, ttl: Duration) -> Self {
        Self::with_stored_at(payload, Instant::now(), ttl)
    }

    pub fn with_stored_at(payload: Payload, stored_at: Instant, ttl: Duration) -> Self {
        Self {
            payload,
            stored_at,
            ttl,
        }
    }

    /// Time since the entry was written.
    pub fn age(&self) -> Duration {
        Instant::now().saturating_duration_since(self.stored_at)
    }

    /// Fresh iff `age < ttl`. A zero TTL is never fresh.
    pub fn is_fresh(&self) -> bool {
        self.age() < self.ttl
    }
}

/// Key → entry storage used by the fetcher.
///
/// `read` never fails: a missing or unreadable record is `None`.
/// `write` replaces any previous entry for the key as a whole; it may fail
/// (e.g. over quota), and callers decide whether that matters.
pub trait CacheStore: Send + Sync {
    fn read(&self, key: &str) -> Option<CacheEntry>;

    fn write(&self, key: &str, entry: CacheEntry) -> Result<()>;
}
