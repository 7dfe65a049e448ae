//! In-memory session cache.
//!
//! Backed by an unbounded moka map with no time-based expiry: freshness is
//! decided by the fetcher from each entry's own TTL, and expired entries
//! must stay available as stale fallbacks.
//!
//! An optional byte quota bounds the total stored size. A write that would
//! exceed it fails with [`HuginnError::QuotaExceeded`] and leaves the
//! previous entry for that key untouched, in the way a browser's session
//! storage rejects writes once full.

use std::sync::{Arc, Mutex};

use moka::sync::Cache;
use tracing::debug;

use super::{CacheEntry, CacheStore};
use crate::{HuginnError, Result};

/// Configuration for a [`SessionCache`].
///
/// ```rust
/// # use huginn::CacheConfig;
/// let config = CacheConfig::new().max_bytes(5 * 1024 * 1024);
/// assert_eq!(config.max_bytes, Some(5 * 1024 * 1024));
/// ```
#[derive(Debug, Clone, Default)]
pub struct CacheConfig {
    /// Upper bound on the summed size of keys and payloads. Default: none.
    pub max_bytes: Option<u64>,
}

impl CacheConfig {
    /// Create a config with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the byte quota.
    pub fn max_bytes(mut self, bytes: u64) -> Self {
        self.max_bytes = Some(bytes);
        self
    }
}

/// Process-local cache whose lifetime is the session.
///
/// Construct one per application run and hand it to the
/// [`Fetcher`](crate::Fetcher) behind an `Arc`; dropping it ends the session.
/// Thread-safe (moka handles concurrent access internally; quota
/// accounting is serialised by a mutex so it never drifts).
pub struct SessionCache {
    entries: Cache<String, Arc<CacheEntry>>,
    quota: Option<u64>,
    used: Mutex<u64>,
}

impl SessionCache {
    /// Create an empty cache without a quota.
    pub fn new() -> Self {
        Self::with_config(&CacheConfig::default())
    }

    pub fn with_config(config: &CacheConfig) -> Self {
        Self {
            entries: Cache::builder().build(),
            quota: config.max_bytes,
            used: Mutex::new(0),
        }
    }

    /// Number of entries currently stored, fresh or not.
    pub fn len(&self) -> u64 {
        self.entries.run_pending_tasks();
        self.entries.entry_count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Bytes currently counted against the quota.
    pub fn size_bytes(&self) -> u64 {
        *self.used.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Drop every entry, ending the session without dropping the cache.
    pub fn clear(&self) {
        let mut used = self.used.lock().unwrap_or_else(|e| e.into_inner());
        self.entries.invalidate_all();
        self.entries.run_pending_tasks();
        *used = 0;
    }
}

impl Default for SessionCache {
    fn default() -> Self {
        Self::new()
    }
}

impl CacheStore for SessionCache {
    fn read(&self, key: &str) -> Option<CacheEntry> {
        self.entries.get(key).map(|entry| entry.as_ref().clone())
    }

    fn write(&self, key: &str, entry: CacheEntry) -> Result<()> {
        let weight = entry_weight(key, &entry);
        let mut used = self.used.lock().unwrap_or_else(|e| e.into_inner());

        let previous = self
            .entries
            .get(key)
            .map(|old| entry_weight(key, &old))
            .unwrap_or(0);
        let projected = used.saturating_sub(previous).saturating_add(weight);

        if let Some(quota) = self.quota {
            if projected > quota {
                return Err(HuginnError::QuotaExceeded {
                    needed: weight,
                    quota,
                });
            }
        }

        self.entries.insert(key.to_string(), Arc::new(entry));
        *used = projected;
        debug!(key, bytes = weight, total_bytes = projected, "cache entry written");
        Ok(())
    }
}

fn entry_weight(key: &str, entry: &CacheEntry) -> u64 {
    key.len() as u64 + entry.payload.size_bytes()
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::types::Payload;

    fn entry(text: &str) -> CacheEntry {
        CacheEntry::new(Payload::from(text), Duration::from_secs(60))
    }

    #[test]
    fn quota_accounts_for_overwrite() {
        let cache = SessionCache::with_config(&CacheConfig::new().max_bytes(10));
        cache.write("k", entry("12345")).unwrap();
        assert_eq!(cache.size_bytes(), 6);

        // Replacing the same key only counts the new size.
        cache.write("k", entry("123456789")).unwrap();
        assert_eq!(cache.size_bytes(), 10);
    }

    #[test]
    fn quota_rejection_keeps_previous_entry() {
        let cache = SessionCache::with_config(&CacheConfig::new().max_bytes(10));
        cache.write("k", entry("old")).unwrap();

        let err = cache.write("k", entry("far too long for the quota")).unwrap_err();
        assert!(matches!(err, HuginnError::QuotaExceeded { quota: 10, .. }));
        assert_eq!(cache.read("k").unwrap().payload, Payload::from("old"));
        assert_eq!(cache.size_bytes(), 4);
    }

    #[test]
    fn clear_resets_usage() {
        let cache = SessionCache::new();
        cache.write("a", entry("1")).unwrap();
        cache.write("b", entry("2")).unwrap();
        assert_eq!(cache.len(), 2);

        cache.clear();
        assert!(cache.is_empty());
        assert_eq!(cache.size_bytes(), 0);
        assert!(cache.read("a").is_none());
    }
}
