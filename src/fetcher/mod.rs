//! Fetch orchestrator.
//!
//! [`Fetcher::fetch`] is the single entry point callers use. Per call:
//!
//! 1. A fresh cache entry for the identity is returned immediately, without
//!    touching the network.
//! 2. Otherwise up to `max_retries + 1` attempts are made, each bounded by
//!    `timeout`, with exponential backoff between them (see [`retry`]).
//! 3. A successful attempt is written to the cache (TTL from
//!    `Cache-Control: max-age` when present, else `options.ttl`) and
//!    returned as fresh data.
//! 4. When every attempt fails, any entry still in the cache for the
//!    identity, fresh or expired, is returned marked stale together with
//!    the last failure; with no entry the result carries only the error.
//!
//! `fetch` never returns `Err` and never panics on upstream behaviour: every
//! outcome is a [`FetchResult`]. Cache write failures are logged and counted
//! but do not change the result.
//!
//! Concurrent calls for the same identity are not coalesced: each performs
//! its own attempts and the last successful write wins.

mod retry;

use std::sync::Arc;
use std::time::Duration;

use tokio::time::Instant;
use tracing::{debug, warn};

use crate::cache::{CacheEntry, CacheStore};
use crate::telemetry;
use crate::transport::{HttpTransport, Transport, cache_control};
use crate::types::{FetchOptions, FetchResult, Payload};
use crate::{HuginnError, Result};

/// How a fetch resolved, for metrics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Outcome {
    Hit,
    Fresh,
    Stale,
    Failed,
}

impl Outcome {
    fn as_str(self) -> &'static str {
        match self {
            Outcome::Hit => "hit",
            Outcome::Fresh => "fresh",
            Outcome::Stale => "stale",
            Outcome::Failed => "failed",
        }
    }
}

/// Cache-first, retrying, stale-tolerant fetcher.
///
/// Cheap to clone; clones share the transport and the cache.
///
/// ```rust,no_run
/// use std::sync::Arc;
/// use huginn::{FetchOptions, Fetcher, SessionCache};
///
/// # async fn run() {
/// let fetcher = Fetcher::new(Arc::new(SessionCache::new()));
/// let result = fetcher
///     .fetch("https://api.example.com/status", &FetchOptions::default())
///     .await;
/// if result.is_stale() {
///     eprintln!("showing cached data: {}", result.error().unwrap_or_default());
/// }
/// # }
/// ```
#[derive(Clone)]
pub struct Fetcher {
    transport: Arc<dyn Transport>,
    cache: Arc<dyn CacheStore>,
}

impl Fetcher {
    /// Fetch over HTTP(S), caching into `cache`.
    pub fn new(cache: Arc<dyn CacheStore>) -> Self {
        Self::with_transport(Arc::new(HttpTransport::new()), cache)
    }

    pub fn with_transport(transport: Arc<dyn Transport>, cache: Arc<dyn CacheStore>) -> Self {
        Self { transport, cache }
    }

    /// Fetch `identity`, which is also its cache key.
    pub async fn fetch(&self, identity: &str, options: &FetchOptions) -> FetchResult {
        let started = Instant::now();
        let (outcome, result) = self.resolve(identity, options).await;

        metrics::counter!(telemetry::REQUESTS_TOTAL, "outcome" => outcome.as_str()).increment(1);
        metrics::histogram!(telemetry::REQUEST_DURATION_SECONDS, "outcome" => outcome.as_str())
            .record(started.elapsed().as_secs_f64());
        result
    }

    async fn resolve(&self, identity: &str, options: &FetchOptions) -> (Outcome, FetchResult) {
        if let Err(e) = options.validate() {
            warn!(identity, error = %e, "rejecting fetch with invalid options");
            return (Outcome::Failed, FetchResult::failed(e.to_string()));
        }

        if let Some(entry) = self.cache.read(identity) {
            if entry.is_fresh() {
                metrics::counter!(telemetry::CACHE_HITS_TOTAL).increment(1);
                debug!(
                    identity,
                    age_ms = entry.age().as_millis() as u64,
                    "fresh cache hit"
                );
                return (Outcome::Hit, FetchResult::fresh(entry.payload));
            }
        }
        metrics::counter!(telemetry::CACHE_MISSES_TOTAL).increment(1);

        let err = match retry::with_backoff(options, identity, |_| self.attempt(identity, options))
            .await
        {
            Ok((payload, ttl)) => {
                self.store(identity, payload.clone(), ttl);
                return (Outcome::Fresh, FetchResult::fresh(payload));
            }
            Err(e) => e,
        };

        // Re-read: a concurrent caller may have written since the first lookup.
        match self.cache.read(identity) {
            Some(entry) => {
                metrics::counter!(telemetry::STALE_FALLBACKS_TOTAL).increment(1);
                warn!(
                    identity,
                    age_ms = entry.age().as_millis() as u64,
                    error = %err,
                    "all attempts failed, serving cached data"
                );
                (Outcome::Stale, FetchResult::stale(entry.payload, err.to_string()))
            }
            None => {
                warn!(identity, error = %err, "all attempts failed, no cached data");
                (Outcome::Failed, FetchResult::failed(err.to_string()))
            }
        }
    }

    /// One network attempt: send under the deadline, classify, decode.
    ///
    /// Returns the payload and the TTL it should be cached with.
    async fn attempt(&self, identity: &str, options: &FetchOptions) -> Result<(Payload, Duration)> {
        // Elapsing drops the send future, which aborts the in-flight request.
        let response = tokio::time::timeout(
            options.timeout,
            self.transport.send(identity, &options.request),
        )
        .await
        .map_err(|_| HuginnError::Timeout)??;

        if !response.is_success() {
            return Err(HuginnError::status(response.status));
        }

        let payload = Payload::decode(options.response_format, &response.body).inspect_err(|e| {
            if let HuginnError::Decode(detail) = e {
                debug!(identity, transport = self.transport.name(), detail = %detail, "undecodable body");
            }
        })?;

        let ttl = cache_control::max_age_from_headers(&response.headers).unwrap_or(options.ttl);
        Ok((payload, ttl))
    }

    /// Best-effort cache write.
    fn store(&self, identity: &str, payload: Payload, ttl: Duration) {
        if let Err(e) = self.cache.write(identity, CacheEntry::new(payload, ttl)) {
            metrics::counter!(telemetry::CACHE_WRITE_FAILURES_TOTAL).increment(1);
            warn!(identity, error = %e, "cache write failed, continuing without caching");
        } else {
            debug!(identity, ttl_ms = ttl.as_millis() as u64, "cached response");
        }
    }
}
