//! Telemetry metric name constants.
//!
//! Centralised metric names for huginn operations. Consumers install
//! their own `metrics` recorder (e.g. prometheus, statsd); without a
//! recorder installed, all metric calls are no-ops.
//!
//! # Metric naming conventions
//!
//! All metrics are prefixed with `huginn_`. Counters end in `_total`,
//! histograms use meaningful units (e.g. `_seconds`).
//!
//! # Common labels
//!
//! - `outcome`: how a fetch resolved: "hit", "fresh", "stale" or "failed"
//! - `reason`: failure family of an attempt: "transport", "timeout",
//!   "status" or "decode"

/// Total fetch calls, labelled by how they resolved.
///
/// Labels: `outcome` ("hit" | "fresh" | "stale" | "failed").
pub const REQUESTS_TOTAL: &str = "huginn_requests_total";

/// Duration of a whole fetch call in seconds, backoff included.
///
/// Labels: `outcome`.
pub const REQUEST_DURATION_SECONDS: &str = "huginn_request_duration_seconds";

/// Total network attempts (the initial request plus retries).
pub const ATTEMPTS_TOTAL: &str = "huginn_attempts_total";

/// Total retry attempts (not counting the initial request).
///
/// Labels: `reason`.
pub const RETRIES_TOTAL: &str = "huginn_retries_total";

/// Total fresh cache hits.
pub const CACHE_HITS_TOTAL: &str = "huginn_cache_hits_total";

/// Total lookups that found no fresh entry.
pub const CACHE_MISSES_TOTAL: &str = "huginn_cache_misses_total";

/// Total fetches answered from an expired entry after every attempt failed.
pub const STALE_FALLBACKS_TOTAL: &str = "huginn_stale_fallbacks_total";

/// Total cache writes that were dropped (e.g. quota exceeded).
pub const CACHE_WRITE_FAILURES_TOTAL: &str = "huginn_cache_write_failures_total";
