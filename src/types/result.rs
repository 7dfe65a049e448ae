//! The three-field result handed back to callers

use serde::Serialize;
use serde::de::DeserializeOwned;

use super::Payload;
use crate::Result;

/// Outcome of a [`Fetcher::fetch`](crate::Fetcher::fetch) call.
///
/// Exactly one shape holds after every call:
///
/// - fresh data: `data` present, `stale == false`, no error;
/// - stale data: `data` present from an expired or earlier entry,
///   `stale == true`, `error` carries the last failure;
/// - no data: `data` absent, `stale == false`, `error` set.
///
/// The constructors are the only way to build a result, so the shapes
/// above cannot be violated.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FetchResult {
    data: Option<Payload>,
    error: Option<String>,
    stale: bool,
}

impl FetchResult {
    /// Live or fresh-cache data.
    pub fn fresh(data: Payload) -> Self {
        Self {
            data: Some(data),
            error: None,
            stale: false,
        }
    }

    /// Cached data served because every live attempt failed.
    pub fn stale(data: Payload, error: impl Into<String>) -> Self {
        Self {
            data: Some(data),
            error: Some(error.into()),
            stale: true,
        }
    }

    /// Nothing could be obtained.
    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            data: None,
            error: Some(error.into()),
            stale: false,
        }
    }

    pub fn data(&self) -> Option<&Payload> {
        self.data.as_ref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_stale(&self) -> bool {
        self.stale
    }

    /// Whether the latest attempt (or the cache lookup) succeeded.
    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }

    /// Deserialize the data, if any, into a typed value.
    pub fn json<T: DeserializeOwned>(&self) -> Option<Result<T>> {
        self.data.as_ref().map(Payload::deserialize::<T>)
    }

    pub fn into_parts(self) -> (Option<Payload>, Option<String>, bool) {
        (self.data, self.error, self.stale)
    }
}
