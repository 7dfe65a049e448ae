//! Network seam for the fetcher.
//!
//! The [`Fetcher`](crate::Fetcher) never talks to reqwest directly: each
//! attempt goes through a [`Transport`], which turns a request identity and
//! [`RequestOptions`] into a [`RawResponse`]. Status classification, body
//! decoding and `Cache-Control` handling stay in the fetcher so every
//! transport gets the same policy.

pub mod cache_control;
mod http;

pub use http::HttpTransport;

use async_trait::async_trait;
use reqwest::header::HeaderMap;

use crate::Result;
use crate::types::RequestOptions;

/// A completed upstream exchange, before any interpretation.
#[derive(Debug, Clone, Default)]
pub struct RawResponse {
    pub status: u16,
    pub headers: HeaderMap,
    pub body: Vec<u8>,
}

impl RawResponse {
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            headers: HeaderMap::new(),
            body: body.into(),
        }
    }

    pub fn with_headers(mut self, headers: HeaderMap) -> Self {
        self.headers = headers;
        self
    }

    /// 2xx status.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Performs one network call for an identity.
///
/// Implementations return `Err` only for transport failures (connection
/// refused, DNS, reset); an upstream error status is a successful exchange
/// and comes back as a [`RawResponse`]. Dropping the returned future must
/// abort the call, since that is how per-attempt timeouts cancel it.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Transport name for logs.
    fn name(&self) -> &str;

    async fn send(&self, identity: &str, request: &RequestOptions) -> Result<RawResponse>;
}
