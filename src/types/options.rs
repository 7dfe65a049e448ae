//! Fetch options and configuration types

use std::time::Duration;

use reqwest::Method;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use serde::{Deserialize, Serialize};

use crate::{HuginnError, Result};

/// Options for a single [`Fetcher::fetch`](crate::Fetcher::fetch) call.
///
/// Every field has an explicit default; setters chain:
///
/// ```rust
/// # use huginn::{FetchOptions, ResponseFormat};
/// # use std::time::Duration;
/// let options = FetchOptions::new()
///     .ttl(Duration::from_secs(60))
///     .timeout(Duration::from_secs(5))
///     .max_retries(3)
///     .response_format(ResponseFormat::Text);
/// assert!(options.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
pub struct FetchOptions {
    /// Freshness window applied to a successful response that carries no
    /// `Cache-Control: max-age`. Default: 5 minutes.
    pub ttl: Duration,
    /// Deadline for a single attempt. Default: 10s.
    pub timeout: Duration,
    /// Retry attempts after the first one. Default: 2.
    pub max_retries: u32,
    /// Delay before the first retry; doubles for each later one. Default: 500ms.
    pub backoff_base: Duration,
    /// How the body is turned into a [`Payload`](crate::Payload). Default: JSON.
    pub response_format: ResponseFormat,
    /// Transport-level overrides, passed through unmodified.
    pub request: RequestOptions,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(5 * 60),
            timeout: Duration::from_secs(10),
            max_retries: 2,
            backoff_base: Duration::from_millis(500),
            response_format: ResponseFormat::default(),
            request: RequestOptions::default(),
        }
    }
}

impl FetchOptions {
    /// Create options with the default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the default freshness window.
    pub fn ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    /// Set the per-attempt deadline.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the number of retries after the first attempt.
    pub fn max_retries(mut self, n: u32) -> Self {
        self.max_retries = n;
        self
    }

    /// Set the base backoff delay.
    pub fn backoff_base(mut self, delay: Duration) -> Self {
        self.backoff_base = delay;
        self
    }

    pub fn response_format(mut self, format: ResponseFormat) -> Self {
        self.response_format = format;
        self
    }

    pub fn request(mut self, request: RequestOptions) -> Self {
        self.request = request;
        self
    }

    /// Total number of attempts, the initial request included.
    pub fn max_attempts(&self) -> u32 {
        self.max_retries.saturating_add(1)
    }

    /// Delay to wait after the failed attempt with the given 0-based index.
    ///
    /// `backoff_base * 2^attempt`, saturating instead of overflowing.
    pub fn delay_for_attempt(&self, attempt: u32) -> Duration {
        self.backoff_base
            .saturating_mul(2u32.saturating_pow(attempt))
    }

    /// Check the options for values no fetch could honour.
    pub fn validate(&self) -> Result<()> {
        if self.timeout.is_zero() {
            return Err(HuginnError::InvalidInput(
                "timeout must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}

/// How a response body is decoded into a payload.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResponseFormat {
    /// Decode the body as JSON.
    #[default]
    Json,
    /// Keep the body as UTF-8 text.
    Text,
}

/// Transport-level request overrides.
#[derive(Debug, Clone)]
pub struct RequestOptions {
    pub method: Method,
    pub headers: HeaderMap,
    pub body: Option<String>,
}

impl Default for RequestOptions {
    fn default() -> Self {
        Self {
            method: Method::GET,
            headers: HeaderMap::new(),
            body: None,
        }
    }
}

impl RequestOptions {
    pub fn method(mut self, method: Method) -> Self {
        self.method = method;
        self
    }

    /// Add a header, rejecting names or values that are not valid HTTP.
    pub fn header(mut self, name: &str, value: &str) -> Result<Self> {
        let name = HeaderName::from_bytes(name.as_bytes())
            .map_err(|e| HuginnError::InvalidInput(format!("invalid header name {name:?}: {e}")))?;
        let value = HeaderValue::from_str(value)
            .map_err(|e| HuginnError::InvalidInput(format!("invalid header value: {e}")))?;
        self.headers.insert(name, value);
        Ok(self)
    }

    pub fn body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }
}
