//! Huginn error types

/// Huginn error types
#[derive(Debug, thiserror::Error)]
pub enum HuginnError {
    // Transport errors
    #[error("HTTP error: {0}")]
    Http(String),

    #[error("Request timed out")]
    Timeout,

    // Upstream errors
    #[error("HTTP {status}: {reason}")]
    Status { status: u16, reason: String },

    // Data errors
    /// The body did not match the requested response format.
    ///
    /// The detail is kept for logging; the display text is fixed so callers
    /// see the same message regardless of the underlying parser.
    #[error("Failed to parse response")]
    Decode(String),

    // Cache errors
    #[error("cache quota exceeded: entry needs {needed} bytes, quota is {quota} bytes")]
    QuotaExceeded { needed: u64, quota: u64 },

    // Configuration errors
    #[error("configuration error: {0}")]
    Configuration(String),

    #[error("invalid input: {0}")]
    InvalidInput(String),
}

impl HuginnError {
    /// Build a [`HuginnError::Status`] from an HTTP status code.
    pub fn status(code: u16) -> Self {
        let reason = reqwest::StatusCode::from_u16(code)
            .ok()
            .and_then(|s| s.canonical_reason())
            .unwrap_or("Unknown Status")
            .to_string();
        HuginnError::Status {
            status: code,
            reason,
        }
    }
}

impl From<reqwest::Error> for HuginnError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            HuginnError::Timeout
        } else {
            HuginnError::Http(err.to_string())
        }
    }
}

/// Result type alias for Huginn operations
pub type Result<T> = std::result::Result<T, HuginnError>;
