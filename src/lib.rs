//! Huginn - resilient cached fetching for flaky upstream APIs
//!
//! Huginn stands between a consumer (typically a UI) and unreliable HTTP
//! endpoints. Every fetch is answered from a session cache while the entry
//! is fresh, otherwise retried with exponential backoff under a per-attempt
//! timeout, and, when every attempt fails, answered from the last
//! known-good cached payload instead of failing outright.
//!
//! Callers get a [`FetchResult`] with three fields (`data`, `error`,
//! `stale`) and never an `Err`.
//!
//! # Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use std::time::Duration;
//!
//! use huginn::{FetchOptions, Fetcher, SessionCache};
//!
//! #[tokio::main]
//! async fn main() {
//!     let fetcher = Fetcher::new(Arc::new(SessionCache::new()));
//!     let options = FetchOptions::new()
//!         .ttl(Duration::from_secs(60))
//!         .timeout(Duration::from_secs(5));
//!
//!     let result = fetcher
//!         .fetch("https://api.example.com/alerts", &options)
//!         .await;
//!
//!     match (result.data(), result.is_stale()) {
//!         (Some(data), false) => println!("{}", serde_json::to_string(data).unwrap()),
//!         (Some(_), true) => println!("stale: {}", result.error().unwrap_or_default()),
//!         (None, _) => println!("failed: {}", result.error().unwrap_or_default()),
//!     }
//! }
//! ```

pub mod cache;
#[cfg(feature = "cli")]
pub mod config;
pub mod error;
pub mod fetcher;
pub mod telemetry;
pub mod transport;
pub mod types;

/// Package version from Cargo.toml.
pub const PKG_VERSION: &str = env!("CARGO_PKG_VERSION");

// Re-export main types at crate root
pub use cache::{CacheConfig, CacheEntry, CacheStore, SessionCache};
pub use error::{HuginnError, Result};
pub use fetcher::Fetcher;
pub use transport::{HttpTransport, RawResponse, Transport};
pub use types::{FetchOptions, FetchResult, Payload, RequestOptions, ResponseFormat};
