//! Configuration loading for the `huginn` CLI.
//!
//! Configuration is loaded from TOML files with the following resolution order:
//! 1. `--config <path>` (CLI flag; must exist)
//! 2. `~/.huginn/config.toml` (user)
//! 3. `/etc/huginn/config.toml` (system)
//!
//! Every section and key is optional. With no file at all the library
//! defaults apply.
//!
//! ```toml
//! [fetch]
//! ttl_ms = 300000
//! timeout_ms = 10000
//! max_retries = 2
//! backoff_base_ms = 500
//! format = "json"
//!
//! [cache]
//! max_bytes = 5242880
//! ```

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::cache::CacheConfig;
use crate::types::{FetchOptions, ResponseFormat};
use crate::{HuginnError, Result};

/// CLI configuration.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub fetch: FetchSection,
    #[serde(default)]
    pub cache: CacheSection,
}

/// Defaults applied to every fetch.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct FetchSection {
    /// Freshness window in milliseconds (default: 300000).
    #[serde(default = "default_ttl_ms")]
    pub ttl_ms: u64,
    /// Per-attempt deadline in milliseconds (default: 10000).
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
    /// Retries after the first attempt (default: 2).
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
    /// Base backoff delay in milliseconds (default: 500).
    #[serde(default = "default_backoff_base_ms")]
    pub backoff_base_ms: u64,
    /// "json" or "text" (default: "json").
    #[serde(default)]
    pub format: ResponseFormat,
}

impl Default for FetchSection {
    fn default() -> Self {
        Self {
            ttl_ms: default_ttl_ms(),
            timeout_ms: default_timeout_ms(),
            max_retries: default_max_retries(),
            backoff_base_ms: default_backoff_base_ms(),
            format: ResponseFormat::default(),
        }
    }
}

fn default_ttl_ms() -> u64 {
    5 * 60 * 1000
}

fn default_timeout_ms() -> u64 {
    10_000
}

fn default_max_retries() -> u32 {
    2
}

fn default_backoff_base_ms() -> u64 {
    500
}

/// Session cache settings.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct CacheSection {
    /// Byte quota for the session cache (default: unlimited).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_bytes: Option<u64>,
}

impl Config {
    /// Load configuration from the standard locations.
    ///
    /// Resolution order:
    /// 1. Explicit path (if provided; an error if missing)
    /// 2. `~/.huginn/config.toml`
    /// 3. `/etc/huginn/config.toml`
    ///
    /// Falls back to defaults when no file is found.
    pub fn load(explicit_path: Option<&Path>) -> Result<Self> {
        match Self::resolve_config_path(explicit_path)? {
            Some(path) => Self::load_from_file(&path),
            None => Ok(Self::default()),
        }
    }

    /// Parse a configuration from TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)
            .map_err(|e| HuginnError::Configuration(format!("Failed to parse config: {e}")))?;
        config.fetch_options().validate()?;
        Ok(config)
    }

    fn load_from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            HuginnError::Configuration(format!("Failed to read config file {path:?}: {e}"))
        })?;
        Self::from_toml_str(&content)
    }

    /// Resolve the config file path, or `None` to use defaults.
    fn resolve_config_path(explicit: Option<&Path>) -> Result<Option<PathBuf>> {
        if let Some(path) = explicit {
            if path.exists() {
                return Ok(Some(path.to_path_buf()));
            }
            return Err(HuginnError::Configuration(format!(
                "Config file not found: {path:?}"
            )));
        }

        // User config
        if let Some(home) = dirs::home_dir() {
            let user_config = home.join(".huginn").join("config.toml");
            if user_config.exists() {
                return Ok(Some(user_config));
            }
        }

        // System config
        let system_config = PathBuf::from("/etc/huginn/config.toml");
        if system_config.exists() {
            return Ok(Some(system_config));
        }

        Ok(None)
    }

    /// Fetch options built from the `[fetch]` section.
    pub fn fetch_options(&self) -> FetchOptions {
        FetchOptions::new()
            .ttl(Duration::from_millis(self.fetch.ttl_ms))
            .timeout(Duration::from_millis(self.fetch.timeout_ms))
            .max_retries(self.fetch.max_retries)
            .backoff_base(Duration::from_millis(self.fetch.backoff_base_ms))
            .response_format(self.fetch.format)
    }

    /// Cache configuration built from the `[cache]` section.
    pub fn cache_config(&self) -> CacheConfig {
        CacheConfig {
            max_bytes: self.cache.max_bytes,
        }
    }
}
