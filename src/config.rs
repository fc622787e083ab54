//! Configuration Module
//!
//! Loads the cache TTL from a JSON config file or the environment.

use std::env;
use std::fs;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::ConfigError;

/// TTL applied when no configuration is available (five minutes)
pub const DEFAULT_CACHE_TTL_SECS: u64 = 300;

/// Service configuration parameters.
///
/// Missing keys fall back to their defaults; unknown keys are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Lifetime of every cache entry, in seconds
    pub cache_ttl_seconds: u64,
}

impl Config {
    /// Creates a Config from environment variables.
    ///
    /// # Environment Variables
    /// - `CACHE_TTL_SECONDS` - Cache TTL in seconds (default: 300)
    pub fn from_env() -> Self {
        Self {
            cache_ttl_seconds: env::var("CACHE_TTL_SECONDS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_CACHE_TTL_SECS),
        }
    }

    /// Reads a JSON config file such as `{"cache_ttl_seconds": 60}`.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let data = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Config = serde_json::from_str(&data)?;

        info!(
            "Configuration loaded from {}: cache_ttl_seconds={}",
            path.display(),
            config.cache_ttl_seconds
        );
        Ok(config)
    }

    /// Like [`Config::load`], but falls back to defaults when the file is
    /// absent or unreadable.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match Self::load(path) {
            Ok(config) => config,
            Err(err) => {
                warn!(error = %err, "Failed to load config from {}, using defaults", path.display());
                Self::default()
            }
        }
    }

    /// Returns the cache TTL as a `Duration`.
    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_seconds)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            cache_ttl_seconds: DEFAULT_CACHE_TTL_SECS,
        }
    }
}
