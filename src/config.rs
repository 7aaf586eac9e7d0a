//! Dashboard configuration from environment variables

use std::env;
use std::time::Duration;

pub const DEFAULT_API_BASE: &str = "https://api.llama.fi";

/// Configuration loaded from environment variables with sensible defaults
#[derive(Debug, Clone)]
pub struct DashboardConfig {
    /// Base URL of the DefiLlama API (no trailing slash)
    pub api_base: String,

    /// Per-request HTTP timeout in seconds
    pub timeout_secs: u64,

    /// Cache time-to-live in seconds (0 = keep for the whole session)
    pub cache_ttl_secs: u64,

    pub rust_log: Option<String>,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            timeout_secs: 10,
            cache_ttl_secs: 0,
            rust_log: None,
        }
    }
}

impl DashboardConfig {
    /// Load configuration from environment variables
    ///
    /// Environment variables:
    /// - `LLAMA_API_BASE` (default: https://api.llama.fi)
    /// - `LLAMA_TIMEOUT_SECS` (default: 10)
    /// - `TVL_CACHE_TTL_SECS` (default: 0, never expire)
    /// - `RUST_LOG` (optional)
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            api_base: env::var("LLAMA_API_BASE")
                .map(|s| s.trim().trim_end_matches('/').to_string())
                .ok()
                .filter(|s| !s.is_empty())
                .unwrap_or(defaults.api_base),

            timeout_secs: env::var("LLAMA_TIMEOUT_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.timeout_secs),

            cache_ttl_secs: env::var("TVL_CACHE_TTL_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.cache_ttl_secs),

            rust_log: env::var("RUST_LOG").ok(),
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// `None` when entries never expire
    pub fn cache_ttl(&self) -> Option<Duration> {
        match self.cache_ttl_secs {
            0 => None,
            secs => Some(Duration::from_secs(secs)),
        }
    }
}
