//! Configuration Module
//!
//! Handles loading and managing cache configuration from environment variables.

use std::env;
use std::path::PathBuf;
use std::time::Duration;

/// Cache configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// Replacement policy selector, "LRU" or "LFU"
    pub policy: String,
    /// Maximum total size of cached bodies, in bytes
    pub max_size_bytes: u64,
    /// Resource lifetime in seconds; older entries are swept out
    pub ttl_secs: u64,
    /// Directory where cached bodies are mirrored
    pub mount_path: PathBuf,
    /// Interval between expiration sweeps, in milliseconds
    pub sweep_interval_ms: u64,
}

impl CacheConfig {
    /// Creates a new CacheConfig by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `WEBCACHE_POLICY` - Replacement policy (default: "LRU")
    /// - `WEBCACHE_MAX_SIZE_BYTES` - Capacity in bytes (default: 64 MiB)
    /// - `WEBCACHE_TTL_SECS` - Resource lifetime in seconds (default: 300)
    /// - `WEBCACHE_MOUNT_PATH` - Disk mirror directory (default: "./cache")
    /// - `WEBCACHE_SWEEP_INTERVAL_MS` - Sweep frequency in ms (default: 50)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            policy: env::var("WEBCACHE_POLICY").unwrap_or(defaults.policy),
            max_size_bytes: env::var("WEBCACHE_MAX_SIZE_BYTES")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.max_size_bytes),
            ttl_secs: env::var("WEBCACHE_TTL_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.ttl_secs),
            mount_path: env::var("WEBCACHE_MOUNT_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.mount_path),
            sweep_interval_ms: env::var("WEBCACHE_SWEEP_INTERVAL_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.sweep_interval_ms),
        }
    }

    /// Resource lifetime as a Duration.
    pub fn ttl(&self) -> Duration {
        Duration::from_secs(self.ttl_secs)
    }

    /// Sweep interval as a Duration.
    pub fn sweep_interval(&self) -> Duration {
        Duration::from_millis(self.sweep_interval_ms)
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            policy: "LRU".to_string(),
            max_size_bytes: 64 * 1024 * 1024,
            ttl_secs: 300,
            mount_path: PathBuf::from("./cache"),
            sweep_interval_ms: 50,
        }
    }
}
