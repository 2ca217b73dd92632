//! Configuration Module
//!
//! Handles loading and managing server configuration from environment variables.

use std::env;
use std::str::FromStr;
use std::time::Duration;

/// Server configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Maximum number of entries the response cache can hold
    pub max_entries: usize,
    /// Cache entry lifetime in seconds
    pub cache_ttl: u64,
    /// HTTP server port
    pub server_port: u16,
    /// Background sweep interval in seconds, 0 disables the sweep
    pub cleanup_interval: u64,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `MAX_CACHE_SIZE` - Maximum cache entries (default: 100)
    /// - `CACHE_TTL` - Entry lifetime in seconds (default: 900)
    /// - `SERVER_PORT` - HTTP server port (default: 3000)
    /// - `CLEANUP_INTERVAL` - Expired-entry sweep frequency in seconds (default: 0, disabled)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            max_entries: env_or("MAX_CACHE_SIZE", defaults.max_entries),
            cache_ttl: env_or("CACHE_TTL", defaults.cache_ttl),
            server_port: env_or("SERVER_PORT", defaults.server_port),
            cleanup_interval: env_or("CLEANUP_INTERVAL", defaults.cleanup_interval),
        }
    }

    pub fn ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl)
    }

    /// Returns true if the background sweep should run.
    pub fn sweep_enabled(&self) -> bool {
        self.cleanup_interval > 0
    }
}

fn env_or<T: FromStr>(name: &str, default: T) -> T {
    env::var(name)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_entries: crate::cache::MAX_CACHE_SIZE,
            cache_ttl: crate::cache::DEFAULT_TTL.as_secs(),
            server_port: 3000,
            cleanup_interval: 0,
        }
    }
}
