//! Expired Entry Sweep
//!
//! Optional background task that periodically removes expired cache
//! entries nobody has read since they aged out.

use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::cache::SharedCache;

/// Spawns a background task that periodically purges expired cache entries.
///
/// The task runs in an infinite loop, sleeping for the specified interval
/// between runs. Each run holds the cache lock only for the purge itself.
///
/// # Arguments
/// * `cache` - Shared handle to the cache
/// * `cleanup_interval_secs` - Interval in seconds between runs
///
/// # Returns
/// A JoinHandle for the spawned task, which can be used to abort the task
/// during graceful shutdown.
///
/// # Example
/// ```ignore
/// let cache: SharedCache<String> = SharedCache::with_capacity(100, DEFAULT_TTL);
/// let cleanup_handle = spawn_cleanup_task(cache.clone(), 60);
/// // Later, during shutdown:
/// cleanup_handle.abort();
/// ```
pub fn spawn_cleanup_task<V>(cache: SharedCache<V>, cleanup_interval_secs: u64) -> JoinHandle<()>
where
    V: Clone + Send + 'static,
{
    let interval = Duration::from_secs(cleanup_interval_secs);

    tokio::spawn(async move {
        info!(
            "Starting expired entry sweep with interval of {} seconds",
            cleanup_interval_secs
        );

        loop {
            tokio::time::sleep(interval).await;

            let removed = cache.purge_expired();

            if removed > 0 {
                info!("[CACHE] Sweep removed {} expired entries", removed);
            } else {
                debug!("[CACHE] Sweep found no expired entries");
            }
        }
    })
}
