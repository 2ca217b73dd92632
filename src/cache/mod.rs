//! Cache Module
//!
//! Provides a bounded in-memory cache with lazy TTL expiration,
//! insertion-order eviction and prefix invalidation.

mod clock;
mod entry;
mod keys;
mod order;
mod shared;
mod stats;
mod store;

#[cfg(test)]
mod property_tests;

use std::time::Duration;

// Re-export public types
pub use clock::{Clock, ManualClock, SystemClock};
pub use entry::CacheEntry;
pub use keys::{CacheKey, CachePrefix, USERS_BY_POST_CONTENT_PREFIX};
pub use order::InsertionOrder;
pub use shared::SharedCache;
pub use stats::CacheStats;
pub use store::CacheStore;

// == Public Constants ==
/// Default maximum number of cached entries
pub const MAX_CACHE_SIZE: usize = 100;

/// Default entry lifetime
pub const DEFAULT_TTL: Duration = Duration::from_secs(15 * 60);
