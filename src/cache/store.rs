//! Cache Store Module
//!
//! Main cache engine combining HashMap storage with insertion-order
//! eviction and lazy TTL expiration.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info};

use crate::cache::{
    CacheEntry, CacheStats, Clock, InsertionOrder, SystemClock, USERS_BY_POST_CONTENT_PREFIX,
};

// == Cache Store ==
/// Bounded cache with a fixed TTL and prefix invalidation.
///
/// Not synchronized; see [`SharedCache`](crate::cache::SharedCache) for the
/// handle shared between request handlers.
#[derive(Debug)]
pub struct CacheStore<V> {
    /// Key-value storage
    entries: HashMap<String, CacheEntry<V>>,
    /// Oldest-first insertion order
    order: InsertionOrder,
    /// Activity counters
    stats: CacheStats,
    /// Maximum number of entries allowed
    max_entries: usize,
    /// Age after which an entry is treated as absent
    ttl: Duration,
    /// Time source for insertion stamps and expiry checks
    clock: Arc<dyn Clock>,
}

impl<V: Clone> CacheStore<V> {
    // == Constructor ==
    /// Creates a new CacheStore backed by the system clock.
    ///
    /// # Arguments
    /// * `max_entries` - Maximum number of entries the cache can hold
    /// * `ttl` - Age after which entries are no longer returned
    pub fn new(max_entries: usize, ttl: Duration) -> Self {
        Self::with_clock(max_entries, ttl, Arc::new(SystemClock))
    }

    /// Creates a new CacheStore reading time from `clock`.
    pub fn with_clock(max_entries: usize, ttl: Duration, clock: Arc<dyn Clock>) -> Self {
        Self {
            entries: HashMap::new(),
            order: InsertionOrder::new(),
            stats: CacheStats::new(),
            max_entries,
            ttl,
            clock,
        }
    }

    // == Put ==
    /// Stores `value` under `key`, replacing any previous entry.
    ///
    /// The entry gets a fresh insertion time and moves to the newest
    /// position. If the store then holds more than `max_entries`, the oldest
    /// insertions are evicted one at a time until it fits.
    pub fn put(&mut self, key: impl Into<String>, value: V) {
        let key = key.into();
        let entry = CacheEntry::new(value, self.clock.now_ms());

        self.entries.insert(key.clone(), entry);
        self.order.push_newest(&key);
        info!("[CACHE] Data added to cache with key: {}", key);

        self.enforce_capacity();
        self.stats.set_total_entries(self.entries.len());
    }

    fn enforce_capacity(&mut self) {
        while self.entries.len() > self.max_entries {
            let Some(oldest) = self.order.pop_oldest() else {
                break;
            };
            self.entries.remove(&oldest);
            self.stats.record_eviction();
            info!("[CACHE] Removed eldest entry due to size limit: {}", oldest);
        }
    }

    // == Get ==
    /// Returns a copy of the value stored under `key`.
    ///
    /// An entry older than the TTL is removed here and reported as absent.
    /// Reads never change eviction order.
    pub fn get(&mut self, key: &str) -> Option<V> {
        let now = self.clock.now_ms();

        let expired = match self.entries.get(key) {
            None => {
                self.stats.record_miss();
                debug!("[CACHE] Data not found in cache for key: {}", key);
                return None;
            }
            Some(entry) => entry.is_expired(now, self.ttl),
        };

        if expired {
            self.entries.remove(key);
            self.order.remove(key);
            self.stats.record_expiration();
            self.stats.record_miss();
            self.stats.set_total_entries(self.entries.len());
            info!("[CACHE] Data expired in cache for key: {}", key);
            return None;
        }

        self.stats.record_hit();
        debug!("[CACHE] Data retrieved from cache for key: {}", key);
        self.entries.get(key).map(|entry| entry.value.clone())
    }

    // == Evict ==
    /// Removes the entry for `key`. Absent keys are ignored.
    pub fn evict(&mut self, key: &str) {
        if self.entries.remove(key).is_some() {
            self.order.remove(key);
            self.stats.record_invalidations(1);
            self.stats.set_total_entries(self.entries.len());
            info!("[CACHE] Data evicted from cache for key: {}", key);
        }
    }

    // == Evict By Prefix ==
    /// Removes every entry whose key starts with `prefix`.
    ///
    /// Matching is byte-wise and case-sensitive. Returns the number of
    /// entries removed.
    pub fn evict_by_prefix(&mut self, prefix: &str) -> usize {
        let removed = self.order.remove_by_prefix(prefix);
        for key in &removed {
            self.entries.remove(key);
            info!("[CACHE] Data evicted from cache for key: {}", key);
        }

        self.stats.record_invalidations(removed.len());
        self.stats.set_total_entries(self.entries.len());
        removed.len()
    }

    // == Invalidate User Cache ==
    /// Drops every cached content-search result.
    pub fn invalidate_user_cache(&mut self) -> usize {
        self.evict_by_prefix(USERS_BY_POST_CONTENT_PREFIX)
    }

    // == Purge Expired ==
    /// Removes all entries older than the TTL.
    ///
    /// Returns the number of entries removed. Only the optional background
    /// sweep calls this; normal operation relies on lazy expiry in `get`.
    pub fn purge_expired(&mut self) -> usize {
        let now = self.clock.now_ms();
        let expired_keys: Vec<String> = self
            .entries
            .iter()
            .filter(|(_, entry)| entry.is_expired(now, self.ttl))
            .map(|(key, _)| key.clone())
            .collect();

        for key in &expired_keys {
            self.entries.remove(key);
            self.order.remove(key);
            self.stats.record_expiration();
        }

        self.stats.set_total_entries(self.entries.len());
        expired_keys.len()
    }

    // == Contains Key ==
    /// Checks physical presence without an expiry check or stats update.
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    // == Stats ==
    /// Returns current cache statistics.
    pub fn stats(&self) -> CacheStats {
        let mut stats = self.stats.clone();
        stats.set_total_entries(self.entries.len());
        stats
    }

    // == Length ==
    /// Returns the number of stored entries, including expired ones not yet read.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    // == Is Empty ==
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
