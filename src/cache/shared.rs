//! Shared Cache Module
//!
//! Cloneable, thread-safe handle around a single [`CacheStore`].

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use crate::cache::{CacheKey, CachePrefix, CacheStats, CacheStore, Clock};

// == Shared Cache ==
/// Process-wide cache handle injected into every service.
///
/// Every operation takes one coarse lock for its whole duration, so each
/// call is atomic with respect to the others and sees every call that
/// completed before it. Nothing inside the lock awaits or blocks on I/O.
///
/// A `get` followed by a `put` is two separate operations: callers racing
/// on the same missing key may both compute the value, and the last `put`
/// wins.
#[derive(Debug)]
pub struct SharedCache<V> {
    inner: Arc<Mutex<CacheStore<V>>>,
}

impl<V> Clone for SharedCache<V> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<V: Clone> SharedCache<V> {
    /// Wraps an existing store.
    pub fn new(store: CacheStore<V>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(store)),
        }
    }

    /// Creates a shared cache backed by the system clock.
    pub fn with_capacity(max_entries: usize, ttl: Duration) -> Self {
        Self::new(CacheStore::new(max_entries, ttl))
    }

    /// Creates a shared cache reading time from `clock`.
    pub fn with_clock(max_entries: usize, ttl: Duration, clock: Arc<dyn Clock>) -> Self {
        Self::new(CacheStore::with_clock(max_entries, ttl, clock))
    }

    // Poisoned locks are recovered; no store operation panics midway.
    fn lock(&self) -> MutexGuard<'_, CacheStore<V>> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn put(&self, key: impl Into<String>, value: V) {
        self.lock().put(key, value);
    }

    pub fn get(&self, key: &str) -> Option<V> {
        self.lock().get(key)
    }

    pub fn evict(&self, key: &str) {
        self.lock().evict(key);
    }

    pub fn evict_by_prefix(&self, prefix: &str) -> usize {
        self.lock().evict_by_prefix(prefix)
    }

    pub fn invalidate_user_cache(&self) -> usize {
        self.lock().invalidate_user_cache()
    }

    /// Evicts the entry for a typed key.
    pub fn evict_key(&self, key: &CacheKey) {
        self.evict(&key.to_string());
    }

    /// Evicts every entry in a typed key family.
    pub fn evict_family(&self, prefix: CachePrefix) -> usize {
        self.evict_by_prefix(prefix.as_str())
    }

    pub fn purge_expired(&self) -> usize {
        self.lock().purge_expired()
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.lock().contains_key(key)
    }

    pub fn stats(&self) -> CacheStats {
        self.lock().stats()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }
}
