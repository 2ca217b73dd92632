//! Cache Entry Module
//!
//! Defines the structure for individual cache entries and their age check.

use std::time::Duration;

// == Cache Entry ==
/// A cached value together with the time it was inserted.
#[derive(Debug, Clone)]
pub struct CacheEntry<V> {
    /// The stored value
    pub value: V,
    /// Insertion timestamp (Unix milliseconds), fixed for the entry's lifetime
    pub created_at: u64,
}

impl<V> CacheEntry<V> {
    // == Constructor ==
    /// Creates a new entry stamped with `now_ms`.
    pub fn new(value: V, now_ms: u64) -> Self {
        Self {
            value,
            created_at: now_ms,
        }
    }

    // == Age ==
    /// Milliseconds elapsed since insertion. Never negative.
    pub fn age_ms(&self, now_ms: u64) -> u64 {
        now_ms.saturating_sub(self.created_at)
    }

    // == Is Expired ==
    /// Checks whether the entry has outlived `ttl`.
    ///
    /// Boundary condition: an entry whose age equals the TTL exactly is
    /// still live. It only expires once the age is strictly greater.
    pub fn is_expired(&self, now_ms: u64, ttl: Duration) -> bool {
        u128::from(self.age_ms(now_ms)) > ttl.as_millis()
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    const TTL: Duration = Duration::from_secs(60);

    #[test]
    fn test_entry_creation() {
        let entry = CacheEntry::new("test_value".to_string(), 5_000);

        assert_eq!(entry.value, "test_value");
        assert_eq!(entry.created_at, 5_000);
        assert!(!entry.is_expired(5_000, TTL));
    }

    #[test]
    fn test_entry_expiration() {
        let entry = CacheEntry::new(1u32, 0);

        assert!(!entry.is_expired(59_999, TTL));
        assert!(entry.is_expired(60_001, TTL));
    }

    #[test]
    fn test_expiration_boundary_condition() {
        let entry = CacheEntry::new(1u32, 1_000);

        // Age == TTL is not yet expired
        assert!(!entry.is_expired(61_000, TTL), "Entry should be live at boundary");
        assert!(entry.is_expired(61_001, TTL));
    }

    #[test]
    fn test_age_with_clock_behind_insertion() {
        let entry = CacheEntry::new(1u32, 10_000);

        assert_eq!(entry.age_ms(9_000), 0);
        assert!(!entry.is_expired(9_000, TTL));
    }
}
