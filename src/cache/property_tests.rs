//! Property-Based Tests for Cache Module
//!
//! Uses proptest to check the store's capacity, ordering, expiry and
//! invalidation guarantees over generated operation sequences.

use proptest::prelude::*;
use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Duration;

use crate::cache::{CacheStore, ManualClock, DEFAULT_TTL, MAX_CACHE_SIZE};

// == Strategies ==
/// Generates keys drawn from a few namespaces so prefixes overlap
fn key_strategy() -> impl Strategy<Value = String> {
    (
        prop_oneof![Just("user_"), Just("group_"), Just("users_by_post_content_")],
        "[a-z0-9]{1,4}",
    )
        .prop_map(|(prefix, suffix)| format!("{}{}", prefix, suffix))
}

fn value_strategy() -> impl Strategy<Value = u32> {
    any::<u32>()
}

#[derive(Debug, Clone)]
enum CacheOp {
    Put { key: String, value: u32 },
    Get { key: String },
    Evict { key: String },
    EvictPrefix { prefix: String },
}

fn cache_op_strategy() -> impl Strategy<Value = CacheOp> {
    prop_oneof![
        4 => (key_strategy(), value_strategy()).prop_map(|(key, value)| CacheOp::Put { key, value }),
        2 => key_strategy().prop_map(|key| CacheOp::Get { key }),
        1 => key_strategy().prop_map(|key| CacheOp::Evict { key }),
        1 => prop_oneof![Just("user_"), Just("group_"), Just("users_")]
            .prop_map(|p| CacheOp::EvictPrefix { prefix: p.to_string() }),
    ]
}

fn new_store(max_entries: usize) -> (CacheStore<u32>, Arc<ManualClock>) {
    let clock = Arc::new(ManualClock::new(0));
    (
        CacheStore::with_clock(max_entries, DEFAULT_TTL, clock.clone()),
        clock,
    )
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    // Capacity: no sequence of puts leaves more than max_entries behind
    #[test]
    fn prop_capacity_enforcement(
        entries in prop::collection::vec((key_strategy(), value_strategy()), 1..300),
        max_entries in 1usize..60
    ) {
        let (mut store, _) = new_store(max_entries);

        for (key, value) in entries {
            store.put(key, value);
            prop_assert!(
                store.len() <= max_entries,
                "Cache size {} exceeds max {}",
                store.len(),
                max_entries
            );
        }
    }

    // Store agrees with a simple insertion-ordered model for any op sequence
    #[test]
    fn prop_matches_insertion_order_model(
        ops in prop::collection::vec(cache_op_strategy(), 1..200),
        max_entries in 1usize..20
    ) {
        let (mut store, _) = new_store(max_entries);
        // Oldest at front
        let mut model: VecDeque<(String, u32)> = VecDeque::new();

        for op in ops {
            match op {
                CacheOp::Put { key, value } => {
                    store.put(key.clone(), value);
                    model.retain(|(k, _)| k != &key);
                    model.push_back((key, value));
                    while model.len() > max_entries {
                        model.pop_front();
                    }
                }
                CacheOp::Get { key } => {
                    let expected = model.iter().find(|(k, _)| k == &key).map(|(_, v)| *v);
                    prop_assert_eq!(store.get(&key), expected);
                }
                CacheOp::Evict { key } => {
                    store.evict(&key);
                    model.retain(|(k, _)| k != &key);
                }
                CacheOp::EvictPrefix { prefix } => {
                    let before = model.len();
                    model.retain(|(k, _)| !k.starts_with(&prefix));
                    prop_assert_eq!(store.evict_by_prefix(&prefix), before - model.len());
                }
            }
            prop_assert_eq!(store.len(), model.len());
        }
    }

    // Inserting max+1 distinct keys drops exactly the first one
    #[test]
    fn prop_first_inserted_is_evicted(keys in prop::collection::hash_set("[a-z]{1,8}", MAX_CACHE_SIZE + 1)) {
        let keys: Vec<String> = keys.into_iter().collect();
        let (mut store, _) = new_store(MAX_CACHE_SIZE);

        for (i, key) in keys.iter().enumerate() {
            store.put(key.clone(), i as u32);
        }

        prop_assert!(!store.contains_key(&keys[0]));
        for key in &keys[1..] {
            prop_assert!(store.contains_key(key));
        }
    }

    // Prefix eviction removes exactly the matching keys
    #[test]
    fn prop_prefix_eviction_exact(
        keys in prop::collection::hash_set(key_strategy(), 1..50),
        prefix in prop_oneof![Just("user_"), Just("group_"), Just("users_by_post_content_")]
    ) {
        let (mut store, _) = new_store(MAX_CACHE_SIZE);
        for key in &keys {
            store.put(key.clone(), 0);
        }

        store.evict_by_prefix(prefix);

        for key in &keys {
            prop_assert_eq!(store.contains_key(key), !key.starts_with(prefix));
        }
    }

    // Overwrite semantics
    #[test]
    fn prop_overwrite_semantics(
        key in key_strategy(),
        value1 in value_strategy(),
        value2 in value_strategy()
    ) {
        let (mut store, _) = new_store(MAX_CACHE_SIZE);

        store.put(key.clone(), value1);
        store.put(key.clone(), value2);

        prop_assert_eq!(store.get(&key), Some(value2));
        prop_assert_eq!(store.len(), 1, "Should have exactly one entry after overwrite");
    }

    // TTL: live up to and including the TTL, absent after it
    #[test]
    fn prop_ttl_expiration_behavior(
        key in key_strategy(),
        value in value_strategy(),
        ttl_secs in 1u64..3600,
        overshoot_ms in 1u64..10_000
    ) {
        let clock = Arc::new(ManualClock::new(0));
        let ttl = Duration::from_secs(ttl_secs);
        let mut store = CacheStore::with_clock(MAX_CACHE_SIZE, ttl, clock.clone());

        store.put(key.clone(), value);

        clock.set(ttl.as_millis() as u64 - 1);
        prop_assert_eq!(store.get(&key), Some(value));

        clock.set(ttl.as_millis() as u64 + overshoot_ms);
        prop_assert_eq!(store.get(&key), None);
        prop_assert_eq!(store.len(), 0);
    }

    // Statistics stay consistent with observed lookups
    #[test]
    fn prop_statistics_accuracy(ops in prop::collection::vec(cache_op_strategy(), 1..50)) {
        let (mut store, _) = new_store(MAX_CACHE_SIZE);
        let mut expected_hits: u64 = 0;
        let mut expected_misses: u64 = 0;

        for op in ops {
            match op {
                CacheOp::Put { key, value } => store.put(key, value),
                CacheOp::Get { key } => match store.get(&key) {
                    Some(_) => expected_hits += 1,
                    None => expected_misses += 1,
                },
                CacheOp::Evict { key } => store.evict(&key),
                CacheOp::EvictPrefix { prefix } => {
                    store.evict_by_prefix(&prefix);
                }
            }
        }

        let stats = store.stats();
        prop_assert_eq!(stats.hits, expected_hits, "Hits mismatch");
        prop_assert_eq!(stats.misses, expected_misses, "Misses mismatch");
        prop_assert_eq!(stats.total_entries, store.len(), "Total entries mismatch");
    }
}

// == Scenario Tests ==

#[test]
fn scenario_capacity_rollover() {
    let (mut store, _) = new_store(MAX_CACHE_SIZE);

    for i in 1..=100 {
        store.put(format!("g_{}", i), i);
    }
    store.put("g_101", 101);

    assert_eq!(store.get("g_1"), None);
    assert_eq!(store.get("g_101"), Some(101));
}

#[test]
fn scenario_expired_read_shrinks_store() {
    let (mut store, clock) = new_store(MAX_CACHE_SIZE);

    store.put("k", 1);
    clock.advance(DEFAULT_TTL + Duration::from_secs(1));

    assert_eq!(store.get("k"), None);
    assert_eq!(store.len(), 0);
}
