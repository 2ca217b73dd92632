//! Insertion Order Module
//!
//! Tracks the order in which keys were inserted for capacity eviction.

use std::collections::{BTreeMap, HashMap};

// == Insertion Order ==
/// Tracks insertion order for oldest-first eviction.
///
/// Every insertion takes the next sequence number. `by_seq` orders keys
/// oldest-first and `seq_of` indexes each key's current sequence number,
/// so push, remove and pop are O(log n) regardless of the configured
/// capacity. Prefix removal scans all keys.
///
/// Reads never change a key's position. Only re-insertion does.
#[derive(Debug, Default)]
pub struct InsertionOrder {
    by_seq: BTreeMap<u64, String>,
    seq_of: HashMap<String, u64>,
    next_seq: u64,
}

impl InsertionOrder {
    // == Constructor ==
    /// Creates a new empty order list.
    pub fn new() -> Self {
        Self::default()
    }

    // == Push Newest ==
    /// Records `key` as the newest insertion.
    ///
    /// A key already present is removed from its old position first,
    /// so an overwrite always becomes the newest.
    pub fn push_newest(&mut self, key: &str) {
        self.remove(key);
        let seq = self.next_seq;
        self.next_seq += 1;
        self.by_seq.insert(seq, key.to_string());
        self.seq_of.insert(key.to_string(), seq);
    }

    // == Remove ==
    /// Removes a key from the order list.
    pub fn remove(&mut self, key: &str) {
        if let Some(seq) = self.seq_of.remove(key) {
            self.by_seq.remove(&seq);
        }
    }

    // == Remove By Prefix ==
    /// Removes every key starting with `prefix` and returns them oldest-first.
    pub fn remove_by_prefix(&mut self, prefix: &str) -> Vec<String> {
        let doomed: Vec<u64> = self
            .by_seq
            .iter()
            .filter(|(_, key)| key.starts_with(prefix))
            .map(|(seq, _)| *seq)
            .collect();

        let mut removed = Vec::with_capacity(doomed.len());
        for seq in doomed {
            if let Some(key) = self.by_seq.remove(&seq) {
                self.seq_of.remove(&key);
                removed.push(key);
            }
        }
        removed
    }

    // == Pop Oldest ==
    /// Returns and removes the oldest key.
    ///
    /// Returns None if the list is empty.
    pub fn pop_oldest(&mut self) -> Option<String> {
        let (_, key) = self.by_seq.pop_first()?;
        self.seq_of.remove(&key);
        Some(key)
    }
}

#[cfg(test)]
impl InsertionOrder {
    fn peek_oldest(&self) -> Option<&String> {
        self.by_seq.values().next()
    }

    fn len(&self) -> usize {
        self.by_seq.len()
    }

    fn is_empty(&self) -> bool {
        self.by_seq.is_empty()
    }

    fn contains(&self, key: &str) -> bool {
        self.seq_of.contains_key(key)
    }
}
