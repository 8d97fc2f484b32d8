//! Memo table storage.

use crate::key::ArgSignature;
use decorum_core::Value;
use std::num::NonZeroUsize;

/// Result of inserting a freshly computed value.
pub(crate) enum Inserted {
    /// The signature was new and nothing had to make room for it.
    Fresh,
    /// Another caller stored this signature first; its value was replaced.
    Replaced,
    /// The least recently used entry was evicted to make room.
    Evicted(ArgSignature),
}

/// Signature to result table with optional LRU bound.
///
/// Lookups refresh an entry's recency; with equal recency the entry
/// inserted first is evicted first.
pub(crate) struct MemoStore {
    table: lru::LruCache<ArgSignature, Value>,
    capacity: Option<NonZeroUsize>,
}

impl MemoStore {
    pub(crate) fn new(capacity: Option<NonZeroUsize>) -> Self {
        let table = match capacity {
            Some(cap) => lru::LruCache::new(cap),
            None => lru::LruCache::unbounded(),
        };
        Self { table, capacity }
    }

    pub(crate) fn get(&mut self, key: &ArgSignature) -> Option<Value> {
        self.table.get(key).cloned()
    }

    /// Checks for a key without touching its recency.
    pub(crate) fn contains(&self, key: &ArgSignature) -> bool {
        self.table.contains(key)
    }

    pub(crate) fn insert(&mut self, key: ArgSignature, value: Value) -> Inserted {
        match self.table.push(key.clone(), value) {
            None => Inserted::Fresh,
            Some((old_key, _)) if old_key == key => Inserted::Replaced,
            Some((evicted, _)) => Inserted::Evicted(evicted),
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.table.len()
    }

    pub(crate) fn clear(&mut self) {
        self.table.clear();
    }

    pub(crate) fn capacity(&self) -> Option<usize> {
        self.capacity.map(NonZeroUsize::get)
    }
}
