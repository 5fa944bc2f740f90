//! Bounded Cache Module
//!
//! Generic fixed-capacity key-value store with least-recently-used eviction.
//! Recency is refreshed by both reads and writes.

use std::collections::{HashMap, VecDeque};
use std::fmt::Debug;
use std::hash::Hash;

use tracing::debug;

use crate::error::{Result, ServiceError};

// == Bounded Cache ==
/// Fixed-capacity key-value cache with LRU eviction.
///
/// The recency queue keeps the most recently used key at the front; when an
/// insertion would exceed `max_size`, the key at the back is evicted. Callers
/// needing shared access wrap the cache in a read/write lock; every operation
/// here takes `&mut self` because reads refresh recency.
#[derive(Debug)]
pub struct BoundedCache<K, V> {
    /// Key-value storage
    entries: HashMap<K, V>,
    /// Access order, front = most recently used
    recency: VecDeque<K>,
    /// Maximum number of entries allowed
    max_size: usize,
}

impl<K, V> BoundedCache<K, V>
where
    K: Eq + Hash + Clone + Debug,
{
    // == Constructor ==
    /// Creates a new cache holding at most `max_size` entries.
    ///
    /// Fails with `InvalidArgument` when `max_size` is zero.
    pub fn new(max_size: usize) -> Result<Self> {
        if max_size == 0 {
            return Err(ServiceError::InvalidArgument(
                "Cache capacity must be positive".to_string(),
            ));
        }
        Ok(Self {
            entries: HashMap::new(),
            recency: VecDeque::new(),
            max_size,
        })
    }

    // == Get ==
    /// Returns the value for `key` if present and marks it most recently used.
    pub fn get(&mut self, key: &K) -> Option<&V> {
        if self.entries.contains_key(key) {
            debug!(?key, "Cache hit");
            Self::touch(&mut self.recency, key);
            self.entries.get(key)
        } else {
            debug!(?key, "Cache miss");
            None
        }
    }

    // == Put ==
    /// Inserts or replaces a value.
    ///
    /// A new key beyond capacity evicts the least-recently-used entry before
    /// the insertion, so the size bound always holds.
    pub fn put(&mut self, key: K, value: V) {
        let replacing = self.entries.contains_key(&key);
        if !replacing && self.entries.len() >= self.max_size {
            if let Some(victim) = self.recency.pop_back() {
                debug!(key = ?victim, "Capacity reached, evicting least recently used entry");
                self.entries.remove(&victim);
            }
        }
        self.entries.insert(key.clone(), value);
        Self::touch(&mut self.recency, &key);
    }

    // == Remove ==
    /// Deletes an entry if present; a missing key is not an error.
    pub fn remove(&mut self, key: &K) -> Option<V> {
        let removed = self.entries.remove(key);
        if removed.is_some() {
            self.recency.retain(|k| k != key);
        }
        removed
    }

    // == Length ==
    /// Current number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the cache holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Configured capacity bound.
    pub fn max_size(&self) -> usize {
        self.max_size
    }

    /// Moves `key` to the front of the recency queue.
    fn touch(recency: &mut VecDeque<K>, key: &K) {
        recency.retain(|k| k != key);
        recency.push_front(key.clone());
    }
}
