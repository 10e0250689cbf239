//! LruCache: read-through cache with least-recently-used eviction

use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;

use ahash::RandomState;
use keyqueue::KeyQueue;
use tracing::{debug, trace};

use crate::config::CacheConfig;
use crate::source::DataSource;
use crate::stats::CacheStats;
use crate::traits::Cache;

/// Upper bound on slots reserved up front; larger caches grow on demand
const MAX_PREALLOC: usize = 1 << 16;

/// Fixed-capacity cache in front of a [`DataSource`]
///
/// Keys are ordered in a [`KeyQueue`] from least to most recently used. A hit
/// moves the key to the tail; a miss fetches from the source and, if the cache
/// is full, evicts the head to make room. A capacity of zero caches nothing.
pub struct LruCache<K, V, S> {
    /// Backing source consulted on a miss
    source: S,

    /// Recency order, oldest at the head
    queue: KeyQueue<K>,

    /// Cached values, same key set as `queue`
    values: HashMap<K, V, RandomState>,

    /// Cache statistics
    stats: CacheStats,

    /// Cache capacity
    capacity: usize,
}

impl<K, V, S> LruCache<K, V, S> {
    /// Get cache capacity
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of entries currently cached
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    /// Check if nothing is cached
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Number of misses since construction
    pub fn miss_count(&self) -> u64 {
        self.stats.misses()
    }

    /// Get cache statistics
    pub fn stats(&self) -> &CacheStats {
        &self.stats
    }

    /// Cached keys from least to most recently used
    pub fn keys(&self) -> keyqueue::Iter<'_, K> {
        self.queue.iter()
    }

    /// Backing source
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Drop the cached entries and hand back the source
    pub fn into_source(self) -> S {
        self.source
    }
}

impl<K, V, S> LruCache<K, V, S>
where
    K: Hash + Eq + Clone,
    V: Clone,
    S: DataSource<K, V>,
{
    /// Create a cache holding at most `capacity` entries
    ///
    /// # Arguments
    /// * `source` - Source consulted on every miss
    /// * `capacity` - Maximum number of cached entries; `0` disables caching
    pub fn new(source: S, capacity: usize) -> Self {
        let reserve = capacity.min(MAX_PREALLOC);

        Self {
            source,
            queue: KeyQueue::with_capacity(reserve),
            values: HashMap::with_capacity_and_hasher(reserve, RandomState::new()),
            stats: CacheStats::new(),
            capacity,
        }
    }

    /// Create a cache from a [`CacheConfig`]
    pub fn with_config(source: S, config: CacheConfig) -> Self {
        Self::new(source, config.capacity)
    }

    /// Get the value for `key`, reading through to the source on a miss
    ///
    /// A hit marks `key` as most recently used. A miss fetches the value and,
    /// once the fetch succeeds, evicts the least recently used entry if the
    /// cache is full and caches the new one.
    ///
    /// # Returns
    /// * `Result<V, S::Error>` - The value, or the source's error unchanged
    pub fn get(&mut self, key: &K) -> Result<V, S::Error> {
        if let Some(value) = self.values.get(key) {
            self.queue.move_to_tail(key);
            self.stats.record_hit();
            trace!(len = self.queue.len(), "cache hit");
            return Ok(value.clone());
        }

        self.stats.record_miss();
        trace!(misses = self.stats.misses(), "cache miss");

        if self.capacity == 0 {
            return self.source.get(key);
        }

        // Nothing changes until the source has produced a value
        let value = self.source.get(key)?;

        if self.queue.len() >= self.capacity {
            self.evict();
        }

        let queued = self.queue.enqueue_tail(key.clone());
        debug_assert!(queued, "missed key was already queued");
        self.values.insert(key.clone(), value.clone());
        self.stats.record_insert();

        Ok(value)
    }

    /// Check if `key` is cached, without touching recency
    pub fn contains(&self, key: &K) -> bool {
        self.values.contains_key(key)
    }

    /// Cached value for `key`, without touching recency or statistics
    pub fn peek(&self, key: &K) -> Option<&V> {
        self.values.get(key)
    }

    fn evict(&mut self) {
        if let Some(oldest) = self.queue.dequeue_head() {
            self.values.remove(&oldest);
            self.stats.record_eviction();
            debug!(
                evictions = self.stats.evictions(),
                "evicted least recently used entry"
            );
        }
    }

    /// Check the queue and value map agree
    #[cfg(test)]
    pub(crate) fn assert_consistent(&self) {
        assert_eq!(self.queue.len(), self.values.len());
        for key in self.queue.iter() {
            assert!(self.values.contains_key(key));
        }
        if self.capacity == 0 {
            assert!(self.is_empty());
        } else {
            assert!(self.len() <= self.capacity);
        }
        assert_eq!(
            self.stats.inserts() - self.stats.evictions(),
            self.len() as u64
        );
    }
}

impl<K, V, S> Cache<K, V> for LruCache<K, V, S>
where
    K: Hash + Eq + Clone,
    V: Clone,
    S: DataSource<K, V>,
{
    type Error = S::Error;

    fn get(&mut self, key: &K) -> Result<V, Self::Error> {
        LruCache::get(self, key)
    }

    fn miss_count(&self) -> u64 {
        LruCache::miss_count(self)
    }
}

impl<K: fmt::Debug, V, S> fmt::Debug for LruCache<K, V, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LruCache")
            .field("capacity", &self.capacity)
            .field("keys", &self.queue)
            .field("stats", &self.stats)
            .finish()
    }
}
