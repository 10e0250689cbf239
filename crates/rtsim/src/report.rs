//! Summary of a replay, printable as text or JSON

use std::fmt;

use readthru::LruCache;
use serde::Serialize;

/// Cache statistics after a replay
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    /// Configured capacity
    pub capacity: usize,
    /// Keys requested
    pub requests: u64,
    /// Requests served from the cache
    pub hits: u64,
    /// Requests sent to the source
    pub misses: u64,
    /// Entries evicted to make room
    pub evictions: u64,
    /// Entries inserted after a miss
    pub inserts: u64,
    /// Hits over requests, 0.0 when nothing was requested
    pub hit_ratio: f64,
    /// Entries cached at the end
    pub resident: usize,
    /// Cached keys, least recently used first
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order: Option<Vec<String>>,
}

impl Report {
    /// Snapshot `cache`; `with_order` also records the resident keys
    pub fn from_cache<V, S>(cache: &LruCache<String, V, S>, with_order: bool) -> Self {
        let stats = cache.stats();

        Self {
            capacity: cache.capacity(),
            requests: stats.requests(),
            hits: stats.hits(),
            misses: stats.misses(),
            evictions: stats.evictions(),
            inserts: stats.inserts(),
            hit_ratio: stats.hit_ratio(),
            resident: cache.len(),
            order: with_order.then(|| cache.keys().cloned().collect()),
        }
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "capacity:   {}", self.capacity)?;
        writeln!(f, "requests:   {}", self.requests)?;
        writeln!(f, "hits:       {}", self.hits)?;
        writeln!(f, "misses:     {}", self.misses)?;
        writeln!(f, "evictions:  {}", self.evictions)?;
        writeln!(f, "inserts:    {}", self.inserts)?;
        writeln!(f, "hit ratio:  {:.2}%", self.hit_ratio * 100.0)?;
        writeln!(f, "resident:   {}", self.resident)?;
        if let Some(order) = &self.order {
            writeln!(f, "order:      {}", order.join(", "))?;
        }
        Ok(())
    }
}
