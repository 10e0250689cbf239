//! Cache configuration
//!
//! Capacity is the only knob. It is fixed once the cache is built.

use std::env;

use tracing::warn;

/// Environment variable read by [`CacheConfig::from_env`]
pub const CAPACITY_ENV: &str = "READTHRU_CAPACITY";

/// Capacity used when nothing else is configured
pub const DEFAULT_CAPACITY: usize = 1024;

/// Construction parameters for [`LruCache`](crate::LruCache)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheConfig {
    /// Maximum number of entries held at once; zero disables caching
    pub capacity: usize,
}

impl CacheConfig {
    /// Config with the given capacity
    pub fn new(capacity: usize) -> Self {
        Self { capacity }
    }

    /// Config from a signed capacity
    ///
    /// Negative values are treated as zero: the cache then stores nothing and
    /// answers every request from its source.
    pub fn from_signed(capacity: i64) -> Self {
        if capacity < 0 {
            warn!(capacity, "negative cache capacity, caching disabled");
        }
        Self {
            capacity: usize::try_from(capacity.max(0)).unwrap_or(usize::MAX),
        }
    }

    /// Config from `READTHRU_CAPACITY`
    ///
    /// Falls back to [`DEFAULT_CAPACITY`] when the variable is unset or not
    /// an integer. Negative values behave as in [`CacheConfig::from_signed`].
    pub fn from_env() -> Self {
        match env::var(CAPACITY_ENV).ok().and_then(|v| v.trim().parse::<i64>().ok()) {
            Some(capacity) => Self::from_signed(capacity),
            None => Self::default(),
        }
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}
