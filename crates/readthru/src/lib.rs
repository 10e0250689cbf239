//! # readthru
//!
//! Fixed-capacity read-through cache with least-recently-used eviction.
//!
//! ## Architecture
//! - **Values**: AHash map from key to cached value (O(1))
//! - **Recency**: [`keyqueue::KeyQueue`] of keys, oldest at the head (O(1))
//! - **Source**: any [`DataSource`], consulted only on a miss
//!
//! ```
//! use std::convert::Infallible;
//! use readthru::{source, LruCache};
//!
//! let mut cache = LruCache::new(source::from_fn(|key: &u32| Ok::<_, Infallible>(key * 10)), 2);
//!
//! assert_eq!(cache.get(&1).unwrap(), 10);
//! assert_eq!(cache.get(&1).unwrap(), 10);
//! assert_eq!(cache.miss_count(), 1);
//! ```

#![warn(missing_docs)]

mod cache;
mod config;
pub mod source;
mod stats;
mod traits;


pub use cache::LruCache;
pub use config::{CacheConfig, CAPACITY_ENV, DEFAULT_CAPACITY};
pub use source::DataSource;
pub use stats::CacheStats;
pub use traits::Cache;
