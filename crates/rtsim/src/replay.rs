//! Drives a key trace through a cache

use readthru::{DataSource, LruCache};
use tracing::{debug, trace};

/// Request every key in order
///
/// Stops at the first source failure and returns it as the source reported
/// it; requests before the failure keep their effect on the cache.
pub fn replay<S>(cache: &mut LruCache<String, String, S>, keys: &[String]) -> Result<(), S::Error>
where
    S: DataSource<String, String>,
{
    for (n, key) in keys.iter().enumerate() {
        let value = cache.get(key)?;
        trace!(request = n, key = %key, value = %value, "served");
    }

    debug!(
        requests = keys.len(),
        misses = cache.miss_count(),
        "replay finished"
    );
    Ok(())
}
