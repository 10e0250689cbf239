//! Capability exposed by read-through caches

/// Read-through cache as seen by its callers
///
/// `get` always produces a value for the key, from the cache when it can and
/// from the backing source otherwise. The only failures are the source's own.
pub trait Cache<K, V> {
    /// Failure passed through from the backing source
    type Error;

    /// Value for `key`, fetching it from the source on a miss
    fn get(&mut self, key: &K) -> Result<V, Self::Error>;

    /// Number of misses since the cache was built
    fn miss_count(&self) -> u64;
}

impl<K, V, C> Cache<K, V> for &mut C
where
    C: Cache<K, V> + ?Sized,
{
    type Error = C::Error;

    fn get(&mut self, key: &K) -> Result<V, Self::Error> {
        (**self).get(key)
    }

    fn miss_count(&self) -> u64 {
        (**self).miss_count()
    }
}
