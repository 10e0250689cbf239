//! Data sources consulted on a cache miss

use std::marker::PhantomData;
use std::rc::Rc;
use std::sync::Arc;

/// Backing store the cache reads through to
///
/// A source is treated as a function of its key. It may be slow and it may
/// fail; the cache calls it synchronously, at most once per miss, and hands
/// any error back to its caller untouched.
pub trait DataSource<K, V> {
    /// Failure reported by the source
    type Error;

    /// Produce the value for `key`
    fn get(&self, key: &K) -> Result<V, Self::Error>;
}

impl<K, V, S> DataSource<K, V> for &S
where
    S: DataSource<K, V> + ?Sized,
{
    type Error = S::Error;

    fn get(&self, key: &K) -> Result<V, Self::Error> {
        (**self).get(key)
    }
}

impl<K, V, S> DataSource<K, V> for Box<S>
where
    S: DataSource<K, V> + ?Sized,
{
    type Error = S::Error;

    fn get(&self, key: &K) -> Result<V, Self::Error> {
        (**self).get(key)
    }
}

impl<K, V, S> DataSource<K, V> for Rc<S>
where
    S: DataSource<K, V> + ?Sized,
{
    type Error = S::Error;

    fn get(&self, key: &K) -> Result<V, Self::Error> {
        (**self).get(key)
    }
}

impl<K, V, S> DataSource<K, V> for Arc<S>
where
    S: DataSource<K, V> + ?Sized,
{
    type Error = S::Error;

    fn get(&self, key: &K) -> Result<V, Self::Error> {
        (**self).get(key)
    }
}

/// Source backed by a closure, see [`from_fn`]
pub struct FnSource<F, E> {
    f: F,
    _error: PhantomData<fn() -> E>,
}

/// Wrap a closure as a [`DataSource`]
///
/// ```
/// use readthru::source::{self, DataSource};
///
/// let lengths = source::from_fn(|key: &String| Ok::<_, std::fmt::Error>(key.len()));
/// assert_eq!(lengths.get(&"four".to_string()), Ok(4));
/// ```
pub fn from_fn<K, V, E, F>(f: F) -> FnSource<F, E>
where
    F: Fn(&K) -> Result<V, E>,
{
    FnSource {
        f,
        _error: PhantomData,
    }
}

impl<K, V, E, F> DataSource<K, V> for FnSource<F, E>
where
    F: Fn(&K) -> Result<V, E>,
{
    type Error = E;

    fn get(&self, key: &K) -> Result<V, E> {
        (self.f)(key)
    }
}

impl<F, E> Clone for FnSource<F, E>
where
    F: Clone,
{
    fn clone(&self) -> Self {
        Self {
            f: self.f.clone(),
            _error: PhantomData,
        }
    }
}
