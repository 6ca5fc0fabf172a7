//! Cache interface

use std::hash::Hash;

use crate::lru::LruCache;

/// Key-value cache with a fixed slot count
///
/// Implementations decide which entry to drop once [`size`](Cache::size)
/// entries are held and a new key arrives.
pub trait Cache<K, V> {
    /// Insert or update `key`
    fn set(&mut self, key: K, value: V);

    /// Look up `key`; may update the implementation's eviction order
    fn get(&mut self, key: &K) -> Option<&V>;

    /// Remove `key`; a missing key is not an error
    fn del(&mut self, key: &K);

    /// Configured capacity
    fn size(&self) -> usize;
}

impl<K, V> Cache<K, V> for LruCache<K, V>
where
    K: Hash + Eq + Clone,
{
    fn set(&mut self, key: K, value: V) {
        LruCache::set(self, key, value)
    }

    fn get(&mut self, key: &K) -> Option<&V> {
        LruCache::get(self, key)
    }

    fn del(&mut self, key: &K) {
        LruCache::del(self, key)
    }

    fn size(&self) -> usize {
        LruCache::size(self)
    }
}
