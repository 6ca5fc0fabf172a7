//! # lrucache
//!
//! Fixed-capacity, in-memory LRU cache.
//!
//! ## Architecture
//! - **HashMap**: AHash for fast lookups (O(1))
//! - **LRU List**: Doubly-linked list over an index arena for eviction (O(1))
//! - **Stats**: Hit/miss/eviction counters kept by the cache itself
//!
//! ## Threading
//! The cache is single-threaded. Nothing inside it locks; wrap it in a
//! `Mutex` to share it between threads.
//!
//! ```
//! use lrucache::LruCache;
//!
//! let mut cache = LruCache::new(2)?;
//! cache.set(1, "a");
//! cache.set(2, "b");
//! cache.get(&1);
//! cache.set(3, "c"); // evicts 2
//!
//! assert_eq!(cache.get(&2), None);
//! assert_eq!(cache.get(&1), Some(&"a"));
//! assert_eq!(cache.len(), 2);
//! # Ok::<(), lrucache::Error>(())
//! ```

#![warn(missing_docs)]

mod cache;
mod error;
mod lru;
mod stats;

pub use cache::Cache;
pub use error::{Error, Result};
pub use lru::{Iter, LruCache};
pub use stats::CacheStats;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scenario_eviction() {
        let mut cache = LruCache::new(2).unwrap();
        cache.set(1, "a");
        cache.set(2, "b");
        cache.set(3, "c");

        assert_eq!(cache.get(&1), None);
        assert_eq!(cache.get(&2), Some(&"b"));
        assert_eq!(cache.get(&3), Some(&"c"));
    }

    #[test]
    fn test_scenario_get_refresh() {
        let mut cache = LruCache::new(2).unwrap();
        cache.set(1, "a");
        cache.set(2, "b");
        cache.get(&1);
        cache.set(3, "c");

        assert_eq!(cache.get(&2), None);
        assert_eq!(cache.get(&1), Some(&"a"));
    }

    #[test]
    fn test_scenario_delete() {
        let mut cache = LruCache::new(2).unwrap();
        cache.set(1, "a");
        cache.del(&1);

        assert_eq!(cache.get(&1), None);
        assert!(cache.is_empty());
    }

    #[test]
    fn test_scenario_update() {
        let mut cache = LruCache::new(2).unwrap();
        cache.set(1, "a");
        cache.set(1, "b");

        assert_eq!(cache.get(&1), Some(&"b"));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_capacity_never_exceeded() {
        for capacity in 1..=5usize {
            let mut cache = LruCache::new(capacity).unwrap();
            for i in 0..50usize {
                cache.set(i % 7, i);
                assert!(cache.len() <= capacity);
            }
            assert_eq!(cache.len(), capacity);
            assert_eq!(cache.size(), capacity);
        }
    }

    #[test]
    fn test_mixed_overwrites_stay_hot() {
        let mut cache = LruCache::new(1000).unwrap();
        for key in 0..100u64 {
            cache.set(key, key);
        }

        for counter in 0..10_000u64 {
            let key = counter % 100;
            if counter % 2 == 0 {
                assert!(cache.get(&key).is_some());
            } else {
                cache.set(key, counter);
            }
        }

        assert_eq!(cache.len(), 100);
        assert_eq!(cache.stats().misses(), 0);
        assert_eq!(cache.stats().evictions(), 0);
    }

    #[test]
    fn test_zero_capacity_rejected() {
        let result: Result<LruCache<u8, u8>> = LruCache::new(0);
        assert!(matches!(result, Err(Error::InvalidCapacity)));
    }
}
