//! LRU (Least Recently Used) cache implementation
//!
//! Entries live in an arena and are linked by index, so recency updates and
//! eviction are O(1) without aliasing any entry.

use ahash::RandomState;
use std::borrow::Borrow;
use std::collections::HashMap;
use std::hash::Hash;
use std::iter::FusedIterator;
use tracing::{debug, trace};

use crate::error::{Error, Result};
use crate::stats::CacheStats;

/// Upper bound on slots reserved up front; larger caches grow on demand.
const MAX_PREALLOC: usize = 4096;

/// Entry in the recency list
struct Entry<K, V> {
    key: K,
    value: V,
    prev: Option<usize>,
    next: Option<usize>,
}

/// LRU cache with fixed capacity
///
/// `head` is the most recently used entry and `tail` the least recently used
/// one. Both [`set`](Self::set) and [`get`](Self::get) count as a use.
///
/// The cache does no locking. It is `Send` when `K` and `V` are, but sharing
/// it between threads requires an external lock such as
/// `Mutex<LruCache<K, V>>`.
pub struct LruCache<K, V> {
    map: HashMap<K, usize, RandomState>,
    entries: Vec<Option<Entry<K, V>>>,
    head: Option<usize>,
    tail: Option<usize>,
    free_list: Vec<usize>,
    capacity: usize,
    stats: CacheStats,
}

impl<K, V> LruCache<K, V>
where
    K: Hash + Eq + Clone,
{
    /// Create a new LRU cache holding at most `capacity` entries
    ///
    /// # Errors
    /// Returns [`Error::InvalidCapacity`] when `capacity` is zero.
    pub fn new(capacity: usize) -> Result<Self> {
        if capacity == 0 {
            return Err(Error::InvalidCapacity);
        }

        debug!(capacity, "creating lru cache");
        // Room for the transient extra entry before an eviction
        let reserve = capacity.saturating_add(1).min(MAX_PREALLOC);

        Ok(Self {
            map: HashMap::with_capacity_and_hasher(reserve, RandomState::new()),
            entries: Vec::with_capacity(reserve),
            head: None,
            tail: None,
            free_list: Vec::new(),
            capacity,
            stats: CacheStats::new(),
        })
    }

    /// Insert or update `key`, making it the most recently used entry
    ///
    /// Inserting a new key into a full cache evicts the least recently used
    /// entry.
    pub fn set(&mut self, key: K, value: V) {
        self.insert(key, value);
    }

    /// Like [`set`](Self::set), but returns the value previously stored
    /// under `key`
    ///
    /// An entry evicted to make room is dropped, not returned.
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        if let Some(&idx) = self.map.get(&key) {
            self.stats.record_update();
            let old = self.entries[idx]
                .as_mut()
                .map(|entry| std::mem::replace(&mut entry.value, value));
            self.move_to_front(idx);
            return old;
        }

        let idx = self.alloc_entry(Entry {
            key: key.clone(),
            value,
            prev: None,
            next: None,
        });
        self.push_front(idx);
        self.map.insert(key, idx);
        self.stats.record_insert();

        if self.map.len() > self.capacity && self.pop_lru().is_some() {
            self.stats.record_eviction();
            trace!(capacity = self.capacity, "evicted least recently used entry");
        }

        None
    }

    /// Get a value, making its entry the most recently used one
    pub fn get<Q>(&mut self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        if let Some(&idx) = self.map.get(key) {
            self.stats.record_hit();
            self.move_to_front(idx);
            self.entries[idx].as_ref().map(|entry| &entry.value)
        } else {
            self.stats.record_miss();
            None
        }
    }

    /// Get a value without touching recency or statistics
    pub fn peek<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let idx = *self.map.get(key)?;
        self.entries[idx].as_ref().map(|entry| &entry.value)
    }

    /// Check whether `key` is cached without touching recency
    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.map.contains_key(key)
    }

    /// Remove `key` if present; absent keys are ignored
    pub fn del<Q>(&mut self, key: &Q)
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.remove(key);
    }

    /// Remove `key` and return its value
    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let idx = self.map.remove(key)?;
        self.take_entry(idx).map(|entry| entry.value)
    }

    /// Remove and return the least recently used entry
    pub fn pop_lru(&mut self) -> Option<(K, V)> {
        let idx = self.tail?;
        let entry = self.take_entry(idx)?;
        self.map.remove(&entry.key);
        Some((entry.key, entry.value))
    }

    /// The entry that the next overflowing insert would evict
    pub fn peek_lru(&self) -> Option<(&K, &V)> {
        let idx = self.tail?;
        self.entries[idx]
            .as_ref()
            .map(|entry| (&entry.key, &entry.value))
    }

    /// Configured capacity
    ///
    /// Kept under this name for callers of the `Cache` interface; it is the
    /// same value as [`capacity`](Self::capacity), not the occupancy. Use
    /// [`len`](Self::len) for the number of cached entries.
    pub fn size(&self) -> usize {
        self.capacity
    }

    /// Maximum number of entries
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Get the current number of cached entries
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Check if the cache is empty
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Drop every entry. Capacity and statistics are kept.
    pub fn clear(&mut self) {
        debug!(len = self.map.len(), "clearing lru cache");
        self.map.clear();
        self.entries.clear();
        self.free_list.clear();
        self.head = None;
        self.tail = None;
    }

    /// Iterate entries from most to least recently used
    ///
    /// Iterating does not count as a use.
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            entries: &self.entries,
            next: self.head,
            remaining: self.map.len(),
        }
    }

    /// Usage counters
    pub fn stats(&self) -> &CacheStats {
        &self.stats
    }

    /// Zero the usage counters
    pub fn reset_stats(&mut self) {
        self.stats.reset();
    }

    fn move_to_front(&mut self, idx: usize) {
        if self.head == Some(idx) {
            return; // Already at front
        }

        self.unlink(idx);
        self.push_front(idx);
    }

    fn push_front(&mut self, idx: usize) {
        let old_head = self.head;

        if let Some(entry) = &mut self.entries[idx] {
            entry.prev = None;
            entry.next = old_head;
        }

        if let Some(head_idx) = old_head {
            if let Some(head) = &mut self.entries[head_idx] {
                head.prev = Some(idx);
            }
        }

        self.head = Some(idx);
        if self.tail.is_none() {
            self.tail = Some(idx);
        }
    }

    fn unlink(&mut self, idx: usize) {
        let (prev, next) = match &mut self.entries[idx] {
            Some(entry) => (entry.prev.take(), entry.next.take()),
            None => return,
        };

        match prev {
            Some(prev_idx) => {
                if let Some(prev_entry) = &mut self.entries[prev_idx] {
                    prev_entry.next = next;
                }
            }
            None => self.head = next,
        }

        match next {
            Some(next_idx) => {
                if let Some(next_entry) = &mut self.entries[next_idx] {
                    next_entry.prev = prev;
                }
            }
            None => self.tail = prev,
        }
    }

    /// Unlink the entry at `idx` and release its slot. The map is left alone.
    fn take_entry(&mut self, idx: usize) -> Option<Entry<K, V>> {
        self.unlink(idx);
        let entry = self.entries[idx].take()?;
        self.free_list.push(idx);
        Some(entry)
    }

    fn alloc_entry(&mut self, entry: Entry<K, V>) -> usize {
        if let Some(idx) = self.free_list.pop() {
            self.entries[idx] = Some(entry);
            idx
        } else {
            self.entries.push(Some(entry));
            self.entries.len() - 1
        }
    }
}

/// Iterator over cached entries, most recently used first
///
/// Created by [`LruCache::iter`].
pub struct Iter<'a, K, V> {
    entries: &'a [Option<Entry<K, V>>],
    next: Option<usize>,
    remaining: usize,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let idx = self.next?;
        let entry = self.entries.get(idx)?.as_ref()?;
        self.next = entry.next;
        self.remaining = self.remaining.saturating_sub(1);
        Some((&entry.key, &entry.value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {}

impl<K, V> FusedIterator for Iter<'_, K, V> {}

impl<'a, K, V> IntoIterator for &'a LruCache<K, V>
where
    K: Hash + Eq + Clone,
{
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
