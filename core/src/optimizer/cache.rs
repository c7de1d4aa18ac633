use std::hash::Hash;
use std::num::NonZeroUsize;

use lru::LruCache;

const DEFAULT_CACHE_CAPACITY: usize = 100;

/// Bounded memo cache for per-track heights and per-action render output;
/// entries beyond capacity evict oldest-first so long sessions stay flat.
pub struct BoundedCache<K: Hash + Eq, V: Clone> {
    inner: LruCache<K, V>,
}

impl<K: Hash + Eq, V: Clone> BoundedCache<K, V> {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CACHE_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity.max(1)).expect("capacity is at least 1");
        Self {
            inner: LruCache::new(capacity),
        }
    }

    pub fn get(&mut self, key: &K) -> Option<V> {
        self.inner.get(key).cloned()
    }

    pub fn put(&mut self, key: K, value: V) {
        self.inner.put(key, value);
    }

    pub fn invalidate(&mut self, key: &K) {
        self.inner.pop(key);
    }

    pub fn clear(&mut self) {
        self.inner.clear();
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

impl<K: Hash + Eq, V: Clone> Default for BoundedCache<K, V> {
    fn default() -> Self {
        Self::new()
    }
}
