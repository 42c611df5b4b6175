use parking_lot::Mutex;
use std::borrow::Borrow;
use std::hash::Hash;
use std::sync::Arc;

use super::LruCache;
use crate::errors::StoreResult;

/// Counters collected by a [SharedLruCache].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub evictions: u64,
}

impl CacheStats {
    /// Fraction of lookups that were hits, or 0 when nothing was looked up.
    pub fn hit_ratio(&self) -> f64 {
        let lookups = self.hits + self.misses;
        if lookups == 0 {
            0.0
        } else {
            self.hits as f64 / lookups as f64
        }
    }
}

/// A thread-safe [LruCache] handle.
///
/// Every lookup also reorders the recency list, so there is no reader/writer
/// split: one mutex guards the map, the list and the counters together. Clones
/// share the same cache. Values are cloned out, so the lock is never held by
/// the caller.
///
/// ```rust,ignore
/// let cache: SharedLruCache<String, Document> = SharedLruCache::new(1024)?;
/// let doc = cache.get_or_try_insert_with("1".to_string(), || users.get("1"))?;
/// ```
pub struct SharedLruCache<K, V> {
    inner: Arc<Mutex<SharedLruCacheInner<K, V>>>,
}

struct SharedLruCacheInner<K, V> {
    cache: LruCache<K, V>,
    stats: CacheStats,
}

impl<K, V> Clone for SharedLruCache<K, V> {
    fn clone(&self) -> Self {
        SharedLruCache {
            inner: self.inner.clone(),
        }
    }
}

impl<K: Hash + Eq + Clone, V: Clone> SharedLruCache<K, V> {
    /// See [LruCache::new].
    pub fn new(capacity: usize) -> StoreResult<Self> {
        Ok(SharedLruCache {
            inner: Arc::new(Mutex::new(SharedLruCacheInner {
                cache: LruCache::new(capacity)?,
                stats: CacheStats::default(),
            })),
        })
    }

    /// Returns a copy of the value for `key`, marking it most recently used.
    pub fn get<Q>(&self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let mut inner = self.inner.lock();
        let value = inner.cache.get(key).cloned();
        match value {
            Some(_) => inner.stats.hits += 1,
            None => inner.stats.misses += 1,
        }
        value
    }

    /// See [LruCache::put].
    pub fn put(&self, key: K, value: V) -> Option<(K, V)> {
        let mut inner = self.inner.lock();
        let evicted = inner.cache.put(key, value);
        if evicted.is_some() {
            inner.stats.evictions += 1;
        }
        evicted
    }

    /// Returns the cached value for `key`, or loads it with `load` and caches
    /// the result. The lock is released while `load` runs, so two threads
    /// missing on the same key may both load it.
    pub fn get_or_try_insert_with<F>(&self, key: K, load: F) -> StoreResult<V>
    where
        F: FnOnce() -> StoreResult<V>,
    {
        if let Some(value) = self.get(&key) {
            return Ok(value);
        }
        let value = load()?;
        self.put(key, value.clone());
        Ok(value)
    }

    pub fn remove<Q>(&self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.inner.lock().cache.remove(key)
    }

    /// Checks for `key` without touching its recency.
    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.inner.lock().cache.contains(key)
    }

    pub fn len(&self) -> usize {
        self.inner.lock().cache.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.lock().cache.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.inner.lock().cache.capacity()
    }

    /// Drops every entry. Counters are kept.
    pub fn clear(&self) {
        self.inner.lock().cache.clear();
    }

    pub fn keys_mru(&self) -> Vec<K> {
        self.inner.lock().cache.keys_mru()
    }

    pub fn stats(&self) -> CacheStats {
        self.inner.lock().stats
    }
}
