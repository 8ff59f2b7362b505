use std::num::NonZeroUsize;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use lru::LruCache;

use crate::catalog::Catalog;
use crate::error::CacheError;

/// Key/value storage a [`CachedLoader`](crate::CachedLoader) keeps raw
/// catalogs in.
///
/// Backends report failures as [`CacheError`]; callers treat them as misses.
pub trait CacheStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<Catalog>, CacheError>;

    fn set(&self, key: &str, value: &Catalog, ttl: Option<Duration>) -> Result<(), CacheError>;
}

const DEFAULT_CAPACITY: usize = 64;

struct Entry {
    catalog: Catalog,
    expires_at: Option<Instant>,
}

/// Bounded in-process LRU cache.
pub struct MemoryCache {
    entries: Mutex<LruCache<String, Entry>>,
}

impl Default for MemoryCache {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

impl MemoryCache {
    /// A zero capacity is raised to one entry.
    pub fn new(capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            entries: Mutex::new(LruCache::new(capacity)),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.lock().map(|e| e.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl CacheStore for MemoryCache {
    fn get(&self, key: &str) -> Result<Option<Catalog>, CacheError> {
        let mut entries = self.entries.lock().map_err(|_| CacheError::Poisoned)?;
        let expired = match entries.get(key) {
            None => return Ok(None),
            Some(entry) => match entry.expires_at {
                Some(at) if at <= Instant::now() => true,
                _ => return Ok(Some(entry.catalog.clone())),
            },
        };
        if expired {
            entries.pop(key);
        }
        Ok(None)
    }

    fn set(&self, key: &str, value: &Catalog, ttl: Option<Duration>) -> Result<(), CacheError> {
        let mut entries = self.entries.lock().map_err(|_| CacheError::Poisoned)?;
        entries.put(
            key.to_string(),
            Entry {
                catalog: value.clone(),
                expires_at: ttl.and_then(|ttl| Instant::now().checked_add(ttl)),
            },
        );
        Ok(())
    }
}
