//! Response caching with per-operation TTLs
//!
//! Both provider clients front their HTTP calls with this cache. Keys are
//! structured (operation plus parameter tuple) rather than concatenated
//! strings, and values are opaque JSON blobs set atomically. Failures and
//! empty payloads are never stored, so transient upstream trouble heals on
//! the next call after expiry.

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};
use tracing::debug;

/// Cacheable operation families, one per provider endpoint group
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CacheOp {
    GameVersions,
    ModDetails,
    ModFiles,
    FileDetails,
    Search,
    SlugSearch,
    DownloadInfo,
}

/// Structured cache key: the operation and its parameter tuple
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    pub op: CacheOp,
    pub params: Vec<String>,
}

impl CacheKey {
    pub fn new(op: CacheOp, params: &[&str]) -> Self {
        Self {
            op,
            params: params.iter().map(|p| p.to_string()).collect(),
        }
    }
}

/// Cache entry with expiration time
#[derive(Debug, Clone)]
struct CacheEntry<T> {
    data: T,
    expires_at: Instant,
}

impl<T> CacheEntry<T> {
    fn new(data: T, ttl: Duration) -> Self {
        Self {
            data,
            expires_at: Instant::now() + ttl,
        }
    }

    fn is_expired(&self) -> bool {
        Instant::now() > self.expires_at
    }
}

/// TTL cache shared by all operations of one provider client
#[derive(Debug, Default)]
pub struct ResponseCache {
    entries: Mutex<HashMap<CacheKey, CacheEntry<Value>>>,
}

impl ResponseCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a fresh entry and decode it back into its typed form.
    /// Expired entries are dropped on the way out.
    pub fn get<T: DeserializeOwned>(&self, key: &CacheKey) -> Option<T> {
        let mut entries = self.entries.lock().unwrap();
        match entries.get(key) {
            Some(entry) if !entry.is_expired() => match serde_json::from_value(entry.data.clone())
            {
                Ok(value) => Some(value),
                Err(err) => {
                    debug!("Dropping cache entry with mismatched shape for {:?}: {}", key, err);
                    entries.remove(key);
                    None
                }
            },
            Some(_) => {
                entries.remove(key);
                None
            }
            None => None,
        }
    }

    /// Store a successful payload. Callers are responsible for not handing in
    /// failures or empty results.
    pub fn put<T: Serialize>(&self, key: CacheKey, value: &T, ttl: Duration) {
        if let Ok(blob) = serde_json::to_value(value) {
            let mut entries = self.entries.lock().unwrap();
            entries.insert(key, CacheEntry::new(blob, ttl));
        }
    }

    /// Evict every key the predicate matches, returning how many went
    pub fn purge<F: Fn(&CacheKey) -> bool>(&self, predicate: F) -> usize {
        let mut entries = self.entries.lock().unwrap();
        let before = entries.len();
        entries.retain(|key, _| !predicate(key));
        before - entries.len()
    }

    pub fn clear(&self) {
        self.entries.lock().unwrap().clear();
    }

    pub fn len(&self) -> usize {
        self.entries.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
