//! In-memory cache store.

use crate::entry::StoredEntry;
use crate::keys::request_key;
use async_trait::async_trait;
use precache_core::Result;
use precache_core::http::{Request, Response};
use precache_core::ports::CacheStore;
use std::collections::BTreeMap;
use tokio::sync::RwLock;

/// In-memory `CacheStore` implementation.
///
/// Caches are maps behind a single async lock; `put_all` builds the new
/// cache off-lock and swaps it in with one write, so a commit is never
/// observed half-applied.
#[derive(Debug, Default)]
pub struct MemoryStore {
    caches: RwLock<BTreeMap<String, BTreeMap<String, StoredEntry>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CacheStore for MemoryStore {
    async fn put_all(&self, cache_name: &str, entries: Vec<(Request, Response)>) -> Result<()> {
        let mut cache = BTreeMap::new();
        for (request, response) in entries {
            cache.insert(request_key(&request), StoredEntry::new(request, response));
        }
        let mut caches = self.caches.write().await;
        caches.insert(cache_name.to_string(), cache);
        Ok(())
    }

    async fn match_any(&self, request: &Request) -> Result<Option<Response>> {
        let key = request_key(request);
        let caches = self.caches.read().await;
        for cache in caches.values() {
            if let Some(entry) = cache.get(&key) {
                return Ok(Some(entry.response.clone()));
            }
        }
        Ok(None)
    }

    async fn match_in(&self, cache_name: &str, request: &Request) -> Result<Option<Response>> {
        let key = request_key(request);
        let caches = self.caches.read().await;
        Ok(caches
            .get(cache_name)
            .and_then(|cache| cache.get(&key))
            .map(|entry| entry.response.clone()))
    }

    async fn list_names(&self) -> Result<Vec<String>> {
        let caches = self.caches.read().await;
        Ok(caches.keys().cloned().collect())
    }

    async fn delete(&self, cache_name: &str) -> Result<bool> {
        let mut caches = self.caches.write().await;
        Ok(caches.remove(cache_name).is_some())
    }

    async fn has(&self, cache_name: &str) -> Result<bool> {
        let caches = self.caches.read().await;
        Ok(caches.contains_key(cache_name))
    }

    async fn entry_count(&self, cache_name: &str) -> Result<usize> {
        let caches = self.caches.read().await;
        Ok(caches.get(cache_name).map(BTreeMap::len).unwrap_or(0))
    }
}
