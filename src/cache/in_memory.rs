//! InMemoryCacheStorage - BTreeMap-backed cache storage for testing and development.

use std::collections::BTreeMap;
use std::sync::{Arc, RwLock};

use super::{CacheStorage, Response};

/// Cache name -> (URL -> response). Clone-friendly via Arc.
#[derive(Clone, Default)]
pub struct InMemoryCacheStorage {
    caches: Arc<RwLock<BTreeMap<String, BTreeMap<String, Response>>>>,
}

impl InMemoryCacheStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl CacheStorage for InMemoryCacheStorage {
    fn put(&self, cache: &str, url: &str, response: Response) {
        if let Ok(mut caches) = self.caches.write() {
            caches
                .entry(cache.to_string())
                .or_default()
                .insert(url.to_string(), response);
        }
    }

    fn lookup(&self, url: &str) -> Option<Response> {
        let caches = self.caches.read().ok()?;
        caches.values().find_map(|entries| entries.get(url).cloned())
    }

    fn cache_names(&self) -> Vec<String> {
        self.caches
            .read()
            .map(|caches| caches.keys().cloned().collect())
            .unwrap_or_default()
    }

    fn delete_cache(&self, cache: &str) -> bool {
        self.caches
            .write()
            .map(|mut caches| caches.remove(cache).is_some())
            .unwrap_or(false)
    }
}
