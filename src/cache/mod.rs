//! Offline asset cache - the service-worker side of the app.
//!
//! Static assets are pre-cached at install and served cache-first.
//! Identity-provider and document-store traffic, and anything that is not
//! a GET, always goes to the network.
//!
//! ## Example
//!
//! ```ignore
//! let cache = OfflineCache::new(config.cache.clone(), "https://places.example")?;
//! cache.install(&storage, &fetcher).await?;
//! cache.activate(&storage);
//! let response = cache.respond(&Request::get(url), &storage, &fetcher).await?;
//! ```

mod in_memory;

use async_trait::async_trait;
use url::Url;

use crate::config::CacheConfig;
use crate::error::PlaceError;

pub use in_memory::InMemoryCacheStorage;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    pub method: String,
    pub url: String,
}

impl Request {
    pub fn new(method: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            method: method.into(),
            url: url.into(),
        }
    }

    pub fn get(url: impl Into<String>) -> Self {
        Self::new("GET", url)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    pub status: u16,
    pub body: Vec<u8>,
}

impl Response {
    pub fn ok(body: impl Into<Vec<u8>>) -> Self {
        Self {
            status: 200,
            body: body.into(),
        }
    }
}

/// Where a request is answered from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    NetworkOnly,
    CacheFirst,
}

/// Named caches of URL -> response, like the browser's cache storage.
pub trait CacheStorage: Send + Sync {
    fn put(&self, cache: &str, url: &str, response: Response);

    /// Look `url` up across every cache.
    fn lookup(&self, url: &str) -> Option<Response>;

    fn cache_names(&self) -> Vec<String>;

    /// Drop a whole cache. Returns true if it existed.
    fn delete_cache(&self, cache: &str) -> bool;
}

/// The network.
#[async_trait]
pub trait Fetcher: Send + Sync {
    async fn fetch(&self, request: &Request) -> Result<Response, PlaceError>;
}

/// Cache policy bound to the app's origin.
#[derive(Debug, Clone)]
pub struct OfflineCache {
    config: CacheConfig,
    origin: Url,
}

impl OfflineCache {
    pub fn new(config: CacheConfig, origin: &str) -> Result<Self, PlaceError> {
        let origin = Url::parse(origin)
            .map_err(|e| PlaceError::InvalidInput(format!("bad origin {}: {}", origin, e)))?;
        Ok(Self { config, origin })
    }

    pub fn cache_name(&self) -> &str {
        &self.config.name
    }

    fn resolve(&self, url: &str) -> Result<Url, PlaceError> {
        self.origin
            .join(url)
            .map_err(|e| PlaceError::InvalidInput(format!("bad url {}: {}", url, e)))
    }

    /// Pre-cache every configured asset. All or nothing: if one fetch
    /// fails, nothing is stored.
    pub async fn install<C, F>(&self, storage: &C, fetcher: &F) -> Result<(), PlaceError>
    where
        C: CacheStorage + ?Sized,
        F: Fetcher + ?Sized,
    {
        let mut fetched = Vec::with_capacity(self.config.precache.len());
        for path in &self.config.precache {
            let url = self.resolve(path)?;
            let response = fetcher.fetch(&Request::get(url.as_str())).await?;
            if !(200..300).contains(&response.status) {
                return Err(PlaceError::RemoteUnavailable(format!(
                    "precache of {} returned {}",
                    url, response.status
                )));
            }
            fetched.push((url, response));
        }

        for (url, response) in fetched {
            storage.put(&self.config.name, url.as_str(), response);
        }
        tracing::info!(
            cache = %self.config.name,
            assets = self.config.precache.len(),
            "offline cache installed"
        );
        Ok(())
    }

    /// Delete every cache other than the current one. Returns the names
    /// that were dropped.
    pub fn activate<C: CacheStorage + ?Sized>(&self, storage: &C) -> Vec<String> {
        let stale: Vec<String> = storage
            .cache_names()
            .into_iter()
            .filter(|name| *name != self.config.name)
            .collect();
        for name in &stale {
            storage.delete_cache(name);
            tracing::debug!(cache = %name, "deleted stale cache");
        }
        stale
    }

    /// Decide where a request is answered from.
    pub fn route(&self, request: &Request) -> Route {
        if !request.method.eq_ignore_ascii_case("GET") {
            return Route::NetworkOnly;
        }
        let Ok(url) = self.resolve(&request.url) else {
            return Route::NetworkOnly;
        };

        let host = url.host_str().unwrap_or_default();
        let bypass_host = self.config.bypass_hosts.iter().any(|h| host.contains(h.as_str()));
        let bypass_path = self.config.bypass_paths.iter().any(|p| url.path().contains(p.as_str()));
        if bypass_host || bypass_path {
            return Route::NetworkOnly;
        }

        if url.origin() == self.origin.origin() {
            Route::CacheFirst
        } else {
            Route::NetworkOnly
        }
    }

    /// Answer a request according to [`OfflineCache::route`].
    pub async fn respond<C, F>(
        &self,
        request: &Request,
        storage: &C,
        fetcher: &F,
    ) -> Result<Response, PlaceError>
    where
        C: CacheStorage + ?Sized,
        F: Fetcher + ?Sized,
    {
        if self.route(request) == Route::CacheFirst {
            let url = self.resolve(&request.url)?;
            if let Some(hit) = storage.lookup(url.as_str()) {
                return Ok(hit);
            }
        }
        fetcher.fetch(request).await
    }
}
