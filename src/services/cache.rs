use crate::models::{ActorSummary, UserNetwork};
use crate::services::backend::{BackendClient, BackendError};
use crate::services::search::{SearchClient, SearchError};
use moka::future::{Cache, CacheBuilder};
use std::sync::Arc;
use std::time::Duration;

/// In-process cache of fetched networks and search results
///
/// Networks are immutable once built, so entries are shared as `Arc`s and
/// only ever replaced or expired, never mutated.
pub struct NetworkCache {
    networks: Cache<String, Arc<UserNetwork>>,
    searches: Cache<String, Arc<Vec<ActorSummary>>>,
}

impl NetworkCache {
    /// Create a new cache
    pub fn new(capacity: u64, network_ttl_secs: u64, search_ttl_secs: u64) -> Self {
        let networks = CacheBuilder::new(capacity)
            .time_to_live(Duration::from_secs(network_ttl_secs))
            .build();

        let searches = CacheBuilder::new(capacity)
            .time_to_live(Duration::from_secs(search_ttl_secs))
            .build();

        Self { networks, searches }
    }

    pub async fn get(&self, handle: &str) -> Option<Arc<UserNetwork>> {
        let key = CacheKey::network(handle);
        let hit = self.networks.get(&key).await;
        if hit.is_some() {
            tracing::trace!("Cache hit: {}", key);
        } else {
            tracing::trace!("Cache miss: {}", key);
        }
        hit
    }

    pub async fn insert(&self, handle: &str, network: UserNetwork) -> Arc<UserNetwork> {
        let network = Arc::new(network);
        self.networks
            .insert(CacheKey::network(handle), network.clone())
            .await;
        network
    }

    /// Return the cached network for `handle`, fetching it on a miss
    ///
    /// Concurrent misses on the same key share a single backend request.
    pub async fn get_or_fetch(
        &self,
        handle: &str,
        backend: &BackendClient,
    ) -> Result<Arc<UserNetwork>, Arc<BackendError>> {
        let key = CacheKey::network(handle);
        tracing::trace!("Cache lookup: {}", key);

        self.networks
            .try_get_with(key, async {
                backend.fetch_network(handle).await.map(Arc::new)
            })
            .await
    }

    /// Return cached search results for `query`, searching on a miss
    pub async fn search_or_fetch(
        &self,
        query: &str,
        search: &SearchClient,
    ) -> Result<Arc<Vec<ActorSummary>>, Arc<SearchError>> {
        let key = CacheKey::search(query);
        tracing::trace!("Cache lookup: {}", key);

        self.searches
            .try_get_with(key, async {
                search.search_actors(query).await.map(Arc::new)
            })
            .await
    }

    /// Drop a handle's network so the next lookup refetches it
    pub async fn invalidate(&self, handle: &str) {
        self.networks.invalidate(&CacheKey::network(handle)).await;
    }
}

/// Cache key builder
pub struct CacheKey;

impl CacheKey {
    /// Build a cache key for a user's network
    pub fn network(handle: &str) -> String {
        format!("network:{}", handle.trim().to_lowercase())
    }

    /// Build a cache key for a typeahead query
    pub fn search(query: &str) -> String {
        format!("search:{}", query.trim().to_lowercase())
    }
}
