use crate::models::Candidate;
use moka::future::Cache;
use std::sync::Arc;
use std::time::Duration;

/// Short-lived snapshot cache for candidate pools, keyed by species.
///
/// The matching engine itself never caches anything; holding a pool
/// snapshot briefly between runs is this collaborator's concern. Entries
/// expire on a TTL so freshly listed or adopted animals show up within
/// one cache window.
pub struct PoolCache {
    pools: Cache<String, Arc<Vec<Candidate>>>,
}

impl PoolCache {
    pub fn new(capacity: u64, ttl_secs: u64) -> Self {
        let pools = Cache::builder()
            .max_capacity(capacity)
            .time_to_live(Duration::from_secs(ttl_secs))
            .build();

        Self { pools }
    }

    pub async fn get(&self, species: &str) -> Option<Arc<Vec<Candidate>>> {
        let pool = self.pools.get(species).await;
        match &pool {
            Some(p) => tracing::trace!("Pool cache hit: {} ({} candidates)", species, p.len()),
            None => tracing::trace!("Pool cache miss: {}", species),
        }
        pool
    }

    pub async fn insert(&self, species: &str, pool: Vec<Candidate>) -> Arc<Vec<Candidate>> {
        let pool = Arc::new(pool);
        self.pools.insert(species.to_string(), pool.clone()).await;
        pool
    }

    pub async fn invalidate(&self, species: &str) {
        self.pools.invalidate(species).await;
    }
}
