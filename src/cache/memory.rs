use async_trait::async_trait;
use moka::future::Cache;
use std::time::Duration;
use tracing::debug;

use crate::cache::{CacheResult, ObjectCache};
use crate::config::CacheConfig;

pub struct MokaCacheWrapper {
    inner: Cache<String, String>,
}

impl MokaCacheWrapper {
    pub fn new(config: &CacheConfig) -> Self {
        let inner = Cache::builder()
            .max_capacity(config.max_capacity)
            .time_to_live(Duration::from_secs(config.default_ttl))
            .build();

        debug!(
            "MokaCacheWrapper initialized with max capacity: {}",
            config.max_capacity
        );
        Self { inner }
    }
}

#[async_trait]
impl ObjectCache for MokaCacheWrapper {
    async fn get_raw(&self, key: &str) -> CacheResult<String> {
        if let Some(value) = self.inner.get(key).await {
            debug!("Cache hit: {}", key);
            CacheResult::Found(value)
        } else {
            debug!("Cache miss: {}", key);
            CacheResult::NotFound
        }
    }

    async fn insert_raw(&self, key: String, value: String, ttl: u64) {
        // moka 使用构建时的全局 TTL，单条 TTL 仅作记录
        self.inner.insert(key, value).await;
        if ttl != 0 {
            debug!("Moka cache ignores per-item TTL, using global TTL configuration");
        }
    }

    async fn remove(&self, key: &str) {
        self.inner.invalidate(key).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::{get_json, insert_json};

    fn test_config() -> CacheConfig {
        CacheConfig {
            default_ttl: 60,
            max_capacity: 100,
        }
    }

    #[actix_web::test]
    async fn test_insert_get_remove() {
        let cache = MokaCacheWrapper::new(&test_config());
        assert_eq!(cache.get_raw("user:t").await, CacheResult::NotFound);

        cache.insert_raw("user:t".into(), "42".into(), 0).await;
        assert_eq!(cache.get_raw("user:t").await, CacheResult::Found("42".into()));

        cache.remove("user:t").await;
        assert_eq!(cache.get_raw("user:t").await, CacheResult::NotFound);
    }

    #[actix_web::test]
    async fn test_json_helpers_drop_stale_entries() {
        let cache = MokaCacheWrapper::new(&test_config());
        insert_json(&cache, "k".into(), &vec![1, 2, 3], 0).await;
        assert_eq!(get_json::<Vec<i32>>(&cache, "k").await, CacheResult::Found(vec![1, 2, 3]));

        cache.insert_raw("bad".into(), "not json".into(), 0).await;
        assert_eq!(get_json::<Vec<i32>>(&cache, "bad").await, CacheResult::NotFound);
        assert_eq!(cache.get_raw("bad").await, CacheResult::NotFound);
    }
}
