use async_trait::async_trait;

use crate::cache::{CacheResult, ObjectCache};

/// 直通缓存：不存储任何内容，每次读取都回源到数据库
#[derive(Debug, Default, Clone, Copy)]
pub struct NoOpCache;

#[async_trait]
impl ObjectCache for NoOpCache {
    async fn get_raw(&self, _key: &str) -> CacheResult<String> {
        CacheResult::NotFound
    }

    async fn insert_raw(&self, _key: String, _value: String, _ttl: u64) {}

    async fn remove(&self, _key: &str) {}
}
