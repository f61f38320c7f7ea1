//! 对象缓存层
//!
//! 仅用于缓存已发布作业的题目列表（发布期间题目不可变）。
//! 权限校验从不读取缓存。

pub mod object_cache;

use async_trait::async_trait;
use std::sync::Arc;
use tracing::warn;

use crate::config::CacheConfig;
use crate::errors::{ClassworkError, Result};

pub use object_cache::moka::MokaCacheWrapper;
pub use object_cache::noop::NoOpCache;

/// 缓存查询结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CacheResult<T> {
    Found(T),
    NotFound,
}

#[async_trait]
pub trait ObjectCache: Send + Sync {
    async fn get_raw(&self, key: &str) -> CacheResult<String>;
    async fn insert_raw(&self, key: String, value: String, ttl: u64);
    async fn remove(&self, key: &str);
}

/// 根据配置创建缓存实例
pub fn create_object_cache(config: &CacheConfig) -> Result<Arc<dyn ObjectCache>> {
    match config.cache_type.as_str() {
        "moka" | "memory" => Ok(Arc::new(MokaCacheWrapper::new(config))),
        "noop" | "none" => Ok(Arc::new(NoOpCache)),
        other => {
            warn!("Cache backend '{}' not found", other);
            Err(ClassworkError::cache_plugin_not_found(format!(
                "未知的缓存类型: {other}. 支持: moka, noop"
            )))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_unknown_cache() {
        let config = CacheConfig {
            cache_type: "redis".to_string(),
            ..CacheConfig::default()
        };
        let err = create_object_cache(&config).err();
        assert_eq!(err.map(|e| e.code()), Some("E001"));
    }

    #[tokio::test]
    async fn test_noop_cache_never_stores() {
        let config = CacheConfig {
            cache_type: "noop".to_string(),
            ..CacheConfig::default()
        };
        let cache = create_object_cache(&config).expect("noop cache");
        cache.insert_raw("k".into(), "v".into(), 0).await;
        assert_eq!(cache.get_raw("k").await, CacheResult::NotFound);
    }

    #[tokio::test]
    async fn test_moka_cache_roundtrip() {
        let cache = create_object_cache(&CacheConfig::default()).expect("moka cache");
        cache.insert_raw("k".into(), "v".into(), 0).await;
        assert_eq!(cache.get_raw("k").await, CacheResult::Found("v".to_string()));
        cache.remove("k").await;
        assert_eq!(cache.get_raw("k").await, CacheResult::NotFound);
    }
}
