//! 已发布作业的题目缓存
//!
//! 发布期间题目不可变。缓存键带上发布时间，每次发布对应一份独立的题目快照，
//! 撤回发布或删除作业时失效。

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{debug, warn};

use crate::cache::{CacheResult, ObjectCache};
use crate::errors::Result;
use crate::models::assignments::entities::{Assignment, AssignmentStatus};
use crate::models::questions::entities::Question;
use crate::storage::Storage;

fn cache_key(assignment_id: i64, published_at: DateTime<Utc>) -> String {
    format!("questions:{assignment_id}:{}", published_at.timestamp())
}

/// 读取作业的题目列表，已发布作业优先走缓存
pub async fn load_questions(
    storage: &Arc<dyn Storage>,
    cache: &Arc<dyn ObjectCache>,
    assignment: &Assignment,
) -> Result<Vec<Question>> {
    let published_at = match (assignment.status, assignment.published_at) {
        (AssignmentStatus::Published, Some(published_at)) => published_at,
        _ => return storage.list_questions_by_assignment(assignment.id).await,
    };

    let key = cache_key(assignment.id, published_at);
    if let CacheResult::Found(json) = cache.get_raw(&key).await {
        match serde_json::from_str::<Vec<Question>>(&json) {
            Ok(questions) => return Ok(questions),
            Err(e) => {
                warn!("Failed to deserialize cached questions for {}: {}", key, e);
                cache.remove(&key).await;
            }
        }
    }

    let questions = storage.list_questions_by_assignment(assignment.id).await?;

    // 读取期间作业可能已被撤回发布，只缓存仍属于同一次发布的题目
    let still_published = storage
        .get_assignment_by_id(assignment.id)
        .await?
        .is_some_and(|current| {
            current.status == AssignmentStatus::Published
                && current.published_at == Some(published_at)
        });
    if !still_published {
        debug!(
            "Assignment {} changed while loading questions, skip caching",
            assignment.id
        );
        return Ok(questions);
    }

    match serde_json::to_string(&questions) {
        Ok(json) => {
            // ttl 为 0 表示使用缓存后端的默认过期时间
            cache.insert_raw(key, json, 0).await;
        }
        Err(e) => debug!("Skip caching questions of {}: {}", assignment.id, e),
    }

    Ok(questions)
}

/// 作业的发布快照失效时调用，未发布过的作业没有缓存
pub async fn invalidate_questions(
    cache: &Arc<dyn ObjectCache>,
    assignment_id: i64,
    published_at: Option<DateTime<Utc>>,
) {
    if let Some(published_at) = published_at {
        cache.remove(&cache_key(assignment_id, published_at)).await;
    }
}
