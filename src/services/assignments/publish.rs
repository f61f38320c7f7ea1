use tracing::info;

use super::AssignmentService;
use crate::errors::{ClassworkError, Result};
use crate::models::assignments::entities::Assignment;
use crate::services::questions::cache::invalidate_questions;

pub async fn publish_assignment(
    service: &AssignmentService,
    assignment_id: i64,
    teacher_id: i64,
) -> Result<Assignment> {
    let mut assignment = service.owned_assignment(assignment_id, teacher_id).await?;

    assignment.status = assignment.status.publish()?;
    assignment.published_at = Some(chrono::Utc::now());
    let saved = service.storage.save_assignment(&assignment).await?;
    // 同一秒内撤回再发布会得到相同的缓存键
    invalidate_questions(&service.cache, assignment_id, saved.published_at).await;

    info!("Assignment {} published by teacher {}", assignment_id, teacher_id);
    Ok(saved)
}

pub async fn unpublish_assignment(
    service: &AssignmentService,
    assignment_id: i64,
    teacher_id: i64,
) -> Result<Assignment> {
    let mut assignment = service.owned_assignment(assignment_id, teacher_id).await?;

    let next = assignment.status.unpublish()?;
    let counts = service
        .storage
        .count_submissions_by_status(assignment_id)
        .await?;
    if counts.handed_in() > 0 {
        return Err(ClassworkError::invalid_state(
            "cannot unpublish assignment with submissions",
        ));
    }

    let published_at = assignment.published_at;
    assignment.status = next;
    assignment.published_at = None;
    let saved = service.storage.save_assignment(&assignment).await?;
    invalidate_questions(&service.cache, assignment_id, published_at).await;

    info!("Assignment {} unpublished by teacher {}", assignment_id, teacher_id);
    Ok(saved)
}

pub async fn close_assignment(
    service: &AssignmentService,
    assignment_id: i64,
    teacher_id: i64,
) -> Result<Assignment> {
    let mut assignment = service.owned_assignment(assignment_id, teacher_id).await?;

    assignment.status = assignment.status.close()?;
    let saved = service.storage.save_assignment(&assignment).await?;
    // 关闭后不再按已发布作业缓存
    invalidate_questions(&service.cache, assignment_id, saved.published_at).await;

    info!("Assignment {} closed by teacher {}", assignment_id, teacher_id);
    Ok(saved)
}
