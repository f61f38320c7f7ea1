use tracing::info;

use super::AssignmentService;
use crate::errors::{ClassworkError, Result};
use crate::services::questions::cache::invalidate_questions;

pub async fn delete_assignment(
    service: &AssignmentService,
    assignment_id: i64,
    teacher_id: i64,
) -> Result<()> {
    let assignment = service.owned_assignment(assignment_id, teacher_id).await?;

    let counts = service
        .storage
        .count_submissions_by_status(assignment_id)
        .await?;
    if counts.handed_in() > 0 {
        return Err(ClassworkError::invalid_state(
            "cannot delete assignment with submissions",
        ));
    }

    if !service.storage.delete_assignment(assignment_id).await? {
        return Err(ClassworkError::not_found("assignment not found"));
    }
    invalidate_questions(&service.cache, assignment_id, assignment.published_at).await;

    info!("Assignment {} deleted by teacher {}", assignment_id, teacher_id);
    Ok(())
}
