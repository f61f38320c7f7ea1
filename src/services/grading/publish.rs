use tracing::info;

use super::GradingService;
use crate::errors::Result;
use crate::models::assignments::entities::Assignment;

pub async fn publish_grades(
    service: &GradingService,
    assignment_id: i64,
    teacher_id: i64,
) -> Result<Assignment> {
    let mut assignment = service.owned_assignment(assignment_id, teacher_id).await?;

    assignment.grades_published = true;
    assignment.grades_published_at = Some(chrono::Utc::now());
    let saved = service.storage.save_assignment(&assignment).await?;

    info!(
        "Grades of assignment {} published by teacher {}",
        assignment_id, teacher_id
    );
    Ok(saved)
}
