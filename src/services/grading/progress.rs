use super::GradingService;
use crate::errors::Result;
use crate::models::grading::responses::GradingProgress;

pub async fn grading_progress(
    service: &GradingService,
    assignment_id: i64,
    teacher_id: i64,
) -> Result<GradingProgress> {
    let assignment = service.owned_assignment(assignment_id, teacher_id).await?;
    let counts = service
        .storage
        .count_submissions_by_status(assignment_id)
        .await?;

    Ok(GradingProgress::new(
        assignment_id,
        counts.submitted,
        counts.graded,
        assignment.grades_published,
    ))
}
