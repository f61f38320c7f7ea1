use super::GradingService;
use crate::errors::Result;
use crate::models::grading::responses::AssignmentStatistics;

pub async fn assignment_statistics(
    service: &GradingService,
    assignment_id: i64,
    teacher_id: i64,
) -> Result<AssignmentStatistics> {
    service.owned_assignment(assignment_id, teacher_id).await?;

    let counts = service
        .storage
        .count_submissions_by_status(assignment_id)
        .await?;
    let scores = service.storage.list_graded_scores(assignment_id).await?;

    Ok(AssignmentStatistics::new(assignment_id, &counts, &scores))
}
