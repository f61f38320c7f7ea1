use tracing::info;

use super::detail::load_with_answers;
use super::{SubmissionService, ensure_accepting, ensure_before_deadline};
use crate::errors::{ClassworkError, Result};
use crate::models::submissions::responses::SubmissionWithAnswers;

pub async fn submit_submission(
    service: &SubmissionService,
    assignment_id: i64,
    student_id: i64,
) -> Result<SubmissionWithAnswers> {
    let submission = service
        .storage
        .get_submission_by_assignment_and_student(assignment_id, student_id)
        .await?
        .ok_or_else(|| ClassworkError::not_found("submission not found"))?;

    submission.status.submit()?;

    let assignment = service.load_assignment(assignment_id).await?;
    ensure_accepting(&assignment)?;
    ensure_before_deadline(&assignment)?;

    // 并发提交时只有一个请求能完成状态迁移
    let submission = service
        .storage
        .submit_draft(submission.id)
        .await?
        .ok_or_else(|| ClassworkError::invalid_state("assignment already submitted"))?;

    info!(
        "Submission {} submitted by student {} for assignment {}",
        submission.id, student_id, assignment_id
    );

    service.auto_grade_best_effort(submission.id).await;

    load_with_answers(&service.storage, submission.id).await
}
