use std::sync::Arc;

use super::SubmissionService;
use crate::errors::{ClassworkError, Result};
use crate::models::submissions::responses::{StudentSubmissionView, SubmissionWithAnswers};
use crate::storage::Storage;

/// 读取提交及全部答案
pub async fn load_with_answers(
    storage: &Arc<dyn Storage>,
    submission_id: i64,
) -> Result<SubmissionWithAnswers> {
    let submission = storage
        .get_submission_by_id(submission_id)
        .await?
        .ok_or_else(|| ClassworkError::not_found("submission not found"))?;
    let answers = storage.list_answers_by_submission(submission_id).await?;

    Ok(SubmissionWithAnswers {
        submission,
        answers,
    })
}

pub async fn get_my_submission(
    service: &SubmissionService,
    assignment_id: i64,
    student_id: i64,
) -> Result<StudentSubmissionView> {
    let assignment = service.load_assignment(assignment_id).await?;

    let submission = service
        .storage
        .get_submission_by_assignment_and_student(assignment_id, student_id)
        .await?
        .ok_or_else(|| ClassworkError::not_found("submission not found"))?;

    let full = load_with_answers(&service.storage, submission.id).await?;
    Ok(StudentSubmissionView::new(full, assignment.grades_published))
}
