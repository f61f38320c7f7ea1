use super::GradingService;
use crate::errors::{ClassworkError, Result};
use crate::models::grading::responses::{GradingDetail, QuestionWithAnswer};
use crate::services::questions::cache::load_questions;

pub async fn grading_detail(
    service: &GradingService,
    submission_id: i64,
    teacher_id: i64,
) -> Result<GradingDetail> {
    let submission = service
        .storage
        .get_submission_by_id(submission_id)
        .await?
        .ok_or_else(|| ClassworkError::not_found("submission not found"))?;

    let assignment = service
        .owned_assignment(submission.assignment_id, teacher_id)
        .await?;

    let questions = load_questions(&service.storage, &service.cache, &assignment).await?;
    let mut answers = service
        .storage
        .list_answers_by_submission(submission_id)
        .await?;

    let questions = questions
        .into_iter()
        .map(|question| {
            let answer = answers
                .iter()
                .position(|a| a.question_id == question.id)
                .map(|idx| answers.swap_remove(idx));
            QuestionWithAnswer { question, answer }
        })
        .collect();

    Ok(GradingDetail {
        submission,
        questions,
    })
}
