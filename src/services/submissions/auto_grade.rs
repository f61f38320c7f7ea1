use std::collections::HashMap;

use tracing::{debug, warn};

use super::SubmissionService;
use crate::errors::{ClassworkError, Result};
use crate::models::questions::entities::Question;
use crate::models::submissions::entities::{Submission, SubmissionStatus};
use crate::services::questions::cache::load_questions;
use crate::services::validator::validate_answer;

/// 对提交中的客观题判分并重算总分
///
/// 已批改的提交保持不变，包括判分期间被教师批改的情况。简答题答案不做处理，提交状态不会改变。
/// 单题判分失败时跳过该题，其余题目照常判分。
pub async fn auto_grade_submission(
    service: &SubmissionService,
    submission_id: i64,
) -> Result<Submission> {
    let submission = service
        .storage
        .get_submission_by_id(submission_id)
        .await?
        .ok_or_else(|| ClassworkError::not_found("submission not found"))?;

    if submission.status == SubmissionStatus::Graded {
        debug!("Submission {} already graded, skip auto grading", submission_id);
        return Ok(submission);
    }

    let assignment = service.load_assignment(submission.assignment_id).await?;
    let questions = load_questions(&service.storage, &service.cache, &assignment).await?;
    let questions: HashMap<i64, &Question> = questions.iter().map(|q| (q.id, q)).collect();

    let answers = service
        .storage
        .list_answers_by_submission(submission_id)
        .await?;

    let now = chrono::Utc::now();
    let mut verdicts = Vec::with_capacity(answers.len());
    for mut answer in answers {
        let Some(question) = questions.get(&answer.question_id) else {
            continue;
        };
        if !question.question_type.is_objective() {
            continue;
        }

        match validate_answer(question, &answer.content) {
            Ok(verdict) => {
                answer.is_correct = Some(verdict.is_correct);
                answer.score = verdict.score;
                answer.graded_at = Some(now);
                verdicts.push(answer);
            }
            Err(e) => {
                warn!(
                    "Skip auto grading answer {} of question {}: {}",
                    answer.id, question.id, e
                );
            }
        }
    }

    match service
        .storage
        .save_auto_grade(submission_id, &verdicts)
        .await?
    {
        Some(submission) => Ok(submission),
        None => {
            debug!(
                "Submission {} graded during auto grading, keep teacher result",
                submission_id
            );
            service
                .storage
                .get_submission_by_id(submission_id)
                .await?
                .ok_or_else(|| ClassworkError::not_found("submission not found"))
        }
    }
}
