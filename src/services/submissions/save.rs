use std::collections::HashSet;

use tracing::info;

use super::detail::load_with_answers;
use super::{SubmissionService, ensure_accepting, ensure_before_deadline};
use crate::errors::{ClassworkError, Result};
use crate::models::submissions::{
    entities::SubmissionStatus,
    requests::{AnswerRequest, SaveSubmissionRequest},
    responses::SubmissionWithAnswers,
};
use crate::services::questions::cache::load_questions;

pub async fn create_or_update_submission(
    service: &SubmissionService,
    student_id: i64,
    req: SaveSubmissionRequest,
) -> Result<SubmissionWithAnswers> {
    let assignment = service.load_assignment(req.assignment_id).await?;
    ensure_accepting(&assignment)?;
    req.status.ensure_requestable()?;
    if req.status == SubmissionStatus::Submitted {
        ensure_before_deadline(&assignment)?;
    }

    let questions = load_questions(&service.storage, &service.cache, &assignment).await?;
    let question_ids: HashSet<i64> = questions.iter().map(|q| q.id).collect();
    check_answers(&req.answers, &question_ids)?;

    let submission = service
        .storage
        .upsert_submission(assignment.id, student_id, req.status, &req.answers)
        .await?;

    info!(
        "Submission {} saved as {} by student {} for assignment {}",
        submission.id, submission.status, student_id, assignment.id
    );

    if submission.status == SubmissionStatus::Submitted {
        service.auto_grade_best_effort(submission.id).await;
    }

    load_with_answers(&service.storage, submission.id).await
}

/// 每道题至多一个答案，且必须属于该作业
fn check_answers(answers: &[AnswerRequest], question_ids: &HashSet<i64>) -> Result<()> {
    let mut seen = HashSet::with_capacity(answers.len());
    for answer in answers {
        if !question_ids.contains(&answer.question_id) {
            return Err(ClassworkError::validation(format!(
                "question {} does not belong to this assignment",
                answer.question_id
            )));
        }
        if !seen.insert(answer.question_id) {
            return Err(ClassworkError::validation(format!(
                "duplicate answer for question {}",
                answer.question_id
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn answer(question_id: i64) -> AnswerRequest {
        AnswerRequest {
            question_id,
            content: "A".to_string(),
        }
    }

    #[test]
    fn test_check_answers() {
        let ids: HashSet<i64> = [1, 2].into_iter().collect();
        assert!(check_answers(&[answer(1), answer(2)], &ids).is_ok());
        assert!(check_answers(&[], &ids).is_ok());

        let err = check_answers(&[answer(3)], &ids).unwrap_err();
        assert!(matches!(err, ClassworkError::Validation(_)));

        let err = check_answers(&[answer(1), answer(1)], &ids).unwrap_err();
        assert_eq!(err.message(), "duplicate answer for question 1");
    }
}
