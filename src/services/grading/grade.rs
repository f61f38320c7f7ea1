use std::collections::HashMap;

use tracing::{info, warn};

use super::GradingService;
use crate::errors::{ClassworkError, Result};
use crate::models::grading::requests::{GradeAnswerRequest, GradeSubmissionRequest};
use crate::models::questions::entities::Question;
use crate::models::submissions::responses::SubmissionWithAnswers;
use crate::services::questions::cache::load_questions;

pub async fn grade_submission(
    service: &GradingService,
    submission_id: i64,
    req: GradeSubmissionRequest,
    teacher_id: i64,
) -> Result<SubmissionWithAnswers> {
    let mut submission = service
        .storage
        .get_submission_by_id(submission_id)
        .await?
        .ok_or_else(|| ClassworkError::not_found("submission not found"))?;

    submission.status.ensure_gradable()?;

    let assignment = service
        .owned_assignment(submission.assignment_id, teacher_id)
        .await?;

    let questions = load_questions(&service.storage, &service.cache, &assignment).await?;
    let questions: HashMap<i64, &Question> = questions.iter().map(|q| (q.id, q)).collect();

    // 先校验全部分数，再写入
    check_scores(&req.answers, &questions)?;

    let mut answers = service
        .storage
        .list_answers_by_submission(submission_id)
        .await?;
    let mut graded = Vec::with_capacity(req.answers.len());

    let now = chrono::Utc::now();
    for grade in &req.answers {
        if !questions.contains_key(&grade.question_id) {
            warn!(
                "Skip grading unknown question {} in submission {}",
                grade.question_id, submission_id
            );
            continue;
        }
        let Some(answer) = answers
            .iter_mut()
            .find(|a| a.question_id == grade.question_id)
        else {
            warn!(
                "Skip grading question {} without answer in submission {}",
                grade.question_id, submission_id
            );
            continue;
        };

        answer.score = grade.score;
        answer.is_correct = Some(grade.score > 0);
        answer.feedback = grade.feedback.clone();
        answer.graded_at = Some(now);
        graded.push(answer.clone());
    }

    // 状态和总分由存储层在事务内写入
    submission.graded_at = Some(now);
    submission.graded_by = Some(teacher_id);
    submission.feedback = req.overall_feedback;

    let submission = service
        .storage
        .save_graded_submission(&submission, &graded)
        .await?;

    info!(
        "Submission {} graded by teacher {} with score {}",
        submission_id, teacher_id, submission.score
    );

    let answers = service
        .storage
        .list_answers_by_submission(submission_id)
        .await?;

    Ok(SubmissionWithAnswers {
        submission,
        answers,
    })
}

/// 每题得分必须在 0 到题目分值之间，未知题目留给写入阶段跳过
fn check_scores(grades: &[GradeAnswerRequest], questions: &HashMap<i64, &Question>) -> Result<()> {
    for grade in grades {
        let Some(question) = questions.get(&grade.question_id) else {
            continue;
        };
        if grade.score < 0 || grade.score > question.score {
            return Err(ClassworkError::validation(format!(
                "score for question {} must be between 0 and {}",
                question.id, question.score
            )));
        }
    }
    Ok(())
}
