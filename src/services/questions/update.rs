use super::{QuestionService, check_question_fields, ensure_order_available};
use crate::errors::{ClassworkError, Result};
use crate::models::questions::entities::{AnswerKey, Question};
use crate::models::questions::requests::UpdateQuestionRequest;

pub async fn update_question(
    service: &QuestionService,
    question_id: i64,
    teacher_id: i64,
    req: UpdateQuestionRequest,
) -> Result<Question> {
    let mut question = service
        .storage
        .get_question_by_id(question_id)
        .await?
        .ok_or_else(|| ClassworkError::not_found("question not found"))?;

    service
        .editable_assignment(question.assignment_id, teacher_id)
        .await?;

    if let Some(content) = req.content {
        question.content = content.trim().to_string();
    }
    if let Some(score) = req.score {
        question.score = score;
    }
    if let Some(options) = req.options {
        question.options = options;
    }
    if req.correct_answer.is_some() || req.is_multiple.is_some() {
        // 只改 is_multiple 时沿用原来的标准答案文本
        let raw = match req.correct_answer {
            Some(raw) => Some(raw),
            None => question
                .answer_key
                .as_ref()
                .map(AnswerKey::encode)
                .transpose()?,
        };
        let is_multiple = req.is_multiple.unwrap_or_else(|| question.is_multiple());
        question.answer_key =
            AnswerKey::from_request(question.question_type, raw.as_deref(), is_multiple)?;
    }
    if req.reference.is_some() {
        question.reference = req.reference;
    }
    if req.explanation.is_some() {
        question.explanation = req.explanation;
    }
    if let Some(order) = req.order {
        if order != question.order {
            let siblings = service
                .storage
                .list_questions_by_assignment(question.assignment_id)
                .await?;
            ensure_order_available(&siblings, order, Some(question.id))?;
        }
        question.order = order;
    }

    check_question_fields(
        question.question_type,
        &question.content,
        question.score,
        question.order,
        &question.options,
        question.answer_key.as_ref(),
    )?;

    service.storage.save_question(&question).await
}
