use tracing::info;

use super::{QuestionService, build_new_question, ensure_order_available};
use crate::errors::Result;
use crate::models::questions::entities::Question;
use crate::models::questions::requests::CreateQuestionRequest;

pub async fn create_question(
    service: &QuestionService,
    assignment_id: i64,
    teacher_id: i64,
    req: CreateQuestionRequest,
) -> Result<Question> {
    let assignment = service.editable_assignment(assignment_id, teacher_id).await?;

    let question = build_new_question(req)?;
    let existing = service
        .storage
        .list_questions_by_assignment(assignment.id)
        .await?;
    ensure_order_available(&existing, question.order, None)?;

    let created = service
        .storage
        .create_question(assignment.id, question)
        .await?;

    info!(
        "Question {} added to assignment {} by teacher {}",
        created.id, assignment.id, teacher_id
    );
    Ok(created)
}
