use tracing::info;

use super::QuestionService;
use crate::errors::{ClassworkError, Result};

pub async fn delete_question(
    service: &QuestionService,
    question_id: i64,
    teacher_id: i64,
) -> Result<()> {
    let question = service
        .storage
        .get_question_by_id(question_id)
        .await?
        .ok_or_else(|| ClassworkError::not_found("question not found"))?;

    service
        .editable_assignment(question.assignment_id, teacher_id)
        .await?;

    if !service.storage.delete_question(question_id).await? {
        return Err(ClassworkError::not_found("question not found"));
    }

    info!(
        "Question {} removed from assignment {}",
        question_id, question.assignment_id
    );
    Ok(())
}
