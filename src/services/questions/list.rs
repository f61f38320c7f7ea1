use super::QuestionService;
use super::cache::load_questions;
use crate::errors::{ClassworkError, Result};
use crate::models::assignments::entities::AssignmentStatus;
use crate::models::questions::entities::Question;
use crate::models::users::entities::CurrentUser;

pub async fn list_questions(
    service: &QuestionService,
    assignment_id: i64,
    user: CurrentUser,
) -> Result<Vec<Question>> {
    let assignment = service
        .storage
        .get_assignment_by_id(assignment_id)
        .await?
        .ok_or_else(|| ClassworkError::not_found("assignment not found"))?;

    if assignment.is_owned_by(user.id) {
        return load_questions(&service.storage, &service.cache, &assignment).await;
    }

    // 草稿作业对其他人不可见
    if assignment.status == AssignmentStatus::Draft {
        return Err(ClassworkError::not_found("assignment not found"));
    }

    let questions = load_questions(&service.storage, &service.cache, &assignment).await?;
    Ok(questions.into_iter().map(Question::without_key).collect())
}
