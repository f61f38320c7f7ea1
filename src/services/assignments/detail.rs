use super::AssignmentService;
use crate::errors::{ClassworkError, Result};
use crate::models::assignments::{entities::AssignmentStatus, responses::AssignmentDetail};
use crate::models::questions::entities::Question;
use crate::models::users::entities::CurrentUser;
use crate::services::questions::cache::load_questions;

pub async fn get_assignment_detail(
    service: &AssignmentService,
    assignment_id: i64,
    user: CurrentUser,
) -> Result<AssignmentDetail> {
    let assignment = service
        .storage
        .get_assignment_by_id(assignment_id)
        .await?
        .ok_or_else(|| ClassworkError::not_found("assignment not found"))?;

    if assignment.is_owned_by(user.id) {
        let questions = load_questions(&service.storage, &service.cache, &assignment).await?;
        let counts = service
            .storage
            .count_submissions_by_status(assignment.id)
            .await?;
        return Ok(AssignmentDetail {
            assignment,
            questions,
            submission_counts: Some(counts),
        });
    }

    if assignment.status == AssignmentStatus::Draft {
        return Err(ClassworkError::not_found("assignment not found"));
    }

    let questions = load_questions(&service.storage, &service.cache, &assignment)
        .await?
        .into_iter()
        .map(Question::without_key)
        .collect();

    Ok(AssignmentDetail {
        assignment,
        questions,
        submission_counts: None,
    })
}
