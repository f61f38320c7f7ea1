use std::collections::HashSet;

use tracing::info;

use super::{AssignmentService, check_assignment_fields};
use crate::errors::{ClassworkError, Result};
use crate::models::assignments::{
    entities::NewAssignment, requests::CreateAssignmentRequest, responses::AssignmentDetail,
};
use crate::services::questions::build_new_question;

const DEFAULT_TOTAL_SCORE: i32 = 100;

pub async fn create_assignment(
    service: &AssignmentService,
    teacher_id: i64,
    req: CreateAssignmentRequest,
) -> Result<AssignmentDetail> {
    let class = service
        .storage
        .get_class_by_id(req.class_id)
        .await?
        .ok_or_else(|| ClassworkError::not_found("class not found"))?;
    if class.teacher_id != teacher_id {
        return Err(ClassworkError::permission_denied(
            "teacher has no permission to create assignment for this class",
        ));
    }

    let total_score = req.total_score.unwrap_or(DEFAULT_TOTAL_SCORE);
    check_assignment_fields(&req.title, total_score)?;

    let mut orders = HashSet::with_capacity(req.questions.len());
    let mut questions = Vec::with_capacity(req.questions.len());
    for question in req.questions {
        let question = build_new_question(question)?;
        if !orders.insert(question.order) {
            return Err(ClassworkError::conflict(format!(
                "question order {} is already used in this assignment",
                question.order
            )));
        }
        questions.push(question);
    }

    let new_assignment = NewAssignment {
        class_id: class.id,
        teacher_id,
        title: req.title.trim().to_string(),
        description: req.description,
        deadline: req.deadline,
        total_score,
    };

    let (assignment, mut questions) = service
        .storage
        .create_assignment_with_questions(new_assignment, questions)
        .await?;
    questions.sort_by_key(|q| (q.order, q.id));

    info!(
        "Assignment {} created in class {} by teacher {} with {} question(s)",
        assignment.id,
        class.id,
        teacher_id,
        questions.len()
    );

    Ok(AssignmentDetail {
        assignment,
        questions,
        submission_counts: None,
    })
}
