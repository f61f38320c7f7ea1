use super::{AssignmentService, check_assignment_fields};
use crate::errors::{ClassworkError, Result};
use crate::models::assignments::{
    entities::{Assignment, AssignmentStatus},
    requests::UpdateAssignmentRequest,
};

pub async fn update_assignment(
    service: &AssignmentService,
    assignment_id: i64,
    teacher_id: i64,
    req: UpdateAssignmentRequest,
) -> Result<Assignment> {
    let mut assignment = service.owned_assignment(assignment_id, teacher_id).await?;

    if let Some(deadline) = req.deadline {
        // 已发布的作业只能延长截止时间
        if assignment.status == AssignmentStatus::Published && deadline < assignment.deadline {
            return Err(ClassworkError::invalid_state(
                "cannot shorten deadline for published assignment",
            ));
        }
        assignment.deadline = deadline;
    }
    if let Some(title) = req.title {
        assignment.title = title.trim().to_string();
    }
    if req.description.is_some() {
        assignment.description = req.description;
    }
    if let Some(total_score) = req.total_score {
        assignment.total_score = total_score;
    }

    check_assignment_fields(&assignment.title, assignment.total_score)?;

    service.storage.save_assignment(&assignment).await
}
