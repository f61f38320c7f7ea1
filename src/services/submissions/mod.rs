pub mod auto_grade;
pub mod detail;
pub mod save;
pub mod submit;

use std::sync::Arc;

use tracing::warn;

use crate::cache::ObjectCache;
use crate::errors::{ClassworkError, Result};
use crate::models::assignments::entities::{Assignment, AssignmentStatus};
use crate::models::submissions::{
    entities::Submission,
    requests::SaveSubmissionRequest,
    responses::{StudentSubmissionView, SubmissionWithAnswers},
};
use crate::storage::Storage;

pub struct SubmissionService {
    storage: Arc<dyn Storage>,
    cache: Arc<dyn ObjectCache>,
}

impl SubmissionService {
    pub fn new(storage: Arc<dyn Storage>, cache: Arc<dyn ObjectCache>) -> Self {
        Self { storage, cache }
    }

    /// 保存草稿或提交作业
    pub async fn create_or_update_submission(
        &self,
        student_id: i64,
        req: SaveSubmissionRequest,
    ) -> Result<SubmissionWithAnswers> {
        save::create_or_update_submission(self, student_id, req).await
    }

    /// 提交已有的草稿
    pub async fn submit_submission(
        &self,
        assignment_id: i64,
        student_id: i64,
    ) -> Result<SubmissionWithAnswers> {
        submit::submit_submission(self, assignment_id, student_id).await
    }

    /// 客观题自动判分
    pub async fn auto_grade_submission(&self, submission_id: i64) -> Result<Submission> {
        auto_grade::auto_grade_submission(self, submission_id).await
    }

    /// 学生查看自己的提交
    pub async fn get_my_submission(
        &self,
        assignment_id: i64,
        student_id: i64,
    ) -> Result<StudentSubmissionView> {
        detail::get_my_submission(self, assignment_id, student_id).await
    }

    /// 自动判分失败只记录日志，不影响提交结果
    async fn auto_grade_best_effort(&self, submission_id: i64) {
        if let Err(e) = self.auto_grade_submission(submission_id).await {
            warn!("Auto grading failed for submission {}: {}", submission_id, e);
        }
    }

    async fn load_assignment(&self, assignment_id: i64) -> Result<Assignment> {
        self.storage
            .get_assignment_by_id(assignment_id)
            .await?
            .ok_or_else(|| ClassworkError::not_found("assignment not found"))
    }
}

/// 学生只能向已发布的作业作答
fn ensure_accepting(assignment: &Assignment) -> Result<()> {
    if assignment.status != AssignmentStatus::Published {
        return Err(ClassworkError::invalid_state("assignment is not published"));
    }
    Ok(())
}

/// 截止时间之后不能提交，草稿保存不受限制
fn ensure_before_deadline(assignment: &Assignment) -> Result<()> {
    if assignment.is_past_deadline(chrono::Utc::now()) {
        return Err(ClassworkError::deadline_exceeded(
            "assignment deadline has passed",
        ));
    }
    Ok(())
}
