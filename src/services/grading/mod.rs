pub mod batch;
pub mod detail;
pub mod grade;
pub mod progress;
pub mod publish;
pub mod statistics;

use std::sync::Arc;

use crate::cache::ObjectCache;
use crate::errors::{ClassworkError, Result};
use crate::models::assignments::entities::Assignment;
use crate::models::grading::{
    requests::{BatchGradeRequest, GradeSubmissionRequest},
    responses::{AssignmentStatistics, BatchGradeResponse, GradingDetail, GradingProgress},
};
use crate::models::submissions::responses::SubmissionWithAnswers;
use crate::storage::Storage;

pub struct GradingService {
    storage: Arc<dyn Storage>,
    cache: Arc<dyn ObjectCache>,
}

impl GradingService {
    pub fn new(storage: Arc<dyn Storage>, cache: Arc<dyn ObjectCache>) -> Self {
        Self { storage, cache }
    }

    /// 人工批改一份提交
    pub async fn grade_submission(
        &self,
        submission_id: i64,
        req: GradeSubmissionRequest,
        teacher_id: i64,
    ) -> Result<SubmissionWithAnswers> {
        grade::grade_submission(self, submission_id, req, teacher_id).await
    }

    /// 批量批改，单项失败不影响其他项
    pub async fn batch_grade(
        &self,
        req: BatchGradeRequest,
        teacher_id: i64,
    ) -> Result<BatchGradeResponse> {
        batch::batch_grade(self, req, teacher_id).await
    }

    /// 发布成绩
    pub async fn publish_grades(&self, assignment_id: i64, teacher_id: i64) -> Result<Assignment> {
        publish::publish_grades(self, assignment_id, teacher_id).await
    }

    /// 批改进度
    pub async fn grading_progress(
        &self,
        assignment_id: i64,
        teacher_id: i64,
    ) -> Result<GradingProgress> {
        progress::grading_progress(self, assignment_id, teacher_id).await
    }

    /// 作业统计：提交率与已批改提交的平均分、最高分、最低分
    pub async fn assignment_statistics(
        &self,
        assignment_id: i64,
        teacher_id: i64,
    ) -> Result<AssignmentStatistics> {
        statistics::assignment_statistics(self, assignment_id, teacher_id).await
    }

    /// 批改详情：题目与学生答案一一对应
    pub async fn grading_detail(
        &self,
        submission_id: i64,
        teacher_id: i64,
    ) -> Result<GradingDetail> {
        detail::grading_detail(self, submission_id, teacher_id).await
    }

    /// 读取作业并校验所属教师，权限判断始终读数据库
    async fn owned_assignment(&self, assignment_id: i64, teacher_id: i64) -> Result<Assignment> {
        let assignment = self
            .storage
            .get_assignment_by_id(assignment_id)
            .await?
            .ok_or_else(|| ClassworkError::not_found("assignment not found"))?;
        assignment.ensure_owner(teacher_id)?;
        Ok(assignment)
    }
}
