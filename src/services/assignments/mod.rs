pub mod create;
pub mod delete;
pub mod detail;
pub mod publish;
pub mod update;

use std::sync::Arc;

use crate::cache::ObjectCache;
use crate::errors::{ClassworkError, Result};
use crate::models::assignments::{
    entities::Assignment,
    requests::{CreateAssignmentRequest, UpdateAssignmentRequest},
    responses::AssignmentDetail,
};
use crate::models::users::entities::CurrentUser;
use crate::storage::Storage;

pub struct AssignmentService {
    storage: Arc<dyn Storage>,
    cache: Arc<dyn ObjectCache>,
}

impl AssignmentService {
    pub fn new(storage: Arc<dyn Storage>, cache: Arc<dyn ObjectCache>) -> Self {
        Self { storage, cache }
    }

    /// 创建作业，可同时创建题目
    pub async fn create_assignment(
        &self,
        teacher_id: i64,
        req: CreateAssignmentRequest,
    ) -> Result<AssignmentDetail> {
        create::create_assignment(self, teacher_id, req).await
    }

    /// 修改作业基本信息
    pub async fn update_assignment(
        &self,
        assignment_id: i64,
        teacher_id: i64,
        req: UpdateAssignmentRequest,
    ) -> Result<Assignment> {
        update::update_assignment(self, assignment_id, teacher_id, req).await
    }

    /// 作业详情
    pub async fn get_assignment_detail(
        &self,
        assignment_id: i64,
        user: CurrentUser,
    ) -> Result<AssignmentDetail> {
        detail::get_assignment_detail(self, assignment_id, user).await
    }

    /// 发布作业
    pub async fn publish_assignment(&self, assignment_id: i64, teacher_id: i64) -> Result<Assignment> {
        publish::publish_assignment(self, assignment_id, teacher_id).await
    }

    /// 撤回发布
    pub async fn unpublish_assignment(
        &self,
        assignment_id: i64,
        teacher_id: i64,
    ) -> Result<Assignment> {
        publish::unpublish_assignment(self, assignment_id, teacher_id).await
    }

    /// 关闭作业
    pub async fn close_assignment(&self, assignment_id: i64, teacher_id: i64) -> Result<Assignment> {
        publish::close_assignment(self, assignment_id, teacher_id).await
    }

    /// 删除作业
    pub async fn delete_assignment(&self, assignment_id: i64, teacher_id: i64) -> Result<()> {
        delete::delete_assignment(self, assignment_id, teacher_id).await
    }

    /// 读取作业并校验所属教师
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

/// 作业标题不能为空，总分必须为正
fn check_assignment_fields(title: &str, total_score: i32) -> Result<()> {
    if title.trim().is_empty() {
        return Err(ClassworkError::validation("assignment title is required"));
    }
    if total_score <= 0 {
        return Err(ClassworkError::validation(
            "assignment total score must be positive",
        ));
    }
    Ok(())
}
