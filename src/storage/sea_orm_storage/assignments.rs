//! 作业存储操作

use super::SeaOrmStorage;
use super::questions::insert_question;
use crate::entity::answers::{Column as AnswerColumn, Entity as Answers};
use crate::entity::assignments::{ActiveModel, Entity as Assignments};
use crate::entity::questions::{Column as QuestionColumn, Entity as Questions};
use crate::entity::submissions::{Column as SubmissionColumn, Entity as Submissions};
use crate::errors::{ClassworkError, Result};
use crate::models::{
    assignments::{
        entities::{Assignment, AssignmentStatus, NewAssignment},
        responses::SubmissionCounts,
    },
    questions::entities::{NewQuestion, Question},
    submissions::entities::SubmissionStatus,
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QuerySelect, Set,
    TransactionTrait, Unchanged,
};

impl SeaOrmStorage {
    /// 在同一事务中创建作业及其题目
    pub async fn create_assignment_with_questions_impl(
        &self,
        assignment: NewAssignment,
        questions: Vec<NewQuestion>,
    ) -> Result<(Assignment, Vec<Question>)> {
        let now = chrono::Utc::now().timestamp();

        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| ClassworkError::database_operation(format!("开启事务失败: {e}")))?;

        let model = ActiveModel {
            class_id: Set(assignment.class_id),
            teacher_id: Set(assignment.teacher_id),
            title: Set(assignment.title),
            description: Set(assignment.description),
            deadline: Set(assignment.deadline.timestamp()),
            total_score: Set(assignment.total_score),
            status: Set(AssignmentStatus::Draft.to_string()),
            published_at: Set(None),
            grades_published: Set(false),
            grades_published_at: Set(None),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&txn)
        .await
        .map_err(|e| ClassworkError::database_operation(format!("创建作业失败: {e}")))?;

        let mut created = Vec::with_capacity(questions.len());
        for question in questions {
            created.push(insert_question(&txn, model.id, question).await?);
        }

        txn.commit()
            .await
            .map_err(|e| ClassworkError::database_operation(format!("提交事务失败: {e}")))?;

        Ok((model.into_assignment(), created))
    }

    /// 通过 ID 获取作业
    pub async fn get_assignment_by_id_impl(&self, assignment_id: i64) -> Result<Option<Assignment>> {
        let result = Assignments::find_by_id(assignment_id)
            .one(&self.db)
            .await
            .map_err(|e| ClassworkError::database_operation(format!("查询作业失败: {e}")))?;

        Ok(result.map(|m| m.into_assignment()))
    }

    /// 保存作业
    pub async fn save_assignment_impl(&self, assignment: &Assignment) -> Result<Assignment> {
        let model = ActiveModel {
            id: Unchanged(assignment.id),
            title: Set(assignment.title.clone()),
            description: Set(assignment.description.clone()),
            deadline: Set(assignment.deadline.timestamp()),
            total_score: Set(assignment.total_score),
            status: Set(assignment.status.to_string()),
            published_at: Set(assignment.published_at.map(|t| t.timestamp())),
            grades_published: Set(assignment.grades_published),
            grades_published_at: Set(assignment.grades_published_at.map(|t| t.timestamp())),
            updated_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        let result = model
            .update(&self.db)
            .await
            .map_err(|e| ClassworkError::database_operation(format!("更新作业失败: {e}")))?;

        Ok(result.into_assignment())
    }

    /// 删除作业，连同题目、提交和答案
    pub async fn delete_assignment_impl(&self, assignment_id: i64) -> Result<bool> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| ClassworkError::database_operation(format!("开启事务失败: {e}")))?;

        let submission_ids: Vec<i64> = Submissions::find()
            .select_only()
            .column(SubmissionColumn::Id)
            .filter(SubmissionColumn::AssignmentId.eq(assignment_id))
            .into_tuple()
            .all(&txn)
            .await
            .map_err(|e| ClassworkError::database_operation(format!("查询提交失败: {e}")))?;

        if !submission_ids.is_empty() {
            Answers::delete_many()
                .filter(AnswerColumn::SubmissionId.is_in(submission_ids))
                .exec(&txn)
                .await
                .map_err(|e| ClassworkError::database_operation(format!("删除答案失败: {e}")))?;
        }

        Submissions::delete_many()
            .filter(SubmissionColumn::AssignmentId.eq(assignment_id))
            .exec(&txn)
            .await
            .map_err(|e| ClassworkError::database_operation(format!("删除提交失败: {e}")))?;

        Questions::delete_many()
            .filter(QuestionColumn::AssignmentId.eq(assignment_id))
            .exec(&txn)
            .await
            .map_err(|e| ClassworkError::database_operation(format!("删除题目失败: {e}")))?;

        let result = Assignments::delete_by_id(assignment_id)
            .exec(&txn)
            .await
            .map_err(|e| ClassworkError::database_operation(format!("删除作业失败: {e}")))?;

        txn.commit()
            .await
            .map_err(|e| ClassworkError::database_operation(format!("提交事务失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }

    /// 按状态统计作业的提交数量
    pub async fn count_submissions_by_status_impl(
        &self,
        assignment_id: i64,
    ) -> Result<SubmissionCounts> {
        Ok(SubmissionCounts {
            draft: self
                .count_submissions_with_status(assignment_id, SubmissionStatus::Draft)
                .await?,
            submitted: self
                .count_submissions_with_status(assignment_id, SubmissionStatus::Submitted)
                .await?,
            graded: self
                .count_submissions_with_status(assignment_id, SubmissionStatus::Graded)
                .await?,
        })
    }

    /// 列出作业下已批改提交的总分
    pub async fn list_graded_scores_impl(&self, assignment_id: i64) -> Result<Vec<i32>> {
        Submissions::find()
            .select_only()
            .column(SubmissionColumn::Score)
            .filter(SubmissionColumn::AssignmentId.eq(assignment_id))
            .filter(SubmissionColumn::Status.eq(SubmissionStatus::GRADED))
            .into_tuple()
            .all(&self.db)
            .await
            .map_err(|e| ClassworkError::database_operation(format!("查询提交得分失败: {e}")))
    }

    async fn count_submissions_with_status(
        &self,
        assignment_id: i64,
        status: SubmissionStatus,
    ) -> Result<i64> {
        let count = Submissions::find()
            .filter(SubmissionColumn::AssignmentId.eq(assignment_id))
            .filter(SubmissionColumn::Status.eq(status.to_string()))
            .count(&self.db)
            .await
            .map_err(|e| ClassworkError::database_operation(format!("统计提交数量失败: {e}")))?;

        Ok(count as i64)
    }
}
