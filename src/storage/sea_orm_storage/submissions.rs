//! 提交存储操作

use super::SeaOrmStorage;
use super::answers::{merge_answers, sum_answer_scores, update_answer, update_answer_verdict};
use crate::entity::submissions::{ActiveModel, Column, Entity as Submissions, Model};
use crate::errors::{ClassworkError, Result};
use crate::models::{
    answers::entities::Answer,
    submissions::{
        entities::{Submission, SubmissionStatus},
        requests::AnswerRequest,
    },
};
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseTransaction, DbErr, EntityTrait,
    QueryFilter, Set, SqlErr, TransactionTrait,
};

/// 唯一索引冲突说明同一学生的提交已被并发请求创建
fn map_insert_error(err: DbErr) -> ClassworkError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => {
            ClassworkError::conflict("submission for this assignment is being created concurrently")
        }
        _ => ClassworkError::database_operation(format!("创建提交失败: {err}")),
    }
}

async fn find_by_assignment_and_student<C: ConnectionTrait>(
    conn: &C,
    assignment_id: i64,
    student_id: i64,
) -> Result<Option<Model>> {
    Submissions::find()
        .filter(Column::AssignmentId.eq(assignment_id))
        .filter(Column::StudentId.eq(student_id))
        .one(conn)
        .await
        .map_err(|e| ClassworkError::database_operation(format!("查询提交失败: {e}")))
}

impl SeaOrmStorage {
    /// 通过 ID 获取提交
    pub async fn get_submission_by_id_impl(&self, submission_id: i64) -> Result<Option<Submission>> {
        let result = Submissions::find_by_id(submission_id)
            .one(&self.db)
            .await
            .map_err(|e| ClassworkError::database_operation(format!("查询提交失败: {e}")))?;

        Ok(result.map(|m| m.into_submission()))
    }

    /// 获取学生在某作业下的提交
    pub async fn get_submission_by_assignment_and_student_impl(
        &self,
        assignment_id: i64,
        student_id: i64,
    ) -> Result<Option<Submission>> {
        let result = find_by_assignment_and_student(&self.db, assignment_id, student_id).await?;
        Ok(result.map(|m| m.into_submission()))
    }

    /// 查找或创建提交并合并答案
    ///
    /// 读取、状态校验和写入都在同一个事务里完成，
    /// (assignment_id, student_id) 唯一索引保证不会出现重复提交。
    /// 状态迁移不合法时事务回滚，已存储的状态保持不变。
    pub async fn upsert_submission_impl(
        &self,
        assignment_id: i64,
        student_id: i64,
        requested: SubmissionStatus,
        answers: &[AnswerRequest],
    ) -> Result<Submission> {
        requested.ensure_requestable()?;
        let now = chrono::Utc::now().timestamp();

        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| ClassworkError::database_operation(format!("开启事务失败: {e}")))?;

        let existing = find_by_assignment_and_student(&txn, assignment_id, student_id).await?;

        let model = match existing {
            Some(model) => {
                let current: SubmissionStatus = model
                    .status
                    .parse()
                    .map_err(ClassworkError::serialization)?;
                let next = current.resave_as(requested)?;

                let first_submit = next == SubmissionStatus::Submitted && model.submitted_at.is_none();
                let mut active: ActiveModel = model.into();
                active.status = Set(next.to_string());
                if first_submit {
                    active.submitted_at = Set(Some(now));
                }
                active.updated_at = Set(now);

                active
                    .update(&txn)
                    .await
                    .map_err(|e| ClassworkError::database_operation(format!("更新提交失败: {e}")))?
            }
            None => {
                let submitted_at = (requested == SubmissionStatus::Submitted).then_some(now);
                ActiveModel {
                    assignment_id: Set(assignment_id),
                    student_id: Set(student_id),
                    status: Set(requested.to_string()),
                    score: Set(0),
                    submitted_at: Set(submitted_at),
                    graded_at: Set(None),
                    graded_by: Set(None),
                    feedback: Set(None),
                    created_at: Set(now),
                    updated_at: Set(now),
                    ..Default::default()
                }
                .insert(&txn)
                .await
                .map_err(map_insert_error)?
            }
        };

        merge_answers(&txn, model.id, answers, now).await?;

        txn.commit()
            .await
            .map_err(|e| ClassworkError::database_operation(format!("提交事务失败: {e}")))?;

        Ok(model.into_submission())
    }

    /// 草稿转为已提交
    ///
    /// 条件更新只在存储中的状态仍是草稿时生效，返回 None 表示提交已被其他请求改变。
    pub async fn submit_draft_impl(&self, submission_id: i64) -> Result<Option<Submission>> {
        let now = chrono::Utc::now().timestamp();
        let result = Submissions::update_many()
            .col_expr(
                Column::Status,
                Expr::value(SubmissionStatus::Submitted.to_string()),
            )
            .col_expr(Column::SubmittedAt, Expr::value(now))
            .col_expr(Column::UpdatedAt, Expr::value(now))
            .filter(Column::Id.eq(submission_id))
            .filter(Column::Status.eq(SubmissionStatus::DRAFT))
            .exec(&self.db)
            .await
            .map_err(|e| ClassworkError::database_operation(format!("更新提交失败: {e}")))?;

        if result.rows_affected == 0 {
            return Ok(None);
        }
        self.get_submission_by_id_impl(submission_id).await
    }

    /// 在同一事务中写入自动判分结果并重算总分
    ///
    /// 只更新答案的判分字段和提交的 score 列。提交在事务中已是 graded 时不写入任何内容并返回 None。
    pub async fn save_auto_grade_impl(
        &self,
        submission_id: i64,
        answers: &[Answer],
    ) -> Result<Option<Submission>> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| ClassworkError::database_operation(format!("开启事务失败: {e}")))?;

        let current = Submissions::find_by_id(submission_id)
            .one(&txn)
            .await
            .map_err(|e| ClassworkError::database_operation(format!("查询提交失败: {e}")))?
            .ok_or_else(|| ClassworkError::not_found("submission not found"))?;
        if current.status == SubmissionStatus::GRADED {
            rollback(txn).await?;
            return Ok(None);
        }

        for answer in answers {
            update_answer_verdict(&txn, answer).await?;
        }
        let total = sum_answer_scores(&txn, submission_id).await?;

        let result = Submissions::update_many()
            .col_expr(Column::Score, Expr::value(total))
            .col_expr(Column::UpdatedAt, Expr::value(chrono::Utc::now().timestamp()))
            .filter(Column::Id.eq(submission_id))
            .filter(Column::Status.ne(SubmissionStatus::GRADED))
            .exec(&txn)
            .await
            .map_err(|e| ClassworkError::database_operation(format!("保存判分结果失败: {e}")))?;
        if result.rows_affected == 0 {
            rollback(txn).await?;
            return Ok(None);
        }

        txn.commit()
            .await
            .map_err(|e| ClassworkError::database_operation(format!("提交事务失败: {e}")))?;

        self.get_submission_by_id_impl(submission_id).await
    }

    /// 在同一事务中保存批改后的提交及答案
    ///
    /// 提交只在存储中的状态仍为 submitted 时改为 graded，总分按事务内的答案得分重算。
    pub async fn save_graded_submission_impl(
        &self,
        submission: &Submission,
        answers: &[Answer],
    ) -> Result<Submission> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| ClassworkError::database_operation(format!("开启事务失败: {e}")))?;

        for answer in answers {
            update_answer(&txn, answer).await?;
        }
        let total = sum_answer_scores(&txn, submission.id).await?;

        let result = Submissions::update_many()
            .col_expr(
                Column::Status,
                Expr::value(SubmissionStatus::Graded.to_string()),
            )
            .col_expr(Column::Score, Expr::value(total))
            .col_expr(
                Column::GradedAt,
                Expr::value(submission.graded_at.map(|t| t.timestamp())),
            )
            .col_expr(Column::GradedBy, Expr::value(submission.graded_by))
            .col_expr(Column::Feedback, Expr::value(submission.feedback.clone()))
            .col_expr(Column::UpdatedAt, Expr::value(chrono::Utc::now().timestamp()))
            .filter(Column::Id.eq(submission.id))
            .filter(Column::Status.eq(SubmissionStatus::SUBMITTED))
            .exec(&txn)
            .await
            .map_err(|e| ClassworkError::database_operation(format!("保存批改结果失败: {e}")))?;
        if result.rows_affected == 0 {
            rollback(txn).await?;
            return Err(ClassworkError::invalid_state(
                "submission has already been graded",
            ));
        }

        txn.commit()
            .await
            .map_err(|e| ClassworkError::database_operation(format!("提交事务失败: {e}")))?;

        self.get_submission_by_id_impl(submission.id)
            .await?
            .ok_or_else(|| ClassworkError::not_found("submission not found"))
    }
}

async fn rollback(txn: DatabaseTransaction) -> Result<()> {
    txn.rollback()
        .await
        .map_err(|e| ClassworkError::database_operation(format!("回滚事务失败: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DatabaseConfig;
    use crate::models::assignments::entities::NewAssignment;
    use crate::models::classes::requests::CreateClassRequest;

    async fn storage_with_assignment() -> (SeaOrmStorage, i64) {
        let storage = SeaOrmStorage::connect(&DatabaseConfig {
            url: "sqlite::memory:".to_string(),
            pool_size: 1,
            timeout: 5,
        })
        .await
        .unwrap();
        let class = storage
            .create_class_impl(
                1,
                CreateClassRequest {
                    class_name: "并发测试".to_string(),
                    description: None,
                },
            )
            .await
            .unwrap();
        let (assignment, _) = storage
            .create_assignment_with_questions_impl(
                NewAssignment {
                    class_id: class.id,
                    teacher_id: 1,
                    title: "唯一索引".to_string(),
                    description: None,
                    deadline: chrono::Utc::now() + chrono::Duration::days(1),
                    total_score: 100,
                },
                Vec::new(),
            )
            .await
            .unwrap();
        (storage, assignment.id)
    }

    fn draft_row(assignment_id: i64, student_id: i64) -> ActiveModel {
        let now = chrono::Utc::now().timestamp();
        ActiveModel {
            assignment_id: Set(assignment_id),
            student_id: Set(student_id),
            status: Set(SubmissionStatus::Draft.to_string()),
            score: Set(0),
            submitted_at: Set(None),
            graded_at: Set(None),
            graded_by: Set(None),
            feedback: Set(None),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_duplicate_submission_maps_to_conflict() {
        let (storage, assignment_id) = storage_with_assignment().await;

        draft_row(assignment_id, 7).insert(&storage.db).await.unwrap();
        let err = draft_row(assignment_id, 7)
            .insert(&storage.db)
            .await
            .unwrap_err();

        assert!(matches!(map_insert_error(err), ClassworkError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_submit_draft_only_moves_drafts() {
        let (storage, assignment_id) = storage_with_assignment().await;
        let id = draft_row(assignment_id, 7)
            .insert(&storage.db)
            .await
            .unwrap()
            .id;

        let submitted = storage.submit_draft_impl(id).await.unwrap().unwrap();
        assert_eq!(submitted.status, SubmissionStatus::Submitted);
        assert!(submitted.submitted_at.is_some());

        assert!(storage.submit_draft_impl(id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_auto_grade_leaves_graded_row_alone() {
        let (storage, assignment_id) = storage_with_assignment().await;
        let mut row = draft_row(assignment_id, 7);
        row.status = Set(SubmissionStatus::Graded.to_string());
        row.score = Set(42);
        row.graded_by = Set(Some(1));
        let id = row.insert(&storage.db).await.unwrap().id;

        assert!(storage.save_auto_grade_impl(id, &[]).await.unwrap().is_none());

        let stored = storage.get_submission_by_id_impl(id).await.unwrap().unwrap();
        assert_eq!(stored.status, SubmissionStatus::Graded);
        assert_eq!(stored.score, 42);
        assert_eq!(stored.graded_by, Some(1));
    }
}
