//! 答案存储操作

use super::SeaOrmStorage;
use crate::entity::answers::{ActiveModel, Column, Entity as Answers};
use crate::errors::{ClassworkError, Result};
use crate::models::{answers::entities::Answer, submissions::requests::AnswerRequest};
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder,
    QuerySelect, Set, Unchanged,
};

/// 按题目合并答案：已有答案更新内容，没有的新建，请求中未出现的题目保持不变
///
/// 内容发生变化的答案会清空之前的判分结果。
pub(super) async fn merge_answers<C: ConnectionTrait>(
    conn: &C,
    submission_id: i64,
    answers: &[AnswerRequest],
    now: i64,
) -> Result<()> {
    for req in answers {
        let existing = Answers::find()
            .filter(Column::SubmissionId.eq(submission_id))
            .filter(Column::QuestionId.eq(req.question_id))
            .one(conn)
            .await
            .map_err(|e| ClassworkError::database_operation(format!("查询答案失败: {e}")))?;

        match existing {
            Some(model) if model.content == req.content => {}
            Some(model) => {
                let mut active: ActiveModel = model.into();
                active.content = Set(req.content.clone());
                active.score = Set(0);
                active.is_correct = Set(None);
                active.graded_at = Set(None);
                active.updated_at = Set(now);
                active
                    .update(conn)
                    .await
                    .map_err(|e| ClassworkError::database_operation(format!("更新答案失败: {e}")))?;
            }
            None => {
                ActiveModel {
                    submission_id: Set(submission_id),
                    question_id: Set(req.question_id),
                    content: Set(req.content.clone()),
                    score: Set(0),
                    is_correct: Set(None),
                    graded_at: Set(None),
                    feedback: Set(None),
                    created_at: Set(now),
                    updated_at: Set(now),
                    ..Default::default()
                }
                .insert(conn)
                .await
                .map_err(|e| ClassworkError::database_operation(format!("创建答案失败: {e}")))?;
            }
        }
    }

    Ok(())
}

/// 保存教师批改的判分字段，可在事务中调用
pub(super) async fn update_answer<C: ConnectionTrait>(conn: &C, answer: &Answer) -> Result<()> {
    ActiveModel {
        id: Unchanged(answer.id),
        score: Set(answer.score),
        is_correct: Set(answer.is_correct),
        graded_at: Set(answer.graded_at.map(|t| t.timestamp())),
        feedback: Set(answer.feedback.clone()),
        updated_at: Set(chrono::Utc::now().timestamp()),
        ..Default::default()
    }
    .update(conn)
    .await
    .map_err(|e| ClassworkError::database_operation(format!("更新答案失败: {e}")))?;

    Ok(())
}

/// 写入自动判分结果
///
/// 只有答案内容与判分时读到的内容一致才会写入，学生在判分期间改过的答案保持清空状态。
pub(super) async fn update_answer_verdict<C: ConnectionTrait>(
    conn: &C,
    answer: &Answer,
) -> Result<bool> {
    let result = Answers::update_many()
        .col_expr(Column::Score, Expr::value(answer.score))
        .col_expr(Column::IsCorrect, Expr::value(answer.is_correct))
        .col_expr(
            Column::GradedAt,
            Expr::value(answer.graded_at.map(|t| t.timestamp())),
        )
        .col_expr(Column::UpdatedAt, Expr::value(chrono::Utc::now().timestamp()))
        .filter(Column::Id.eq(answer.id))
        .filter(Column::Content.eq(answer.content.as_str()))
        .exec(conn)
        .await
        .map_err(|e| ClassworkError::database_operation(format!("更新答案失败: {e}")))?;

    Ok(result.rows_affected > 0)
}

/// 提交下全部答案的得分之和
pub(super) async fn sum_answer_scores<C: ConnectionTrait>(
    conn: &C,
    submission_id: i64,
) -> Result<i32> {
    let scores: Vec<i32> = Answers::find()
        .select_only()
        .column(Column::Score)
        .filter(Column::SubmissionId.eq(submission_id))
        .into_tuple()
        .all(conn)
        .await
        .map_err(|e| ClassworkError::database_operation(format!("查询答案得分失败: {e}")))?;

    Ok(scores.into_iter().sum())
}

impl SeaOrmStorage {
    /// 列出提交的全部答案
    pub async fn list_answers_by_submission_impl(&self, submission_id: i64) -> Result<Vec<Answer>> {
        let models = Answers::find()
            .filter(Column::SubmissionId.eq(submission_id))
            .order_by_asc(Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| ClassworkError::database_operation(format!("查询答案列表失败: {e}")))?;

        Ok(models.into_iter().map(|m| m.into_answer()).collect())
    }
}
