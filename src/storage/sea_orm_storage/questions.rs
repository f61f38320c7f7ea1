//! 题目存储操作
//!
//! 标准答案与选项在这里与数据库文本列互相转换。

use super::SeaOrmStorage;
use crate::entity::answers::{Column as AnswerColumn, Entity as Answers};
use crate::entity::questions::{ActiveModel, Column, Entity as Questions};
use crate::errors::{ClassworkError, Result};
use crate::models::questions::entities::{AnswerKey, NewQuestion, Question, QuestionOption};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder, Set,
    TransactionTrait, Unchanged,
};

/// 选项编码为 JSON 文本，非选择题不保存选项
fn encode_options(options: &[QuestionOption]) -> Result<Option<String>> {
    if options.is_empty() {
        Ok(None)
    } else {
        Ok(Some(serde_json::to_string(options)?))
    }
}

fn encode_answer_key(key: Option<&AnswerKey>) -> Result<Option<String>> {
    key.map(AnswerKey::encode).transpose()
}

/// 插入题目，可在事务中调用
pub(super) async fn insert_question<C: ConnectionTrait>(
    conn: &C,
    assignment_id: i64,
    question: NewQuestion,
) -> Result<Question> {
    let now = chrono::Utc::now().timestamp();

    let model = ActiveModel {
        assignment_id: Set(assignment_id),
        question_type: Set(question.question_type.to_string()),
        content: Set(question.content),
        score: Set(question.score),
        sort_order: Set(question.order),
        options: Set(encode_options(&question.options)?),
        correct_answer: Set(encode_answer_key(question.answer_key.as_ref())?),
        reference: Set(question.reference),
        explanation: Set(question.explanation),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    };

    let result = model
        .insert(conn)
        .await
        .map_err(|e| ClassworkError::database_operation(format!("创建题目失败: {e}")))?;

    result.into_question()
}

impl SeaOrmStorage {
    /// 创建题目
    pub async fn create_question_impl(
        &self,
        assignment_id: i64,
        question: NewQuestion,
    ) -> Result<Question> {
        insert_question(&self.db, assignment_id, question).await
    }

    /// 通过 ID 获取题目
    pub async fn get_question_by_id_impl(&self, question_id: i64) -> Result<Option<Question>> {
        let result = Questions::find_by_id(question_id)
            .one(&self.db)
            .await
            .map_err(|e| ClassworkError::database_operation(format!("查询题目失败: {e}")))?;

        result.map(|m| m.into_question()).transpose()
    }

    /// 保存题目
    pub async fn save_question_impl(&self, question: &Question) -> Result<Question> {
        let model = ActiveModel {
            id: Unchanged(question.id),
            content: Set(question.content.clone()),
            score: Set(question.score),
            sort_order: Set(question.order),
            options: Set(encode_options(&question.options)?),
            correct_answer: Set(encode_answer_key(question.answer_key.as_ref())?),
            reference: Set(question.reference.clone()),
            explanation: Set(question.explanation.clone()),
            updated_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        let result = model
            .update(&self.db)
            .await
            .map_err(|e| ClassworkError::database_operation(format!("更新题目失败: {e}")))?;

        result.into_question()
    }

    /// 删除题目及学生对该题的答案
    pub async fn delete_question_impl(&self, question_id: i64) -> Result<bool> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| ClassworkError::database_operation(format!("开启事务失败: {e}")))?;

        Answers::delete_many()
            .filter(AnswerColumn::QuestionId.eq(question_id))
            .exec(&txn)
            .await
            .map_err(|e| ClassworkError::database_operation(format!("删除题目答案失败: {e}")))?;

        let result = Questions::delete_by_id(question_id)
            .exec(&txn)
            .await
            .map_err(|e| ClassworkError::database_operation(format!("删除题目失败: {e}")))?;

        txn.commit()
            .await
            .map_err(|e| ClassworkError::database_operation(format!("提交事务失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }

    /// 按显示顺序列出作业的题目
    pub async fn list_questions_by_assignment_impl(
        &self,
        assignment_id: i64,
    ) -> Result<Vec<Question>> {
        let models = Questions::find()
            .filter(Column::AssignmentId.eq(assignment_id))
            .order_by_asc(Column::SortOrder)
            .order_by_asc(Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| ClassworkError::database_operation(format!("查询题目列表失败: {e}")))?;

        models.into_iter().map(|m| m.into_question()).collect()
    }
}
