pub mod cache;
pub mod create;
pub mod delete;
pub mod list;
pub mod update;

use std::collections::HashSet;
use std::sync::Arc;

use crate::cache::ObjectCache;
use crate::errors::{ClassworkError, Result};
use crate::models::assignments::entities::Assignment;
use crate::models::questions::entities::{AnswerKey, NewQuestion, Question, QuestionOption, QuestionType};
use crate::models::questions::requests::{CreateQuestionRequest, UpdateQuestionRequest};
use crate::models::users::entities::CurrentUser;
use crate::storage::Storage;

pub struct QuestionService {
    storage: Arc<dyn Storage>,
    cache: Arc<dyn ObjectCache>,
}

impl QuestionService {
    pub fn new(storage: Arc<dyn Storage>, cache: Arc<dyn ObjectCache>) -> Self {
        Self { storage, cache }
    }

    /// 向草稿作业添加题目
    pub async fn create_question(
        &self,
        assignment_id: i64,
        teacher_id: i64,
        req: CreateQuestionRequest,
    ) -> Result<Question> {
        create::create_question(self, assignment_id, teacher_id, req).await
    }

    /// 修改草稿作业中的题目
    pub async fn update_question(
        &self,
        question_id: i64,
        teacher_id: i64,
        req: UpdateQuestionRequest,
    ) -> Result<Question> {
        update::update_question(self, question_id, teacher_id, req).await
    }

    /// 删除草稿作业中的题目
    pub async fn delete_question(&self, question_id: i64, teacher_id: i64) -> Result<()> {
        delete::delete_question(self, question_id, teacher_id).await
    }

    /// 列出作业题目，非所属教师看不到标准答案
    pub async fn list_questions(
        &self,
        assignment_id: i64,
        user: CurrentUser,
    ) -> Result<Vec<Question>> {
        list::list_questions(self, assignment_id, user).await
    }

    /// 读取可编辑的作业：存在、属于该教师、处于草稿状态
    async fn editable_assignment(&self, assignment_id: i64, teacher_id: i64) -> Result<Assignment> {
        let assignment = self
            .storage
            .get_assignment_by_id(assignment_id)
            .await?
            .ok_or_else(|| ClassworkError::not_found("assignment not found"))?;
        assignment.ensure_owner(teacher_id)?;
        assignment.status.ensure_questions_editable()?;
        Ok(assignment)
    }
}

/// 校验请求并构建待写入的题目
pub fn build_new_question(req: CreateQuestionRequest) -> Result<NewQuestion> {
    let answer_key = AnswerKey::from_request(
        req.question_type,
        req.correct_answer.as_deref(),
        req.is_multiple,
    )?;

    let question = NewQuestion {
        question_type: req.question_type,
        content: req.content.trim().to_string(),
        score: req.score,
        order: req.order,
        options: req.options,
        answer_key,
        reference: req.reference,
        explanation: req.explanation,
    };

    check_question_fields(
        question.question_type,
        &question.content,
        question.score,
        question.order,
        &question.options,
        question.answer_key.as_ref(),
    )?;

    Ok(question)
}

/// 题目字段校验，创建和修改共用
pub fn check_question_fields(
    question_type: QuestionType,
    content: &str,
    score: i32,
    order: i32,
    options: &[QuestionOption],
    answer_key: Option<&AnswerKey>,
) -> Result<()> {
    if content.trim().is_empty() {
        return Err(ClassworkError::validation("question content is required"));
    }
    if score <= 0 {
        return Err(ClassworkError::validation("question score must be positive"));
    }
    if order <= 0 {
        return Err(ClassworkError::validation("question order must be positive"));
    }

    if question_type != QuestionType::Choice {
        if !options.is_empty() {
            return Err(ClassworkError::validation(format!(
                "{question_type} question does not take options"
            )));
        }
        return Ok(());
    }

    if options.is_empty() {
        return Err(ClassworkError::validation(
            "choice question requires at least one option",
        ));
    }

    let mut keys = HashSet::with_capacity(options.len());
    for option in options {
        if option.key.trim().is_empty() {
            return Err(ClassworkError::validation("option key is required"));
        }
        if !keys.insert(option.key.as_str()) {
            return Err(ClassworkError::validation(format!(
                "duplicate option key: {}",
                option.key
            )));
        }
    }

    if let Some(key) = answer_key {
        for referenced in key.option_keys() {
            if !keys.contains(referenced) {
                return Err(ClassworkError::validation(format!(
                    "correct answer references unknown option: {referenced}"
                )));
            }
        }
    }

    Ok(())
}

/// 显示顺序在作业内必须唯一
pub fn ensure_order_available(
    questions: &[Question],
    order: i32,
    except_question_id: Option<i64>,
) -> Result<()> {
    let taken = questions
        .iter()
        .any(|q| q.order == order && Some(q.id) != except_question_id);
    if taken {
        Err(ClassworkError::conflict(format!(
            "question order {order} is already used in this assignment"
        )))
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn option(key: &str) -> QuestionOption {
        QuestionOption {
            key: key.to_string(),
            value: format!("option {key}"),
        }
    }

    fn choice_request(options: Vec<QuestionOption>, answer: &str, multiple: bool) -> CreateQuestionRequest {
        CreateQuestionRequest {
            question_type: QuestionType::Choice,
            content: "pick one".to_string(),
            score: 5,
            order: 1,
            options,
            correct_answer: Some(answer.to_string()),
            is_multiple: multiple,
            reference: None,
            explanation: None,
        }
    }

    #[test]
    fn test_build_choice_question() {
        let question =
            build_new_question(choice_request(vec![option("A"), option("B")], "B", false)).unwrap();
        assert_eq!(question.answer_key, Some(AnswerKey::SingleKey("B".into())));
    }

    #[test]
    fn test_answer_key_must_reference_options() {
        let err = build_new_question(choice_request(vec![option("A"), option("B")], "C", false))
            .unwrap_err();
        assert!(matches!(err, ClassworkError::Validation(_)));

        let err = build_new_question(choice_request(
            vec![option("A"), option("B")],
            r#"["A","D"]"#,
            true,
        ))
        .unwrap_err();
        assert!(err.message().contains("D"));
    }

    #[test]
    fn test_duplicate_option_keys() {
        let err = build_new_question(choice_request(vec![option("A"), option("A")], "A", false))
            .unwrap_err();
        assert_eq!(err, ClassworkError::validation("duplicate option key: A"));
    }

    #[test]
    fn test_score_and_order_must_be_positive() {
        let mut req = choice_request(vec![option("A")], "A", false);
        req.score = 0;
        assert!(build_new_question(req).is_err());

        let mut req = choice_request(vec![option("A")], "A", false);
        req.order = 0;
        assert!(build_new_question(req).is_err());
    }

    #[test]
    fn test_essay_rejects_options() {
        let err = check_question_fields(QuestionType::Essay, "why?", 10, 1, &[option("A")], None)
            .unwrap_err();
        assert!(matches!(err, ClassworkError::Validation(_)));
        assert!(check_question_fields(QuestionType::Essay, "why?", 10, 1, &[], None).is_ok());
    }
}
